use crate::document::{compute_average_rating, Document, DocumentId, DocumentStatus};
use crate::error::{Error, Result};
use crate::execution::{ExecutionPolicy, SEQ};
use crate::index::{DocMeta, InvertedIndex};
use crate::interner::{Interner, Word};
use crate::query::Query;
use crate::ranking::top_documents;
use crate::relevance::find_all_documents;
use crate::tokenizer::{split_into_words_no_stop, StopWords};
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// The search engine.
///
/// All methods take `&self`. Adds and removals hold the index write lock,
/// everything else holds the read lock, so readers always see whole
/// documents. Word interning happens before the write lock is taken and is
/// synchronized separately, which lets concurrent adds tokenize in parallel.
/// Search predicates run after the read lock is released.
#[derive(Debug)]
pub struct SearchServer {
    interner: Interner,
    stop_words: StopWords,
    index: RwLock<InvertedIndex>,
}

impl SearchServer {
    /// Stop words given as one space-separated string.
    pub fn new(stop_words: &str) -> Result<Self> {
        Self::with_stop_words([stop_words])
    }

    /// Stop words given as a collection. Items are split on spaces just like
    /// the string form, so blank items add nothing.
    pub fn with_stop_words<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let interner = Interner::new();
        let stop_words = StopWords::new(stop_words, &interner)?;
        Ok(Self { interner, stop_words, index: RwLock::new(InvertedIndex::new()) })
    }

    pub fn add_document(&self, id: DocumentId, text: &str, status: DocumentStatus, ratings: &[i32]) -> Result<()> {
        if id < 0 {
            return Err(Error::invalid_document(id, "id must not be negative"));
        }
        if self.index.read().contains(id) {
            return Err(Error::invalid_document(id, "id is already present"));
        }
        let words = split_into_words_no_stop(text, &self.stop_words)
            .map_err(|word| Error::invalid_document(id, format!("word {word:?} contains control characters")))?;
        let words: Vec<Word> = words.into_iter().map(|word| self.interner.intern(word)).collect();
        let meta = DocMeta { rating: compute_average_rating(ratings), status };

        // Re-checked under the write lock: another add may have won the race.
        self.index.write().insert(id, &words, meta)?;
        tracing::debug!(id, words = words.len(), ?status, rating = meta.rating, "document added");
        Ok(())
    }

    pub fn remove_document(&self, id: DocumentId) {
        self.remove_document_in(SEQ, id)
    }

    pub fn remove_document_in<E: ExecutionPolicy>(&self, policy: E, id: DocumentId) {
        if self.index.write().remove(policy, id) {
            tracing::debug!(id, ?policy, "document removed");
        }
    }

    /// Top documents with status `Actual`.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_with_status(raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_with_status(&self, raw_query: &str, status: DocumentStatus) -> Result<Vec<Document>> {
        self.find_top_documents_by(raw_query, |_, doc_status, _| doc_status == status)
    }

    pub fn find_top_documents_by<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: FnMut(DocumentId, DocumentStatus, i32) -> bool,
    {
        self.find_top_documents_in(SEQ, raw_query, predicate)
    }

    pub fn find_top_documents_in<E, P>(&self, policy: E, raw_query: &str, mut predicate: P) -> Result<Vec<Document>>
    where
        E: ExecutionPolicy,
        P: FnMut(DocumentId, DocumentStatus, i32) -> bool,
    {
        let query = Query::parse(raw_query, &self.stop_words)?;
        let scored = find_all_documents(&self.index.read(), policy, &query);
        // The read guard is released here, so the predicate may call back into the server.
        let matched = scored.into_iter().filter(|doc| predicate(doc.id, doc.status, doc.rating));
        Ok(top_documents(matched))
    }

    /// Plus words of the query found in the document, or nothing at all if
    /// the document contains any minus word.
    pub fn match_document(&self, raw_query: &str, id: DocumentId) -> Result<(Vec<Word>, DocumentStatus)> {
        self.match_document_in(SEQ, raw_query, id)
    }

    /// Sequential matching returns words in query order; parallel matching
    /// returns them sorted.
    pub fn match_document_in<E: ExecutionPolicy>(
        &self,
        policy: E,
        raw_query: &str,
        id: DocumentId,
    ) -> Result<(Vec<Word>, DocumentStatus)> {
        let index = self.index.read();
        let meta = index.meta(id).ok_or(Error::NotFound(id))?;
        let query = Query::parse(raw_query, &self.stop_words)?;

        if policy.any(&query.minus_words, |word| index.document_word(id, word).is_some()) {
            return Ok((Vec::new(), meta.status));
        }
        let mut words = policy.filter_map(&query.plus_words, |word| index.document_word(id, word));
        policy.finish_matches(&mut words);
        Ok((words, meta.status))
    }

    /// Copy of the document's word frequencies; empty for unknown ids.
    pub fn word_frequencies(&self, id: DocumentId) -> BTreeMap<Word, f64> {
        self.index.read().word_frequencies(id).cloned().unwrap_or_default()
    }

    pub fn document_count(&self) -> usize { self.index.read().document_count() }

    /// Live document ids, ascending.
    pub fn document_ids(&self) -> Vec<DocumentId> { self.index.read().document_ids().collect() }

    pub fn stop_words(&self) -> &StopWords { &self.stop_words }

    /// Number of distinct words ever interned, stop words included.
    pub fn interned_words(&self) -> usize { self.interner.len() }

    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool { self.index.read().is_consistent() }
}
