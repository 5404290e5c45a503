use crate::document::{DocumentId, DocumentStatus};
use crate::error::{Error, Result};
use crate::execution::ExecutionPolicy;
use crate::interner::Word;
use std::collections::{BTreeMap, HashMap};

/// Documents containing one word, with the word's term frequency in each.
pub type Postings = BTreeMap<DocumentId, f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocMeta {
    pub rating: i32,
    pub status: DocumentStatus,
}

#[derive(Debug, Clone)]
struct DocEntry {
    meta: DocMeta,
    /// Forward index: mirrors this document's postings.
    word_frequencies: BTreeMap<Word, f64>,
}

/// Inverted index plus the per-document store it is kept consistent with.
///
/// Every `(word, doc, tf)` in `postings` has a matching `(doc, word, tf)` in
/// the document's forward index and vice versa. Buckets that lose their last
/// document are dropped, so a word present in `postings` always occurs in at
/// least one live document.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings: HashMap<Word, Postings>,
    docs: BTreeMap<DocumentId, DocEntry>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Index a document made of `words` (stop words already removed). Term
    /// frequency is occurrences over the number of words.
    pub fn insert(&mut self, id: DocumentId, words: &[Word], meta: DocMeta) -> Result<()> {
        if id < 0 {
            return Err(Error::invalid_document(id, "id must not be negative"));
        }
        if self.docs.contains_key(&id) {
            return Err(Error::invalid_document(id, "id is already present"));
        }

        let mut counts: BTreeMap<Word, usize> = BTreeMap::new();
        for word in words {
            *counts.entry(word.clone()).or_insert(0) += 1;
        }
        let total = words.len() as f64;
        let word_frequencies: BTreeMap<Word, f64> =
            counts.into_iter().map(|(word, count)| (word, count as f64 / total)).collect();

        for (word, &tf) in &word_frequencies {
            self.postings.entry(word.clone()).or_default().insert(id, tf);
        }
        self.docs.insert(id, DocEntry { meta, word_frequencies });
        Ok(())
    }

    /// Remove a document and every back-reference to it. Returns false when
    /// the id was not present.
    pub fn remove<E: ExecutionPolicy>(&mut self, policy: E, id: DocumentId) -> bool {
        let Some(entry) = self.docs.remove(&id) else { return false };

        // Detach the affected buckets so they can be edited independently.
        let mut buckets: Vec<(Word, Postings)> =
            entry.word_frequencies.keys().filter_map(|word| self.postings.remove_entry(word.as_str())).collect();
        policy.for_each_mut(&mut buckets, |(_, postings)| {
            postings.remove(&id);
        });
        for (word, postings) in buckets {
            if !postings.is_empty() {
                self.postings.insert(word, postings);
            }
        }
        true
    }

    pub fn contains(&self, id: DocumentId) -> bool { self.docs.contains_key(&id) }

    pub fn document_count(&self) -> usize { self.docs.len() }

    /// Live ids in ascending order.
    pub fn document_ids(&self) -> impl Iterator<Item = DocumentId> + '_ { self.docs.keys().copied() }

    pub fn meta(&self, id: DocumentId) -> Option<DocMeta> { self.docs.get(&id).map(|e| e.meta) }

    pub fn word_frequencies(&self, id: DocumentId) -> Option<&BTreeMap<Word, f64>> {
        self.docs.get(&id).map(|e| &e.word_frequencies)
    }

    /// The canonical handle for `word` if document `id` contains it.
    pub fn document_word(&self, id: DocumentId, word: &str) -> Option<Word> {
        self.docs.get(&id)?.word_frequencies.get_key_value(word).map(|(w, _)| w.clone())
    }

    pub fn postings(&self, word: &str) -> Option<&Postings> { self.postings.get(word) }

    /// `ln(live documents / documents containing word)`, if any contain it.
    pub fn idf(&self, word: &str) -> Option<f64> {
        let postings = self.postings.get(word)?;
        Some((self.docs.len() as f64 / postings.len() as f64).ln())
    }

    pub fn vocabulary_len(&self) -> usize { self.postings.len() }

    /// Check that inverted and forward indexes mirror each other.
    pub fn is_consistent(&self) -> bool {
        let forward_ok = self.docs.iter().all(|(id, entry)| {
            entry.word_frequencies.iter().all(|(word, tf)| {
                self.postings.get(word.as_str()).and_then(|p| p.get(id)) == Some(tf)
            })
        });
        let inverted_ok = self.postings.iter().all(|(word, postings)| {
            !postings.is_empty()
                && postings.iter().all(|(id, tf)| {
                    self.docs.get(id).and_then(|e| e.word_frequencies.get(word.as_str())) == Some(tf)
                })
        });
        forward_ok && inverted_ok
    }
}
