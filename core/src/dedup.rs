use crate::document::DocumentId;
use crate::interner::Word;
use crate::server::SearchServer;
use std::collections::{BTreeSet, HashSet};

/// Remove every document whose set of distinct words equals that of a
/// document with a lower id. Returns the removed ids, ascending.
pub fn remove_duplicates(server: &SearchServer) -> Vec<DocumentId> {
    let mut seen: HashSet<BTreeSet<Word>> = HashSet::new();
    let mut duplicates = Vec::new();
    for id in server.document_ids() {
        let words: BTreeSet<Word> = server.word_frequencies(id).into_keys().collect();
        if !seen.insert(words) {
            duplicates.push(id);
        }
    }

    for &id in &duplicates {
        tracing::info!(id, "found duplicate document");
        server.remove_document(id);
    }
    duplicates
}
