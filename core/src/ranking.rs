use crate::document::Document;
use std::cmp::Ordering;

pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Relevances closer than this are treated as equal and ranked by rating.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// Ranking order: higher relevance first; near-equal relevance falls back to
/// higher rating first.
pub fn compare(lhs: &Document, rhs: &Document) -> Ordering {
    if (lhs.relevance - rhs.relevance).abs() < RELEVANCE_EPSILON {
        rhs.rating.cmp(&lhs.rating)
    } else {
        rhs.relevance.partial_cmp(&lhs.relevance).unwrap_or(Ordering::Equal)
    }
}

/// Keep the best `MAX_RESULT_DOCUMENT_COUNT` documents, best first.
///
/// Bounded insertion rather than a full sort: the epsilon rule is not
/// transitive, and this never needs it to be.
pub fn top_documents(documents: impl IntoIterator<Item = Document>) -> Vec<Document> {
    let mut top: Vec<Document> = Vec::with_capacity(MAX_RESULT_DOCUMENT_COUNT + 1);
    for doc in documents {
        let position = top.iter().position(|kept| compare(&doc, kept) == Ordering::Less).unwrap_or(top.len());
        if position < MAX_RESULT_DOCUMENT_COUNT {
            top.insert(position, doc);
            top.truncate(MAX_RESULT_DOCUMENT_COUNT);
        }
    }
    top
}
