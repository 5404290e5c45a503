use crate::document::Document;
use crate::execution::{ExecutionPolicy, Scorer};
use crate::index::{InvertedIndex, Postings};
use crate::query::Query;

/// Score every live document matching `query`. Results come out in
/// ascending id order, unranked and unfiltered.
///
/// Plus-word accumulation finishes completely before minus words are
/// applied, so a late plus-word update can never bring back an excluded
/// document. The returned documents own their metadata and hold no borrow
/// of the index.
pub fn find_all_documents<E: ExecutionPolicy>(index: &InvertedIndex, policy: E, query: &Query<'_>) -> Vec<Document> {
    let plus: Vec<(f64, &Postings)> = query
        .plus_words
        .iter()
        .filter_map(|word| Some((index.idf(word)?, index.postings(word)?)))
        .collect();
    if plus.is_empty() {
        return Vec::new();
    }
    let minus: Vec<&Postings> = query.minus_words.iter().filter_map(|word| index.postings(word)).collect();
    tracing::trace!(plus = plus.len(), minus = minus.len(), ?policy, "scoring query");

    let mut scorer = policy.scorer();
    scorer.accumulate(&plus);
    scorer.exclude(&minus);

    scorer
        .into_scores()
        .into_iter()
        .filter_map(|(id, relevance)| {
            let meta = index.meta(id)?;
            Some(Document { id, relevance, rating: meta.rating, status: meta.status })
        })
        .collect()
}
