//! Invocation modes.
//!
//! Scoring, matching and removal are written once against [`ExecutionPolicy`];
//! [`Sequential`] runs them on the calling thread in a deterministic order,
//! [`Parallel`] spreads them over the rayon pool and joins before returning.

use crate::concurrent_map::{ConcurrentMap, DEFAULT_SHARD_COUNT};
use crate::document::DocumentId;
use crate::index::Postings;
use crate::interner::Word;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fmt::Debug;

/// Accumulates per-document relevance for one query.
pub trait Scorer {
    /// Add `idf * tf` to every document in each `(idf, postings)` pair.
    fn accumulate(&mut self, terms: &[(f64, &Postings)]);

    /// Drop every document listed in any of `terms`, whatever its score.
    fn exclude(&mut self, terms: &[&Postings]);

    fn into_scores(self) -> BTreeMap<DocumentId, f64>;
}

pub trait ExecutionPolicy: Copy + Send + Sync + Debug {
    type Scorer: Scorer;

    fn scorer(self) -> Self::Scorer;

    fn any<T, F>(self, items: &[T], predicate: F) -> bool
    where
        T: Sync,
        F: Fn(&T) -> bool + Sync + Send;

    fn filter_map<T, R, F>(self, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> Option<R> + Sync + Send;

    fn for_each_mut<T, F>(self, items: &mut [T], f: F)
    where
        T: Send,
        F: Fn(&mut T) + Sync + Send;

    /// Final shaping of the words returned by a document match.
    fn finish_matches(self, words: &mut Vec<Word>);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Sequential;

#[derive(Debug, Clone, Copy, Default)]
pub struct Parallel;

pub const SEQ: Sequential = Sequential;
pub const PAR: Parallel = Parallel;

#[derive(Debug, Default)]
pub struct SequentialScorer {
    scores: BTreeMap<DocumentId, f64>,
}

impl Scorer for SequentialScorer {
    fn accumulate(&mut self, terms: &[(f64, &Postings)]) {
        for (idf, postings) in terms {
            for (&id, &tf) in postings.iter() {
                *self.scores.entry(id).or_insert(0.0) += idf * tf;
            }
        }
    }

    fn exclude(&mut self, terms: &[&Postings]) {
        for postings in terms {
            for id in postings.keys() {
                self.scores.remove(id);
            }
        }
    }

    fn into_scores(self) -> BTreeMap<DocumentId, f64> { self.scores }
}

pub struct ParallelScorer {
    scores: ConcurrentMap<DocumentId, f64>,
}

impl Default for ParallelScorer {
    fn default() -> Self { Self { scores: ConcurrentMap::new(DEFAULT_SHARD_COUNT) } }
}

impl Scorer for ParallelScorer {
    fn accumulate(&mut self, terms: &[(f64, &Postings)]) {
        let scores = &self.scores;
        terms.par_iter().for_each(|(idf, postings)| {
            for (&id, &tf) in postings.iter() {
                *scores.access(id) += idf * tf;
            }
        });
    }

    fn exclude(&mut self, terms: &[&Postings]) {
        let scores = &self.scores;
        terms.par_iter().for_each(|postings| {
            for id in postings.keys() {
                scores.erase(id);
            }
        });
    }

    fn into_scores(self) -> BTreeMap<DocumentId, f64> { self.scores.into_ordinary_map() }
}

impl ExecutionPolicy for Sequential {
    type Scorer = SequentialScorer;

    fn scorer(self) -> Self::Scorer { SequentialScorer::default() }

    fn any<T, F>(self, items: &[T], predicate: F) -> bool
    where
        T: Sync,
        F: Fn(&T) -> bool + Sync + Send,
    {
        items.iter().any(predicate)
    }

    fn filter_map<T, R, F>(self, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> Option<R> + Sync + Send,
    {
        items.iter().filter_map(f).collect()
    }

    fn for_each_mut<T, F>(self, items: &mut [T], f: F)
    where
        T: Send,
        F: Fn(&mut T) + Sync + Send,
    {
        items.iter_mut().for_each(f);
    }

    // Query words are already unique, in first-seen order.
    fn finish_matches(self, _words: &mut Vec<Word>) {}
}

impl ExecutionPolicy for Parallel {
    type Scorer = ParallelScorer;

    fn scorer(self) -> Self::Scorer { ParallelScorer::default() }

    fn any<T, F>(self, items: &[T], predicate: F) -> bool
    where
        T: Sync,
        F: Fn(&T) -> bool + Sync + Send,
    {
        items.par_iter().any(predicate)
    }

    fn filter_map<T, R, F>(self, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> Option<R> + Sync + Send,
    {
        items.par_iter().filter_map(f).collect()
    }

    fn for_each_mut<T, F>(self, items: &mut [T], f: F)
    where
        T: Send,
        F: Fn(&mut T) + Sync + Send,
    {
        items.par_iter_mut().for_each(f);
    }

    fn finish_matches(self, words: &mut Vec<Word>) {
        words.par_sort_unstable();
        words.dedup();
    }
}
