//! Property tests for indexing, ranking and the two invocation modes.

use proptest::collection::vec;
use proptest::prelude::*;
use sift_core::{DocumentStatus, SearchServer, MAX_RESULT_DOCUMENT_COUNT, PAR, RELEVANCE_EPSILON, SEQ};
use std::collections::BTreeSet;

const STOP_WORDS: &str = "and with the";

fn word() -> impl Strategy<Value = String> {
    "[a-z]{1,8}".prop_filter("stop word", |w| !STOP_WORDS.split(' ').any(|s| s == w))
}

fn corpus() -> impl Strategy<Value = Vec<(Vec<String>, Vec<i32>)>> {
    vec((vec(word(), 1..8), vec(-10i32..10, 0..5)), 1..25)
}

fn build(corpus: &[(Vec<String>, Vec<i32>)]) -> SearchServer {
    let server = SearchServer::new(STOP_WORDS).unwrap();
    for (id, (words, ratings)) in (0..).zip(corpus) {
        server.add_document(id, &words.join(" "), DocumentStatus::Actual, ratings).unwrap();
    }
    server
}

proptest! {
    #[test]
    fn every_word_finds_its_document(words in vec(word(), 1..10)) {
        let server = SearchServer::new(STOP_WORDS).unwrap();
        server.add_document(1, &words.join(" "), DocumentStatus::Actual, &[]).unwrap();
        for w in &words {
            let found = server.find_top_documents(w).unwrap();
            prop_assert_eq!(found.len(), 1);
            prop_assert_eq!(found[0].id, 1);
        }
        let (matched, _) = server.match_document(&words.join(" "), 1).unwrap();
        let unique: BTreeSet<&String> = words.iter().collect();
        prop_assert_eq!(matched.len(), unique.len());
    }

    #[test]
    fn rating_is_truncated_mean(ratings in vec(-1000i32..1000, 0..20)) {
        let server = SearchServer::new("").unwrap();
        server.add_document(0, "doc", DocumentStatus::Actual, &ratings).unwrap();
        let expected = if ratings.is_empty() {
            0
        } else {
            ratings.iter().sum::<i32>() / ratings.len() as i32
        };
        prop_assert_eq!(server.find_top_documents("doc").unwrap()[0].rating, expected);
    }

    #[test]
    fn ranking_is_ordered_and_bounded(corpus in corpus(), query in vec(word(), 1..4)) {
        let server = build(&corpus);
        let found = server.find_top_documents(&query.join(" ")).unwrap();
        prop_assert!(found.len() <= MAX_RESULT_DOCUMENT_COUNT);
        for pair in found.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if (a.relevance - b.relevance).abs() < RELEVANCE_EPSILON {
                prop_assert!(a.rating >= b.rating);
            } else {
                prop_assert!(a.relevance > b.relevance);
            }
        }
    }

    #[test]
    fn modes_find_the_same_documents(corpus in corpus(), plus in vec(word(), 1..4), minus in vec(word(), 0..2)) {
        let server = build(&corpus);
        let mut raw = plus.join(" ");
        for m in &minus {
            raw.push_str(" -");
            raw.push_str(m);
        }
        let all = |_: i32, _: DocumentStatus, _: i32| true;
        let seq = server.find_top_documents_in(SEQ, &raw, all).unwrap();
        let par = server.find_top_documents_in(PAR, &raw, all).unwrap();
        let ids = |docs: &[sift_core::Document]| docs.iter().map(|d| d.id).collect::<BTreeSet<_>>();
        prop_assert_eq!(ids(&seq), ids(&par));

        for id in server.document_ids() {
            let (mut s, _) = server.match_document_in(SEQ, &raw, id).unwrap();
            let (p, _) = server.match_document_in(PAR, &raw, id).unwrap();
            s.sort();
            prop_assert_eq!(s, p);
        }
    }

    #[test]
    fn removed_documents_vanish(corpus in corpus(), victim in any::<prop::sample::Index>(), parallel in any::<bool>()) {
        let server = build(&corpus);
        let id = victim.index(corpus.len()) as i32;
        if parallel {
            server.remove_document_in(PAR, id);
        } else {
            server.remove_document_in(SEQ, id);
        }
        prop_assert!(server.word_frequencies(id).is_empty());
        prop_assert_eq!(server.document_count(), corpus.len() - 1);
        for w in &corpus[id as usize].0 {
            let hits = server.find_top_documents_by(w, |_, _, _| true).unwrap();
            prop_assert!(hits.iter().all(|d| d.id != id));
        }

        let (words, ratings) = &corpus[id as usize];
        server.add_document(id, &words.join(" "), DocumentStatus::Actual, ratings).unwrap();
        prop_assert_eq!(server.document_count(), corpus.len());
    }
}
