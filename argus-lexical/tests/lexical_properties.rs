//! Property tests for the incremental BM25 index.

use argus_lexical::LexicalIndex;
use proptest::prelude::*;

fn word() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(word(), 1..40).prop_map(|words| words.join(" "))
}

proptest! {
    #[test]
    fn never_returns_more_than_k(docs in prop::collection::vec(document(), 0..20), q in document(), k in 0usize..10) {
        let mut index = LexicalIndex::new();
        for (i, doc) in docs.iter().enumerate() {
            index.add_chunk(&format!("c{i}"), doc);
        }
        let hits = index.query(&q, k);
        prop_assert!(hits.len() <= k);
    }

    #[test]
    fn scores_are_positive_and_descending(docs in prop::collection::vec(document(), 1..20), q in document()) {
        let mut index = LexicalIndex::new();
        for (i, doc) in docs.iter().enumerate() {
            index.add_chunk(&format!("c{i}"), doc);
        }
        let hits = index.query(&q, docs.len());
        for window in hits.windows(2) {
            prop_assert!(window[0].1 >= window[1].1);
        }
        for (_, score) in &hits {
            prop_assert!(*score > 0.0);
        }
    }

    #[test]
    fn add_then_remove_restores_empty(docs in prop::collection::vec(document(), 1..10)) {
        let mut index = LexicalIndex::new();
        for (i, doc) in docs.iter().enumerate() {
            index.add_chunk(&format!("c{i}"), doc);
        }
        for i in 0..docs.len() {
            index.remove_chunk(&format!("c{i}"));
        }
        prop_assert!(index.is_empty());
        prop_assert!(index.query(&docs[0], 5).is_empty());
    }
}
