//! Property tests for annotation graph set semantics

use proptest::prelude::*;
use redlink_core::oxrdf::{NamedNode, Triple};
use redlink_core::{AnnotationGraph, AnnotationStore};

fn triple() -> impl Strategy<Value = Triple> {
    (0u8..6, 0u8..3, 0u8..6).prop_map(|(s, p, o)| {
        Triple::new(
            NamedNode::new_unchecked(format!("urn:s:{}", s)),
            NamedNode::new_unchecked(format!("urn:p:{}", p)),
            NamedNode::new_unchecked(format!("urn:o:{}", o)),
        )
    })
}

proptest! {
    #[test]
    fn prop_insertion_order_is_irrelevant(triples in prop::collection::vec(triple(), 0..40)) {
        let forward: AnnotationGraph = triples.iter().cloned().collect();
        let backward: AnnotationGraph = triples.iter().rev().cloned().collect();

        prop_assert_eq!(&forward, &backward);
    }

    #[test]
    fn prop_duplicates_collapse(triples in prop::collection::vec(triple(), 0..40)) {
        let mut graph: AnnotationGraph = triples.iter().cloned().collect();
        let len = graph.len();

        graph.extend(triples.iter().cloned());

        prop_assert_eq!(graph.len(), len);
        for t in &triples {
            prop_assert!(graph.contains(t));
        }
    }

    #[test]
    fn prop_store_clones_share_statements(triples in prop::collection::vec(triple(), 1..20)) {
        let store = AnnotationStore::new();
        let other = store.clone();

        for t in &triples {
            other.write().insert(t);
        }

        prop_assert!(store.same_store(&other));
        prop_assert_eq!(store.snapshot(), other.snapshot());
        prop_assert!(!store.is_empty());
    }
}
