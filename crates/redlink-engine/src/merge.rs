//! Merge step
//!
//! Copies a decoded graph into the shared store while holding the store's
//! writer lock. The guard is scoped to this function, so the lock is
//! released on every exit path, including unwinding.

use redlink_core::{AnnotationGraph, AnnotationStore};
use tracing::debug;

/// Add every statement of `graph` to `store`; returns how many were new
pub fn merge(store: &AnnotationStore, graph: &AnnotationGraph) -> usize {
    let (added, total) = {
        let mut metadata = store.write();
        let mut added = 0;
        for triple in graph.iter() {
            if metadata.insert(triple) {
                added += 1;
            }
        }
        (added, metadata.len())
    };

    debug!(
        "merged {} of {} statements ({} total in store)",
        added,
        graph.len(),
        total
    );
    added
}
