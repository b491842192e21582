//! Shared annotation store
//!
//! The metadata of one document, shared by every engine working on it.
//! Cloning an [`AnnotationStore`] yields another handle to the same graph.
//!
//! The lock is a synchronous reader/writer lock. Its guards are `!Send`, so a
//! guard cannot be held across an `.await` in a spawned task.

use crate::graph::AnnotationGraph;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// Lock-guarded, shareable annotation graph
#[derive(Debug, Clone, Default)]
pub struct AnnotationStore {
    inner: Arc<RwLock<AnnotationGraph>>,
}

impl AnnotationStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with existing statements
    pub fn from_graph(graph: AnnotationGraph) -> Self {
        Self {
            inner: Arc::new(RwLock::new(graph)),
        }
    }

    /// Acquire shared read access
    pub fn read(&self) -> RwLockReadGuard<'_, AnnotationGraph> {
        self.inner.read()
    }

    /// Acquire exclusive write access; released when the guard drops
    pub fn write(&self) -> RwLockWriteGuard<'_, AnnotationGraph> {
        self.inner.write()
    }

    /// Number of statements currently stored
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Copy of the current statements
    pub fn snapshot(&self) -> AnnotationGraph {
        self.read().clone()
    }

    /// Whether two handles refer to the same store
    pub fn same_store(&self, other: &AnnotationStore) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}
