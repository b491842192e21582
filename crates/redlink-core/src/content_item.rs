//! Content items

use crate::blob::ContentBlob;
use crate::store::AnnotationStore;
use oxrdf::{NamedNode, NamedNodeRef};

/// A document under enhancement: its URI, its payload and its metadata
#[derive(Debug)]
pub struct ContentItem {
    uri: NamedNode,
    blob: Option<ContentBlob>,
    metadata: AnnotationStore,
}

impl ContentItem {
    /// Content item with a blob and empty metadata
    pub fn new(uri: NamedNode, blob: ContentBlob) -> Self {
        Self {
            uri,
            blob: Some(blob),
            metadata: AnnotationStore::new(),
        }
    }

    /// Content item that carries metadata only
    pub fn without_blob(uri: NamedNode) -> Self {
        Self {
            uri,
            blob: None,
            metadata: AnnotationStore::new(),
        }
    }

    /// Use an existing (possibly shared) metadata store
    pub fn with_metadata(mut self, metadata: AnnotationStore) -> Self {
        self.metadata = metadata;
        self
    }

    /// Identifier of the content item
    pub fn uri(&self) -> NamedNodeRef<'_> {
        self.uri.as_ref()
    }

    /// Payload, if the item has one
    pub fn blob(&self) -> Option<&ContentBlob> {
        self.blob.as_ref()
    }

    /// Metadata store shared with other engines
    pub fn metadata(&self) -> &AnnotationStore {
        &self.metadata
    }
}
