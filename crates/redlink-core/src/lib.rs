//! # Redlink Core
//!
//! Domain types shared between the enhancement engine and the framework that
//! hosts it.
//!
//! - **blob**: [`ContentBlob`], a typed byte stream that can be read once
//! - **graph**: [`AnnotationGraph`], a set of RDF statements
//! - **store**: [`AnnotationStore`], the lock-guarded metadata of one document
//! - **content_item**: [`ContentItem`], URI + blob + metadata
//! - **engine**: the [`EnhancementEngine`] contract
//!
//! The core owns no I/O. Engines such as `redlink-engine` depend on these
//! abstractions; hosts construct content items and hand them to engines.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod blob;
pub mod content_item;
pub mod engine;
pub mod graph;
pub mod store;
pub mod vocab;

pub use blob::{BlobError, ContentBlob};
pub use content_item::ContentItem;
pub use engine::{EnhancementEngine, EnhancementSupport, ServiceProperties, ORDERING_DEFAULT};
pub use graph::AnnotationGraph;
pub use store::AnnotationStore;

// Hosts and engines share one RDF model
pub use oxrdf;
