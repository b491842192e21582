//! # Redlink Engine
//!
//! Enhancement engine that sends content to the Redlink analysis API and
//! merges the returned RDF annotations into the content item's metadata.
//!
//! ## Pipeline
//!
//! 1. **Request** ([`request`]): `POST {endpoint}/{version}/analysis/{app}/enhance?key={key}`
//! 2. **Transport** ([`transport`], [`retry`]): bounded, idempotency-aware retries
//! 3. **Decode** ([`decoder`]): 2xx RDF body (Turtle, N-Triples, RDF/XML, N3, TriG, N-Quads) into an [`AnnotationGraph`]
//! 4. **Merge** ([`merge`]): copy into the shared store under its writer lock
//!
//! ## Usage
//!
//! ```rust,no_run
//! use redlink_config::{RedlinkConfig, RedlinkSettings};
//! use redlink_core::oxrdf::NamedNode;
//! use redlink_core::{ContentBlob, ContentItem, EnhancementEngine};
//! use redlink_engine::RedlinkEngine;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RedlinkConfig::try_from(RedlinkSettings::from_env())?;
//!     let engine = RedlinkEngine::activate(config)?;
//!
//!     let item = ContentItem::new(
//!         NamedNode::new("urn:content:1")?,
//!         ContentBlob::from_text("Paris is the capital of France."),
//!     );
//!     engine.compute_enhancements(&item).await?;
//!
//!     println!("{} annotations", item.metadata().len());
//!     Ok(())
//! }
//! ```
//!
//! [`AnnotationGraph`]: redlink_core::AnnotationGraph

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod decoder;
pub mod engine;
pub mod error;
pub mod merge;
pub mod request;
pub mod retry;
pub mod transport;

pub use decoder::{decode, response_format};
pub use engine::{RedlinkEngine, DEFAULT_ENGINE_NAME, ENGINE_NAME_PROPERTY};
pub use error::{ActivationError, EngineError, EnhanceError};
pub use merge::merge;
pub use request::{build_request, enhance_url, PreparedRequest};
pub use retry::{classify, FailureKind, RetryDecision, RetryPolicy, RetryState, StopReason};
pub use transport::{HttpExchange, RawResponse, ReqwestExchange, ResilientTransport, TransportError};
