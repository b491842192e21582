//! Enhancement engine contract
//!
//! Hosts drive engines through this trait: ask [`EnhancementEngine::can_enhance`]
//! first, then call [`EnhancementEngine::compute_enhancements`], which writes
//! its results into the content item's metadata store.

use crate::content_item::ContentItem;
use async_trait::async_trait;

/// Ordering used by engines that do not need a particular position
pub const ORDERING_DEFAULT: i32 = 0;

/// Whether and how an engine can process a content item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnhancementSupport {
    /// The engine has nothing to do for this item
    CannotEnhance,
    /// The engine may run on a worker alongside other engines
    EnhanceAsync,
}

/// Static properties a host uses to schedule an engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceProperties {
    /// Engines with higher ordering run earlier
    pub ordering: i32,
}

impl Default for ServiceProperties {
    fn default() -> Self {
        Self {
            ordering: ORDERING_DEFAULT,
        }
    }
}

/// An enrichment step that annotates content items
#[async_trait]
pub trait EnhancementEngine: Send + Sync {
    /// Error returned when enhancement of an item fails
    type Error: std::error::Error + Send + Sync + 'static;

    /// Engine name, unique among the engines of one host
    fn name(&self) -> &str;

    /// Check whether this engine can process the item
    fn can_enhance(&self, item: &ContentItem) -> EnhancementSupport;

    /// Compute enhancements and add them to the item's metadata
    ///
    /// On error the metadata must be left untouched.
    async fn compute_enhancements(&self, item: &ContentItem) -> Result<(), Self::Error>;

    /// Scheduling properties
    fn service_properties(&self) -> ServiceProperties {
        ServiceProperties::default()
    }
}
