//! Tests against the live Redlink API
//!
//! Only built with `--features test-infrastructure`. Credentials come from
//! `REDLINK_APP` and `REDLINK_KEY`; the test is skipped when they are absent.

#![cfg(feature = "test-infrastructure")]

use redlink_config::{RedlinkConfig, RedlinkSettings};
use redlink_core::oxrdf::{NamedNode, TermRef};
use redlink_core::vocab::extracted_from;
use redlink_core::{ContentBlob, ContentItem, EnhancementEngine, EnhancementSupport};
use redlink_engine::RedlinkEngine;

const CONTENT: &str = "The Fusepool P3 project was coordinated from Bern, Switzerland. \
    Partners in Salzburg, Austria and Berlin, Germany contributed linked data tooling.";

#[tokio::test]
async fn test_redlink_engine() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("redlink_engine=debug")
        .try_init();

    let Ok(config) = RedlinkConfig::try_from(RedlinkSettings::from_env()) else {
        eprintln!("REDLINK_APP / REDLINK_KEY not set, skipping");
        return Ok(());
    };
    let engine = RedlinkEngine::activate(config)?;

    let uri = NamedNode::new("http://www.test.org/fusepool/redlinkEngine#testCi")?;
    let item = ContentItem::new(uri.clone(), ContentBlob::from_text(CONTENT));

    assert_ne!(engine.can_enhance(&item), EnhancementSupport::CannotEnhance);
    let before = item.metadata().len();

    engine.compute_enhancements(&item).await?;

    let metadata = item.metadata().snapshot();
    tracing::debug!("enhancement results:\n{}", metadata);
    assert!(metadata.len() > before);

    // Every enhancement points back at the enhanced item
    for object in metadata.objects_for_predicate(extracted_from()) {
        assert_eq!(object, TermRef::NamedNode(uri.as_ref()));
    }

    engine.deactivate();
    Ok(())
}
