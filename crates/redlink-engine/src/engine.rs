//! The Redlink enhancement engine
//!
//! Ties the pieces together for one content item:
//!
//! ```text
//! build_request -> ResilientTransport (retry) -> decode -> merge
//! ```
//!
//! Nothing is merged unless the whole response decoded successfully, and the
//! metadata lock is only taken for the in-memory copy.

use crate::error::{ActivationError, EngineError, EnhanceError};
use crate::merge::merge;
use crate::request::build_request;
use crate::retry::RetryPolicy;
use crate::transport::{HttpExchange, ReqwestExchange, ResilientTransport};
use async_trait::async_trait;
use redlink_config::{RedlinkConfig, RedlinkSettings};
use redlink_core::{
    ContentItem, EnhancementEngine, EnhancementSupport, ServiceProperties, ORDERING_DEFAULT,
};
use std::time::Instant;
use tracing::{debug, info};

/// Property naming the engine instance
pub const ENGINE_NAME_PROPERTY: &str = "stanbol.enhancer.engine.name";

/// Name used when none is configured
pub const DEFAULT_ENGINE_NAME: &str = "redlink-engine";

/// Enhancement engine backed by the Redlink analysis API
#[derive(Debug)]
pub struct RedlinkEngine<E = ReqwestExchange> {
    name: String,
    config: RedlinkConfig,
    transport: ResilientTransport<E>,
    properties: ServiceProperties,
}

impl RedlinkEngine<ReqwestExchange> {
    /// Activate an engine named [`DEFAULT_ENGINE_NAME`]
    pub fn activate(config: RedlinkConfig) -> Result<Self, ActivationError> {
        Self::activate_named(DEFAULT_ENGINE_NAME, config)
    }

    /// Activate an engine with an explicit name
    pub fn activate_named(
        name: impl Into<String>,
        config: RedlinkConfig,
    ) -> Result<Self, ActivationError> {
        let exchange = ReqwestExchange::new(config.timeouts()).map_err(ActivationError::Client)?;
        Ok(Self::with_exchange(name, config, exchange))
    }

    /// Activate from a component property map
    ///
    /// The engine name is read from [`ENGINE_NAME_PROPERTY`]; the Redlink
    /// properties are described in `redlink_config`.
    pub fn activate_from_properties<I, K, V>(properties: I) -> Result<Self, ActivationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let properties: Vec<(String, String)> = properties
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string()))
            .collect();

        let name = properties
            .iter()
            .find(|(k, _)| k == ENGINE_NAME_PROPERTY)
            .map(|(_, v)| v.clone())
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ENGINE_NAME.to_string());

        let config = RedlinkConfig::try_from(RedlinkSettings::from_properties(properties))?;
        Self::activate_named(name, config)
    }
}

impl<E: HttpExchange> RedlinkEngine<E> {
    /// Build an engine around a custom exchange
    pub fn with_exchange(name: impl Into<String>, config: RedlinkConfig, exchange: E) -> Self {
        let name = name.into();
        let policy = RetryPolicy::new(config.retry().max_attempts);
        debug!("> activate RedlinkEngine (name: {})", name);
        debug!(" - version: {}", config.api_version());
        debug!(" - endpoint: {}", config.endpoint());

        Self {
            name,
            config,
            transport: ResilientTransport::new(exchange, policy),
            properties: ServiceProperties {
                ordering: ORDERING_DEFAULT,
            },
        }
    }

    /// Override the scheduling ordering
    pub fn with_ordering(mut self, ordering: i32) -> Self {
        self.properties.ordering = ordering;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &RedlinkConfig {
        &self.config
    }

    /// Release the HTTP client and configuration
    pub fn deactivate(self) {
        debug!("> deactivate RedlinkEngine (name: {})", self.name);
    }

    /// Run one enhancement; returns the number of statements added
    pub async fn enhance(&self, item: &ContentItem) -> Result<usize, EnhanceError> {
        let blob = item.blob().ok_or(EnhanceError::MissingBlob)?;
        let request = build_request(&self.config, blob, item.uri().as_str())?;
        let graph = self.transport.execute(&request).await?;
        Ok(merge(item.metadata(), &graph))
    }
}

#[async_trait]
impl<E: HttpExchange> EnhancementEngine for RedlinkEngine<E> {
    type Error = EngineError;

    fn name(&self) -> &str {
        &self.name
    }

    fn can_enhance(&self, item: &ContentItem) -> EnhancementSupport {
        if item.blob().is_some() {
            EnhancementSupport::EnhanceAsync
        } else {
            EnhancementSupport::CannotEnhance
        }
    }

    async fn compute_enhancements(&self, item: &ContentItem) -> Result<(), EngineError> {
        let start = Instant::now();

        let added = self
            .enhance(item)
            .await
            .map_err(|cause| EngineError::new(&self.name, item.uri().as_str(), cause))?;

        info!(
            "enhanced <{}> with {} new statements in {:?}",
            item.uri().as_str(),
            added,
            start.elapsed()
        );
        Ok(())
    }

    fn service_properties(&self) -> ServiceProperties {
        self.properties.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redlink_config::{APP_PROPERTY, KEY_PROPERTY, VERSION_PROPERTY};
    use redlink_core::oxrdf::NamedNode;
    use redlink_core::ContentBlob;
    use tracing_test::traced_test;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn item(blob: Option<ContentBlob>) -> ContentItem {
        let uri = NamedNode::new("http://www.test.org/fusepool/redlinkEngine#testCi").unwrap();
        match blob {
            Some(blob) => ContentItem::new(uri, blob),
            None => ContentItem::without_blob(uri),
        }
    }

    #[test]
    fn test_activate_from_properties() {
        let engine = RedlinkEngine::activate_from_properties([
            (ENGINE_NAME_PROPERTY, "test-engine"),
            (APP_PROPERTY, "my-app"),
            (KEY_PROPERTY, "secret"),
            (VERSION_PROPERTY, "2.0"),
        ])
        .unwrap();

        assert_eq!(engine.name(), "test-engine");
        assert_eq!(engine.config().api_version(), "2.0");
        assert_eq!(engine.service_properties().ordering, ORDERING_DEFAULT);
        engine.deactivate();
    }

    #[test]
    fn test_activate_without_key_fails() {
        let err = RedlinkEngine::activate_from_properties([(APP_PROPERTY, "my-app")]).unwrap_err();
        match err {
            ActivationError::Config(config) => assert_eq!(config.property(), Some(KEY_PROPERTY)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_default_name() {
        let engine = RedlinkEngine::activate(RedlinkConfig::new("app", "key").unwrap()).unwrap();
        assert_eq!(engine.name(), DEFAULT_ENGINE_NAME);
    }

    #[test]
    fn test_can_enhance_requires_blob() {
        let engine = RedlinkEngine::activate(RedlinkConfig::new("app", "key").unwrap()).unwrap();

        assert_eq!(
            engine.can_enhance(&item(Some(ContentBlob::from_text("text")))),
            EnhancementSupport::EnhanceAsync
        );
        assert_eq!(engine.can_enhance(&item(None)), EnhancementSupport::CannotEnhance);
    }

    #[tokio::test]
    async fn test_missing_blob_is_reported() {
        let engine = RedlinkEngine::activate(RedlinkConfig::new("app", "key").unwrap()).unwrap();
        let err = engine.compute_enhancements(&item(None)).await.unwrap_err();

        assert!(matches!(err.cause(), EnhanceError::MissingBlob));
        assert_eq!(err.engine(), DEFAULT_ENGINE_NAME);
    }

    #[tokio::test]
    #[traced_test]
    async fn test_secrets_are_not_logged() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/1.0/analysis/private-app/enhance"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<urn:a> <urn:b> <urn:c> .", "text/turtle"),
            )
            .mount(&server)
            .await;

        let config = RedlinkConfig::new("private-app", "super-secret-key")
            .unwrap()
            .with_endpoint(server.uri());
        let engine = RedlinkEngine::activate(config).unwrap();
        engine
            .compute_enhancements(&item(Some(ContentBlob::from_text("text"))))
            .await
            .unwrap();

        assert!(logs_contain("enhanced <http://www.test.org/fusepool/redlinkEngine#testCi>"));
        assert!(!logs_contain("super-secret-key"));
    }
}
