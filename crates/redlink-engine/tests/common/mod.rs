//! Shared helpers for engine integration tests
#![allow(dead_code)]

use redlink_config::RedlinkConfig;
use redlink_core::oxrdf::{NamedNode, Triple};
use redlink_core::{ContentBlob, ContentItem};
use redlink_engine::RedlinkEngine;
use std::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const APP: &str = "test-app";
pub const KEY: &str = "test-key";
pub const ENHANCE_PATH: &str = "/1.0/analysis/test-app/enhance";
pub const CONTENT_URI: &str = "http://www.test.org/fusepool/redlinkEngine#testCi";

/// Mock Redlink server answering every enhance call with the given response
pub async fn redlink_mock(status: u16, body: &str, content_type: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENHANCE_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_raw(body.to_string(), content_type))
        .mount(&server)
        .await;
    server
}

pub fn config_for(endpoint: impl Into<String>) -> RedlinkConfig {
    RedlinkConfig::new(APP, KEY).unwrap().with_endpoint(endpoint)
}

pub fn engine_for(server: &MockServer) -> RedlinkEngine {
    RedlinkEngine::activate(config_for(server.uri())).unwrap()
}

pub fn text_item(uri: &str, text: &str) -> ContentItem {
    ContentItem::new(NamedNode::new(uri).unwrap(), ContentBlob::from_text(text))
}

pub fn triple(s: &str, p: &str, o: &str) -> Triple {
    Triple::new(
        NamedNode::new(s).unwrap(),
        NamedNode::new(p).unwrap(),
        NamedNode::new(o).unwrap(),
    )
}

/// Base URL of a local port nothing listens on
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}
