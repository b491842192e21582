//! Request builder
//!
//! Turns configuration plus content into the `enhance` call:
//!
//! ```text
//! POST {endpoint}/{version}/analysis/{app}/enhance?key={key}
//! Accept: text/turtle
//! Accept-Charset: UTF-8
//! Content-Location: {content item uri}
//! Content-Type: {blob mime type}[; charset={charset}]
//! ```

use crate::error::EnhanceError;
use bytes::Bytes;
use redlink_config::RedlinkConfig;
use redlink_core::ContentBlob;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_CHARSET, CONTENT_LOCATION, CONTENT_TYPE,
};
use reqwest::{Method, Url};
use std::fmt;

/// Media type requested from the service
pub const TURTLE: &str = "text/turtle";

/// Name of the query parameter carrying the application key
pub const KEY_PARAM: &str = "key";

/// A fully assembled HTTP request that can be sent repeatedly
#[derive(Clone)]
pub struct PreparedRequest {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl fmt::Debug for PreparedRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreparedRequest")
            .field("method", &self.method)
            .field("url", &self.redacted_url())
            .field("headers", &self.headers)
            .field("body_len", &self.body.as_ref().map(Bytes::len))
            .finish()
    }
}

impl PreparedRequest {
    /// Request without headers or body
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Bodyless GET request
    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    /// Set a header (builder pattern)
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Attach a body (builder pattern)
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// HTTP method
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Full target URL, including the key
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Request headers
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Request body, if any
    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Requests that enclose a body are never considered idempotent
    pub fn is_idempotent(&self) -> bool {
        self.body.is_none()
    }

    /// Target URL with query values masked, safe for logs
    pub fn redacted_url(&self) -> String {
        let mut url = self.url.clone();
        if url.query().is_some() {
            let names: Vec<String> = url.query_pairs().map(|(name, _)| name.into_owned()).collect();
            let mut pairs = url.query_pairs_mut();
            pairs.clear();
            for name in &names {
                pairs.append_pair(name, "<<configured>>");
            }
        }
        url.to_string()
    }
}

/// Build the `enhance` request for a blob
///
/// Reads the blob stream; calling this twice for the same blob fails.
///
/// # Errors
///
/// [`EnhanceError::UriConstruction`] if endpoint, path or headers cannot be
/// assembled, [`EnhanceError::Content`] if the blob cannot be read.
pub fn build_request(
    config: &RedlinkConfig,
    blob: &ContentBlob,
    content_location: &str,
) -> Result<PreparedRequest, EnhanceError> {
    let url = enhance_url(
        config.endpoint(),
        config.api_version(),
        config.app_id(),
        config.api_key(),
    )?;

    let content_type = HeaderValue::from_str(&blob.content_type()).map_err(|_| {
        uri_error(format!("invalid content type '{}'", blob.content_type()))
    })?;
    let location = HeaderValue::from_str(content_location)
        .map_err(|_| uri_error(format!("invalid content location '{}'", content_location)))?;

    let body = blob.read_to_end()?;

    Ok(PreparedRequest::new(Method::POST, url)
        .with_header(ACCEPT, HeaderValue::from_static(TURTLE))
        .with_header(ACCEPT_CHARSET, HeaderValue::from_static("UTF-8"))
        .with_header(CONTENT_LOCATION, location)
        .with_header(CONTENT_TYPE, content_type)
        .with_body(body))
}

/// Assemble `{endpoint}/{version}/analysis/{app_id}/enhance?key={api_key}`
pub fn enhance_url(
    endpoint: &str,
    version: &str,
    app_id: &str,
    api_key: &str,
) -> Result<Url, EnhanceError> {
    let mut url = Url::parse(endpoint)
        .map_err(|e| uri_error(format!("invalid endpoint '{}': {}", endpoint, e)))?;
    if url.cannot_be_a_base() {
        return Err(uri_error(format!("endpoint '{}' cannot be a base URI", endpoint)));
    }

    check_segment("version", version)?;
    check_segment("application", app_id)?;

    url.set_path(&format!("/{}/analysis/{}/enhance", version, app_id));
    url.set_query(None);
    url.set_fragment(None);
    url.query_pairs_mut().append_pair(KEY_PARAM, api_key);

    Ok(url)
}

// RFC 3986 `pchar` without percent-encoding: the value must be usable verbatim.
fn check_segment(what: &str, segment: &str) -> Result<(), EnhanceError> {
    if segment.is_empty() {
        return Err(uri_error(format!("{} must not be empty", what)));
    }
    let illegal = segment.chars().find(|c| {
        !(c.is_ascii_alphanumeric() || "-._~!$&'()*+,;=:@".contains(*c))
    });
    match illegal {
        Some(c) => Err(uri_error(format!(
            "{} contains illegal character {:?}",
            what, c
        ))),
        None => Ok(()),
    }
}

fn uri_error(reason: String) -> EnhanceError {
    EnhanceError::UriConstruction { reason }
}
