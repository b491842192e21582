//! Response decoder
//!
//! Classifies the outcome of one attempt: 2xx bodies are parsed as a graph in
//! the serialization the response declares, every other status is a failure.

use crate::error::EnhanceError;
use oxrdfio::{RdfFormat, RdfParser};
use redlink_core::oxrdf::Triple;
use redlink_core::AnnotationGraph;
use reqwest::StatusCode;
use tracing::{debug, trace};

/// Serialization for a `Content-Type` header value
///
/// A missing or empty header means Turtle. Returns `None` for media types
/// no parser is registered for.
pub fn response_format(content_type: Option<&str>) -> Option<RdfFormat> {
    let Some(value) = content_type else {
        return Some(RdfFormat::Turtle);
    };
    let media_type = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match media_type.as_str() {
        "" | "application/x-turtle" => Some(RdfFormat::Turtle),
        "text/plain" => Some(RdfFormat::NTriples),
        other => RdfFormat::from_media_type(other),
    }
}

/// Decode one response into an annotation graph
///
/// Quad serializations (TriG, N-Quads) are flattened into the graph; graph
/// names are dropped.
///
/// # Errors
///
/// [`EnhanceError::NonSuccessStatus`] for any status outside 2xx,
/// [`EnhanceError::DecodeFailed`] for unsupported formats or malformed bodies.
pub fn decode(
    status: StatusCode,
    body: &[u8],
    content_type: Option<&str>,
) -> Result<AnnotationGraph, EnhanceError> {
    if !status.is_success() {
        debug!("response status {} is not a success", status);
        return Err(EnhanceError::NonSuccessStatus {
            status: status.as_u16(),
            status_line: status.to_string(),
        });
    }

    let format = response_format(content_type).ok_or_else(|| EnhanceError::DecodeFailed {
        format: content_type.unwrap_or_default().to_string(),
        message: "unsupported graph serialization".to_string(),
    })?;

    let graph = RdfParser::from_format(format)
        .for_reader(body)
        .map(|quad| quad.map(Triple::from))
        .collect::<Result<AnnotationGraph, _>>()
        .map_err(|e| EnhanceError::DecodeFailed {
            format: format.media_type().to_string(),
            message: e.to_string(),
        })?;

    trace!("decoded {} statements from {} response", graph.len(), format.name());
    Ok(graph)
}
