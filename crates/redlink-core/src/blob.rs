//! Content blobs
//!
//! A blob is the payload of a content item: a MIME type, an optional charset
//! and a byte stream. The stream is handed out at most once.

use parking_lot::Mutex;
use std::fmt;
use std::io::{Cursor, Read};
use thiserror::Error;

/// Errors raised when reading a blob
#[derive(Debug, Error)]
pub enum BlobError {
    /// The stream was already taken by an earlier reader
    #[error("blob stream has already been consumed")]
    AlreadyConsumed,

    /// Reading the stream failed
    #[error("failed to read blob stream: {0}")]
    Io(#[from] std::io::Error),
}

type BlobStream = Box<dyn Read + Send>;

/// Typed, read-once content payload
///
/// A blob carries no source identifier of its own. It is always reached
/// through a [`ContentItem`](crate::ContentItem), and the item's URI names
/// its source (sent as `Content-Location`).
pub struct ContentBlob {
    mime_type: String,
    charset: Option<String>,
    stream: Mutex<Option<BlobStream>>,
}

impl fmt::Debug for ContentBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentBlob")
            .field("mime_type", &self.mime_type)
            .field("charset", &self.charset)
            .field("consumed", &self.is_consumed())
            .finish()
    }
}

impl ContentBlob {
    /// Wrap an arbitrary reader
    pub fn from_reader(
        mime_type: impl Into<String>,
        charset: Option<String>,
        reader: impl Read + Send + 'static,
    ) -> Self {
        Self {
            mime_type: mime_type.into(),
            charset,
            stream: Mutex::new(Some(Box::new(reader))),
        }
    }

    /// Wrap in-memory bytes without a charset
    pub fn from_bytes(mime_type: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self::from_reader(mime_type, None, Cursor::new(bytes.into()))
    }

    /// Wrap UTF-8 text as `text/plain; charset=UTF-8`
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::from_reader(
            "text/plain",
            Some("UTF-8".to_string()),
            Cursor::new(text.into().into_bytes()),
        )
    }

    /// MIME type without parameters
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Declared charset, if any
    pub fn charset(&self) -> Option<&str> {
        self.charset.as_deref()
    }

    /// Full `Content-Type` value, e.g. `text/plain; charset=UTF-8`
    pub fn content_type(&self) -> String {
        match &self.charset {
            Some(charset) => format!("{}; charset={}", self.mime_type, charset),
            None => self.mime_type.clone(),
        }
    }

    /// Whether the stream has been handed out already
    pub fn is_consumed(&self) -> bool {
        self.stream.lock().is_none()
    }

    /// Take the stream; every later call fails with [`BlobError::AlreadyConsumed`]
    pub fn take_stream(&self) -> Result<Box<dyn Read + Send>, BlobError> {
        self.stream.lock().take().ok_or(BlobError::AlreadyConsumed)
    }

    /// Take the stream and read it to the end
    pub fn read_to_end(&self) -> Result<Vec<u8>, BlobError> {
        let mut stream = self.take_stream()?;
        let mut buf = Vec::new();
        stream.read_to_end(&mut buf)?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_blob_content_type() {
        let blob = ContentBlob::from_text("Paris is the capital of France.");
        assert_eq!(blob.mime_type(), "text/plain");
        assert_eq!(blob.charset(), Some("UTF-8"));
        assert_eq!(blob.content_type(), "text/plain; charset=UTF-8");
    }

    #[test]
    fn test_bytes_blob_has_no_charset() {
        let blob = ContentBlob::from_bytes("application/pdf", vec![0x25, 0x50, 0x44, 0x46]);
        assert_eq!(blob.content_type(), "application/pdf");
    }

    #[test]
    fn test_stream_is_consumed_once() {
        let blob = ContentBlob::from_text("hello");
        assert!(!blob.is_consumed());

        assert_eq!(blob.read_to_end().unwrap(), b"hello");
        assert!(blob.is_consumed());
        assert!(matches!(blob.read_to_end(), Err(BlobError::AlreadyConsumed)));
    }

    #[test]
    fn test_taken_stream_is_readable_once() {
        let blob = ContentBlob::from_reader("text/html", None, Cursor::new(b"<p>hi</p>".to_vec()));

        let mut stream = blob.take_stream().unwrap();
        let mut html = String::new();
        stream.read_to_string(&mut html).unwrap();

        assert_eq!(html, "<p>hi</p>");
        assert!(matches!(blob.take_stream(), Err(BlobError::AlreadyConsumed)));
    }

    #[test]
    fn test_debug_does_not_dump_payload() {
        let blob = ContentBlob::from_text("private text");
        let printed = format!("{:?}", blob);
        assert!(printed.contains("text/plain"));
        assert!(!printed.contains("private text"));
    }
}
