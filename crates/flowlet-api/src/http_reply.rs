//! HTTP response payload for request/reply flows.
//!
//! Flows triggered by an inbound HTTP call can answer the caller by
//! emitting an [`HttpReply`] on the `httpReply` channel. The platform
//! owns the actual socket; components only describe the response.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Value object describing an HTTP response.
///
/// Status defaults to `200`, content to empty. Status codes are plain
/// numbers; no enumeration is provided.
///
/// # Example
///
/// ```
/// use flowlet_api::HttpReply;
///
/// let reply = HttpReply::builder()
///     .status(202)
///     .header("Content-Type", "application/json")
///     .content(br#"{"accepted":true}"#.to_vec())
///     .build();
///
/// assert_eq!(reply.status(), 202);
/// assert_eq!(reply.headers()["Content-Type"], "application/json");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpReply {
    status: u16,
    headers: HashMap<String, String>,
    content: Vec<u8>,
}

impl HttpReply {
    /// Starts building a reply.
    #[must_use]
    pub fn builder() -> HttpReplyBuilder {
        HttpReplyBuilder::new()
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns the response headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Returns the response body.
    #[must_use]
    pub fn content(&self) -> &[u8] {
        &self.content
    }
}

/// Builder for [`HttpReply`].
#[derive(Debug)]
pub struct HttpReplyBuilder {
    status: u16,
    headers: HashMap<String, String>,
    content: Vec<u8>,
}

impl HttpReplyBuilder {
    /// Creates a builder with status `200` and empty content.
    #[must_use]
    pub fn new() -> Self {
        Self {
            status: 200,
            headers: HashMap::new(),
            content: Vec::new(),
        }
    }

    /// Sets the status code.
    #[must_use]
    pub fn status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Adds a header. Setting the same name twice keeps the last value.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets the response body.
    #[must_use]
    pub fn content(mut self, content: impl Into<Vec<u8>>) -> Self {
        self.content = content.into();
        self
    }

    /// Builds the reply.
    #[must_use]
    pub fn build(self) -> HttpReply {
        HttpReply {
            status: self.status,
            headers: self.headers,
            content: self.content,
        }
    }
}

impl Default for HttpReplyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let reply = HttpReply::builder().build();

        assert_eq!(reply.status(), 200);
        assert!(reply.headers().is_empty());
        assert!(reply.content().is_empty());
    }

    #[test]
    fn headers_accumulate() {
        let reply = HttpReply::builder()
            .header("Content-Type", "text/plain")
            .header("X-Request-Id", "abc-123")
            .build();

        assert_eq!(reply.headers().len(), 2);
        assert_eq!(reply.headers()["X-Request-Id"], "abc-123");
    }

    #[test]
    fn repeated_header_keeps_last() {
        let reply = HttpReply::builder()
            .header("Content-Type", "text/plain")
            .header("Content-Type", "application/json")
            .build();

        assert_eq!(reply.headers().len(), 1);
        assert_eq!(reply.headers()["Content-Type"], "application/json");
    }

    #[test]
    fn content_and_status() {
        let reply = HttpReply::builder()
            .status(404)
            .content(b"not here".to_vec())
            .build();

        assert_eq!(reply.status(), 404);
        assert_eq!(reply.content(), b"not here");
    }

    #[test]
    fn round_trips_as_json() {
        let reply = HttpReply::builder()
            .status(201)
            .header("Location", "/things/7")
            .content(b"created".to_vec())
            .build();

        let json = serde_json::to_string(&reply).unwrap();
        let back: HttpReply = serde_json::from_str(&json).unwrap();
        assert_eq!(reply, back);
    }
}
