//! The message envelope components consume and produce.
//!
//! A [`Message`] is an immutable value object: once built it never
//! changes. Components receive one message per invocation and emit
//! new messages on the data channel rather than mutating the input.
//!
//! # Structure
//!
//! | Field | Content |
//! |-------|---------|
//! | `id` | Unique per message, auto-generated UUID v4 |
//! | `headers` | Transport metadata (opaque JSON map) |
//! | `body` | The payload (opaque JSON value) |
//! | `attachments` | References to out-of-band content |
//! | `passthrough` | Data carried across flow steps untouched |
//!
//! The SDK never interprets any of these beyond requiring them to be
//! present; all meaning belongs to components and the platform.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Identifier for a [`Message`].
///
/// Auto-generated (UUID v4) by [`MessageBuilder`] unless the caller
/// supplies one, e.g. when replaying a recorded message.
///
/// # Example
///
/// ```
/// use flowlet_api::MessageId;
///
/// let a = MessageId::new();
/// let b = MessageId::new();
/// assert_ne!(a, b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub Uuid);

impl MessageId {
    /// Creates a new [`MessageId`] with a random UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "msg:{}", self.0)
    }
}

/// Immutable message envelope.
///
/// Built once via [`Message::builder`], then only read. All fields are
/// non-null: absent parts default to an empty JSON object or map at
/// build time, so consumers never need to handle missing fields.
///
/// # Example
///
/// ```
/// use flowlet_api::Message;
/// use serde_json::json;
///
/// let msg = Message::builder()
///     .body(json!({ "greeting": "hello" }))
///     .build();
///
/// assert_eq!(msg.body()["greeting"], "hello");
/// assert!(msg.headers().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    headers: Map<String, Value>,
    body: Value,
    attachments: Map<String, Value>,
    passthrough: Map<String, Value>,
}

impl Message {
    /// Starts building a message. All fields are optional; the id is
    /// auto-generated and the rest default to empty.
    #[must_use]
    pub fn builder() -> MessageBuilder {
        MessageBuilder::new()
    }

    /// Returns the message identifier.
    #[must_use]
    pub fn id(&self) -> MessageId {
        self.id
    }

    /// Returns the transport headers.
    #[must_use]
    pub fn headers(&self) -> &Map<String, Value> {
        &self.headers
    }

    /// Returns the payload.
    #[must_use]
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Returns the attachment references.
    #[must_use]
    pub fn attachments(&self) -> &Map<String, Value> {
        &self.attachments
    }

    /// Returns the passthrough data.
    #[must_use]
    pub fn passthrough(&self) -> &Map<String, Value> {
        &self.passthrough
    }
}

impl std::fmt::Display for Message {
    /// Renders the whole envelope as compact JSON.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => Err(std::fmt::Error),
        }
    }
}

/// Builder for [`Message`].
///
/// Infallible: `build()` always succeeds because every field has a
/// well-defined default.
#[derive(Debug, Default)]
pub struct MessageBuilder {
    id: Option<MessageId>,
    headers: Map<String, Value>,
    body: Option<Value>,
    attachments: Map<String, Value>,
    passthrough: Map<String, Value>,
}

impl MessageBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an explicit message id instead of auto-generating one.
    #[must_use]
    pub fn id(mut self, id: MessageId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the transport headers.
    #[must_use]
    pub fn headers(mut self, headers: Map<String, Value>) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the payload. Defaults to an empty JSON object.
    #[must_use]
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the attachment references.
    #[must_use]
    pub fn attachments(mut self, attachments: Map<String, Value>) -> Self {
        self.attachments = attachments;
        self
    }

    /// Sets the passthrough data.
    #[must_use]
    pub fn passthrough(mut self, passthrough: Map<String, Value>) -> Self {
        self.passthrough = passthrough;
        self
    }

    /// Builds the message, filling in defaults for anything unset.
    #[must_use]
    pub fn build(self) -> Message {
        Message {
            id: self.id.unwrap_or_default(),
            headers: self.headers,
            body: self.body.unwrap_or_else(|| Value::Object(Map::new())),
            attachments: self.attachments,
            passthrough: self.passthrough,
        }
    }
}
