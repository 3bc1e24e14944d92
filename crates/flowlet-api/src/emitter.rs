//! Event emitter components report through.
//!
//! An [`EventEmitter`] multiplexes named, typed emissions to callbacks
//! registered at construction time. It is the only path results take
//! out of a component invocation:
//!
//! ```text
//! Component::execute(params)
//!     │
//!     ▼ params.emitter()
//! EventEmitter ──► on_data(Message)
//!              ──► on_snapshot(Value)
//!              ──► on_error(InvocationError)
//!              ──► on_rebound / on_update_keys / on_http_reply (optional)
//! ```
//!
//! Construction validates completeness once: the error, data and
//! snapshot callbacks are required, the rest optional. After `build()`
//! succeeds, emitting never fails; an emission on an unregistered
//! optional channel is logged and dropped.
//!
//! # Usage
//!
//! ```
//! use flowlet_api::{EventEmitter, Message};
//! use serde_json::json;
//!
//! let emitter = EventEmitter::builder()
//!     .on_error(|err| eprintln!("failed: {err}"))
//!     .on_data(|msg| println!("data: {msg}"))
//!     .on_snapshot(|snap| println!("snapshot: {snap}"))
//!     .build()
//!     .unwrap();
//!
//! emitter
//!     .emit_snapshot(json!({ "cursor": 10 }))
//!     .emit_data(Message::builder().build());
//! ```
//!
//! Callbacks run synchronously on the emitting thread, in emission
//! order. There is no queue and no buffering.

use crate::error::{EmitterError, ErrorCode, InvocationError};
use crate::event::EventKind;
use crate::http_reply::HttpReply;
use crate::message::Message;
use serde_json::Value;

type ErrorCallback = Box<dyn Fn(InvocationError) + Send + Sync>;
type DataCallback = Box<dyn Fn(Message) + Send + Sync>;
type SnapshotCallback = Box<dyn Fn(Value) + Send + Sync>;
type ReboundCallback = Box<dyn Fn(String) + Send + Sync>;
type UpdateKeysCallback = Box<dyn Fn(Value) + Send + Sync>;
type HttpReplyCallback = Box<dyn Fn(HttpReply) + Send + Sync>;

/// Validated set of per-channel callbacks.
///
/// One emitter serves one invocation: the caller builds it, wraps it in
/// an `Arc`, hands it to the component via its execution parameters and
/// observes the callbacks until `execute` returns.
///
/// Every `emit_*` method returns `&Self` so emissions chain.
pub struct EventEmitter {
    /// Receives every failure of the invocation. Required.
    on_error: ErrorCallback,
    /// Receives outgoing messages. Required.
    on_data: DataCallback,
    /// Receives state to persist for the next invocation. Required.
    on_snapshot: SnapshotCallback,
    /// Receives retry requests. Optional.
    on_rebound: Option<ReboundCallback>,
    /// Receives refreshed credential keys. Optional.
    on_update_keys: Option<UpdateKeysCallback>,
    /// Receives HTTP responses for request/reply flows. Optional.
    on_http_reply: Option<HttpReplyCallback>,
}

impl EventEmitter {
    /// Starts assembling an emitter.
    #[must_use]
    pub fn builder() -> EventEmitterBuilder {
        EventEmitterBuilder::new()
    }

    /// Returns `true` if a callback is registered for `kind`.
    ///
    /// Always `true` for required channels on a built emitter.
    #[must_use]
    pub fn has_callback(&self, kind: EventKind) -> bool {
        match kind {
            EventKind::Error | EventKind::Data | EventKind::Snapshot => true,
            EventKind::Rebound => self.on_rebound.is_some(),
            EventKind::UpdateKeys => self.on_update_keys.is_some(),
            EventKind::HttpReply => self.on_http_reply.is_some(),
        }
    }

    /// Emits a failure on the error channel.
    ///
    /// Accepts anything convertible to [`InvocationError`], so a
    /// component can pass its own `ComponentError` directly and the
    /// observer sees the same `Execution` payload the harness would
    /// produce for a raised error.
    pub fn emit_exception(&self, error: impl Into<InvocationError>) -> &Self {
        let error = error.into();
        tracing::debug!(channel = %EventKind::Error, code = error.code(), "emit");
        (self.on_error)(error);
        self
    }

    /// Emits a message on the data channel.
    pub fn emit_data(&self, message: Message) -> &Self {
        tracing::debug!(channel = %EventKind::Data, id = %message.id(), "emit");
        (self.on_data)(message);
        self
    }

    /// Emits state on the snapshot channel.
    pub fn emit_snapshot(&self, snapshot: Value) -> &Self {
        tracing::debug!(channel = %EventKind::Snapshot, "emit");
        (self.on_snapshot)(snapshot);
        self
    }

    /// Requests a later retry of the current message.
    ///
    /// Dropped with a debug log if no rebound callback is registered.
    pub fn emit_rebound(&self, reason: impl Into<String>) -> &Self {
        match &self.on_rebound {
            Some(callback) => {
                tracing::debug!(channel = %EventKind::Rebound, "emit");
                callback(reason.into());
            }
            None => {
                tracing::debug!(channel = %EventKind::Rebound, "emit dropped, no callback");
            }
        }
        self
    }

    /// Emits refreshed credential keys.
    ///
    /// Dropped with a debug log if no updateKeys callback is registered.
    pub fn emit_update_keys(&self, keys: Value) -> &Self {
        match &self.on_update_keys {
            Some(callback) => {
                tracing::debug!(channel = %EventKind::UpdateKeys, "emit");
                callback(keys);
            }
            None => {
                tracing::debug!(channel = %EventKind::UpdateKeys, "emit dropped, no callback");
            }
        }
        self
    }

    /// Emits an HTTP response for request/reply flows.
    ///
    /// Dropped with a debug log if no httpReply callback is registered.
    pub fn emit_http_reply(&self, reply: HttpReply) -> &Self {
        match &self.on_http_reply {
            Some(callback) => {
                tracing::debug!(channel = %EventKind::HttpReply, status = reply.status(), "emit");
                callback(reply);
            }
            None => {
                tracing::debug!(channel = %EventKind::HttpReply, "emit dropped, no callback");
            }
        }
        self
    }
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("rebound", &self.on_rebound.is_some())
            .field("update_keys", &self.on_update_keys.is_some())
            .field("http_reply", &self.on_http_reply.is_some())
            .finish_non_exhaustive()
    }
}

/// Builder for [`EventEmitter`].
///
/// Registering a channel twice silently keeps the last callback;
/// registration replaces, it never stacks. Validation happens exactly
/// once, in [`build`](Self::build).
#[derive(Default)]
pub struct EventEmitterBuilder {
    on_error: Option<ErrorCallback>,
    on_data: Option<DataCallback>,
    on_snapshot: Option<SnapshotCallback>,
    on_rebound: Option<ReboundCallback>,
    on_update_keys: Option<UpdateKeysCallback>,
    on_http_reply: Option<HttpReplyCallback>,
}

impl EventEmitterBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the error callback. Required.
    #[must_use]
    pub fn on_error(mut self, callback: impl Fn(InvocationError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Box::new(callback));
        self
    }

    /// Registers the data callback. Required.
    #[must_use]
    pub fn on_data(mut self, callback: impl Fn(Message) + Send + Sync + 'static) -> Self {
        self.on_data = Some(Box::new(callback));
        self
    }

    /// Registers the snapshot callback. Required.
    #[must_use]
    pub fn on_snapshot(mut self, callback: impl Fn(Value) + Send + Sync + 'static) -> Self {
        self.on_snapshot = Some(Box::new(callback));
        self
    }

    /// Registers the rebound callback. Optional.
    #[must_use]
    pub fn on_rebound(mut self, callback: impl Fn(String) + Send + Sync + 'static) -> Self {
        self.on_rebound = Some(Box::new(callback));
        self
    }

    /// Registers the updateKeys callback. Optional.
    #[must_use]
    pub fn on_update_keys(mut self, callback: impl Fn(Value) + Send + Sync + 'static) -> Self {
        self.on_update_keys = Some(Box::new(callback));
        self
    }

    /// Registers the httpReply callback. Optional.
    #[must_use]
    pub fn on_http_reply(mut self, callback: impl Fn(HttpReply) + Send + Sync + 'static) -> Self {
        self.on_http_reply = Some(Box::new(callback));
        self
    }

    /// Validates completeness and builds the emitter.
    ///
    /// # Errors
    ///
    /// Returns [`EmitterError::MissingCallback`] naming the first
    /// required channel without a registered callback, checked in
    /// error, data, snapshot order.
    pub fn build(self) -> Result<EventEmitter, EmitterError> {
        let on_error = self
            .on_error
            .ok_or(EmitterError::MissingCallback(EventKind::Error))?;
        let on_data = self
            .on_data
            .ok_or(EmitterError::MissingCallback(EventKind::Data))?;
        let on_snapshot = self
            .on_snapshot
            .ok_or(EmitterError::MissingCallback(EventKind::Snapshot))?;

        Ok(EventEmitter {
            on_error,
            on_data,
            on_snapshot,
            on_rebound: self.on_rebound,
            on_update_keys: self.on_update_keys,
            on_http_reply: self.on_http_reply,
        })
    }
}

impl std::fmt::Debug for EventEmitterBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitterBuilder")
            .field("error", &self.on_error.is_some())
            .field("data", &self.on_data.is_some())
            .field("snapshot", &self.on_snapshot.is_some())
            .finish_non_exhaustive()
    }
}
