//! Parameter objects passed into component entry points.
//!
//! | Type | Passed to | Carries |
//! |------|-----------|---------|
//! | [`ExecutionParameters`] | `execute` | message, configuration, snapshot, emitter |
//! | [`StartupParameters`] | `startup` | configuration |
//! | [`InitParameters`] | `init` | configuration |
//! | [`ShutdownParameters`] | `shutdown` | configuration, startup state |
//!
//! All of them are immutable value objects: built by the caller,
//! consumed by the component, never mutated.

use crate::emitter::EventEmitter;
use crate::message::Message;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// Everything one `execute` call needs.
///
/// Message and emitter are required and taken by
/// [`builder`](ExecutionParameters::builder); configuration and
/// snapshot default to an empty JSON object when unset, so components
/// never see a missing field.
///
/// # Example
///
/// ```
/// use flowlet_api::{EventEmitter, ExecutionParameters, Message};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let emitter = Arc::new(
///     EventEmitter::builder()
///         .on_error(|_| {})
///         .on_data(|_| {})
///         .on_snapshot(|_| {})
///         .build()
///         .unwrap(),
/// );
///
/// let params = ExecutionParameters::builder(Message::builder().build(), emitter)
///     .configuration(json!({ "apiKey": "secret" }))
///     .build();
///
/// assert_eq!(params.configuration()["apiKey"], "secret");
/// assert_eq!(*params.snapshot(), json!({}));
/// ```
#[derive(Debug, Clone)]
pub struct ExecutionParameters {
    message: Message,
    configuration: Value,
    snapshot: Value,
    emitter: Arc<EventEmitter>,
}

impl ExecutionParameters {
    /// Starts building parameters for one invocation.
    ///
    /// Message and emitter are required; taking them here makes an
    /// incomplete parameter set unrepresentable.
    #[must_use]
    pub fn builder(message: Message, emitter: Arc<EventEmitter>) -> ExecutionParametersBuilder {
        ExecutionParametersBuilder {
            message,
            emitter,
            configuration: None,
            snapshot: None,
        }
    }

    /// Returns the message to process.
    #[must_use]
    pub fn message(&self) -> &Message {
        &self.message
    }

    /// Returns the component configuration.
    #[must_use]
    pub fn configuration(&self) -> &Value {
        &self.configuration
    }

    /// Returns the snapshot from the previous invocation.
    #[must_use]
    pub fn snapshot(&self) -> &Value {
        &self.snapshot
    }

    /// Returns the emitter for this invocation.
    #[must_use]
    pub fn emitter(&self) -> &Arc<EventEmitter> {
        &self.emitter
    }
}

/// Builder for [`ExecutionParameters`].
///
/// Infallible: the required parts were taken up front.
#[derive(Debug)]
pub struct ExecutionParametersBuilder {
    message: Message,
    emitter: Arc<EventEmitter>,
    configuration: Option<Value>,
    snapshot: Option<Value>,
}

impl ExecutionParametersBuilder {
    /// Sets the component configuration. Defaults to an empty object.
    #[must_use]
    pub fn configuration(mut self, configuration: Value) -> Self {
        self.configuration = Some(configuration);
        self
    }

    /// Sets the prior snapshot. Defaults to an empty object.
    #[must_use]
    pub fn snapshot(mut self, snapshot: Value) -> Self {
        self.snapshot = Some(snapshot);
        self
    }

    /// Builds the parameter set.
    #[must_use]
    pub fn build(self) -> ExecutionParameters {
        ExecutionParameters {
            message: self.message,
            configuration: self.configuration.unwrap_or_else(empty_object),
            snapshot: self.snapshot.unwrap_or_else(empty_object),
            emitter: self.emitter,
        }
    }
}

/// Passed to `startup` when a flow is started.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartupParameters {
    configuration: Value,
}

impl StartupParameters {
    /// Creates startup parameters with the given configuration.
    #[must_use]
    pub fn new(configuration: Value) -> Self {
        Self { configuration }
    }

    /// Returns the component configuration.
    #[must_use]
    pub fn configuration(&self) -> &Value {
        &self.configuration
    }
}

/// Passed to `init` before message processing begins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitParameters {
    configuration: Value,
}

impl InitParameters {
    /// Creates init parameters with the given configuration.
    #[must_use]
    pub fn new(configuration: Value) -> Self {
        Self { configuration }
    }

    /// Returns the component configuration.
    #[must_use]
    pub fn configuration(&self) -> &Value {
        &self.configuration
    }
}

/// Passed to `shutdown` when a flow is stopped.
///
/// `state` is whatever the component's `startup` returned when the
/// flow was started (e.g. a webhook subscription to tear down).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShutdownParameters {
    configuration: Value,
    state: Value,
}

impl ShutdownParameters {
    /// Creates shutdown parameters from configuration and startup state.
    #[must_use]
    pub fn new(configuration: Value, state: Value) -> Self {
        Self { configuration, state }
    }

    /// Returns the component configuration.
    #[must_use]
    pub fn configuration(&self) -> &Value {
        &self.configuration
    }

    /// Returns the state produced by `startup`.
    #[must_use]
    pub fn state(&self) -> &Value {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_emitter() -> Arc<EventEmitter> {
        Arc::new(
            EventEmitter::builder()
                .on_error(|_| {})
                .on_data(|_| {})
                .on_snapshot(|_| {})
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn builder_defaults_to_empty_objects() {
        let params = ExecutionParameters::builder(Message::builder().build(), test_emitter()).build();

        assert_eq!(*params.configuration(), json!({}));
        assert_eq!(*params.snapshot(), json!({}));
    }

    #[test]
    fn builder_keeps_explicit_values() {
        let msg = Message::builder().body(json!({ "in": 1 })).build();
        let params = ExecutionParameters::builder(msg.clone(), test_emitter())
            .configuration(json!({ "apiKey": "k" }))
            .snapshot(json!({ "cursor": 99 }))
            .build();

        assert_eq!(params.message(), &msg);
        assert_eq!(params.configuration()["apiKey"], "k");
        assert_eq!(params.snapshot()["cursor"], 99);
    }

    #[test]
    fn emitter_handle_is_shared_not_copied() {
        let emitter = test_emitter();
        let params =
            ExecutionParameters::builder(Message::builder().build(), Arc::clone(&emitter)).build();

        assert!(Arc::ptr_eq(params.emitter(), &emitter));
    }

    #[test]
    fn startup_parameters_carry_configuration() {
        let params = StartupParameters::new(json!({ "url": "https://example.test" }));
        assert_eq!(params.configuration()["url"], "https://example.test");
    }

    #[test]
    fn shutdown_parameters_carry_startup_state() {
        let params = ShutdownParameters::new(json!({}), json!({ "subscription": "sub-1" }));
        assert_eq!(params.state()["subscription"], "sub-1");
    }

    #[test]
    fn lifecycle_parameters_round_trip_as_json() {
        let params = ShutdownParameters::new(json!({ "a": 1 }), json!({ "b": 2 }));
        let json = serde_json::to_string(&params).unwrap();
        let back: ShutdownParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(params, back);
    }
}
