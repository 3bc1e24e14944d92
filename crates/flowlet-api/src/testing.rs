//! Test harness for component and emitter behavior.
//!
//! [`EmitterHarness`] builds a fully wired [`EventEmitter`] whose
//! callbacks record every emission into a shared, ordered log. Tests
//! hand the harness's emitter (or ready-made execution parameters) to
//! the code under test, then assert on the recorded [`Emission`]s.
//! No engine or host infrastructure is required and everything runs
//! synchronously.
//!
//! # Example
//!
//! ```
//! use flowlet_api::testing::EmitterHarness;
//! use flowlet_api::Message;
//! use serde_json::json;
//!
//! let harness = EmitterHarness::new();
//!
//! harness.emitter().emit_snapshot(json!({ "cursor": 5 }));
//! harness.emitter().emit_data(Message::builder().build());
//!
//! assert_eq!(harness.snapshots(), vec![json!({ "cursor": 5 })]);
//! assert_eq!(harness.data_messages().len(), 1);
//! assert!(harness.errors().is_empty());
//! ```
//!
//! For executor-level tests,
//! [`parameters`](EmitterHarness::parameters) assembles
//! [`ExecutionParameters`] already wired to the harness:
//!
//! ```
//! use flowlet_api::testing::EmitterHarness;
//! use flowlet_api::{Component, ComponentError, ExecutionParameters, Message};
//!
//! struct Quiet;
//!
//! impl Component for Quiet {
//!     fn execute(&mut self, _: ExecutionParameters) -> Result<(), ComponentError> {
//!         Ok(())
//!     }
//! }
//!
//! let harness = EmitterHarness::new();
//! let mut component = Quiet;
//! component.execute(harness.parameters(Message::builder().build())).unwrap();
//!
//! assert!(harness.emissions().is_empty());
//! ```

use crate::emitter::EventEmitter;
use crate::error::InvocationError;
use crate::event::EventKind;
use crate::http_reply::HttpReply;
use crate::message::Message;
use crate::parameters::ExecutionParameters;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// One recorded emission, tagged by channel.
///
/// Serializes with the channel's wire name as tag, so logs can be
/// snapshotted as JSON:
/// `{"channel":"data","payload":{...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "channel", content = "payload", rename_all = "camelCase")]
pub enum Emission {
    /// Delivered on the error channel.
    Error(InvocationError),
    /// Delivered on the data channel.
    Data(Message),
    /// Delivered on the snapshot channel.
    Snapshot(Value),
    /// Delivered on the rebound channel.
    Rebound(String),
    /// Delivered on the updateKeys channel.
    UpdateKeys(Value),
    /// Delivered on the httpReply channel.
    HttpReply(HttpReply),
}

impl Emission {
    /// Returns which channel this emission arrived on.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Error(_) => EventKind::Error,
            Self::Data(_) => EventKind::Data,
            Self::Snapshot(_) => EventKind::Snapshot,
            Self::Rebound(_) => EventKind::Rebound,
            Self::UpdateKeys(_) => EventKind::UpdateKeys,
            Self::HttpReply(_) => EventKind::HttpReply,
        }
    }
}

type EmissionLog = Arc<Mutex<Vec<Emission>>>;

/// Records everything an [`EventEmitter`] delivers.
///
/// Emissions from all channels land in one ordered log, so tests can
/// assert both per-channel payloads and cross-channel ordering.
pub struct EmitterHarness {
    emitter: Arc<EventEmitter>,
    log: EmissionLog,
}

impl EmitterHarness {
    /// Creates a harness recording all six channels.
    #[must_use]
    pub fn new() -> Self {
        let log: EmissionLog = Arc::new(Mutex::new(Vec::new()));

        let (l1, l2, l3, l4, l5, l6) = (
            Arc::clone(&log),
            Arc::clone(&log),
            Arc::clone(&log),
            Arc::clone(&log),
            Arc::clone(&log),
            Arc::clone(&log),
        );
        let emitter = EventEmitter::builder()
            .on_error(move |err| l1.lock().push(Emission::Error(err)))
            .on_data(move |msg| l2.lock().push(Emission::Data(msg)))
            .on_snapshot(move |snap| l3.lock().push(Emission::Snapshot(snap)))
            .on_rebound(move |reason| l4.lock().push(Emission::Rebound(reason)))
            .on_update_keys(move |keys| l5.lock().push(Emission::UpdateKeys(keys)))
            .on_http_reply(move |reply| l6.lock().push(Emission::HttpReply(reply)))
            .build()
            .expect("all channels registered");

        Self {
            emitter: Arc::new(emitter),
            log,
        }
    }

    /// Creates a harness with only the required channels registered.
    ///
    /// Use this to verify that optional-channel emissions are dropped
    /// silently.
    #[must_use]
    pub fn required_only() -> Self {
        let log: EmissionLog = Arc::new(Mutex::new(Vec::new()));

        let (l1, l2, l3) = (Arc::clone(&log), Arc::clone(&log), Arc::clone(&log));
        let emitter = EventEmitter::builder()
            .on_error(move |err| l1.lock().push(Emission::Error(err)))
            .on_data(move |msg| l2.lock().push(Emission::Data(msg)))
            .on_snapshot(move |snap| l3.lock().push(Emission::Snapshot(snap)))
            .build()
            .expect("required channels registered");

        Self {
            emitter: Arc::new(emitter),
            log,
        }
    }

    /// Returns the recording emitter, shared.
    #[must_use]
    pub fn emitter(&self) -> Arc<EventEmitter> {
        Arc::clone(&self.emitter)
    }

    /// Assembles execution parameters wired to this harness, with
    /// empty configuration and snapshot.
    #[must_use]
    pub fn parameters(&self, message: Message) -> ExecutionParameters {
        ExecutionParameters::builder(message, self.emitter()).build()
    }

    /// Assembles execution parameters wired to this harness with the
    /// given configuration and snapshot.
    #[must_use]
    pub fn parameters_with(
        &self,
        message: Message,
        configuration: Value,
        snapshot: Value,
    ) -> ExecutionParameters {
        ExecutionParameters::builder(message, self.emitter())
            .configuration(configuration)
            .snapshot(snapshot)
            .build()
    }

    /// Returns all recorded emissions, in emission order.
    #[must_use]
    pub fn emissions(&self) -> Vec<Emission> {
        self.log.lock().clone()
    }

    /// Returns the payloads delivered on the error channel.
    #[must_use]
    pub fn errors(&self) -> Vec<InvocationError> {
        self.log
            .lock()
            .iter()
            .filter_map(|e| match e {
                Emission::Error(err) => Some(err.clone()),
                _ => None,
            })
            .collect()
    }

    /// Returns the messages delivered on the data channel.
    #[must_use]
    pub fn data_messages(&self) -> Vec<Message> {
        self.log
            .lock()
            .iter()
            .filter_map(|e| match e {
                Emission::Data(msg) => Some(msg.clone()),
                _ => None,
            })
            .collect()
    }

    /// Returns the values delivered on the snapshot channel.
    #[must_use]
    pub fn snapshots(&self) -> Vec<Value> {
        self.log
            .lock()
            .iter()
            .filter_map(|e| match e {
                Emission::Snapshot(snap) => Some(snap.clone()),
                _ => None,
            })
            .collect()
    }

    /// Returns the reasons delivered on the rebound channel.
    #[must_use]
    pub fn rebounds(&self) -> Vec<String> {
        self.log
            .lock()
            .iter()
            .filter_map(|e| match e {
                Emission::Rebound(reason) => Some(reason.clone()),
                _ => None,
            })
            .collect()
    }

    /// Returns the values delivered on the updateKeys channel.
    #[must_use]
    pub fn updated_keys(&self) -> Vec<Value> {
        self.log
            .lock()
            .iter()
            .filter_map(|e| match e {
                Emission::UpdateKeys(keys) => Some(keys.clone()),
                _ => None,
            })
            .collect()
    }

    /// Returns the replies delivered on the httpReply channel.
    #[must_use]
    pub fn http_replies(&self) -> Vec<HttpReply> {
        self.log
            .lock()
            .iter()
            .filter_map(|e| match e {
                Emission::HttpReply(reply) => Some(reply.clone()),
                _ => None,
            })
            .collect()
    }

    /// Clears the emission log.
    pub fn clear(&self) {
        self.log.lock().clear();
    }
}

impl Default for EmitterHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EmitterHarness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmitterHarness")
            .field("emissions", &self.log.lock().len())
            .finish_non_exhaustive()
    }
}
