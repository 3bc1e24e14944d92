//! Component SDK for flowlet.
//!
//! This crate defines the contract between pluggable business-logic
//! components and the harness that runs them: the value objects a
//! component consumes, the event channels it reports through, and the
//! [`Component`] trait itself.
//!
//! # Crate Architecture
//!
//! This crate is the **SDK layer**: component authors depend on it and
//! nothing else.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       SDK Layer                             │
//! │  (External, SemVer stable, safe to depend on)               │
//! ├─────────────────────────────────────────────────────────────┤
//! │  flowlet-api : Message, EventEmitter, Component  ◄── HERE   │
//! ├─────────────────────────────────────────────────────────────┤
//! │                      Harness Layer                          │
//! │  flowlet-runtime : ComponentRegistry, Executor, builtins    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Execution Model
//!
//! A component never returns results. It receives an
//! [`ExecutionParameters`] bundle (message, configuration, snapshot,
//! emitter) and reports exclusively through the emitter's channels:
//!
//! ```text
//! Executor ──► Component::execute(params)
//!                  │
//!                  ▼ params.emitter()
//!            ┌──────────────┬──────────────┬──────────────┐
//!            ▼              ▼              ▼              ▼
//!          data          snapshot       error      rebound / updateKeys
//!        (Message)       (Value)  (InvocationError)   / httpReply
//! ```
//!
//! | Channel | Payload | Required |
//! |---------|---------|----------|
//! | `error` | [`InvocationError`] | yes |
//! | `data` | [`Message`] | yes |
//! | `snapshot` | JSON value | yes |
//! | `rebound` | reason string | no |
//! | `updateKeys` | JSON value | no |
//! | `httpReply` | [`HttpReply`] | no |
//!
//! Emission is synchronous and unbuffered; callbacks run on the
//! emitting thread in emission order. Zero or more data/snapshot
//! emissions per invocation are fine.
//!
//! # Failure Model
//!
//! `execute` returns `Result<(), ComponentError>`. A returned `Err` is
//! funneled by the harness to the error channel as
//! [`InvocationError::Execution`], exactly as if the component had
//! called [`EventEmitter::emit_exception`] itself. No failure
//! propagates past the harness.
//!
//! # Example
//!
//! ```
//! use flowlet_api::testing::EmitterHarness;
//! use flowlet_api::{Component, ComponentError, ExecutionParameters, Message};
//! use serde_json::json;
//!
//! struct Greeter;
//!
//! impl Component for Greeter {
//!     fn execute(&mut self, parameters: ExecutionParameters) -> Result<(), ComponentError> {
//!         let name = parameters.message().body()["name"]
//!             .as_str()
//!             .unwrap_or("world")
//!             .to_owned();
//!
//!         let reply = Message::builder()
//!             .body(json!({ "greeting": format!("hello, {name}") }))
//!             .build();
//!         parameters.emitter().emit_data(reply);
//!         Ok(())
//!     }
//! }
//!
//! let harness = EmitterHarness::new();
//! let msg = Message::builder().body(json!({ "name": "flow" })).build();
//!
//! let mut component = Greeter;
//! component.execute(harness.parameters(msg)).unwrap();
//!
//! assert_eq!(harness.data_messages()[0].body()["greeting"], "hello, flow");
//! ```
//!
//! # Crate Structure
//!
//! - [`Component`] - the business-logic contract
//! - [`EventEmitter`], [`EventKind`] - channels and emission
//! - [`Message`], [`HttpReply`] - payload value objects
//! - [`ExecutionParameters`] and lifecycle parameter objects
//! - [`ComponentError`], [`InvocationError`], [`EmitterError`] - errors
//! - [`testing`] - emission-recording harness for tests
//!
//! # Related Crates
//!
//! - `flowlet-runtime` - harness layer (ComponentRegistry, Executor)

mod component;
mod emitter;
mod error;
mod event;
mod http_reply;
mod message;
mod parameters;
pub mod testing;

// Re-export the component contract
pub use component::Component;

// Re-export emitter types
pub use emitter::{EventEmitter, EventEmitterBuilder};
pub use event::EventKind;

// Re-export value objects
pub use http_reply::{HttpReply, HttpReplyBuilder};
pub use message::{Message, MessageBuilder, MessageId};
pub use parameters::{
    ExecutionParameters, ExecutionParametersBuilder, InitParameters, ShutdownParameters,
    StartupParameters,
};

// Re-export error types
pub use error::{
    assert_error_code, assert_error_codes, ComponentError, EmitterError, ErrorCode,
    InvocationError,
};
