//! Flowlet runtime - the execution harness layer.
//!
//! This crate is what embedding hosts use to run components written
//! against `flowlet-api`. It contributes the pieces the SDK layer
//! deliberately leaves out: where component implementations come from
//! and who drives an invocation end to end.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                SDK Layer (flowlet-api)               │
//! │  Component trait, EventEmitter, Message, errors      │
//! └─────────────────────────────────────────────────────┘
//!                           ↑
//! ┌─────────────────────────────────────────────────────┐
//! │             Harness Layer (THIS CRATE)               │
//! │  registry/   : symbolic name → ComponentFactory      │
//! │  executor/   : resolve → instantiate → execute       │
//! │  components/ : EchoComponent, NoopComponent          │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Running a component
//!
//! ```
//! use flowlet_api::testing::EmitterHarness;
//! use flowlet_api::Message;
//! use flowlet_runtime::{ComponentRegistry, EchoComponent, Executor};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! // Startup: the host registers its components once.
//! let mut registry = ComponentRegistry::new();
//! registry.register("echo", Box::new(|| Ok(Box::new(EchoComponent::new()))));
//! let registry = Arc::new(registry);
//!
//! // Per invocation: parameters carry the message and the emitter.
//! let harness = EmitterHarness::new();
//! let executor = Executor::new("echo", registry, harness.emitter());
//! let message = Message::builder().body(json!({ "hello": "world" })).build();
//!
//! executor.execute(Some(harness.parameters(message)));
//!
//! assert!(harness.errors().is_empty());
//! assert_eq!(harness.data_messages().len(), 1);
//! ```
//!
//! # Failure containment
//!
//! [`Executor::execute`] never returns an error: missing parameters,
//! an unknown name, a failing factory and a raised execution failure
//! each become exactly one emission on the error channel. Hosts watch
//! the channels, not return values.

pub mod components;
pub mod executor;
pub mod registry;

pub use components::{EchoComponent, NoopComponent};
pub use executor::{Executor, Phase};
pub use registry::{ComponentFactory, ComponentRegistry};
