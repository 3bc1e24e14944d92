//! Component contract.
//!
//! A component is one pluggable unit of business logic. The harness
//! resolves it by symbolic name, creates a fresh instance and calls
//! [`execute`](Component::execute) once per message. Everything the
//! component produces leaves through the emitter inside its execution
//! parameters; `execute` itself only reports success or failure.
//!
//! # Lifecycle
//!
//! ```text
//! host scheduler                          executor
//!      │                                     │
//!      ▼                                     │
//! startup(StartupParameters)   flow started  │
//! init(InitParameters)         before runs   │
//!      │                                     ▼
//!      │                        execute(ExecutionParameters)   per message
//!      │                                     │
//!      ▼                                     │
//! shutdown(ShutdownParameters) flow stopped  │
//! ```
//!
//! Only `execute` is driven by the [`Executor`]; the lifecycle hooks
//! exist for hosts that manage whole flows and default to no-ops.
//!
//! [`Executor`]: https://docs.rs/flowlet-runtime
//!
//! # Example
//!
//! ```
//! use flowlet_api::{Component, ComponentError, ExecutionParameters, Message};
//! use serde_json::json;
//!
//! struct Uppercase;
//!
//! impl Component for Uppercase {
//!     fn execute(&mut self, parameters: ExecutionParameters) -> Result<(), ComponentError> {
//!         let text = parameters.message().body()["text"]
//!             .as_str()
//!             .ok_or_else(|| ComponentError::InvalidPayload("text must be a string".into()))?
//!             .to_uppercase();
//!
//!         let reply = Message::builder().body(json!({ "text": text })).build();
//!         parameters.emitter().emit_data(reply);
//!         Ok(())
//!     }
//! }
//! ```

use crate::error::ComponentError;
use crate::parameters::{
    ExecutionParameters, InitParameters, ShutdownParameters, StartupParameters,
};
use serde_json::{Map, Value};

/// One pluggable unit of business logic.
///
/// # Methods
///
/// | Method | Driven by | Purpose |
/// |--------|-----------|---------|
/// | `execute` | Executor, per message | Process one message |
/// | `startup` | Host, once per flow start | Provision external resources |
/// | `init` | Host, before processing | Prepare for a run |
/// | `shutdown` | Host, once per flow stop | Tear down what `startup` made |
///
/// # Obligations
///
/// - Results travel only through the emitter in the parameters; the
///   return value carries nothing but success or failure.
/// - Zero or more data/snapshot emissions per call are fine, in any
///   order.
/// - The emitter must not be retained beyond the call. Taking the
///   parameters by value enforces this structurally.
/// - At most one terminal outcome: return `Ok(())` or `Err`. A
///   component that also emitted an error before returning `Err` is
///   tolerated; the caller simply observes both emissions.
///
/// # Thread Safety
///
/// `Send + Sync` so instances can be created behind shared registries
/// and moved to whichever thread invokes them. Each invocation gets a
/// fresh instance; no cross-invocation state is guaranteed.
pub trait Component: Send + Sync {
    /// Processes one message.
    ///
    /// # Errors
    ///
    /// Returning `Err` is equivalent to emitting the error yourself:
    /// the harness funnels it to the error channel as an
    /// `InvocationError::Execution` and never lets it propagate
    /// further.
    fn execute(&mut self, parameters: ExecutionParameters) -> Result<(), ComponentError>;

    /// Provisions external resources when a flow is started.
    ///
    /// The returned JSON object is persisted by the platform and
    /// handed back to [`shutdown`](Self::shutdown) as state, e.g. a
    /// webhook subscription id to cancel later.
    ///
    /// Default: returns an empty object.
    ///
    /// # Errors
    ///
    /// Return `Err` if provisioning fails; the flow will not start.
    fn startup(&mut self, parameters: StartupParameters) -> Result<Value, ComponentError> {
        let _ = parameters;
        Ok(Value::Object(Map::new()))
    }

    /// Prepares for a run, before any message is processed.
    ///
    /// Default: no-op.
    ///
    /// # Errors
    ///
    /// Return `Err` if preparation fails; no messages will be
    /// delivered.
    fn init(&mut self, parameters: InitParameters) -> Result<(), ComponentError> {
        let _ = parameters;
        Ok(())
    }

    /// Tears down what `startup` provisioned when a flow is stopped.
    ///
    /// Default: no-op.
    ///
    /// # Errors
    ///
    /// Return `Err` if teardown fails. The flow is stopping either
    /// way; the host decides whether to surface the failure.
    fn shutdown(&mut self, parameters: ShutdownParameters) -> Result<(), ComponentError> {
        let _ = parameters;
        Ok(())
    }
}
