//! Executor - turns a symbolic component name into a running invocation.
//!
//! # Invocation lifecycle
//!
//! ```text
//! execute(Some(parameters))
//!        │
//!        ▼
//!   Resolving ──► Instantiating ──► Executing ──► Completed
//!        │              │               │
//!        └──────────────┴───────────────┴───► Failed
//! ```
//!
//! Every failure, whatever the phase, funnels into exactly one
//! `emit_exception` call on the error channel: a registry miss as a
//! resolution error, a factory failure as an instantiation error, a
//! raised execution failure as an execution error. [`Executor::execute`]
//! itself never returns an error and never panics on contract failures;
//! callers observe outcomes solely through the emitter.

use crate::registry::ComponentRegistry;
use flowlet_api::{EventEmitter, ExecutionParameters, InvocationError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Phase of a single invocation, used in structured logs.
///
/// | Phase | Meaning |
/// |-------|---------|
/// | `Resolving` | Looking up the factory for the symbolic name |
/// | `Instantiating` | Running the factory |
/// | `Executing` | Inside the component's `execute` |
/// | `Completed` | Normal return, terminal |
/// | `Failed` | One error emission happened, terminal |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Looking up the factory for the symbolic name.
    Resolving,
    /// Running the factory to obtain a fresh instance.
    Instantiating,
    /// Inside the component's processing entry point.
    Executing,
    /// The invocation returned normally.
    Completed,
    /// The invocation was reported on the error channel.
    Failed,
}

impl Phase {
    /// Returns `true` if the invocation is finished.
    ///
    /// # Example
    ///
    /// ```
    /// use flowlet_runtime::Phase;
    ///
    /// assert!(Phase::Completed.is_terminal());
    /// assert!(Phase::Failed.is_terminal());
    /// assert!(!Phase::Executing.is_terminal());
    /// ```
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Resolving => write!(f, "resolving"),
            Self::Instantiating => write!(f, "instantiating"),
            Self::Executing => write!(f, "executing"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Executes one component, identified by symbolic name, per invocation.
///
/// The executor holds only immutable state: the name, a shared registry
/// and a default error sink used when no parameters were supplied at
/// all. A single executor can therefore serve concurrent invocations;
/// isolation comes from each parameter set carrying its own emitter.
///
/// # Example
///
/// ```
/// use flowlet_api::testing::EmitterHarness;
/// use flowlet_api::Message;
/// use flowlet_runtime::{ComponentRegistry, EchoComponent, Executor};
/// use std::sync::Arc;
///
/// let mut registry = ComponentRegistry::new();
/// registry.register("echo", Box::new(|| Ok(Box::new(EchoComponent::new()))));
///
/// let harness = EmitterHarness::new();
/// let executor = Executor::new("echo", Arc::new(registry), harness.emitter());
///
/// executor.execute(Some(harness.parameters(Message::builder().build())));
///
/// assert!(harness.errors().is_empty());
/// assert_eq!(harness.data_messages().len(), 1);
/// ```
pub struct Executor {
    component: String,
    registry: Arc<ComponentRegistry>,
    emitter: Arc<EventEmitter>,
}

impl Executor {
    /// Creates an executor for the named component.
    ///
    /// `emitter` is the default error sink, used only when `execute`
    /// receives no parameters (and thus no per-invocation emitter).
    #[must_use]
    pub fn new(
        component: impl Into<String>,
        registry: Arc<ComponentRegistry>,
        emitter: Arc<EventEmitter>,
    ) -> Self {
        Self {
            component: component.into(),
            registry,
            emitter,
        }
    }

    /// Returns the symbolic name this executor resolves.
    #[must_use]
    pub fn component(&self) -> &str {
        &self.component
    }

    /// Runs one invocation: resolve, instantiate, execute.
    ///
    /// All outcomes are emissions; there is no return value. A missing
    /// parameter set is rejected with a validation error before
    /// resolution is attempted. Every failure produces exactly one
    /// error emission; success produces whatever the component emitted
    /// and nothing more.
    pub fn execute(&self, parameters: Option<ExecutionParameters>) {
        let Some(parameters) = parameters else {
            let error = InvocationError::Validation("execution parameters are required".into());
            warn!(
                component = %self.component,
                phase = %Phase::Failed,
                error = %error,
                "invocation rejected"
            );
            self.emitter.emit_exception(error);
            return;
        };

        debug!(component = %self.component, phase = %Phase::Resolving, "resolving component");
        let Some(factory) = self.registry.get(&self.component) else {
            let error = InvocationError::Resolution(self.component.clone());
            warn!(
                component = %self.component,
                phase = %Phase::Failed,
                error = %error,
                "resolution failed"
            );
            parameters.emitter().emit_exception(error);
            return;
        };

        debug!(component = %self.component, phase = %Phase::Instantiating, "instantiating component");
        let mut component = match factory() {
            Ok(component) => component,
            Err(source) => {
                let error = InvocationError::Instantiation {
                    component: self.component.clone(),
                    source,
                };
                warn!(
                    component = %self.component,
                    phase = %Phase::Failed,
                    error = %error,
                    "instantiation failed"
                );
                parameters.emitter().emit_exception(error);
                return;
            }
        };

        debug!(component = %self.component, phase = %Phase::Executing, "executing component");
        // `execute` consumes the parameters, so keep a handle on the
        // emitter for funneling a raised failure afterwards.
        let emitter = Arc::clone(parameters.emitter());
        match component.execute(parameters) {
            Ok(()) => {
                debug!(
                    component = %self.component,
                    phase = %Phase::Completed,
                    "invocation completed"
                );
            }
            Err(error) => {
                warn!(
                    component = %self.component,
                    phase = %Phase::Failed,
                    error = %error,
                    "execution raised"
                );
                emitter.emit_exception(error);
            }
        }
    }
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("component", &self.component)
            .finish_non_exhaustive()
    }
}
