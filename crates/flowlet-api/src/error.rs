//! Error types for the component SDK.
//!
//! All errors implement [`ErrorCode`] for unified handling: a stable
//! machine-readable code plus a recoverability hint.
//!
//! # Error Code Convention
//!
//! | Error | Code | Recoverable |
//! |-------|------|-------------|
//! | [`ExecutionFailed`](ComponentError::ExecutionFailed) | `COMPONENT_EXECUTION_FAILED` | Yes |
//! | [`InvalidPayload`](ComponentError::InvalidPayload) | `COMPONENT_INVALID_PAYLOAD` | No |
//! | [`MissingConfiguration`](ComponentError::MissingConfiguration) | `COMPONENT_MISSING_CONFIGURATION` | No |
//! | [`InitFailed`](ComponentError::InitFailed) | `COMPONENT_INIT_FAILED` | Yes |
//! | [`Validation`](InvocationError::Validation) | `INVOCATION_VALIDATION` | No |
//! | [`Resolution`](InvocationError::Resolution) | `INVOCATION_RESOLUTION` | No |
//! | [`Instantiation`](InvocationError::Instantiation) | `INVOCATION_INSTANTIATION` | Delegates |
//! | [`Execution`](InvocationError::Execution) | `INVOCATION_EXECUTION` | Delegates |
//! | [`MissingCallback`](EmitterError::MissingCallback) | `EMITTER_MISSING_CALLBACK` | No |
//!
//! # Two layers
//!
//! [`ComponentError`] is what component code raises. [`InvocationError`]
//! is what the error channel carries: the harness taxonomy, with raised
//! component failures normalized into its `Execution` variant via
//! `From<ComponentError>`. Emitting a `ComponentError` and returning it
//! from `execute` therefore produce identical error-channel payloads.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::event::EventKind;

/// Unified error code interface.
///
/// Implemented by every error enum in this SDK to enable consistent
/// logging, monitoring and retry decisions.
///
/// # Code Format
///
/// - **UPPER_SNAKE_CASE**: e.g., `"COMPONENT_EXECUTION_FAILED"`
/// - **Namespace-prefixed**: `COMPONENT_`, `INVOCATION_`, `EMITTER_`
/// - **Stable**: codes do not change once defined (API contract)
///
/// # Recoverability
///
/// An error is recoverable if retrying the operation may succeed or a
/// transient condition caused it. Invalid input and unknown identifiers
/// are not recoverable.
pub trait ErrorCode {
    /// Returns a machine-readable error code.
    fn code(&self) -> &'static str;

    /// Returns whether the error is recoverable.
    ///
    /// - `true`: retry may succeed
    /// - `false`: retry will not help, requires a code/config change
    fn is_recoverable(&self) -> bool;
}

/// Validates that an error code follows SDK conventions.
///
/// # Checks
///
/// 1. Code is UPPER_SNAKE_CASE
/// 2. Code starts with the expected prefix
/// 3. Code is not empty
///
/// # Panics
///
/// Panics with a descriptive message if validation fails.
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();

    assert!(!code.is_empty(), "Error code must not be empty");

    assert!(
        code.starts_with(expected_prefix),
        "Error code '{}' must start with prefix '{}'",
        code,
        expected_prefix
    );

    assert!(
        is_upper_snake_case(code),
        "Error code '{}' must be UPPER_SNAKE_CASE",
        code
    );
}

/// Validates multiple error codes at once.
///
/// Use this to verify all variants of an error enum.
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        assert_error_code(err, expected_prefix);
    }
}

/// Checks if a string is UPPER_SNAKE_CASE.
fn is_upper_snake_case(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }

    if s.starts_with('_') || s.ends_with('_') {
        return false;
    }

    if s.contains("__") {
        return false;
    }

    s.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

/// Failure raised by component code.
///
/// Components return this from `execute` and the lifecycle hooks. The
/// harness never lets it propagate further: it is converted into an
/// [`InvocationError`] and delivered on the error channel.
///
/// # Variants
///
/// | Variant | When | Recovery |
/// |---------|------|----------|
/// | `ExecutionFailed` | Processing failed | May retry |
/// | `InvalidPayload` | Bad message data | Fix payload |
/// | `MissingConfiguration` | Required setting absent | Fix config |
/// | `InitFailed` | Startup/init hook failed | May retry |
///
/// # Example
///
/// ```
/// use flowlet_api::{ComponentError, ErrorCode};
///
/// let err = ComponentError::ExecutionFailed("upstream timeout".into());
/// assert_eq!(err.code(), "COMPONENT_EXECUTION_FAILED");
/// assert!(err.is_recoverable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum ComponentError {
    /// Execution failed while processing a message.
    ///
    /// Common causes: timeout, resource unavailable, external service
    /// failure.
    ///
    /// **Recoverable** - retry may succeed.
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// The incoming message doesn't match the expected shape.
    ///
    /// **Not recoverable** - the same payload will fail again.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// A required configuration entry is absent or malformed.
    ///
    /// **Not recoverable** - fix the configuration.
    #[error("missing configuration: {0}")]
    MissingConfiguration(String),

    /// A lifecycle hook (startup/init) failed.
    ///
    /// **Recoverable** - may succeed once the environment settles.
    #[error("initialization failed: {0}")]
    InitFailed(String),
}

impl ErrorCode for ComponentError {
    /// Returns a machine-readable error code.
    ///
    /// All component errors use the `COMPONENT_` prefix.
    fn code(&self) -> &'static str {
        match self {
            Self::ExecutionFailed(_) => "COMPONENT_EXECUTION_FAILED",
            Self::InvalidPayload(_) => "COMPONENT_INVALID_PAYLOAD",
            Self::MissingConfiguration(_) => "COMPONENT_MISSING_CONFIGURATION",
            Self::InitFailed(_) => "COMPONENT_INIT_FAILED",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::ExecutionFailed(_) => true,
            Self::InitFailed(_) => true,
            Self::InvalidPayload(_) => false,
            Self::MissingConfiguration(_) => false,
        }
    }
}

/// Failure of a component invocation, as carried on the error channel.
///
/// Every failure mode of an invocation maps to exactly one variant,
/// and every failure reaches the caller as exactly one emission of
/// this type. The variants follow the phases of the execution state
/// machine: input validation, resolution, instantiation, execution.
///
/// # Variants
///
/// | Variant | Phase | Recovery |
/// |---------|-------|----------|
/// | `Validation` | Before resolution | Fix the call |
/// | `Resolution` | Registry lookup | Register the component |
/// | `Instantiation` | Factory call | Delegates to source |
/// | `Execution` | `execute` raised | Delegates to source |
///
/// # Normalization
///
/// `From<ComponentError>` wraps a raised component failure in the
/// `Execution` variant, so the harness funnels raised errors through
/// the same channel call a component would use itself:
///
/// ```
/// use flowlet_api::{ComponentError, ErrorCode, InvocationError};
///
/// let raised = ComponentError::ExecutionFailed("Ouch".into());
/// let err: InvocationError = raised.into();
/// assert_eq!(err.code(), "INVOCATION_EXECUTION");
/// assert!(err.is_recoverable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum InvocationError {
    /// The invocation input itself was unusable (e.g. absent
    /// parameters). No resolution was attempted.
    ///
    /// **Not recoverable** - the caller must fix the invocation.
    #[error("invalid invocation: {0}")]
    Validation(String),

    /// No component is registered under the requested name.
    ///
    /// **Not recoverable** - register the component or fix the name.
    #[error("component not found: {0}")]
    Resolution(String),

    /// The component's factory failed to produce an instance.
    ///
    /// Recoverability delegates to the underlying component error.
    #[error("failed to instantiate component '{component}': {source}")]
    Instantiation {
        /// Symbolic name the factory was registered under.
        component: String,
        /// What the factory raised.
        source: ComponentError,
    },

    /// The component's `execute` raised.
    ///
    /// Recoverability delegates to the underlying component error.
    #[error("component execution failed: {0}")]
    Execution(#[from] ComponentError),
}

impl ErrorCode for InvocationError {
    /// Returns a machine-readable error code.
    ///
    /// All invocation errors use the `INVOCATION_` prefix.
    fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "INVOCATION_VALIDATION",
            Self::Resolution(_) => "INVOCATION_RESOLUTION",
            Self::Instantiation { .. } => "INVOCATION_INSTANTIATION",
            Self::Execution(_) => "INVOCATION_EXECUTION",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::Validation(_) => false,
            Self::Resolution(_) => false,
            Self::Instantiation { source, .. } => source.is_recoverable(),
            Self::Execution(source) => source.is_recoverable(),
        }
    }
}

/// Failure to assemble an [`EventEmitter`](crate::EventEmitter).
///
/// Raised only at construction time: emitting never fails once the
/// emitter exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum EmitterError {
    /// A required channel has no callback registered.
    ///
    /// **Not recoverable** - register the callback and rebuild.
    #[error("no callback registered for required channel: {0}")]
    MissingCallback(EventKind),
}

impl ErrorCode for EmitterError {
    fn code(&self) -> &'static str {
        match self {
            Self::MissingCallback(_) => "EMITTER_MISSING_CALLBACK",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}
