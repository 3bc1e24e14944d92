//! NoopComponent - accepts everything, emits nothing.

use flowlet_api::{Component, ComponentError, ExecutionParameters};
use tracing::debug;

/// Component that discards its input.
///
/// The invocation succeeds with zero emissions, which makes this the
/// minimal flow terminator: use it when a pipeline step must exist but
/// nothing should be produced.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopComponent;

impl NoopComponent {
    /// Creates a noop component.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Component for NoopComponent {
    fn execute(&mut self, parameters: ExecutionParameters) -> Result<(), ComponentError> {
        debug!(message = %parameters.message().id(), "discarding message");
        Ok(())
    }
}
