//! EchoComponent - reflects the invocation back to the caller.

use flowlet_api::{Component, ComponentError, ExecutionParameters, Message};
use serde_json::json;

/// Component that echoes its input back to the caller.
///
/// Emits the prior snapshot wrapped as `{"echo": <snapshot>}` on the
/// snapshot channel, then a data message whose body wraps the incoming
/// body and configuration:
///
/// ```json
/// { "echo": <body>, "config": <configuration> }
/// ```
///
/// Attachments of the incoming message are carried over unchanged.
/// The canonical two-emission scenario for exercising a wired-up host.
///
/// # Example
///
/// ```
/// use flowlet_api::testing::EmitterHarness;
/// use flowlet_api::{Component, Message};
/// use flowlet_runtime::EchoComponent;
/// use serde_json::json;
///
/// let harness = EmitterHarness::new();
/// let message = Message::builder().body(json!({ "hello": "world" })).build();
///
/// EchoComponent::new()
///     .execute(harness.parameters(message))
///     .unwrap();
///
/// assert_eq!(harness.data_messages()[0].body()["echo"], json!({ "hello": "world" }));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoComponent;

impl EchoComponent {
    /// Creates an echo component.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Component for EchoComponent {
    fn execute(&mut self, parameters: ExecutionParameters) -> Result<(), ComponentError> {
        let input = parameters.message();
        let reply = Message::builder()
            .body(json!({
                "echo": input.body(),
                "config": parameters.configuration(),
            }))
            .attachments(input.attachments().clone())
            .build();

        parameters
            .emitter()
            .emit_snapshot(json!({ "echo": parameters.snapshot() }))
            .emit_data(reply);
        Ok(())
    }
}
