//! Event channels a component can emit on.
//!
//! Components never return results directly. Everything they produce
//! travels through one of six named channels on the [`EventEmitter`]
//! handed to them in their execution parameters.
//!
//! # Channels
//!
//! | Channel | Wire name | Payload | Required |
//! |---------|-----------|---------|----------|
//! | `Error` | `error` | [`InvocationError`] | yes |
//! | `Data` | `data` | [`Message`] | yes |
//! | `Snapshot` | `snapshot` | JSON value | yes |
//! | `Rebound` | `rebound` | reason string | no |
//! | `UpdateKeys` | `updateKeys` | JSON value | no |
//! | `HttpReply` | `httpReply` | [`HttpReply`] | no |
//!
//! Required channels must have a callback registered before an emitter
//! can be built; emitting on an unregistered optional channel is a
//! silent drop (logged at debug level).
//!
//! [`EventEmitter`]: crate::EventEmitter
//! [`InvocationError`]: crate::InvocationError
//! [`Message`]: crate::Message
//! [`HttpReply`]: crate::HttpReply

use serde::{Deserialize, Serialize};

/// One of the six output channels of a component invocation.
///
/// `Error`, `Data` and `Snapshot` are required: an emitter cannot be
/// built without callbacks for them. The rest are optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    /// Failure reporting. The only way errors leave an invocation.
    Error,

    /// Outgoing messages produced by the component.
    Data,

    /// State the platform should persist for the next invocation.
    Snapshot,

    /// Request to retry the current message later.
    Rebound,

    /// Updated credential keys (e.g. refreshed OAuth tokens).
    UpdateKeys,

    /// HTTP response for request/reply style flows.
    HttpReply,
}

impl EventKind {
    /// Returns the wire name of this channel, as used in logs and
    /// serialized emission records.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Data => "data",
            Self::Snapshot => "snapshot",
            Self::Rebound => "rebound",
            Self::UpdateKeys => "updateKeys",
            Self::HttpReply => "httpReply",
        }
    }

    /// Returns `true` if an emitter cannot be built without a callback
    /// for this channel.
    #[must_use]
    pub fn is_required(&self) -> bool {
        matches!(self, Self::Error | Self::Data | Self::Snapshot)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
