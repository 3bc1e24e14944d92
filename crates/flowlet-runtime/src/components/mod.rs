//! Builtin components for the flowlet runtime.
//!
//! - [`EchoComponent`] - reflects body, configuration and snapshot back
//! - [`NoopComponent`] - accepts everything, emits nothing
//!
//! The crate exposes the types only; hosts that want them register them
//! under names of their choosing (`"builtin:echo"` style works well).

mod echo;
mod noop;

pub use echo::EchoComponent;
pub use noop::NoopComponent;
