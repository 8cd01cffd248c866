//! Canonical, backend-neutral conversation types
//!
//! Adapters translate these to and from each backend's wire format; nothing
//! here knows about any particular API.

pub mod message;
pub mod response;

pub use message::{Message, Role};
pub use response::{LlmResponse, ToolCall, Usage};
