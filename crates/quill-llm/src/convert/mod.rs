//! Conversion between canonical types and wire formats
//!
//! Each submodule handles conversions for a specific provider's protocol.

pub mod anthropic;
pub mod openai;

use crate::types::{Message, Role};

/// Separator placed between multiple system messages
const SYSTEM_SEPARATOR: &str = "\n\n";

/// Split system messages out of the turn sequence
///
/// System messages are joined in order with a blank line. The remaining
/// messages keep their relative order.
pub(crate) fn split_system(messages: &[Message]) -> (Option<String>, Vec<&Message>) {
    let mut system: Vec<&str> = Vec::new();
    let mut turns = Vec::with_capacity(messages.len());

    for message in messages {
        if message.role == Role::System {
            system.push(&message.content);
        } else {
            turns.push(message);
        }
    }

    let system = (!system.is_empty()).then(|| system.join(SYSTEM_SEPARATOR));
    (system, turns)
}
