use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::tools::{self, ToolDefinition};

/// A tool invocation requested by the model
///
/// `name` is expected to match a registry entry, but that is the caller's
/// check to make.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool name as declared by the model
    pub name: String,
    /// Decoded argument mapping
    pub parameters: Map<String, Value>,
}

impl ToolCall {
    /// Registry entry for this call's tool, if the name is known
    pub fn definition(&self) -> Option<&'static ToolDefinition> {
        tools::find(&self.name)
    }
}

/// Token usage reported by the backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens consumed by the prompt
    pub input_tokens: u32,
    /// Tokens generated in the reply
    pub output_tokens: u32,
}

/// Canonical response from any backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LlmResponse {
    /// Concatenated free text, empty when the model only called tools
    pub content: String,
    /// Tool calls in the order the backend returned them
    pub tool_calls: Vec<ToolCall>,
    /// Token usage, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}
