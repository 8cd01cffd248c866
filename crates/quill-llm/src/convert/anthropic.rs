//! Conversion between canonical types and Anthropic wire format

use quill_config::Backend;

use crate::error::LlmError;
use crate::protocol::anthropic::{
    AnthropicMessage, AnthropicRequest, AnthropicResponse, AnthropicResponseBlock, AnthropicRole, AnthropicTool,
};
use crate::tools::ToolDefinition;
use crate::types::{LlmResponse, Message, Role, ToolCall, Usage};

// -- Outbound: canonical types -> Anthropic wire format --

impl From<&ToolDefinition> for AnthropicTool {
    fn from(tool: &ToolDefinition) -> Self {
        Self {
            name: tool.name.to_owned(),
            description: tool.description.to_owned(),
            input_schema: tool.input_schema(),
        }
    }
}

/// Build a Messages API request body
///
/// Anthropic has no tool role, so tool output is replayed as an assistant
/// turn. Sampling parameters are not sent.
pub fn build_request(model: &str, max_tokens: u32, messages: &[Message], tools: &[ToolDefinition]) -> AnthropicRequest {
    let (system, turns) = super::split_system(messages);

    let messages = turns
        .into_iter()
        .map(|msg| AnthropicMessage {
            role: match msg.role {
                Role::User => AnthropicRole::User,
                Role::Assistant | Role::Tool | Role::System => AnthropicRole::Assistant,
            },
            content: msg.content.clone(),
        })
        .collect();

    AnthropicRequest {
        model: model.to_owned(),
        max_tokens,
        system,
        messages,
        tools: (!tools.is_empty()).then(|| tools.iter().map(AnthropicTool::from).collect()),
    }
}

// -- Inbound: Anthropic wire format -> canonical types --

/// Map a Messages API response into the canonical response
///
/// Text blocks are concatenated in order. A `tool_use` block whose input is
/// not a JSON object is rejected.
pub fn parse_response(resp: AnthropicResponse) -> Result<LlmResponse, LlmError> {
    let mut content = String::new();
    let mut tool_calls = Vec::new();

    for block in resp.content {
        match block {
            AnthropicResponseBlock::Text { text } => content.push_str(&text),
            AnthropicResponseBlock::ToolUse { name, input, .. } => {
                let serde_json::Value::Object(parameters) = input else {
                    return Err(LlmError::protocol(
                        Backend::Anthropic,
                        format!("tool_use input for '{name}' is not a JSON object"),
                    ));
                };
                tool_calls.push(ToolCall { name, parameters });
            }
            AnthropicResponseBlock::Other => {
                tracing::debug!("skipping unsupported Anthropic content block");
            }
        }
    }

    Ok(LlmResponse {
        content,
        tool_calls,
        usage: resp.usage.map(|u| Usage {
            input_tokens: u.input_tokens,
            output_tokens: u.output_tokens,
        }),
    })
}
