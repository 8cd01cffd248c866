//! Conversion between canonical types and `OpenAI` chat completion format
//!
//! Used by both the `OpenAI` and Azure `OpenAI` adapters.

use quill_config::{Backend, Defaults, ProviderConfig};
use serde_json::{Map, Value};

use crate::error::LlmError;
use crate::protocol::openai::{
    OpenAiFunction, OpenAiMessage, OpenAiRequest, OpenAiResponse, OpenAiRole, OpenAiTool, OpenAiToolCall,
};
use crate::tools::ToolDefinition;
use crate::types::{LlmResponse, Message, Role, ToolCall, Usage};

/// Sampling parameters sent with every chat completion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChatParams {
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
}

impl ChatParams {
    /// Take sampling values from `config`, falling back to `defaults`
    pub fn from_config(config: &ProviderConfig, defaults: &Defaults) -> Self {
        Self {
            max_tokens: config.max_tokens.unwrap_or(defaults.max_tokens),
            temperature: config.temperature.unwrap_or(defaults.temperature),
            top_p: config.top_p.unwrap_or(defaults.top_p),
        }
    }
}

// -- Outbound: canonical types -> OpenAI wire format --

impl From<&ToolDefinition> for OpenAiTool {
    fn from(tool: &ToolDefinition) -> Self {
        Self {
            tool_type: "function".to_owned(),
            function: OpenAiFunction {
                name: tool.name.to_owned(),
                description: tool.description.to_owned(),
                parameters: tool.input_schema(),
            },
        }
    }
}

/// Build a chat completion request body
///
/// `model` is `None` for deployment-addressed endpoints where the URL
/// selects the model. Tool messages carry a fresh `call_<uuid>` identifier.
pub fn build_request(
    model: Option<&str>,
    params: ChatParams,
    messages: &[Message],
    tools: &[ToolDefinition],
) -> OpenAiRequest {
    let (system, turns) = super::split_system(messages);

    let mut wire_messages = Vec::with_capacity(turns.len() + 1);
    if let Some(system) = system {
        wire_messages.push(OpenAiMessage {
            role: OpenAiRole::System,
            content: system,
            tool_call_id: None,
        });
    }

    wire_messages.extend(turns.into_iter().map(|msg| {
        let role = match msg.role {
            Role::System => OpenAiRole::System,
            Role::User => OpenAiRole::User,
            Role::Assistant => OpenAiRole::Assistant,
            Role::Tool => OpenAiRole::Tool,
        };
        OpenAiMessage {
            role,
            content: msg.content.clone(),
            tool_call_id: (role == OpenAiRole::Tool).then(synthetic_call_id),
        }
    }));

    let has_tools = !tools.is_empty();

    OpenAiRequest {
        model: model.map(str::to_owned),
        messages: wire_messages,
        max_tokens: params.max_tokens,
        temperature: params.temperature,
        top_p: params.top_p,
        tools: has_tools.then(|| tools.iter().map(OpenAiTool::from).collect()),
        tool_choice: has_tools.then(|| "auto".to_owned()),
    }
}

fn synthetic_call_id() -> String {
    format!("call_{}", uuid::Uuid::new_v4().simple())
}

// -- Inbound: OpenAI wire format -> canonical types --

/// Map a chat completion response into the canonical response
///
/// Only the first choice is used. Zero choices is a protocol fault rather
/// than an empty answer.
pub fn parse_response(resp: OpenAiResponse, backend: Backend) -> Result<LlmResponse, LlmError> {
    let usage = resp.usage.map(|u| Usage {
        input_tokens: u.prompt_tokens,
        output_tokens: u.completion_tokens,
    });

    let Some(choice) = resp.choices.into_iter().next() else {
        return Err(LlmError::protocol(backend, "response contained no choices"));
    };

    let tool_calls = choice
        .message
        .tool_calls
        .unwrap_or_default()
        .into_iter()
        .map(|call| parse_tool_call(call, backend))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LlmResponse {
        content: choice.message.content.unwrap_or_default(),
        tool_calls,
        usage,
    })
}

/// Decode a tool call's arguments into a parameter map
///
/// Arguments normally arrive as JSON text. Empty text means no arguments,
/// and an already-structured object is taken as is.
fn parse_tool_call(call: OpenAiToolCall, backend: Backend) -> Result<ToolCall, LlmError> {
    let name = call.function.name;

    let parameters = match call.function.arguments {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        Value::String(text) if text.trim().is_empty() => Map::new(),
        Value::String(text) => match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                return Err(LlmError::protocol(
                    backend,
                    format!("arguments for tool '{name}' are not a JSON object: {other}"),
                ));
            }
            Err(e) => {
                return Err(LlmError::protocol(
                    backend,
                    format!("arguments for tool '{name}' are not valid JSON: {e}"),
                ));
            }
        },
        other => {
            return Err(LlmError::protocol(
                backend,
                format!("arguments for tool '{name}' have unexpected type: {other}"),
            ));
        }
    };

    Ok(ToolCall { name, parameters })
}
