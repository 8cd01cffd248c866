//! LLM gateway for Quill
//!
//! Translates a backend-neutral conversation and a fixed catalog of local
//! tools into the wire format of one of several LLM backends (Anthropic,
//! `OpenAI`, Azure `OpenAI`), sends it, and parses the reply back into the
//! same neutral shape.
//!
//! Start from [`GatewayFactory`], which resolves configuration from explicit
//! overrides, an environment snapshot, and defaults, and returns a
//! [`Gateway`] implementing [`Provider`].

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod convert;
pub mod error;
pub mod factory;
pub mod protocol;
pub mod provider;
pub mod tools;
pub mod types;

pub use error::LlmError;
pub use factory::{Gateway, GatewayFactory};
pub use provider::Provider;
pub use provider::anthropic::AnthropicProvider;
pub use provider::azure::AzureOpenAiProvider;
pub use provider::openai::OpenAiProvider;
pub use quill_config::{Backend, ConfigError, EnvSnapshot, ProviderConfig, StatusMapping};
pub use tools::{ParameterKind, ToolDefinition, ToolParameter};
pub use types::{LlmResponse, Message, Role, ToolCall, Usage};
