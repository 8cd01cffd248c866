use secrecy::SecretString;
use serde::Deserialize;

use crate::Backend;
use crate::status::StatusMapping;

/// Configuration for a single backend adapter
///
/// Every field is optional at the type level. The resolver fills gaps from
/// the environment and [`Defaults`]; each adapter then enforces the subset
/// it requires. Once handed to an adapter the value is never mutated.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// API key for authentication
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Model identifier
    #[serde(default)]
    pub model: Option<String>,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<String>,
    /// Maximum tokens to generate
    #[serde(default)]
    pub max_tokens: Option<u32>,
    /// Sampling temperature
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Nucleus sampling threshold
    #[serde(default)]
    pub top_p: Option<f64>,
    /// Whole-request timeout in milliseconds
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    /// `OpenAI` organization header
    #[serde(default)]
    pub organization: Option<String>,
    /// Azure deployment name
    #[serde(default)]
    pub deployment_name: Option<String>,
    /// Azure API version query parameter
    #[serde(default)]
    pub api_version: Option<String>,
    /// Azure resource endpoint
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Status-code classification override
    #[serde(default)]
    pub status_mapping: Option<StatusMapping>,
}

/// Hard-coded fallbacks, the lowest precedence layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Defaults {
    pub model: &'static str,
    pub base_url: Option<&'static str>,
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub timeout_ms: u64,
    pub api_version: Option<&'static str>,
}

impl Defaults {
    pub const fn for_backend(backend: Backend) -> Self {
        match backend {
            Backend::Anthropic => Self {
                model: "claude-sonnet-4-20250514",
                base_url: Some("https://api.anthropic.com/v1"),
                max_tokens: 4096,
                temperature: 0.7,
                top_p: 1.0,
                timeout_ms: 60_000,
                api_version: None,
            },
            Backend::OpenAi => Self {
                model: "gpt-4o",
                base_url: Some("https://api.openai.com/v1"),
                max_tokens: 4096,
                temperature: 0.7,
                top_p: 1.0,
                timeout_ms: 60_000,
                api_version: None,
            },
            Backend::AzureOpenAi => Self {
                model: "gpt-4o",
                base_url: None,
                max_tokens: 4096,
                temperature: 0.7,
                top_p: 1.0,
                timeout_ms: 60_000,
                api_version: Some("2024-10-21"),
            },
        }
    }
}
