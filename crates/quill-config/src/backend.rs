//! The closed set of supported backends and their environment contract

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::env::EnvSnapshot;
use crate::error::ConfigError;

/// Global variable selecting the backend when none is given explicitly
pub const PROVIDER_VAR: &str = "LLM_PROVIDER";
/// Global sampling temperature
pub const TEMPERATURE_VAR: &str = "LLM_TEMPERATURE";
/// Global max-tokens default
pub const MAX_TOKENS_VAR: &str = "LLM_MAX_TOKENS";
/// Global request timeout in milliseconds
pub const TIMEOUT_VAR: &str = "LLM_TIMEOUT";

/// Supported LLM backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Backend {
    /// Anthropic Messages API
    Anthropic,
    /// `OpenAI` chat completions API
    OpenAi,
    /// Azure-hosted `OpenAI`, addressed by deployment
    AzureOpenAi,
}

/// Environment variable names consulted for one backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvKeys {
    pub api_key: &'static str,
    pub model: &'static str,
    pub max_tokens: &'static str,
    pub base_url: Option<&'static str>,
    pub organization: Option<&'static str>,
    pub endpoint: Option<&'static str>,
    pub deployment_name: Option<&'static str>,
    pub api_version: Option<&'static str>,
}

impl Backend {
    /// Every backend, in selection order. The first entry is the default.
    pub const ALL: [Self; 3] = [Self::Anthropic, Self::OpenAi, Self::AzureOpenAi];

    /// Canonical lowercase name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Anthropic => "anthropic",
            Self::OpenAi => "openai",
            Self::AzureOpenAi => "azure-openai",
        }
    }

    /// Environment variables this backend reads
    pub const fn env_keys(self) -> EnvKeys {
        match self {
            Self::Anthropic => EnvKeys {
                api_key: "ANTHROPIC_API_KEY",
                model: "ANTHROPIC_MODEL",
                max_tokens: "ANTHROPIC_MAX_TOKENS",
                base_url: Some("ANTHROPIC_BASE_URL"),
                organization: None,
                endpoint: None,
                deployment_name: None,
                api_version: None,
            },
            Self::OpenAi => EnvKeys {
                api_key: "OPENAI_API_KEY",
                model: "OPENAI_MODEL",
                max_tokens: "OPENAI_MAX_TOKENS",
                base_url: Some("OPENAI_BASE_URL"),
                organization: Some("OPENAI_ORGANIZATION"),
                endpoint: None,
                deployment_name: None,
                api_version: None,
            },
            Self::AzureOpenAi => EnvKeys {
                api_key: "AZURE_OPENAI_API_KEY",
                model: "AZURE_OPENAI_MODEL",
                max_tokens: "AZURE_OPENAI_MAX_TOKENS",
                base_url: None,
                organization: None,
                endpoint: Some("AZURE_OPENAI_ENDPOINT"),
                deployment_name: Some("AZURE_OPENAI_DEPLOYMENT_NAME"),
                api_version: Some("AZURE_OPENAI_API_VERSION"),
            },
        }
    }

    /// Variables that must be set for the backend to authenticate
    pub const fn required_env(self) -> &'static [&'static str] {
        match self {
            Self::Anthropic => &["ANTHROPIC_API_KEY"],
            Self::OpenAi => &["OPENAI_API_KEY"],
            Self::AzureOpenAi => &["AZURE_OPENAI_API_KEY", "AZURE_OPENAI_ENDPOINT"],
        }
    }

    /// Whether every required variable is present in the snapshot
    pub fn is_available(self, env: &EnvSnapshot) -> bool {
        self.required_env().iter().all(|key| env.get(key).is_some())
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anthropic" => Ok(Self::Anthropic),
            "openai" => Ok(Self::OpenAi),
            "azure" | "azure-openai" | "azure_openai" => Ok(Self::AzureOpenAi),
            _ => Err(ConfigError::UnknownBackend { name: s.to_owned() }),
        }
    }
}

impl TryFrom<String> for Backend {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
