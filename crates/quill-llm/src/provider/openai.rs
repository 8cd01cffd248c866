//! `OpenAI` chat completions provider implementation

use async_trait::async_trait;
use quill_config::{Backend, ConfigError, Defaults, ProviderConfig};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use super::{Exchange, Provider};
use crate::convert::openai::{ChatParams, build_request, parse_response};
use crate::error::LlmError;
use crate::protocol::openai::{self, OpenAiResponse};
use crate::tools;
use crate::types::{LlmResponse, Message};

/// Organization header sent when one is configured
const ORGANIZATION_HEADER: &str = "OpenAI-Organization";

/// `OpenAI` chat completions provider
#[derive(Debug)]
pub struct OpenAiProvider {
    config: ProviderConfig,
    exchange: Exchange,
    completions_url: Url,
    api_key: SecretString,
    model: String,
    params: ChatParams,
}

impl OpenAiProvider {
    const BACKEND: Backend = Backend::OpenAi;

    /// Create from an effective provider configuration
    ///
    /// Fields the configuration leaves empty fall back to the backend's
    /// defaults. Fails without touching the network when the API key is
    /// missing or the base URL is invalid.
    pub fn new(config: ProviderConfig) -> Result<Self, LlmError> {
        let defaults = Defaults::for_backend(Self::BACKEND);
        let api_key = super::required_api_key(Self::BACKEND, &config)?;

        let base_url = config
            .base_url
            .as_deref()
            .or(defaults.base_url)
            .ok_or(ConfigError::MissingField {
                backend: Self::BACKEND,
                field: "base_url",
                variable: "OPENAI_BASE_URL",
            })?;
        let base_url = super::parse_url("base_url", base_url)?;

        let model = config.model.clone().unwrap_or_else(|| defaults.model.to_owned());
        let exchange = Exchange::new(Self::BACKEND, &config, model.clone(), openai::error_message)?;

        Ok(Self {
            completions_url: super::join_path(&base_url, &["chat", "completions"]),
            params: ChatParams::from_config(&config, &defaults),
            exchange,
            api_key,
            model,
            config,
        })
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    fn backend(&self) -> Backend {
        Self::BACKEND
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn send_message(&self, messages: &[Message]) -> Result<LlmResponse, LlmError> {
        let wire_request = build_request(Some(&self.model), self.params, messages, tools::registry());

        tracing::debug!(
            backend = %Self::BACKEND,
            model = %self.model,
            messages = wire_request.messages.len(),
            "sending chat completion request"
        );

        let mut builder = self
            .exchange
            .post(self.completions_url.clone())
            .bearer_auth(self.api_key.expose_secret())
            .json(&wire_request);

        if let Some(organization) = &self.config.organization {
            builder = builder.header(ORGANIZATION_HEADER, organization);
        }

        let wire_response: OpenAiResponse = self.exchange.send(builder).await?;

        parse_response(wire_response, Self::BACKEND)
    }
}
