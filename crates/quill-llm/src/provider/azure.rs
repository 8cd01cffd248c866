//! Azure `OpenAI` provider implementation
//!
//! Speaks the `OpenAI` chat completion envelope, but addresses a named
//! deployment in the URL instead of a model in the body and authenticates
//! with an `api-key` header.

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

/// Azure `OpenAI` deployment provider
#[derive(Debug)]
pub struct AzureOpenAiProvider {
    config: ProviderConfig,
    exchange: Exchange,
    completions_url: Url,
    api_key: SecretString,
    deployment: String,
    params: ChatParams,
}

impl AzureOpenAiProvider {
    const BACKEND: Backend = Backend::AzureOpenAi;

    /// Create from an effective provider configuration
    ///
    /// Requires an API key and a resource endpoint. The deployment name
    /// falls back to the model name, and the API version to the default.
    pub fn new(config: ProviderConfig) -> Result<Self, LlmError> {
        let defaults = Defaults::for_backend(Self::BACKEND);
        let keys = Self::BACKEND.env_keys();
        let api_key = super::required_api_key(Self::BACKEND, &config)?;

        let endpoint = config
            .endpoint
            .as_deref()
            .filter(|endpoint| !endpoint.trim().is_empty())
            .ok_or(ConfigError::MissingField {
                backend: Self::BACKEND,
                field: "endpoint",
                variable: keys.endpoint.unwrap_or("AZURE_OPENAI_ENDPOINT"),
            })?;
        let endpoint = super::parse_url("endpoint", endpoint)?;

        let deployment = config
            .deployment_name
            .clone()
            .or_else(|| config.model.clone())
            .unwrap_or_else(|| defaults.model.to_owned());
        let api_version = config
            .api_version
            .as_deref()
            .or(defaults.api_version)
            .ok_or(ConfigError::MissingField {
                backend: Self::BACKEND,
                field: "api_version",
                variable: keys.api_version.unwrap_or("AZURE_OPENAI_API_VERSION"),
            })?;

        let mut completions_url =
            super::join_path(&endpoint, &["openai", "deployments", deployment.as_str(), "chat", "completions"]);
        completions_url.query_pairs_mut().append_pair("api-version", api_version);

        let exchange = Exchange::new(Self::BACKEND, &config, deployment.clone(), openai::error_message)?;

        Ok(Self {
            params: ChatParams::from_config(&config, &defaults),
            completions_url,
            exchange,
            api_key,
            deployment,
            config,
        })
    }
}

#[async_trait]
impl Provider for AzureOpenAiProvider {
    fn backend(&self) -> Backend {
        Self::BACKEND
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn send_message(&self, messages: &[Message]) -> Result<LlmResponse, LlmError> {
        let wire_request = build_request(None, self.params, messages, tools::registry());

        tracing::debug!(
            backend = %Self::BACKEND,
            deployment = %self.deployment,
            messages = wire_request.messages.len(),
            "sending deployment chat completion request"
        );

        let builder = self
            .exchange
            .post(self.completions_url.clone())
            .header("api-key", self.api_key.expose_secret())
            .json(&wire_request);

        let wire_response: OpenAiResponse = self.exchange.send(builder).await?;

        parse_response(wire_response, Self::BACKEND)
    }
}
