//! Anthropic Messages API provider implementation

use async_trait::async_trait;
use quill_config::{Backend, ConfigError, Defaults, ProviderConfig};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use super::{Exchange, Provider};
use crate::convert::anthropic::{build_request, parse_response};
use crate::error::LlmError;
use crate::protocol::anthropic::{self, AnthropicResponse};
use crate::tools;
use crate::types::{LlmResponse, Message};

/// Anthropic API version header value
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic Messages API provider
#[derive(Debug)]
pub struct AnthropicProvider {
    config: ProviderConfig,
    exchange: Exchange,
    messages_url: Url,
    api_key: SecretString,
    model: String,
    max_tokens: u32,
}

impl AnthropicProvider {
    const BACKEND: Backend = Backend::Anthropic;

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
                variable: "ANTHROPIC_BASE_URL",
            })?;
        let base_url = super::parse_url("base_url", base_url)?;

        let model = config.model.clone().unwrap_or_else(|| defaults.model.to_owned());
        let exchange = Exchange::new(Self::BACKEND, &config, model.clone(), anthropic::error_message)?;

        Ok(Self {
            messages_url: super::join_path(&base_url, &["messages"]),
            max_tokens: config.max_tokens.unwrap_or(defaults.max_tokens),
            exchange,
            api_key,
            model,
            config,
        })
    }
}

#[async_trait]
impl Provider for AnthropicProvider {
    fn backend(&self) -> Backend {
        Self::BACKEND
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn send_message(&self, messages: &[Message]) -> Result<LlmResponse, LlmError> {
        let wire_request = build_request(&self.model, self.max_tokens, messages, tools::registry());

        tracing::debug!(
            backend = %Self::BACKEND,
            model = %self.model,
            messages = wire_request.messages.len(),
            "sending messages request"
        );

        let builder = self
            .exchange
            .post(self.messages_url.clone())
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&wire_request);

        let wire_response: AnthropicResponse = self.exchange.send(builder).await?;

        parse_response(wire_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(key: Option<&str>) -> ProviderConfig {
        ProviderConfig {
            api_key: key.map(|k| SecretString::from(k.to_owned())),
            ..ProviderConfig::default()
        }
    }

    #[test]
    fn missing_key_fails_construction() {
        let err = AnthropicProvider::new(config(None)).unwrap_err();
        assert!(matches!(
            err,
            LlmError::Configuration(ConfigError::MissingApiKey {
                backend: Backend::Anthropic,
                ..
            })
        ));

        assert!(AnthropicProvider::new(config(Some(""))).is_err());
    }

    #[test]
    fn defaults_fill_unset_fields() {
        let provider = AnthropicProvider::new(config(Some("sk-ant-test"))).unwrap();

        assert_eq!(provider.backend(), Backend::Anthropic);
        assert_eq!(provider.messages_url.as_str(), "https://api.anthropic.com/v1/messages");
        assert_eq!(provider.model, "claude-sonnet-4-20250514");
        assert_eq!(provider.max_tokens, 4096);
    }

    #[test]
    fn invalid_base_url_fails_construction() {
        let err = AnthropicProvider::new(ProviderConfig {
            base_url: Some("::nope".to_owned()),
            ..config(Some("sk-ant-test"))
        })
        .unwrap_err();

        assert!(matches!(err, LlmError::Configuration(ConfigError::InvalidUrl { .. })));
    }

    #[test]
    fn debug_output_hides_key() {
        let provider = AnthropicProvider::new(config(Some("sk-ant-secret"))).unwrap();
        assert!(!format!("{provider:?}").contains("sk-ant-secret"));
    }
}
