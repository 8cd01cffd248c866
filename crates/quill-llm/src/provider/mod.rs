//! Provider trait and implementations for LLM backends

pub mod anthropic;
pub mod azure;
pub mod openai;

use std::time::Duration;

use async_trait::async_trait;
use quill_config::{Backend, ConfigError, ProviderConfig, StatusClass, StatusMapping};
use reqwest::header::RETRY_AFTER;
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::LlmError;
use crate::types::{LlmResponse, Message};

/// Trait implemented by each LLM backend adapter
///
/// Adapters hold only immutable configuration and a connection pool, so one
/// instance may serve any number of concurrent conversations.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Backend this adapter talks to
    fn backend(&self) -> Backend;

    /// Effective configuration the adapter was built with
    fn config(&self) -> &ProviderConfig;

    /// Send a conversation and return the model's reply
    async fn send_message(&self, messages: &[Message]) -> Result<LlmResponse, LlmError>;

    /// Send a conversation and return only the reply text
    async fn complete(&self, messages: &[Message]) -> Result<String, LlmError> {
        Ok(self.send_message(messages).await?.content)
    }
}

/// Require a non-blank API key
pub(crate) fn required_api_key(backend: Backend, config: &ProviderConfig) -> Result<SecretString, ConfigError> {
    match &config.api_key {
        Some(key) if !key.expose_secret().trim().is_empty() => Ok(key.clone()),
        _ => Err(ConfigError::MissingApiKey {
            backend,
            variable: backend.env_keys().api_key,
        }),
    }
}

/// Parse a configured URL, naming the field on failure
pub(crate) fn parse_url(field: &'static str, value: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        field,
        value: value.to_owned(),
        reason,
    };

    let url = Url::parse(value.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }

    Ok(url)
}

/// Append path segments to a base URL, keeping any path it already has
pub(crate) fn join_path(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// HTTP plumbing shared by every adapter
///
/// Owns the client built with the configured timeout and turns transport
/// failures and non-success statuses into classified [`LlmError`]s.
#[derive(Debug, Clone)]
pub(crate) struct Exchange {
    backend: Backend,
    client: Client,
    timeout_ms: u64,
    model: String,
    status_mapping: StatusMapping,
    error_message: fn(&str) -> Option<String>,
}

impl Exchange {
    /// Build the client for an adapter
    ///
    /// `model` is the name reported when the backend answers "not found".
    /// `error_message` pulls the detail text out of the backend's error body.
    pub(crate) fn new(
        backend: Backend,
        config: &ProviderConfig,
        model: String,
        error_message: fn(&str) -> Option<String>,
    ) -> Result<Self, LlmError> {
        let defaults = quill_config::Defaults::for_backend(backend);
        let timeout_ms = config.timeout_ms.unwrap_or(defaults.timeout_ms);

        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| LlmError::Transport {
                backend,
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            backend,
            client,
            timeout_ms,
            model,
            status_mapping: config
                .status_mapping
                .clone()
                .unwrap_or_else(|| StatusMapping::for_backend(backend)),
            error_message,
        })
    }

    pub(crate) fn post(&self, url: Url) -> RequestBuilder {
        self.client.post(url)
    }

    /// Send a prepared request and decode a successful JSON body
    pub(crate) async fn send<R: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<R, LlmError> {
        let response = builder.send().await.map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.status_error(response).await);
        }

        let body = response.text().await.map_err(|e| self.transport_error(&e))?;

        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(backend = %self.backend, error = %e, "upstream returned unparseable body");
            LlmError::protocol(self.backend, format!("failed to parse response: {e}"))
        })
    }

    fn transport_error(&self, error: &reqwest::Error) -> LlmError {
        if error.is_timeout() {
            tracing::warn!(backend = %self.backend, timeout_ms = self.timeout_ms, "upstream request timed out");
            LlmError::Timeout {
                backend: self.backend,
                timeout_ms: self.timeout_ms,
            }
        } else {
            tracing::error!(backend = %self.backend, error = %error, "upstream request failed");
            LlmError::Transport {
                backend: self.backend,
                message: error.to_string(),
            }
        }
    }

    async fn status_error(&self, response: Response) -> LlmError {
        let status = response.status();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u64>().ok());
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!(backend = %self.backend, status = %status, error = %e, "failed to read error body");
                String::new()
            }
        };

        let message = (self.error_message)(&body).unwrap_or_else(|| {
            let body = body.trim();
            if body.is_empty() {
                status.canonical_reason().unwrap_or("no error detail").to_owned()
            } else {
                body.to_owned()
            }
        });

        tracing::warn!(
            backend = %self.backend,
            status = %status,
            "upstream returned error"
        );

        let backend = self.backend;
        match self.status_mapping.classify(status.as_u16()) {
            StatusClass::Authentication => LlmError::Authentication { backend, message },
            StatusClass::RateLimit => LlmError::RateLimited {
                backend,
                retry_after,
                message,
            },
            StatusClass::NotFound => LlmError::NotFound {
                backend,
                model: self.model.clone(),
                message,
            },
            StatusClass::Other => LlmError::Upstream {
                backend,
                status: status.as_u16(),
                message,
            },
        }
    }
}
