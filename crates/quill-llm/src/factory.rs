//! Backend selection and adapter construction

use async_trait::async_trait;
use quill_config::{Backend, EnvSnapshot, PROVIDER_VAR, ProviderConfig};

use crate::error::LlmError;
use crate::provider::Provider;
use crate::provider::anthropic::AnthropicProvider;
use crate::provider::azure::AzureOpenAiProvider;
use crate::provider::openai::OpenAiProvider;
use crate::types::{LlmResponse, Message};

/// A constructed adapter for one backend
#[derive(Debug)]
pub enum Gateway {
    Anthropic(AnthropicProvider),
    OpenAi(OpenAiProvider),
    AzureOpenAi(AzureOpenAiProvider),
}

impl Gateway {
    fn provider(&self) -> &dyn Provider {
        match self {
            Self::Anthropic(provider) => provider,
            Self::OpenAi(provider) => provider,
            Self::AzureOpenAi(provider) => provider,
        }
    }
}

#[async_trait]
impl Provider for Gateway {
    fn backend(&self) -> Backend {
        self.provider().backend()
    }

    fn config(&self) -> &ProviderConfig {
        self.provider().config()
    }

    async fn send_message(&self, messages: &[Message]) -> Result<LlmResponse, LlmError> {
        self.provider().send_message(messages).await
    }
}

/// Builds gateways from a snapshot of the environment
///
/// The snapshot is the only source of environment values; nothing below the
/// factory reads the process environment.
#[derive(Debug, Clone, Default)]
pub struct GatewayFactory {
    env: EnvSnapshot,
}

impl GatewayFactory {
    pub const fn new(env: EnvSnapshot) -> Self {
        Self { env }
    }

    /// Capture the current process environment
    pub fn from_env() -> Self {
        Self::new(EnvSnapshot::capture())
    }

    pub const fn env(&self) -> &EnvSnapshot {
        &self.env
    }

    /// Backend used when the caller names none
    ///
    /// `LLM_PROVIDER` when set, otherwise the first supported backend.
    pub fn default_backend(&self) -> Result<Backend, LlmError> {
        match self.env.get(PROVIDER_VAR) {
            Some(name) => Ok(name.parse()?),
            None => Ok(Backend::ALL[0]),
        }
    }

    /// Construct a gateway for a backend named by the caller
    ///
    /// Names match case-insensitively after trimming, and `azure`,
    /// `azure-openai`, and `azure_openai` select the same backend.
    /// `overrides` form the explicit configuration layer.
    pub fn create(&self, backend: Option<&str>, overrides: Option<ProviderConfig>) -> Result<Gateway, LlmError> {
        let backend = match backend {
            Some(name) => name.parse()?,
            None => self.default_backend()?,
        };

        self.create_for(backend, overrides)
    }

    /// Construct a gateway for an already-parsed backend
    pub fn create_for(&self, backend: Backend, overrides: Option<ProviderConfig>) -> Result<Gateway, LlmError> {
        let explicit = overrides.unwrap_or_default();
        let config = quill_config::resolve(backend, &explicit, &self.env);

        tracing::debug!(
            backend = %backend,
            model = config.model.as_deref().unwrap_or_default(),
            "constructing gateway"
        );

        let gateway = match backend {
            Backend::Anthropic => Gateway::Anthropic(AnthropicProvider::new(config)?),
            Backend::OpenAi => Gateway::OpenAi(OpenAiProvider::new(config)?),
            Backend::AzureOpenAi => Gateway::AzureOpenAi(AzureOpenAiProvider::new(config)?),
        };

        Ok(gateway)
    }

    /// Every supported backend, whether or not it is configured
    #[allow(clippy::unused_self)]
    pub const fn list_available_backends(&self) -> &'static [Backend] {
        &Backend::ALL
    }

    /// Whether a backend's required environment variables are set
    ///
    /// Never fails and never touches the network; unknown names are simply
    /// unavailable.
    pub fn is_available(&self, backend: &str) -> bool {
        backend
            .parse::<Backend>()
            .is_ok_and(|backend| backend.is_available(&self.env))
    }
}
