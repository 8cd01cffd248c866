use quill_config::{Backend, ConfigError};
use thiserror::Error;

/// Errors that can occur while talking to an LLM backend
///
/// Every variant is a distinct kind so callers can decide between retrying,
/// backing off, re-authenticating, or giving up.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Backend selection or configuration is invalid; no request was sent
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// Backend rejected the credentials
    #[error("{backend} rejected the API key: {message}")]
    Authentication { backend: Backend, message: String },

    /// Backend is throttling requests
    #[error("{backend} rate limit exceeded: {message}")]
    RateLimited {
        backend: Backend,
        /// Seconds the backend asked us to wait, when it said
        retry_after: Option<u64>,
        message: String,
    },

    /// Requested model or deployment is unknown to the backend
    #[error("{backend} does not recognize model '{model}': {message}")]
    NotFound {
        backend: Backend,
        model: String,
        message: String,
    },

    /// Response did not match the backend's documented envelope
    #[error("{backend} returned an unexpected response: {message}")]
    Protocol { backend: Backend, message: String },

    /// Network failure before a response was received
    #[error("request to {backend} failed: {message}")]
    Transport { backend: Backend, message: String },

    /// Request exceeded the configured timeout
    #[error("request to {backend} timed out after {timeout_ms}ms")]
    Timeout { backend: Backend, timeout_ms: u64 },

    /// Any other non-success status
    #[error("{backend} returned {status}: {message}")]
    Upstream {
        backend: Backend,
        status: u16,
        message: String,
    },
}

impl LlmError {
    /// Whether the same request may succeed if sent again later
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited { .. } | Self::Transport { .. } | Self::Timeout { .. } => true,
            Self::Upstream { status, .. } => *status >= 500,
            Self::Configuration(_)
            | Self::Authentication { .. }
            | Self::NotFound { .. }
            | Self::Protocol { .. } => false,
        }
    }

    /// Backend the error originated from, when one was involved
    pub const fn backend(&self) -> Option<Backend> {
        match self {
            Self::Configuration(_) => None,
            Self::Authentication { backend, .. }
            | Self::RateLimited { backend, .. }
            | Self::NotFound { backend, .. }
            | Self::Protocol { backend, .. }
            | Self::Transport { backend, .. }
            | Self::Timeout { backend, .. }
            | Self::Upstream { backend, .. } => Some(*backend),
        }
    }

    pub(crate) fn protocol(backend: Backend, message: impl Into<String>) -> Self {
        Self::Protocol {
            backend,
            message: message.into(),
        }
    }
}
