use thiserror::Error;

use crate::Backend;

/// Errors raised while selecting or configuring a backend
///
/// These never involve the network: they are detected before any request
/// is built.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Backend name did not match any known backend or alias
    #[error("unknown backend '{name}' (expected one of: anthropic, openai, azure-openai)")]
    UnknownBackend { name: String },

    /// No API key was supplied explicitly or through the environment
    #[error("{backend} requires an API key (set {variable} or pass api_key explicitly)")]
    MissingApiKey {
        backend: Backend,
        /// Environment variable that would have supplied the key
        variable: &'static str,
    },

    /// A backend-specific required field is absent
    #[error("{backend} requires `{field}` (set {variable} or pass it explicitly)")]
    MissingField {
        backend: Backend,
        field: &'static str,
        variable: &'static str,
    },

    /// A base URL or endpoint could not be parsed
    #[error("invalid {field} '{value}': {reason}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },
}
