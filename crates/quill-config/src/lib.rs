//! Configuration for the Quill LLM gateway
//!
//! Holds the closed set of backends, the per-backend provider configuration,
//! the layered resolver that merges explicit values with an environment
//! snapshot and defaults, and the optional TOML configuration file.

#![allow(clippy::must_use_candidate)]

mod backend;
mod env;
mod error;
mod loader;
pub mod log;
mod provider;
mod resolve;
mod status;

use indexmap::IndexMap;
use serde::Deserialize;

pub use backend::{Backend, EnvKeys, MAX_TOKENS_VAR, PROVIDER_VAR, TEMPERATURE_VAR, TIMEOUT_VAR};
pub use env::{EnvSnapshot, expand_env};
pub use error::ConfigError;
pub use log::{LogConfig, LogFormat};
pub use provider::{Defaults, ProviderConfig};
pub use resolve::resolve;
pub use status::{StatusClass, StatusMapping};

/// Top-level Quill configuration file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Backend to use when none is given on the command line
    #[serde(default)]
    pub backend: Option<Backend>,
    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
    /// Explicit provider settings keyed by backend name
    #[serde(default)]
    pub providers: IndexMap<Backend, ProviderConfig>,
}

impl Config {
    /// Explicit settings for a backend, if the file has any
    pub fn provider(&self, backend: Backend) -> Option<&ProviderConfig> {
        self.providers.get(&backend)
    }
}
