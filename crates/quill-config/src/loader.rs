use std::path::Path;

use url::Url;

use crate::{Config, EnvSnapshot};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders against `env`,
    /// then deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path, env: &EnvSnapshot) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw, env)
    }

    /// Parse and validate configuration text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn parse(raw: &str, env: &EnvSnapshot) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw, env).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that explicit provider values are usable
    ///
    /// # Errors
    ///
    /// Returns an error naming the backend and field that is out of range
    pub fn validate(&self) -> anyhow::Result<()> {
        for (backend, provider) in &self.providers {
            if let Some(temperature) = provider.temperature
                && !(0.0..=2.0).contains(&temperature)
            {
                anyhow::bail!("providers.{backend}.temperature must be between 0 and 2, got {temperature}");
            }

            if let Some(top_p) = provider.top_p
                && !(0.0..=1.0).contains(&top_p)
            {
                anyhow::bail!("providers.{backend}.top_p must be between 0 and 1, got {top_p}");
            }

            if provider.max_tokens == Some(0) {
                anyhow::bail!("providers.{backend}.max_tokens must be greater than zero");
            }

            if provider.timeout_ms == Some(0) {
                anyhow::bail!("providers.{backend}.timeout_ms must be greater than zero");
            }

            for (field, value) in [("base_url", &provider.base_url), ("endpoint", &provider.endpoint)] {
                if let Some(value) = value {
                    Url::parse(value).map_err(|e| anyhow::anyhow!("providers.{backend}.{field} is not a valid URL: {e}"))?;
                }
            }
        }

        Ok(())
    }
}
