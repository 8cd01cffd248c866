//! Layered resolution of the effective provider configuration
//!
//! Precedence, highest first: explicit field, backend-specific environment
//! variable, global environment variable, hard-coded default.

use std::str::FromStr;

use secrecy::{ExposeSecret, SecretString};

use crate::Backend;
use crate::backend::{MAX_TOKENS_VAR, TEMPERATURE_VAR, TIMEOUT_VAR};
use crate::env::EnvSnapshot;
use crate::provider::{Defaults, ProviderConfig};
use crate::status::StatusMapping;

/// Produce the effective configuration for `backend`
///
/// Pure over its inputs. A malformed numeric environment value is skipped
/// with a warning and the next layer is used instead.
pub fn resolve(backend: Backend, explicit: &ProviderConfig, env: &EnvSnapshot) -> ProviderConfig {
    let keys = backend.env_keys();
    let defaults = Defaults::for_backend(backend);

    let model = explicit
        .model
        .clone()
        .or_else(|| text(env, Some(keys.model)))
        .unwrap_or_else(|| defaults.model.to_owned());

    let deployment_name = match backend {
        Backend::AzureOpenAi => explicit
            .deployment_name
            .clone()
            .or_else(|| text(env, keys.deployment_name))
            .or_else(|| Some(model.clone())),
        Backend::Anthropic | Backend::OpenAi => explicit.deployment_name.clone(),
    };

    ProviderConfig {
        api_key: explicit
            .api_key
            .clone()
            .filter(|key| !key.expose_secret().trim().is_empty())
            .or_else(|| text(env, Some(keys.api_key)).map(SecretString::from)),
        base_url: explicit
            .base_url
            .clone()
            .or_else(|| text(env, keys.base_url))
            .or_else(|| defaults.base_url.map(str::to_owned)),
        max_tokens: explicit
            .max_tokens
            .or_else(|| number(env, keys.max_tokens))
            .or_else(|| number(env, MAX_TOKENS_VAR))
            .or(Some(defaults.max_tokens)),
        temperature: explicit
            .temperature
            .or_else(|| number(env, TEMPERATURE_VAR))
            .or(Some(defaults.temperature)),
        top_p: explicit.top_p.or(Some(defaults.top_p)),
        timeout_ms: explicit
            .timeout_ms
            .or_else(|| number(env, TIMEOUT_VAR))
            .or(Some(defaults.timeout_ms)),
        organization: explicit.organization.clone().or_else(|| text(env, keys.organization)),
        endpoint: explicit.endpoint.clone().or_else(|| text(env, keys.endpoint)),
        api_version: explicit
            .api_version
            .clone()
            .or_else(|| text(env, keys.api_version))
            .or_else(|| defaults.api_version.map(str::to_owned)),
        status_mapping: explicit
            .status_mapping
            .clone()
            .or_else(|| Some(StatusMapping::for_backend(backend))),
        deployment_name,
        model: Some(model),
    }
}

fn text(env: &EnvSnapshot, key: Option<&str>) -> Option<String> {
    key.and_then(|key| env.get(key)).map(|value| value.trim().to_owned())
}

fn number<T: FromStr>(env: &EnvSnapshot, key: &str) -> Option<T> {
    let raw = env.get(key)?.trim();
    if let Ok(value) = raw.parse() {
        Some(value)
    } else {
        tracing::warn!(variable = key, value = raw, "ignoring non-numeric environment value");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> EnvSnapshot {
        EnvSnapshot::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn defaults_fill_every_gap() {
        let config = resolve(Backend::Anthropic, &ProviderConfig::default(), &EnvSnapshot::default());

        assert!(config.api_key.is_none());
        assert_eq!(config.model.as_deref(), Some("claude-sonnet-4-20250514"));
        assert_eq!(config.base_url.as_deref(), Some("https://api.anthropic.com/v1"));
        assert_eq!(config.max_tokens, Some(4096));
        assert_eq!(config.temperature, Some(0.7));
        assert_eq!(config.top_p, Some(1.0));
        assert_eq!(config.timeout_ms, Some(60_000));
        assert_eq!(config.status_mapping, Some(StatusMapping::default()));
    }

    #[test]
    fn backend_env_beats_global_env_beats_default() {
        let vars = env(&[("OPENAI_MAX_TOKENS", "1000"), ("LLM_MAX_TOKENS", "2000")]);
        let config = resolve(Backend::OpenAi, &ProviderConfig::default(), &vars);
        assert_eq!(config.max_tokens, Some(1000));

        let vars = env(&[("LLM_MAX_TOKENS", "2000")]);
        let config = resolve(Backend::OpenAi, &ProviderConfig::default(), &vars);
        assert_eq!(config.max_tokens, Some(2000));
    }

    #[test]
    fn explicit_beats_environment() {
        let explicit = ProviderConfig {
            api_key: Some(SecretString::from("explicit-key".to_owned())),
            model: Some("gpt-4.1-mini".to_owned()),
            max_tokens: Some(256),
            temperature: Some(0.1),
            ..ProviderConfig::default()
        };
        let vars = env(&[
            ("OPENAI_API_KEY", "env-key"),
            ("OPENAI_MODEL", "gpt-4o"),
            ("OPENAI_MAX_TOKENS", "1000"),
            ("LLM_TEMPERATURE", "0.9"),
        ]);

        let config = resolve(Backend::OpenAi, &explicit, &vars);

        assert_eq!(config.api_key.unwrap().expose_secret(), "explicit-key");
        assert_eq!(config.model.as_deref(), Some("gpt-4.1-mini"));
        assert_eq!(config.max_tokens, Some(256));
        assert_eq!(config.temperature, Some(0.1));
    }

    #[test]
    fn environment_supplies_key_and_model() {
        let vars = env(&[("ANTHROPIC_API_KEY", "sk-ant"), ("ANTHROPIC_MODEL", "claude-3-5-haiku-latest")]);
        let config = resolve(Backend::Anthropic, &ProviderConfig::default(), &vars);

        assert_eq!(config.api_key.unwrap().expose_secret(), "sk-ant");
        assert_eq!(config.model.as_deref(), Some("claude-3-5-haiku-latest"));
    }

    #[test]
    fn blank_explicit_key_falls_back_to_environment() {
        let explicit = ProviderConfig {
            api_key: Some(SecretString::from("  ".to_owned())),
            ..ProviderConfig::default()
        };
        let vars = env(&[("OPENAI_API_KEY", "sk-env")]);

        let config = resolve(Backend::OpenAi, &explicit, &vars);
        assert_eq!(config.api_key.unwrap().expose_secret(), "sk-env");

        let config = resolve(Backend::OpenAi, &explicit, &EnvSnapshot::default());
        assert!(config.api_key.is_none());
    }

    #[test]
    fn other_backends_keys_are_ignored() {
        let vars = env(&[("OPENAI_API_KEY", "sk-openai")]);
        let config = resolve(Backend::Anthropic, &ProviderConfig::default(), &vars);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn malformed_number_falls_through() {
        let vars = env(&[
            ("ANTHROPIC_MAX_TOKENS", "lots"),
            ("LLM_MAX_TOKENS", "512"),
            ("LLM_TEMPERATURE", "warm"),
            ("LLM_TIMEOUT", "soon"),
        ]);
        let config = resolve(Backend::Anthropic, &ProviderConfig::default(), &vars);

        assert_eq!(config.max_tokens, Some(512));
        assert_eq!(config.temperature, Some(0.7));
        assert_eq!(config.timeout_ms, Some(60_000));
    }

    #[test]
    fn global_timeout_applies() {
        let vars = env(&[("LLM_TIMEOUT", "1500")]);
        let config = resolve(Backend::OpenAi, &ProviderConfig::default(), &vars);
        assert_eq!(config.timeout_ms, Some(1500));
    }

    #[test]
    fn organization_only_for_openai() {
        let vars = env(&[("OPENAI_ORGANIZATION", "org-123")]);
        assert_eq!(
            resolve(Backend::OpenAi, &ProviderConfig::default(), &vars).organization.as_deref(),
            Some("org-123")
        );
        assert!(resolve(Backend::Anthropic, &ProviderConfig::default(), &vars).organization.is_none());
    }

    #[test]
    fn azure_deployment_falls_back_to_model() {
        let vars = env(&[
            ("AZURE_OPENAI_ENDPOINT", "https://res.openai.azure.com"),
            ("AZURE_OPENAI_MODEL", "gpt-4o-mini"),
        ]);
        let config = resolve(Backend::AzureOpenAi, &ProviderConfig::default(), &vars);

        assert_eq!(config.endpoint.as_deref(), Some("https://res.openai.azure.com"));
        assert_eq!(config.deployment_name.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(config.api_version.as_deref(), Some("2024-10-21"));
        assert!(config.base_url.is_none());
    }

    #[test]
    fn azure_deployment_from_environment() {
        let vars = env(&[
            ("AZURE_OPENAI_DEPLOYMENT_NAME", "prod-gpt4o"),
            ("AZURE_OPENAI_API_VERSION", "2024-06-01"),
        ]);
        let config = resolve(Backend::AzureOpenAi, &ProviderConfig::default(), &vars);

        assert_eq!(config.deployment_name.as_deref(), Some("prod-gpt4o"));
        assert_eq!(config.api_version.as_deref(), Some("2024-06-01"));
    }
}
