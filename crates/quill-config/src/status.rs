use serde::Deserialize;

use crate::Backend;

/// How a non-success HTTP status from a backend should be classified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// Credentials were rejected
    Authentication,
    /// Backend is throttling the caller
    RateLimit,
    /// Model or deployment is unknown to the backend
    NotFound,
    /// Anything else
    Other,
}

/// Status-code to error-kind table
///
/// Kept as configuration so a backend API revision that changes its codes
/// can be accommodated without a code change.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatusMapping {
    /// Statuses meaning the API key was rejected
    pub authentication: Vec<u16>,
    /// Statuses meaning the caller should back off
    pub rate_limit: Vec<u16>,
    /// Statuses meaning the model or deployment does not exist
    pub not_found: Vec<u16>,
}

impl Default for StatusMapping {
    fn default() -> Self {
        Self {
            authentication: vec![401],
            rate_limit: vec![429],
            not_found: vec![404],
        }
    }
}

impl StatusMapping {
    /// Default table for a backend
    pub fn for_backend(backend: Backend) -> Self {
        match backend {
            Backend::Anthropic | Backend::OpenAi | Backend::AzureOpenAi => Self::default(),
        }
    }

    /// Classify a status code
    pub fn classify(&self, status: u16) -> StatusClass {
        if self.authentication.contains(&status) {
            StatusClass::Authentication
        } else if self.rate_limit.contains(&status) {
            StatusClass::RateLimit
        } else if self.not_found.contains(&status) {
            StatusClass::NotFound
        } else {
            StatusClass::Other
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table() {
        let mapping = StatusMapping::default();
        assert_eq!(mapping.classify(401), StatusClass::Authentication);
        assert_eq!(mapping.classify(429), StatusClass::RateLimit);
        assert_eq!(mapping.classify(404), StatusClass::NotFound);
        assert_eq!(mapping.classify(500), StatusClass::Other);
        assert_eq!(mapping.classify(403), StatusClass::Other);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let mapping: StatusMapping = toml::from_str("authentication = [401, 403]").unwrap();
        assert_eq!(mapping.classify(403), StatusClass::Authentication);
        assert_eq!(mapping.classify(429), StatusClass::RateLimit);
    }
}
