//! Summarizer configuration.

use serde::Serialize;
use std::time::Duration;

/// Default base URL of the hosted inference API.
pub const DEFAULT_ENDPOINT: &str = "https://api-inference.huggingface.co/models";

/// Generation bounds passed with every summarization call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationParams {
    /// Maximum summary length in tokens.
    pub max_length: u32,
    /// Minimum summary length in tokens.
    pub min_length: u32,
    /// Sample instead of decoding greedily.
    pub do_sample: bool,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_length: 150,
            min_length: 40,
            do_sample: false,
        }
    }
}

/// Where and how to reach the inference API.
#[derive(Debug, Clone)]
pub struct SummarizerConfig {
    /// Base URL; the model's repository id is appended.
    pub endpoint: String,
    /// Bearer token, if the endpoint requires one.
    pub token: Option<String>,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token: None,
            timeout: None,
        }
    }
}

impl SummarizerConfig {
    /// Set the base URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the bearer token.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_generation_bounds() {
        let params = GenerationParams::default();
        assert_eq!(params.max_length, 150);
        assert_eq!(params.min_length, 40);
        assert!(!params.do_sample);
    }

    #[test]
    fn test_blank_token_is_dropped() {
        let config = SummarizerConfig::default().with_token(Some("  ".to_string()));
        assert!(config.token.is_none());

        let config = SummarizerConfig::default().with_token(Some("hf_abc".to_string()));
        assert_eq!(config.token.as_deref(), Some("hf_abc"));
    }

    #[test]
    fn test_default_has_no_timeout() {
        let config = SummarizerConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert!(config.timeout.is_none());
    }
}
