//! Chat pipeline settings.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::chat::DEFAULT_MODEL;

/// Ordered upstream inference providers plus the fallback flag.
///
/// Passed opaquely to the completion provider as the `provider` object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderPreference {
    pub order: Vec<String>,
    pub allow_fallbacks: bool,
}

impl Default for ProviderPreference {
    fn default() -> Self {
        Self { order: vec!["Groq".to_string(), "Fireworks".to_string()], allow_fallbacks: false }
    }
}

/// Settings for the chat admission pipeline and completion adapter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct ChatSettings {
    /// Model used when a request omits one
    #[validate(length(min = 1_u64))]
    #[serde(default = "default_model")]
    pub default_model: String,
    /// Requests above this hourly count are rejected
    #[serde(default = "default_rate_limit_threshold")]
    pub rate_limit_threshold: i64,
    #[serde(default)]
    pub provider: ProviderPreference,
    /// Sent as `HTTP-Referer` to the completion provider
    #[serde(default = "default_referer")]
    pub referer: String,
    /// Sent as `X-Title` to the completion provider
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

const fn default_rate_limit_threshold() -> i64 {
    100
}

fn default_referer() -> String {
    "http://localhost:3000".to_string()
}

fn default_title() -> String {
    "Taskmind".to_string()
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            default_model: default_model(),
            rate_limit_threshold: default_rate_limit_threshold(),
            provider: ProviderPreference::default(),
            referer: default_referer(),
            title: default_title(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ChatSettings::default();
        assert_eq!(settings.rate_limit_threshold, 100);
        assert_eq!(settings.provider.order, vec!["Groq", "Fireworks"]);
        assert!(!settings.provider.allow_fallbacks);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: ChatSettings = serde_json::from_str(r#"{"title":"Other"}"#).unwrap();
        assert_eq!(settings.title, "Other");
        assert_eq!(settings.default_model, DEFAULT_MODEL);
    }

    #[test]
    fn test_empty_default_model_rejected() {
        let settings = ChatSettings { default_model: String::new(), ..Default::default() };
        assert!(settings.validate().is_err());
    }
}
