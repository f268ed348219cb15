//! Chat admission errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Phrases providers use when rejecting the caller's credentials.
const AUTHENTICATION_PHRASES: &[&str] =
    &["invalid api key", "incorrect api key", "no auth credentials", "api key is missing"];

/// Phrases providers use when the requested model cannot be served.
const MODEL_UNAVAILABLE_PHRASES: &[&str] = &[
    "model not found",
    "no endpoints found",
    "is not a valid model",
    "model does not exist",
];

/// Coarse classification of an upstream completion failure.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UpstreamErrorKind {
    /// Provider rejected our credentials
    Authentication,
    /// Requested model is unknown or not served
    ModelUnavailable,
    /// Anything else; the raw message is passed through
    Other,
}

impl UpstreamErrorKind {
    /// Classify from the upstream HTTP status (if any) and the raw error text.
    pub fn classify(status: Option<u16>, raw: &str) -> Self {
        match status {
            Some(401 | 403) => return Self::Authentication,
            Some(404) => return Self::ModelUnavailable,
            _ => {},
        }

        let lowered = raw.to_lowercase();
        let mentions = |phrases: &[&str]| phrases.iter().any(|p| lowered.contains(p));
        if mentions(AUTHENTICATION_PHRASES) {
            Self::Authentication
        } else if mentions(MODEL_UNAVAILABLE_PHRASES) {
            Self::ModelUnavailable
        } else {
            Self::Other
        }
    }
}

/// Terminal failures of one chat request.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum ChatError {
    /// Caller's hourly request counter is above the threshold
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Caller has no credits left
    #[error("No credits remaining")]
    InsufficientCredits,

    /// Completion call or its stream failed
    #[error("{message}")]
    Upstream {
        /// Classification used to pick the client-facing message
        kind: UpstreamErrorKind,
        /// Client-facing detail
        message: String,
    },

    /// Counter store could not be read or held a non-integer value
    #[error("Rate limit store error: {message}")]
    CounterStore {
        /// Description of the store failure
        message: String,
    },

    /// Missing or invalid bearer credential
    #[error("Could not validate credentials")]
    Unauthorized,
}

impl ChatError {
    /// Build an upstream failure from a raw provider error.
    ///
    /// Known categories get a fixed message; unmatched errors keep the raw
    /// text verbatim.
    pub fn upstream(status: Option<u16>, raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let kind = UpstreamErrorKind::classify(status, &raw);
        let message = match kind {
            UpstreamErrorKind::Authentication => {
                "Authentication with the completion provider failed. Check the API key.".to_string()
            },
            UpstreamErrorKind::ModelUnavailable => {
                "The requested model failed upstream. It may not be available.".to_string()
            },
            UpstreamErrorKind::Other => raw,
        };
        Self::Upstream { kind, message }
    }

    /// Get HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::RateLimitExceeded => 429,
            Self::InsufficientCredits => 402,
            Self::Unauthorized => 401,
            Self::Upstream { .. } | Self::CounterStore { .. } => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_codes() {
        assert_eq!(ChatError::RateLimitExceeded.http_status_code(), 429);
        assert_eq!(ChatError::InsufficientCredits.http_status_code(), 402);
        assert_eq!(ChatError::upstream(None, "boom").http_status_code(), 500);
        assert_eq!(
            ChatError::CounterStore { message: "down".to_string() }.http_status_code(),
            500
        );
    }

    #[test]
    fn test_unmatched_upstream_error_is_verbatim() {
        let err = ChatError::upstream(Some(502), "connection reset by peer");
        assert_eq!(err.to_string(), "connection reset by peer");
        assert!(matches!(err, ChatError::Upstream { kind: UpstreamErrorKind::Other, .. }));
    }

    #[test]
    fn test_classify_by_status() {
        assert_eq!(UpstreamErrorKind::classify(Some(401), "nope"), UpstreamErrorKind::Authentication);
        assert_eq!(UpstreamErrorKind::classify(Some(403), "nope"), UpstreamErrorKind::Authentication);
        assert_eq!(UpstreamErrorKind::classify(Some(404), "nope"), UpstreamErrorKind::ModelUnavailable);
        assert_eq!(UpstreamErrorKind::classify(Some(500), "nope"), UpstreamErrorKind::Other);
    }

    #[test]
    fn test_classify_by_text() {
        assert_eq!(
            UpstreamErrorKind::classify(None, "Invalid API Key provided"),
            UpstreamErrorKind::Authentication
        );
        assert_eq!(
            UpstreamErrorKind::classify(None, "No endpoints found for foo/bar."),
            UpstreamErrorKind::ModelUnavailable
        );
        assert_eq!(
            UpstreamErrorKind::classify(Some(400), "Model not found: foo/bar"),
            UpstreamErrorKind::ModelUnavailable
        );
        assert_eq!(UpstreamErrorKind::classify(None, "timeout"), UpstreamErrorKind::Other);
    }

    #[test]
    fn test_errors_that_merely_mention_models_keep_raw_text() {
        let raw = "Error code: 429 - Rate limit exceeded: free-models-per-day";
        let err = ChatError::upstream(Some(429), raw);
        assert!(matches!(err, ChatError::Upstream { kind: UpstreamErrorKind::Other, .. }));
        assert_eq!(err.to_string(), raw);

        let raw = "Error code: 402 - This request requires more credits for model qwen/qwq-32b";
        assert_eq!(ChatError::upstream(Some(402), raw).to_string(), raw);

        let raw = "Error code: 403 - Input flagged by moderation for this model";
        assert_eq!(
            UpstreamErrorKind::classify(None, raw),
            UpstreamErrorKind::Other,
            "text alone must not trigger a classification"
        );
    }

    #[test]
    fn test_classified_errors_hide_raw_text() {
        let err = ChatError::upstream(Some(401), "secret-bearing upstream body");
        assert!(!err.to_string().contains("secret-bearing"));
    }
}
