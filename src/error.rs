//! Error handling for ATIS synthesis.
//!
//! Distinguishes fatal configuration problems from the recoverable
//! provider and time-conversion failures that only degrade a single
//! source's contribution to the fused snapshot.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtisError {
    /// Required secret or setting missing; raised before any fetch
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Non-success response or transport failure from a provider
    #[error("Fetch from {provider} failed: {message}")]
    ProviderFetch { provider: String, message: String },

    /// Provider payload did not have the expected shape
    #[error("Unexpected {provider} payload: {message}")]
    ProviderParse { provider: String, message: String },

    /// Malformed civil timestamp or unknown time zone
    #[error("Time conversion failed: {message}")]
    TimeConversion { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AtisError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a provider fetch error
    pub fn provider_fetch(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ProviderFetch {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a provider parse error
    pub fn provider_parse(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ProviderParse {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a time conversion error
    pub fn time_conversion(message: impl Into<String>) -> Self {
        Self::TimeConversion {
            message: message.into(),
        }
    }

    /// Whether this error only degrades one provider instead of the whole report
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ProviderFetch { .. } | Self::ProviderParse { .. } | Self::TimeConversion { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, AtisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_classification() {
        assert!(AtisError::provider_fetch("forecast", "HTTP 500").is_recoverable());
        assert!(AtisError::provider_parse("station", "no labels").is_recoverable());
        assert!(AtisError::time_conversion("bad zone").is_recoverable());
        assert!(!AtisError::configuration("missing key").is_recoverable());
        assert!(!AtisError::from(std::io::Error::other("disk")).is_recoverable());
    }

    #[test]
    fn test_error_messages_name_the_provider() {
        let error = AtisError::provider_fetch("agency", "HTTP 401");
        assert_eq!(error.to_string(), "Fetch from agency failed: HTTP 401");
    }
}
