//! Error types for Gemini client.

use thiserror::Error;

/// Result type for Gemini client operations.
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Gemini client errors.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Configuration error (missing API key, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// API error (non-2xx response)
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Provider status string from the error body, e.g. "UNAVAILABLE"
        code: Option<String>,
        /// Provider error message, or the raw body when it was not JSON
        message: String,
    },

    /// The call succeeded but carried no generated text
    #[error("Empty response: {0}")]
    EmptyResponse(String),

    /// Parse error (invalid JSON, unexpected response format)
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Substrings the provider uses when it is shedding load.
const OVERLOAD_INDICATORS: &[&str] = &["503", "overloaded", "unavailable"];

impl GeminiError {
    /// Whether the provider reported itself unavailable or overloaded.
    ///
    /// Prefers the HTTP status and provider status code; falls back to
    /// scanning the message for known overload indicators.
    pub fn is_overloaded(&self) -> bool {
        match self {
            GeminiError::Api { status, code, message } => {
                *status == 503
                    || code.as_deref() == Some("UNAVAILABLE")
                    || mentions_overload(message)
            }
            GeminiError::Network(message) => mentions_overload(message),
            _ => false,
        }
    }
}

fn mentions_overload(message: &str) -> bool {
    let lower = message.to_lowercase();
    OVERLOAD_INDICATORS.iter().any(|needle| lower.contains(needle))
}
