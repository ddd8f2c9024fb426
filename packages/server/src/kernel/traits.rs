// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// What to prompt for lives in the listings domain.
//
// Naming convention: Base* for trait names (e.g., BaseStructuredGenerator)

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

// =============================================================================
// Structured generation (Infrastructure - schema-constrained LLM output)
// =============================================================================

/// One outbound structured-generation call: a prompt plus the schema the
/// provider must answer in.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredPrompt {
    pub model: String,
    pub prompt: String,
    pub schema: serde_json::Value,
}

#[async_trait]
pub trait BaseStructuredGenerator: Send + Sync {
    /// Send the prompt and return the raw structured text (JSON string)
    async fn generate_structured(&self, request: &StructuredPrompt)
        -> Result<String, ProviderError>;
}

/// Provider failures, classified for the retry policy.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// Provider reported itself unavailable or overloaded
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// The call succeeded but returned no structured text
    #[error("provider returned an empty response: {0}")]
    EmptyResponse(String),

    /// A single attempt exceeded its time budget
    #[error("provider attempt timed out after {0:?}")]
    Timeout(Duration),

    /// Missing or invalid provider credentials/settings
    #[error("provider configuration error: {0}")]
    Config(String),

    /// Bad request, auth failure, quota exhaustion and anything else unknown
    #[error("provider rejected the request: {0}")]
    Rejected(String),

    /// Response text did not match the requested schema
    #[error("provider returned malformed content: {0}")]
    Malformed(String),
}

impl ProviderError {
    /// Whether another attempt may succeed.
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            ProviderError::Unavailable(_) | ProviderError::EmptyResponse(_) | ProviderError::Timeout(_)
        )
    }
}
