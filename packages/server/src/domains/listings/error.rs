use thiserror::Error;

use crate::kernel::{ProviderError, RetryError};

/// Errors surfaced by listing content generation.
#[derive(Debug, Error)]
pub enum ContentError {
    /// Missing description or address; no provider call was made
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Provider credentials or settings are missing
    #[error("configuration error: {0}")]
    Config(String),

    /// The provider rejected the request; it was not retried
    #[error("content generation failed: {0}")]
    Provider(#[source] ProviderError),

    /// Every attempt hit a transient provider error
    #[error("content generation failed after {attempts} attempts: {last}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        last: ProviderError,
    },
}

impl From<RetryError> for ContentError {
    fn from(err: RetryError) -> Self {
        match err {
            RetryError::Permanent {
                source: ProviderError::Config(msg),
                ..
            } => ContentError::Config(msg),
            RetryError::Permanent { source, .. } => ContentError::Provider(source),
            RetryError::Exhausted { attempts, last } => {
                ContentError::RetriesExhausted { attempts, last }
            }
        }
    }
}
