//! Listing content generation.
//!
//! Turns a seller's raw property text into structured marketing copy with
//! one schema-constrained provider call, retried on transient failures.
//!
//! # Example
//!
//! ```rust,ignore
//! use listing_core::domains::listings::{ContentGenerator, GeneratorConfig};
//! use listing_core::kernel::GeminiGenerator;
//!
//! let generator = ContentGenerator::new(
//!     Arc::new(GeminiGenerator::new(client)),
//!     GeneratorConfig::default(),
//! );
//!
//! let content = generator
//!     .generate("4 rooms, renovated, balcony", "12 Herzl St, Haifa")
//!     .await?;
//! ```

use std::sync::Arc;
use std::time::Duration;

use gemini_client::{strip_code_blocks, StructuredOutput};
use tracing::{error, info};

use super::error::ContentError;
use super::models::{GenerationRequest, GenerationResult};
use super::prompts::build_generation_prompt;
use crate::kernel::{
    BaseStructuredGenerator, ProviderError, RetryError, RetryPolicy, StructuredPrompt,
    GEMINI_2_FLASH,
};

/// Settings for [`ContentGenerator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Provider model id
    pub model: String,
    /// Total attempts per request, including the first
    pub max_attempts: u32,
    /// Backoff after the first failed attempt; doubles afterwards
    pub base_delay: Duration,
    /// Upper bound on a single provider call
    pub attempt_timeout: Duration,
}

impl GeneratorConfig {
    pub const DEFAULT_MODEL: &'static str = GEMINI_2_FLASH;
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model: Self::DEFAULT_MODEL.to_string(),
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
            attempt_timeout: Duration::from_secs(60),
        }
    }
}

/// Generates listing content through a structured-generation provider.
pub struct ContentGenerator {
    provider: Arc<dyn BaseStructuredGenerator>,
    config: GeneratorConfig,
    retry: RetryPolicy,
    schema: serde_json::Value,
}

impl ContentGenerator {
    pub fn new(provider: Arc<dyn BaseStructuredGenerator>, config: GeneratorConfig) -> Self {
        let retry = RetryPolicy {
            max_attempts: config.max_attempts,
            base_delay: config.base_delay,
        };

        Self {
            provider,
            config,
            retry,
            schema: GenerationResult::gemini_schema(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// The outbound request for a validated input.
    pub fn build_request(&self, request: &GenerationRequest) -> StructuredPrompt {
        StructuredPrompt {
            model: self.config.model.clone(),
            prompt: build_generation_prompt(request),
            schema: self.schema.clone(),
        }
    }

    /// Generate marketing content for a property.
    ///
    /// Blank inputs are rejected before any provider call. Transient
    /// provider failures are retried with exponential backoff; anything else
    /// is returned after the first attempt.
    pub async fn generate(
        &self,
        raw_description: &str,
        address: &str,
    ) -> Result<GenerationResult, ContentError> {
        let request = GenerationRequest::new(raw_description, address)?;
        self.generate_for(&request).await
    }

    /// Same as [`generate`](Self::generate) for an already validated request.
    pub async fn generate_for(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, ContentError> {
        let outbound = self.build_request(request);

        info!(
            model = %self.config.model,
            description_length = request.raw_description().len(),
            "Generating listing content"
        );

        let outcome = self
            .retry
            .run(|attempt| self.attempt(&outbound, attempt))
            .await;

        match outcome {
            Ok(result) => {
                info!(
                    feature_count = result.features.entries().iter().filter(|(_, v)| v.is_some()).count(),
                    "Listing content generated"
                );
                Ok(result)
            }
            Err(e) => {
                match &e {
                    RetryError::Exhausted { attempts, last } => {
                        error!(attempts = attempts, error = %last, "Giving up on content generation after {} attempts", attempts)
                    }
                    RetryError::Permanent { attempt, source } => {
                        error!(attempt = attempt, error = %source, "Content generation rejected, not retrying")
                    }
                }
                Err(e.into())
            }
        }
    }

    async fn attempt(
        &self,
        outbound: &StructuredPrompt,
        attempt: u32,
    ) -> Result<GenerationResult, ProviderError> {
        tracing::debug!(attempt = attempt, "Content generation attempt");

        let raw = tokio::time::timeout(
            self.config.attempt_timeout,
            self.provider.generate_structured(outbound),
        )
        .await
        .map_err(|_| ProviderError::Timeout(self.config.attempt_timeout))??;

        parse_generation(&raw)
    }
}

/// Parse the provider's structured text into a result.
fn parse_generation(raw: &str) -> Result<GenerationResult, ProviderError> {
    let body = strip_code_blocks(raw);
    if body.is_empty() {
        return Err(ProviderError::EmptyResponse(
            "no structured text returned".into(),
        ));
    }

    serde_json::from_str::<GenerationResult>(body)
        .map(GenerationResult::normalized)
        .map_err(|e| ProviderError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strips_code_fences() {
        let raw = "```json\n{\"title\":\"t\",\"description\":{\"area\":\"a\",\"property\":\"p\",\"cta\":\"c\"}}\n```";
        let result = parse_generation(raw).unwrap();
        assert_eq!(result.title, "t");
    }

    #[test]
    fn test_parse_empty_is_retriable() {
        let err = parse_generation("  \n").unwrap_err();
        assert!(matches!(err, ProviderError::EmptyResponse(_)));
        assert!(err.is_retriable());
    }

    #[test]
    fn test_parse_malformed_is_permanent() {
        let err = parse_generation("{\"title\": ").unwrap_err();
        assert!(matches!(err, ProviderError::Malformed(_)));
        assert!(!err.is_retriable());
    }

    #[test]
    fn test_schema_shape() {
        let schema = GenerationResult::gemini_schema();

        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert!(required.contains(&"title"));
        assert!(required.contains(&"description"));
        assert!(!required.contains(&"features"));

        let description = &schema["properties"]["description"];
        assert_eq!(description["type"], "OBJECT");
        assert_eq!(
            description["required"],
            serde_json::json!(["area", "cta", "property"])
        );

        let features = &schema["properties"]["features"];
        assert_eq!(features["type"], "OBJECT");
        assert_eq!(features["properties"].as_object().unwrap().len(), 9);
        assert!(features.get("required").map_or(true, |r| r.as_array().unwrap().is_empty()));
    }
}
