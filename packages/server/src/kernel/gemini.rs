// Structured generation backed by Gemini
//
// This is the infrastructure implementation of BaseStructuredGenerator.
// Business logic (what to prompt for) lives in domain layers.

use async_trait::async_trait;
use gemini_client::{GeminiClient, GeminiError, GenerateContentRequest};

use super::{BaseStructuredGenerator, ProviderError, StructuredPrompt};

/// Gemini implementation of structured generation
#[derive(Clone)]
pub struct GeminiGenerator {
    client: GeminiClient,
}

impl GeminiGenerator {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BaseStructuredGenerator for GeminiGenerator {
    async fn generate_structured(
        &self,
        request: &StructuredPrompt,
    ) -> Result<String, ProviderError> {
        tracing::debug!(
            prompt_length = request.prompt.len(),
            model = %request.model,
            "Calling Gemini generateContent"
        );

        let body = GenerateContentRequest::new(request.prompt.clone())
            .with_response_schema(request.schema.clone());

        let text = self.client.generate_content(&request.model, body).await?;

        tracing::debug!(
            response_length = text.len(),
            model = %request.model,
            "Gemini response received"
        );

        Ok(text)
    }
}

impl From<GeminiError> for ProviderError {
    fn from(err: GeminiError) -> Self {
        if err.is_overloaded() {
            return ProviderError::Unavailable(err.to_string());
        }

        match err {
            GeminiError::EmptyResponse(msg) => ProviderError::EmptyResponse(msg),
            GeminiError::Config(msg) => ProviderError::Config(msg),
            GeminiError::Parse(msg) => ProviderError::Malformed(msg),
            other => ProviderError::Rejected(other.to_string()),
        }
    }
}
