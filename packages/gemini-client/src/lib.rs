//! Pure Gemini REST API client
//!
//! A minimal client for the Gemini `generateContent` endpoint with no
//! domain-specific logic. Supports plain text generation and structured
//! (schema-constrained JSON) output.
//!
//! # Example
//!
//! ```rust,ignore
//! use gemini_client::{GeminiClient, GenerateContentRequest};
//!
//! let client = GeminiClient::from_env()?;
//!
//! let text = client
//!     .generate_content("gemini-2.0-flash", GenerateContentRequest::new("Hello!"))
//!     .await?;
//! ```
//!
//! # Type-Safe Structured Output
//!
//! ```rust,ignore
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct Listing {
//!     title: String,
//!     rooms: Option<String>,
//! }
//!
//! let listing: Listing = client
//!     .extract::<Listing>("gemini-2.0-flash", prompt)
//!     .await?;
//! ```

pub mod error;
pub mod schema;
pub mod types;

pub use error::{GeminiError, Result};
pub use schema::StructuredOutput;
pub use types::*;

use reqwest::Client;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Pure Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new Gemini client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create from environment variable `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| GeminiError::Config("GEMINI_API_KEY not set".into()))?;
        if api_key.trim().is_empty() {
            return Err(GeminiError::Config("GEMINI_API_KEY is empty".into()));
        }
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for proxies, regional endpoints, tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Type-safe structured output extraction.
    ///
    /// Generates a response schema from `T`, sends it along with the prompt,
    /// and deserializes the response.
    pub async fn extract<T: StructuredOutput>(
        &self,
        model: &str,
        prompt: impl Into<String>,
    ) -> Result<T> {
        let schema = T::gemini_schema();

        debug!(
            type_name = T::type_name(),
            schema = %serde_json::to_string_pretty(&schema).unwrap_or_default(),
            "Generated Gemini schema for extraction"
        );

        let request = GenerateContentRequest::new(prompt).with_response_schema(schema);
        let json_str = self.generate_content(model, request).await?;

        serde_json::from_str(strip_code_blocks(&json_str))
            .map_err(|e| GeminiError::Parse(format!("Failed to deserialize response: {}", e)))
    }

    /// Call `generateContent` and return the text of the first candidate.
    ///
    /// A 2xx response without any candidate text is reported as
    /// [`GeminiError::EmptyResponse`].
    pub async fn generate_content(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<String> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!("{}/models/{}:generateContent", self.base_url, model))
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Gemini request failed");
                GeminiError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Gemini API error");
            return Err(api_error(status.as_u16(), &error_text));
        }

        let raw: types::GenerateContentResponseRaw = response
            .json()
            .await
            .map_err(|e| GeminiError::Parse(e.to_string()))?;

        if let Some(usage) = &raw.usage_metadata {
            debug!(
                model = model,
                prompt_tokens = usage.prompt_token_count,
                completion_tokens = usage.candidates_token_count,
                duration_ms = start.elapsed().as_millis(),
                "Gemini generateContent"
            );
        }

        let finish_reason = raw.finish_reason().map(str::to_string);
        raw.into_text().ok_or_else(|| {
            GeminiError::EmptyResponse(format!(
                "no text in response (finish reason: {})",
                finish_reason.as_deref().unwrap_or("none")
            ))
        })
    }
}

/// Build an API error from a non-2xx body, keeping the provider status code.
fn api_error(status: u16, body: &str) -> GeminiError {
    match serde_json::from_str::<types::ErrorEnvelope>(body) {
        Ok(envelope) => GeminiError::Api {
            status,
            code: envelope.error.status,
            message: envelope.error.message,
        },
        Err(_) => GeminiError::Api {
            status,
            code: None,
            message: body.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn test_client_builder() {
        let client = GeminiClient::new("key-test").with_base_url("https://custom.api.com/");

        assert_eq!(client.api_key, "key-test");
        assert_eq!(client.base_url(), "https://custom.api.com");
    }

    #[test]
    fn test_api_error_keeps_provider_status() {
        let body = r#"{"error":{"code":503,"message":"The model is overloaded.","status":"UNAVAILABLE"}}"#;
        match api_error(503, body) {
            GeminiError::Api { status, code, message } => {
                assert_eq!(status, 503);
                assert_eq!(code.as_deref(), Some("UNAVAILABLE"));
                assert_eq!(message, "The model is overloaded.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_api_error_non_json_body() {
        let err = api_error(502, "Bad Gateway");
        assert!(matches!(err, GeminiError::Api { status: 502, code: None, .. }));
    }

    #[tokio::test]
    async fn test_generate_content_returns_candidate_text() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/models/gemini-test:generateContent")
                .header("x-goog-api-key", "key-test");
            then.status(200).json_body(json!({
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": "{\"title\":\"Hi\"}"}]},
                    "finishReason": "STOP"
                }],
                "usageMetadata": {"promptTokenCount": 3, "candidatesTokenCount": 4, "totalTokenCount": 7}
            }));
        });

        let client = GeminiClient::new("key-test").with_base_url(server.base_url());
        let text = client
            .generate_content("gemini-test", GenerateContentRequest::new("prompt"))
            .await
            .unwrap();

        mock.assert();
        assert_eq!(text, "{\"title\":\"Hi\"}");
    }

    #[tokio::test]
    async fn test_overloaded_response_is_classified() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(503).json_body(json!({
                "error": {"code": 503, "message": "The model is overloaded.", "status": "UNAVAILABLE"}
            }));
        });

        let client = GeminiClient::new("key-test").with_base_url(server.base_url());
        let err = client
            .generate_content("gemini-test", GenerateContentRequest::new("prompt"))
            .await
            .unwrap_err();

        assert!(err.is_overloaded());
    }

    #[tokio::test]
    async fn test_bad_request_is_not_overloaded() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(400).json_body(json!({
                "error": {"code": 400, "message": "Invalid JSON payload", "status": "INVALID_ARGUMENT"}
            }));
        });

        let client = GeminiClient::new("key-test").with_base_url(server.base_url());
        let err = client
            .generate_content("gemini-test", GenerateContentRequest::new("prompt"))
            .await
            .unwrap_err();

        assert!(!err.is_overloaded());
        assert!(matches!(err, GeminiError::Api { status: 400, .. }));
    }

    #[tokio::test]
    async fn test_empty_candidates_is_empty_response() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(200).json_body(json!({"candidates": []}));
        });

        let client = GeminiClient::new("key-test").with_base_url(server.base_url());
        let err = client
            .generate_content("gemini-test", GenerateContentRequest::new("prompt"))
            .await
            .unwrap_err();

        assert!(matches!(err, GeminiError::EmptyResponse(_)));
    }
}
