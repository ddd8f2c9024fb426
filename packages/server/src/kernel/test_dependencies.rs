// Mock implementations for testing
//
// Provides a scripted structured generator that can be injected into the
// ContentGenerator for tests without calling the real provider.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use super::{BaseStructuredGenerator, ProviderError, StructuredPrompt};

/// A well-formed generation result used when no response is scripted.
pub const SAMPLE_GENERATION_JSON: &str = r#"{
  "title": "Bright 4-room apartment with a sunny balcony",
  "description": {
    "area": "A quiet, green street close to schools, parks and the light rail.",
    "property": "A renovated 4-room apartment on the 3rd floor with a 12 sqm balcony.",
    "cta": "Call today to schedule a private viewing."
  },
  "features": {
    "apartmentArea": "95 sqm",
    "balconyArea": "12 sqm",
    "rooms": "4",
    "floor": "3",
    "elevator": "yes"
  }
}"#;

pub struct MockStructuredGenerator {
    responses: Arc<Mutex<Vec<Result<String, ProviderError>>>>,
    default_response: Result<String, ProviderError>,
    latency: Option<Duration>,
    calls: Arc<Mutex<Vec<StructuredPrompt>>>,
}

impl Default for MockStructuredGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockStructuredGenerator {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            default_response: Ok(SAMPLE_GENERATION_JSON.to_string()),
            latency: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a successful raw response
    pub fn with_response(self, json: &str) -> Self {
        self.responses.lock().unwrap().push(Ok(json.to_string()));
        self
    }

    /// Queue a failure
    pub fn with_error(self, error: ProviderError) -> Self {
        self.responses.lock().unwrap().push(Err(error));
        self
    }

    /// Returned once the queue is drained
    pub fn with_default(mut self, response: Result<String, ProviderError>) -> Self {
        self.default_response = response;
        self
    }

    /// Fail every call with the given error
    pub fn always_failing(error: ProviderError) -> Self {
        Self::new().with_default(Err(error))
    }

    /// Sleep before answering each call
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Get all requests that were sent
    pub fn calls(&self) -> Vec<StructuredPrompt> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of provider calls made so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl BaseStructuredGenerator for MockStructuredGenerator {
    async fn generate_structured(
        &self,
        request: &StructuredPrompt,
    ) -> Result<String, ProviderError> {
        // Record the call
        self.calls.lock().unwrap().push(request.clone());

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let mut responses = self.responses.lock().unwrap();
        if !responses.is_empty() {
            responses.remove(0)
        } else {
            self.default_response.clone()
        }
    }
}
