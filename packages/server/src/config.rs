use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

use crate::domains::listings::GeneratorConfig;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: Option<String>,
    pub generation_max_attempts: u32,
    pub generation_base_delay_ms: u64,
    pub generation_attempt_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let gemini_api_key = env::var("GEMINI_API_KEY").context("GEMINI_API_KEY must be set")?;
        if gemini_api_key.trim().is_empty() {
            anyhow::bail!("GEMINI_API_KEY must not be empty");
        }

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            gemini_api_key,
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| GeneratorConfig::DEFAULT_MODEL.to_string()),
            gemini_base_url: env::var("GEMINI_BASE_URL").ok(),
            generation_max_attempts: env::var("GENERATION_MAX_ATTEMPTS")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .context("GENERATION_MAX_ATTEMPTS must be a valid number")?,
            generation_base_delay_ms: env::var("GENERATION_BASE_DELAY_MS")
                .unwrap_or_else(|_| "2000".to_string())
                .parse()
                .context("GENERATION_BASE_DELAY_MS must be a valid number")?,
            generation_attempt_timeout_secs: env::var("GENERATION_ATTEMPT_TIMEOUT_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .context("GENERATION_ATTEMPT_TIMEOUT_SECS must be a valid number")?,
        })
    }

    /// Settings for the content generator
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            model: self.gemini_model.clone(),
            max_attempts: self.generation_max_attempts.max(1),
            base_delay: Duration::from_millis(self.generation_base_delay_ms),
            attempt_timeout: Duration::from_secs(self.generation_attempt_timeout_secs.max(1)),
        }
    }
}
