pub mod content_generator;
pub mod error;
pub mod models;
pub mod prompts;
pub mod service;
pub mod slug;

// Re-export commonly used types
pub use content_generator::{ContentGenerator, GeneratorConfig};
pub use error::ContentError;
pub use models::{
    ContentSource, Features, GenerationRequest, GenerationResult, ListingDescription,
    ListingDraft, FEATURE_KEYS,
};
pub use service::ListingService;
pub use slug::{listing_slug, slugify};
