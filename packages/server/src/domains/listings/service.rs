//! Listing drafts: generated content with a fallback, plus a public slug.

use std::sync::Arc;

use chrono::Utc;

use super::content_generator::ContentGenerator;
use super::models::{ContentSource, GenerationRequest, GenerationResult, ListingDraft};
use super::slug::listing_slug;

pub struct ListingService {
    generator: Arc<ContentGenerator>,
}

impl ListingService {
    pub fn new(generator: Arc<ContentGenerator>) -> Self {
        Self { generator }
    }

    /// Build a publishable draft for a property.
    ///
    /// Provider failures never block publishing: the draft falls back to
    /// placeholder content built from the seller's own text.
    pub async fn draft(&self, request: GenerationRequest) -> ListingDraft {
        let (content, content_source) = match self.generator.generate_for(&request).await {
            Ok(content) => (content, ContentSource::Generated),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    address = %request.address(),
                    "Content generation failed, publishing with fallback content"
                );
                (
                    GenerationResult::fallback(request.raw_description()),
                    ContentSource::Fallback,
                )
            }
        };

        let (original_description, address) = request.into_parts();
        let slug = listing_slug(&address);
        tracing::info!(slug = %slug, source = ?content_source, "Listing draft created");

        ListingDraft {
            slug,
            address,
            original_description,
            content,
            content_source,
            created_at: Utc::now(),
        }
    }
}
