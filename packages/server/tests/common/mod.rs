// Common test utilities

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use listing_core::domains::listings::{ContentGenerator, GeneratorConfig};
use listing_core::kernel::MockStructuredGenerator;

pub const RAW_DESCRIPTION: &str =
    "4 חדרים משופצת, ממ\"ד, מרפסת 12 מ\"ר, קומה 3 מתוך 8, מעלית, חניה בטאבו";
pub const ADDRESS: &str = "הרצל 12, חיפה";

/// Generator settings matching production defaults, with a short timeout.
pub fn test_config() -> GeneratorConfig {
    GeneratorConfig {
        model: "gemini-test".to_string(),
        max_attempts: 3,
        base_delay: Duration::from_secs(2),
        attempt_timeout: Duration::from_secs(5),
    }
}

/// Wrap a mock in a generator, keeping a handle for call assertions.
pub fn generator_with(mock: MockStructuredGenerator) -> (ContentGenerator, Arc<MockStructuredGenerator>) {
    let mock = Arc::new(mock);
    let generator = ContentGenerator::new(mock.clone(), test_config());
    (generator, mock)
}
