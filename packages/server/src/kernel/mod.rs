//! Kernel module - server infrastructure and dependencies.

pub mod gemini;
pub mod retry;
pub mod test_dependencies;
pub mod traits;

/// Default model for listing copy.
pub const GEMINI_2_FLASH: &str = "gemini-2.0-flash";

pub use gemini::GeminiGenerator;
pub use retry::{RetryError, RetryPolicy};
pub use test_dependencies::MockStructuredGenerator;
pub use traits::*;
