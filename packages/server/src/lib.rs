// Listing Studio - API Core
//
// This crate turns a seller's raw property text into landing-page marketing
// copy via a structured-generation provider, and serves it over HTTP.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
