// Business domains
pub mod listings;
