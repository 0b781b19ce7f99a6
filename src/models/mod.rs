// src/models/mod.rs

//! Domain models for the sitemap extractor.

mod config;
mod document;

// Re-export all public types
pub use config::{Config, FetcherConfig};
pub use document::{Location, ParsedDocument};
