//! Service layer for the sitemap extractor.
//!
//! This module contains the business logic for:
//! - Fetching sitemap documents (`Fetcher`, `HttpFetcher`)
//! - Classifying documents (`classify`)
//! - Recursive resolution (`SitemapResolver`)

pub mod fetcher;
pub mod parser;
mod resolver;

pub use fetcher::{Fetcher, HttpFetcher};
pub use parser::classify;
pub use resolver::{ResolveOutcome, ResolveStats, SitemapResolver};
