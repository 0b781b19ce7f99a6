//! Pipeline entry points.
//!
//! - `run_extractor`: Resolve a sitemap tree and write the discovered URLs

pub mod extract;

pub use extract::run_extractor;
