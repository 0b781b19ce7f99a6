// src/pipeline/extract.rs

//! Sitemap extraction pipeline.

use std::io;
use std::path::Path;

use crate::error::Result;
use crate::models::Config;
use crate::output::{export_urls, write_urls};
use crate::services::{HttpFetcher, SitemapResolver};

/// Resolve `sitemap_url` and write the sorted URLs to `output` (stdout if `None`).
///
/// Returns the number of URLs written. Sitemap failures are absorbed by the
/// resolver; only client construction and output I/O can fail here.
pub async fn run_extractor(
    config: &Config,
    sitemap_url: &str,
    output: Option<&Path>,
) -> Result<usize> {
    log::info!("Extracting URLs from {}", sitemap_url);

    let fetcher = HttpFetcher::new(&config.fetcher)?;
    let resolver = SitemapResolver::new(fetcher);
    let urls = resolver.resolve(sitemap_url).await;

    match output {
        Some(path) => export_urls(path, &urls)?,
        None => write_urls(io::stdout().lock(), &urls)?,
    }

    Ok(urls.len())
}
