// src/services/resolver.rs

//! Recursive sitemap resolution.
//!
//! Starting from a root location, every sitemap index is expanded depth-first
//! in document order and every URL set contributes its locations to a
//! deduplicated set. A branch that fails to fetch or parse is logged and
//! contributes nothing; its siblings and ancestors carry on. Each top-level
//! call owns its own accumulator, so repeated calls are independent.

use std::collections::HashSet;

use crate::error::Result;
use crate::models::{Location, ParsedDocument};
use crate::services::fetcher::Fetcher;
use crate::services::parser;

/// Counters describing one resolution run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResolveStats {
    /// Documents fetched and classified successfully
    pub sitemaps_processed: usize,
    /// Branches that failed to fetch or parse
    pub failures: usize,
    /// Locations skipped because they were already visited
    pub skipped: usize,
}

/// Result of one top-level resolution.
#[derive(Debug, Default)]
pub struct ResolveOutcome {
    /// Discovered page URLs, sorted lexicographically
    pub urls: Vec<Location>,
    /// Traversal counters
    pub stats: ResolveStats,
}

/// Accumulator scoped to a single top-level invocation.
#[derive(Default)]
struct Traversal {
    discovered: HashSet<Location>,
    visited: HashSet<Location>,
    stats: ResolveStats,
}

/// Resolves sitemap trees into the set of page URLs they advertise.
pub struct SitemapResolver<F> {
    fetcher: F,
}

impl<F: Fetcher> SitemapResolver<F> {
    /// Create a resolver on top of the given fetcher.
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Resolve `root` and return every discovered URL, sorted.
    ///
    /// Never fails: an unreachable or malformed root yields an empty list.
    pub async fn resolve(&self, root: &str) -> Vec<Location> {
        self.resolve_with_stats(root).await.urls
    }

    /// Resolve `root`, also reporting traversal counters.
    pub async fn resolve_with_stats(&self, root: &str) -> ResolveOutcome {
        let mut traversal = Traversal::default();

        // Children are pushed in reverse so they pop in document order.
        let mut pending: Vec<(Location, usize)> = vec![(root.to_string(), 0)];

        while let Some((location, depth)) = pending.pop() {
            if !traversal.visited.insert(location.clone()) {
                traversal.stats.skipped += 1;
                log::warn!("Skipping already visited sitemap: {}", location);
                continue;
            }

            match self.visit(&location, depth, &mut traversal.discovered).await {
                Ok(children) => {
                    traversal.stats.sitemaps_processed += 1;
                    pending.extend(children.into_iter().rev().map(|child| (child, depth + 1)));
                }
                Err(e) => {
                    traversal.stats.failures += 1;
                    if depth == 0 {
                        log::warn!("Error extracting URLs from {}: {}", location, e);
                    } else {
                        log::warn!("Error processing nested sitemap {}: {}", location, e);
                    }
                }
            }
        }

        let mut urls: Vec<Location> = traversal.discovered.into_iter().collect();
        urls.sort();

        log::info!(
            "Resolved {} URLs from {} sitemaps ({} failed, {} skipped)",
            urls.len(),
            traversal.stats.sitemaps_processed,
            traversal.stats.failures,
            traversal.stats.skipped
        );

        ResolveOutcome {
            urls,
            stats: traversal.stats,
        }
    }

    /// Fetch and classify one location.
    ///
    /// URL-set entries go straight into `discovered`; index entries are
    /// returned for the caller to schedule.
    async fn visit(
        &self,
        location: &str,
        depth: usize,
        discovered: &mut HashSet<Location>,
    ) -> Result<Vec<Location>> {
        log::debug!("Fetching sitemap {} (depth {})", location, depth);
        let bytes = self.fetcher.fetch(location).await?;

        match parser::classify(&bytes)? {
            ParsedDocument::Index { entries } => {
                log::info!("Processing sitemap index: {}", location);
                Ok(entries)
            }
            ParsedDocument::UrlSet { entries } => {
                log::info!("Processing sitemap: {}", location);
                discovered.extend(entries);
                Ok(Vec::new())
            }
        }
    }
}
