// src/models/document.rs

/// A URL string taken verbatim from a `<loc>` element.
///
/// Compared by exact string equality; no normalization is applied.
pub type Location = String;

/// A fetched sitemap document after classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedDocument {
    /// `<sitemapindex>` listing child sitemaps to resolve
    Index { entries: Vec<Location> },
    /// `<urlset>` listing page URLs
    UrlSet { entries: Vec<Location> },
}

impl ParsedDocument {
    /// Locations in document order.
    pub fn entries(&self) -> &[Location] {
        match self {
            Self::Index { entries } | Self::UrlSet { entries } => entries,
        }
    }

    /// Whether this document points at further sitemaps.
    pub fn is_index(&self) -> bool {
        matches!(self, Self::Index { .. })
    }
}
