// src/services/fetcher.rs

//! Sitemap fetcher.
//!
//! Retrieves the raw bytes behind a sitemap location. Gzip payloads are
//! inflated when the location ends in `.gz` or the response declares a gzip
//! content type. The body itself is never sniffed, so a compressed body
//! without either signal is handed on as-is.

use std::io::Read;

use async_trait::async_trait;
use flate2::read::MultiGzDecoder;
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::error::{self, FetchError};
use crate::models::FetcherConfig;
use crate::utils::http::create_async_client;

/// Location suffix marking a compressed sitemap.
const GZIP_SUFFIX: &str = ".gz";

/// Media types marking a gzip response body.
const GZIP_CONTENT_TYPES: [&str; 2] = ["application/x-gzip", "application/gzip"];

/// Source of raw sitemap documents.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch the document at `location`, decompressed when warranted.
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, FetchError>;
}

/// Fetcher backed by a shared `reqwest` client.
pub struct HttpFetcher {
    client: Client,
    accept: String,
}

impl HttpFetcher {
    /// Build a fetcher from the HTTP settings.
    pub fn new(config: &FetcherConfig) -> error::Result<Self> {
        Ok(Self::with_client(create_async_client(config)?, &config.accept))
    }

    /// Wrap an existing client.
    pub fn with_client(client: Client, accept: impl Into<String>) -> Self {
        Self {
            client,
            accept: accept.into(),
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(location)
            .header(ACCEPT, self.accept.as_str())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::BadStatus(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let body = response.bytes().await?;

        if should_decompress(location, content_type.as_deref()) {
            log::debug!("Decompressing gzip payload from {}", location);
            return decompress(&body);
        }
        Ok(body.to_vec())
    }
}

/// Whether a payload should be inflated before parsing.
pub fn should_decompress(location: &str, content_type: Option<&str>) -> bool {
    location.ends_with(GZIP_SUFFIX) || content_type.is_some_and(is_gzip_content_type)
}

/// Match the media type, ignoring parameters and case.
fn is_gzip_content_type(content_type: &str) -> bool {
    let media_type = content_type.split(';').next().unwrap_or_default().trim();
    GZIP_CONTENT_TYPES
        .iter()
        .any(|gzip| media_type.eq_ignore_ascii_case(gzip))
}

/// Inflate a (possibly multi-member) gzip payload.
pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>, FetchError> {
    let mut decoder = MultiGzDecoder::new(bytes);
    let mut inflated = Vec::new();
    decoder
        .read_to_end(&mut inflated)
        .map_err(FetchError::DecompressFailed)?;
    Ok(inflated)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::Compression;
    use flate2::write::GzEncoder;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    use super::*;

    const URLSET: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>https://example.com/a</loc></url>
</urlset>"#;

    fn gzip(bytes: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(bytes).unwrap();
        encoder.finish().unwrap()
    }

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(&FetcherConfig::default()).unwrap()
    }

    #[test]
    fn test_should_decompress_on_suffix() {
        assert!(should_decompress("https://example.com/sitemap.xml.gz", None));
        assert!(!should_decompress("https://example.com/sitemap.xml", None));
        assert!(!should_decompress("https://example.com/sitemap.gz?v=2", None));
    }

    #[test]
    fn test_should_decompress_on_content_type() {
        let url = "https://example.com/sitemap";
        assert!(should_decompress(url, Some("application/x-gzip")));
        assert!(should_decompress(url, Some("application/gzip")));
        assert!(should_decompress(url, Some("Application/X-GZIP; charset=binary")));
        assert!(!should_decompress(url, Some("application/xml")));
        assert!(!should_decompress(url, Some("text/xml; charset=utf-8")));
    }

    #[test]
    fn test_decompress_roundtrip() {
        let inflated = decompress(&gzip(URLSET.as_bytes())).unwrap();
        assert_eq!(inflated, URLSET.as_bytes());
    }

    #[test]
    fn test_decompress_reads_every_gzip_member() {
        let mut joined = gzip(b"<urlset><url><loc>https://example.com/a</loc></url>");
        joined.extend(gzip(b"<url><loc>https://example.com/b</loc></url></urlset>"));

        let inflated = decompress(&joined).unwrap();
        assert_eq!(
            inflated,
            b"<urlset><url><loc>https://example.com/a</loc></url><url><loc>https://example.com/b</loc></url></urlset>"
        );
    }

    #[test]
    fn test_decompress_rejects_plain_bytes() {
        let result = decompress(b"<urlset></urlset>");
        assert!(matches!(result, Err(FetchError::DecompressFailed(_))));
    }

    #[tokio::test]
    async fn test_fetch_sends_accept_and_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sitemap.xml"))
            .and(|request: &Request| {
                request
                    .headers
                    .get("accept")
                    .and_then(|value| value.to_str().ok())
                    == Some("application/xml,text/xml,application/gzip,*/*")
            })
            .and(header("user-agent", "curl/8.7.1"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(URLSET, "application/xml"))
            .expect(1)
            .mount(&server)
            .await;

        let body = fetcher()
            .fetch(&format!("{}/sitemap.xml", server.uri()))
            .await
            .unwrap();
        assert_eq!(body, URLSET.as_bytes());
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing.xml"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = fetcher()
            .fetch(&format!("{}/missing.xml", server.uri()))
            .await;
        assert!(matches!(result, Err(FetchError::BadStatus(404))));
    }

    #[tokio::test]
    async fn test_fetch_decompresses_gz_location() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sitemap.xml.gz"))
            .respond_with(
                ResponseTemplate::new(200).set_body_bytes(gzip(URLSET.as_bytes())),
            )
            .mount(&server)
            .await;

        let body = fetcher()
            .fetch(&format!("{}/sitemap.xml.gz", server.uri()))
            .await
            .unwrap();
        assert_eq!(body, URLSET.as_bytes());
    }

    #[tokio::test]
    async fn test_fetch_decompresses_gzip_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sitemap"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(gzip(URLSET.as_bytes()), "application/x-gzip"),
            )
            .mount(&server)
            .await;

        let body = fetcher()
            .fetch(&format!("{}/sitemap", server.uri()))
            .await
            .unwrap();
        assert_eq!(body, URLSET.as_bytes());
    }

    #[tokio::test]
    async fn test_fetch_leaves_unsignalled_gzip_untouched() {
        let server = MockServer::start().await;
        let compressed = gzip(URLSET.as_bytes());
        Mock::given(method("GET"))
            .and(path("/sitemap.xml"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(compressed.clone(), "application/xml"),
            )
            .mount(&server)
            .await;

        let body = fetcher()
            .fetch(&format!("{}/sitemap.xml", server.uri()))
            .await
            .unwrap();
        assert_eq!(body, compressed);
    }

    #[tokio::test]
    async fn test_fetch_gz_location_with_plain_body_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sitemap.xml.gz"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(URLSET, "application/xml"))
            .mount(&server)
            .await;

        let result = fetcher()
            .fetch(&format!("{}/sitemap.xml.gz", server.uri()))
            .await;
        assert!(matches!(result, Err(FetchError::DecompressFailed(_))));
    }
}
