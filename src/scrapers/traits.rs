use async_trait::async_trait;

use crate::error::{ListingError, TransportError};
use crate::models::AdSummary;
use crate::scrapers::observer::ScrapeEvent;
use crate::scrapers::types::{HttpRequest, HttpResponse, ListingEntry, SearchSpec};

/// Common trait for listing sources feeding the ingestion cycle
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Ads of one result page. Page-level failures yield an empty list.
    async fn fetch(&self, spec: &SearchSpec) -> Vec<AdSummary>;

    /// Get the name of the listing source
    fn source_name(&self) -> &'static str;
}

/// Network access used by both scrapers.
/// Any status code is a response; only failures to get one are errors.
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Locates listing entries in a result page by structural role
/// (results container, list item, anchor, price block, location block).
/// Implementations only differ in how nodes are found; filtering happens
/// in the extractor.
pub trait DocumentParser: Send + Sync {
    /// Entries of the results container in document order
    fn entries(&self, html: &str) -> Result<Vec<ListingEntry>, ListingError>;
}

/// Receives diagnostics emitted while scraping
pub trait ScrapeObserver: Send + Sync {
    fn on_event(&self, event: &ScrapeEvent);
}
