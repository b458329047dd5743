use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use url::Url;

use crate::config::ScoutConfig;
use crate::error::ListingError;
use crate::models::AdSummary;
use crate::scrapers::document::ScraperDocumentParser;
use crate::scrapers::http::ReqwestFetcher;
use crate::scrapers::observer::{ScrapeEvent, SkipReason, TracingObserver};
use crate::scrapers::price::{check_price, normalize_location};
use crate::scrapers::traits::{DocumentParser, HttpFetcher, ListingSource, ScrapeObserver};
use crate::scrapers::types::{HttpRequest, ListingEntry, SearchSpec};

/// Reads one result page of the listing site into filtered ad summaries
pub struct ListingExtractor {
    config: ScoutConfig,
    fetcher: Arc<dyn HttpFetcher>,
    parser: Arc<dyn DocumentParser>,
    observer: Arc<dyn ScrapeObserver>,
}

impl ListingExtractor {
    /// Extractor using reqwest, the `scraper` markup parser and tracing diagnostics
    pub fn new(config: ScoutConfig) -> Result<Self> {
        let fetcher = ReqwestFetcher::new()?;
        let parser = ScraperDocumentParser::new().context("Failed to build listing parser")?;
        Ok(Self::with_parts(
            config,
            Arc::new(fetcher),
            Arc::new(parser),
            Arc::new(TracingObserver),
        ))
    }

    pub fn with_parts(
        config: ScoutConfig,
        fetcher: Arc<dyn HttpFetcher>,
        parser: Arc<dyn DocumentParser>,
        observer: Arc<dyn ScrapeObserver>,
    ) -> Self {
        Self {
            config,
            fetcher,
            parser,
            observer,
        }
    }

    pub fn listing_url(&self, spec: &SearchSpec) -> String {
        self.config
            .listing_url(spec.page, &spec.url_term(), spec.city_code, spec.radius_km)
    }

    /// Fetch and filter one page. Any page-level failure is reported to the
    /// observer and results in an empty list, so "nothing found" and "fetch
    /// failed" look the same to the caller.
    pub async fn fetch(&self, spec: &SearchSpec) -> Vec<AdSummary> {
        let url = self.listing_url(spec);
        self.observer.on_event(&ScrapeEvent::ListingFetchStarted {
            url: url.clone(),
            term: spec.term.clone(),
        });

        let ads = match self.try_fetch(spec, &url).await {
            Ok(ads) => ads,
            Err(err) => {
                self.observer.on_event(&ScrapeEvent::ListingFetchFailed {
                    url,
                    term: spec.term.clone(),
                    radius: spec.radius_km,
                    error: err.to_string(),
                });
                Vec::new()
            }
        };

        self.observer.on_event(&ScrapeEvent::ListingFetchCompleted {
            term: spec.term.clone(),
            ads: ads.len(),
        });
        ads
    }

    async fn try_fetch(&self, spec: &SearchSpec, url: &str) -> Result<Vec<AdSummary>, ListingError> {
        let base = Url::parse(&self.config.base_url)
            .map_err(|e| ListingError::InvalidUrl(format!("{}: {e}", self.config.base_url)))?;

        let request = HttpRequest::get(url).header("User-Agent", &self.config.user_agent);
        let response = self.fetcher.get(request).await?;
        if !(200..300).contains(&response.status) {
            return Err(ListingError::BadStatus(response.status));
        }

        let body = response.body.map_err(ListingError::UnreadableBody)?;
        let entries = self.parser.entries(&body)?;
        Ok(self.extract(spec, &base, entries))
    }

    /// Run the per-entry filters over parsed entries, keeping document order
    pub fn extract(&self, spec: &SearchSpec, base: &Url, entries: Vec<ListingEntry>) -> Vec<AdSummary> {
        entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match summarize(spec, base, entry) {
                Ok(ad) => Some(ad),
                Err(reason) => {
                    self.observer
                        .on_event(&ScrapeEvent::EntrySkipped { index, reason });
                    None
                }
            })
            .collect()
    }
}

/// Turn one entry into an ad, or say why it was left out
fn summarize(spec: &SearchSpec, base: &Url, entry: ListingEntry) -> Result<AdSummary, SkipReason> {
    if entry.promoted {
        return Err(SkipReason::Promoted);
    }

    let price_text = entry.price_text.trim().to_string();
    check_price(&price_text, spec.max_price, spec.min_price)?;

    let external_id = entry
        .external_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or(SkipReason::MissingExternalId)?;

    Ok(AdSummary {
        title: entry.title,
        detail_url: resolve_link(base, entry.href.as_deref().unwrap_or_default()),
        price_text,
        location_text: normalize_location(&entry.location_text),
        external_id,
    })
}

fn resolve_link(base: &Url, href: &str) -> String {
    base.join(href)
        .map(String::from)
        .unwrap_or_else(|_| format!("{}{}", base.as_str().trim_end_matches('/'), href))
}

#[async_trait]
impl ListingSource for ListingExtractor {
    async fn fetch(&self, spec: &SearchSpec) -> Vec<AdSummary> {
        ListingExtractor::fetch(self, spec).await
    }

    fn source_name(&self) -> &'static str {
        "Kleinanzeigen"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://www.ebay-kleinanzeigen.de").unwrap()
    }

    fn entry(id: Option<&str>, price: &str) -> ListingEntry {
        ListingEntry {
            promoted: false,
            href: Some("/s-anzeige/fahrrad/1".to_string()),
            title: "Fahrrad".to_string(),
            price_text: price.to_string(),
            location_text: "  12345\n   Musterstadt ".to_string(),
            external_id: id.map(str::to_string),
        }
    }

    #[test]
    fn test_summarize_builds_absolute_link_and_normalized_location() {
        let spec = SearchSpec::new("fahrrad", 1, 5);
        let ad = summarize(&spec, &base(), entry(Some("1"), " 50 € ")).unwrap();

        assert_eq!(ad.detail_url, "https://www.ebay-kleinanzeigen.de/s-anzeige/fahrrad/1");
        assert_eq!(ad.location_text, "12345 Musterstadt");
        assert_eq!(ad.price_text, "50 €");
        assert_eq!(ad.external_id, "1");
    }

    #[test]
    fn test_summarize_skips_missing_or_blank_id() {
        let spec = SearchSpec::new("fahrrad", 1, 5);
        assert_eq!(
            summarize(&spec, &base(), entry(None, "50 €")),
            Err(SkipReason::MissingExternalId)
        );
        assert_eq!(
            summarize(&spec, &base(), entry(Some("  "), "50 €")),
            Err(SkipReason::MissingExternalId)
        );
    }

    #[test]
    fn test_promoted_is_skipped_before_price_check() {
        let spec = SearchSpec::new("fahrrad", 1, 5).with_price_range(None, Some(10));
        let mut promoted = entry(Some("1"), "Tausch");
        promoted.promoted = true;
        assert_eq!(summarize(&spec, &base(), promoted), Err(SkipReason::Promoted));
    }

    #[test]
    fn test_resolve_link_keeps_absolute_urls() {
        assert_eq!(
            resolve_link(&base(), "https://example.org/x"),
            "https://example.org/x"
        );
        assert_eq!(resolve_link(&base(), ""), "https://www.ebay-kleinanzeigen.de/");
    }
}
