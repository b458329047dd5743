use std::sync::Mutex;
use tracing::{debug, error, warn};

use crate::scrapers::traits::ScrapeObserver;

/// Why a list item was left out of the result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Promoted,
    EmptyPrice,
    UnparseablePrice(String),
    AboveMaxPrice { price: u64, max_price: u64 },
    BelowMinPrice { price: u64, min_price: u64 },
    MissingExternalId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeEvent {
    ListingFetchStarted { url: String, term: String },
    EntrySkipped { index: usize, reason: SkipReason },
    ListingFetchFailed { url: String, term: String, radius: u32, error: String },
    ListingFetchCompleted { term: String, ads: usize },
    LocationLookupStarted { query: String },
    LocationLookupFailed { query: String, error: String },
    LocationKeyRejected { key: String },
    LocationResolved { code: u32, name: String },
}

/// Forwards events to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ScrapeObserver for TracingObserver {
    fn on_event(&self, event: &ScrapeEvent) {
        match event {
            ScrapeEvent::ListingFetchStarted { url, term } => {
                debug!(%url, %term, "scraping for ads");
            }
            ScrapeEvent::EntrySkipped { index, reason } => match reason {
                SkipReason::UnparseablePrice(price) => {
                    warn!(index, price_string = %price, "could not parse price from ad");
                }
                SkipReason::AboveMaxPrice { price, max_price } => {
                    debug!(index, price, max_price, "price is bigger than requested");
                }
                SkipReason::BelowMinPrice { price, min_price } => {
                    debug!(index, price, min_price, "price is lower than requested");
                }
                other => debug!(index, reason = ?other, "skipped ad"),
            },
            ScrapeEvent::ListingFetchFailed { url, term, radius, error } => {
                error!(%url, %term, radius, %error, "error while scraping for ads");
            }
            ScrapeEvent::ListingFetchCompleted { term, ads } => {
                debug!(query = %term, number_of_ads = ads, "scraped ads for query");
            }
            ScrapeEvent::LocationLookupStarted { query } => {
                debug!(city_search_term = %query, "finding city id");
            }
            ScrapeEvent::LocationLookupFailed { query, error } => {
                error!(city_search_term = %query, %error, "location lookup failed");
            }
            ScrapeEvent::LocationKeyRejected { key } => {
                warn!(%key, "could not get city id from lookup key");
            }
            ScrapeEvent::LocationResolved { code, name } => {
                debug!(city_id = code, city_name = %name, "found city");
            }
        }
    }
}

/// Keeps every event in memory, mostly useful in tests
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<ScrapeEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ScrapeEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn skip_reasons(&self) -> Vec<SkipReason> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ScrapeEvent::EntrySkipped { reason, .. } => Some(reason),
                _ => None,
            })
            .collect()
    }
}

impl ScrapeObserver for RecordingObserver {
    fn on_event(&self, event: &ScrapeEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
