//! Scout for ebay-kleinanzeigen.de result pages.
//!
//! [`ListingExtractor`] turns one result page of a saved search into filtered
//! [`AdSummary`] values, [`LocationResolver`] maps a free text place to the
//! site's location code, and [`IngestionCycle`] ties the extractor to a
//! [`QueryStore`] to find ads not seen before.

pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod scrapers;
pub mod storage;

pub use config::ScoutConfig;
pub use error::{ListingError, LocationError, StoreError, TransportError};
pub use ingest::IngestionCycle;
pub use models::{AdSummary, LocationMatch, NewQuery, PersistedAd, Query};
pub use scrapers::{ListingExtractor, LocationResolver, SearchSpec};
pub use storage::{MemoryStore, QueryStore};
