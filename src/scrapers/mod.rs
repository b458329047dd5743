pub mod document;
pub mod http;
pub mod kleinanzeigen;
pub mod location;
pub mod observer;
pub mod price;
pub mod traits;
pub mod types;

pub use document::{ListingSelectors, ScraperDocumentParser};
pub use http::ReqwestFetcher;
pub use kleinanzeigen::ListingExtractor;
pub use location::LocationResolver;
pub use observer::{RecordingObserver, ScrapeEvent, SkipReason, TracingObserver};
pub use traits::{DocumentParser, HttpFetcher, ListingSource, ScrapeObserver};
pub use types::SearchSpec;
