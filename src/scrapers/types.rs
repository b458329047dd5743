use serde::{Deserialize, Serialize};

/// Search parameters for one listing result page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchSpec {
    /// Free text search term
    pub term: String,
    /// Site location code, see `LocationResolver`
    pub city_code: u32,
    /// Search radius around the city in km
    pub radius_km: u32,
    /// Exclusive upper price bound (EUR)
    pub max_price: Option<u64>,
    /// Inclusive lower price bound (EUR), only applied together with `max_price`
    pub min_price: Option<u64>,
    /// 1-based result page
    pub page: u32,
}

impl SearchSpec {
    pub fn new(term: impl Into<String>, city_code: u32, radius_km: u32) -> Self {
        Self {
            term: term.into(),
            city_code,
            radius_km,
            max_price: None,
            min_price: None,
            page: 1,
        }
    }

    pub fn with_price_range(mut self, min_price: Option<u64>, max_price: Option<u64>) -> Self {
        self.min_price = min_price;
        self.max_price = max_price;
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Term as it appears in the listing URL path
    pub fn url_term(&self) -> String {
        self.term.replace(' ', "-")
    }
}

/// Raw fields of one list item, as located by a `DocumentParser`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingEntry {
    pub promoted: bool,
    pub href: Option<String>,
    pub title: String,
    pub price_text: String,
    pub location_text: String,
    pub external_id: Option<String>,
}

/// Method-less description of an outgoing GET
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub timeout: Option<std::time::Duration>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            timeout: None,
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// A received response. The body is read after the status arrived, so a
/// failed read is kept here instead of hiding the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Result<String, String>,
}
