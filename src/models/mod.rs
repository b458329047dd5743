use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scrapers::types::SearchSpec;

/// A single ad as read from a listing result page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdSummary {
    pub title: String,
    /// Absolute link to the ad's detail page
    pub detail_url: String,
    /// Price exactly as displayed, e.g. "1.200 € VB" or "Zu verschenken"
    pub price_text: String,
    pub location_text: String,
    /// The site's own ad id, never empty
    pub external_id: String,
}

/// A place resolved through the site's location lookup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocationMatch {
    pub code: u32,
    pub name: String,
}

/// A saved search belonging to a chat
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Query {
    pub id: u64,
    pub chat_id: i64,
    pub term: String,
    pub radius: u32,
    pub city_code: u32,
    pub city_name: String,
    pub max_price: Option<u64>,
    pub min_price: Option<u64>,
    pub created_at: DateTime<Utc>,
}

impl Query {
    /// Search parameters for one result page of this saved search
    pub fn search_spec(&self, page: u32) -> SearchSpec {
        SearchSpec {
            term: self.term.clone(),
            city_code: self.city_code,
            radius_km: self.radius,
            max_price: self.max_price,
            min_price: self.min_price,
            page,
        }
    }
}

/// Fields needed to store a new saved search; the store assigns id and timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewQuery {
    pub chat_id: i64,
    pub term: String,
    pub radius: u32,
    pub city: LocationMatch,
    pub max_price: Option<u64>,
    pub min_price: Option<u64>,
}

/// An ad already seen for a saved search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersistedAd {
    pub id: u64,
    pub external_id: String,
    pub query_id: u64,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_builds_search_spec_for_page() {
        let query = Query {
            id: 7,
            chat_id: 42,
            term: "lego technic".to_string(),
            radius: 20,
            city_code: 3331,
            city_name: "Berlin".to_string(),
            max_price: Some(150),
            min_price: Some(20),
            created_at: Utc::now(),
        };

        let spec = query.search_spec(2);

        assert_eq!(spec.term, "lego technic");
        assert_eq!(spec.city_code, 3331);
        assert_eq!(spec.radius_km, 20);
        assert_eq!(spec.max_price, Some(150));
        assert_eq!(spec.min_price, Some(20));
        assert_eq!(spec.page, 2);
    }
}
