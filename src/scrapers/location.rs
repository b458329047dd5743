use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use url::Url;

use crate::config::ScoutConfig;
use crate::error::LocationError;
use crate::models::LocationMatch;
use crate::scrapers::http::ReqwestFetcher;
use crate::scrapers::observer::{ScrapeEvent, TracingObserver};
use crate::scrapers::traits::{HttpFetcher, ScrapeObserver};
use crate::scrapers::types::HttpRequest;

/// Resolves free text places ("Berlin", "10115") to the site's location codes
pub struct LocationResolver {
    config: ScoutConfig,
    fetcher: Arc<dyn HttpFetcher>,
    observer: Arc<dyn ScrapeObserver>,
}

impl LocationResolver {
    pub fn new(config: ScoutConfig) -> Result<Self> {
        Ok(Self::with_parts(
            config,
            Arc::new(ReqwestFetcher::new()?),
            Arc::new(TracingObserver),
        ))
    }

    pub fn with_parts(
        config: ScoutConfig,
        fetcher: Arc<dyn HttpFetcher>,
        observer: Arc<dyn ScrapeObserver>,
    ) -> Self {
        Self {
            config,
            fetcher,
            observer,
        }
    }

    /// Look up a place.
    ///
    /// The endpoint answers with an unordered JSON object, so when several
    /// places match, which one is returned is unspecified. Callers must not
    /// rely on a particular pick.
    pub async fn resolve(&self, place: &str) -> Result<LocationMatch, LocationError> {
        let query = place.trim();
        self.observer.on_event(&ScrapeEvent::LocationLookupStarted {
            query: query.to_string(),
        });

        match self.lookup(query).await {
            Ok(found) => {
                self.observer.on_event(&ScrapeEvent::LocationResolved {
                    code: found.code,
                    name: found.name.clone(),
                });
                Ok(found)
            }
            Err(err) => {
                self.observer.on_event(&ScrapeEvent::LocationLookupFailed {
                    query: query.to_string(),
                    error: err.to_string(),
                });
                Err(err)
            }
        }
    }

    async fn lookup(&self, query: &str) -> Result<LocationMatch, LocationError> {
        let url = Url::parse_with_params(&self.config.location_lookup_url(), &[("query", query)])
            .map_err(|e| LocationError::Malformed(format!("invalid lookup url: {e}")))?;

        let request = HttpRequest::get(url.as_str())
            .header("User-Agent", &self.config.user_agent)
            .header("Accept", "*/*")
            .header("Accept-Language", "en-US,en;q=0.5")
            .timeout(self.config.lookup_timeout);

        let response = self.fetcher.get(request).await?;
        if response.status != 200 {
            return Err(LocationError::bad_status(response.status));
        }

        let body = response
            .body
            .map_err(|e| LocationError::Malformed(format!("could not read response: {e}")))?;

        let parsed = parse_places(&body)?;
        for key in &parsed.rejected_keys {
            self.observer.on_event(&ScrapeEvent::LocationKeyRejected { key: key.clone() });
        }

        match parsed.places.into_iter().next() {
            Some(found) => Ok(found),
            None if parsed.rejected_keys.is_empty() => Err(LocationError::NotFound(query.to_string())),
            None => Err(LocationError::Malformed(format!(
                "could not get city id from any of {:?}",
                parsed.rejected_keys
            ))),
        }
    }
}

/// Places decoded from a lookup body, plus keys that carried no usable code
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ParsedPlaces {
    pub places: Vec<LocationMatch>,
    pub rejected_keys: Vec<String>,
}

/// Decode the lookup body, e.g. `{"_0":"Deutschland","r3331":"Berlin"}`.
/// The first character of each key is a category marker, the rest the code.
/// Keys without a numeric code are set aside rather than failing the body.
pub fn parse_places(body: &str) -> Result<ParsedPlaces, LocationError> {
    let entries: HashMap<String, String> = serde_json::from_str(body)
        .map_err(|e| LocationError::Malformed(format!("could not parse JSON: {e}")))?;

    let mut parsed = ParsedPlaces::default();
    for (key, name) in entries {
        match place_code(&key) {
            Some(code) => parsed.places.push(LocationMatch { code, name }),
            None => parsed.rejected_keys.push(key),
        }
    }
    Ok(parsed)
}

fn place_code(key: &str) -> Option<u32> {
    let mut chars = key.chars();
    chars.next();
    chars.as_str().trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_places_strips_category_marker() {
        let parsed = parse_places(r#"{"r123456":"Berlin"}"#).unwrap();
        assert_eq!(
            parsed.places,
            vec![LocationMatch {
                code: 123456,
                name: "Berlin".to_string()
            }]
        );
        assert!(parsed.rejected_keys.is_empty());
    }

    #[test]
    fn test_parse_places_trims_code() {
        let parsed = parse_places(r#"{"r 42 ":"Hamburg"}"#).unwrap();
        assert_eq!(parsed.places[0].code, 42);
    }

    #[test]
    fn test_parse_places_empty_object() {
        assert_eq!(parse_places("{}").unwrap(), ParsedPlaces::default());
    }

    #[test]
    fn test_parse_places_sets_aside_keys_without_code() {
        let parsed = parse_places(r#"{"r3331":"Berlin","_x":"Deutschland"}"#).unwrap();
        assert_eq!(
            parsed.places,
            vec![LocationMatch {
                code: 3331,
                name: "Berlin".to_string()
            }]
        );
        assert_eq!(parsed.rejected_keys, vec!["_x".to_string()]);

        let parsed = parse_places(r#"{"rabc":"Nowhere","":"Empty"}"#).unwrap();
        assert!(parsed.places.is_empty());
        assert_eq!(parsed.rejected_keys.len(), 2);
    }

    #[test]
    fn test_parse_places_rejects_non_object_payloads() {
        assert!(matches!(parse_places("<html>"), Err(LocationError::Malformed(_))));
        assert!(matches!(parse_places("[]"), Err(LocationError::Malformed(_))));
        assert!(matches!(parse_places(r#"{"r1":5}"#), Err(LocationError::Malformed(_))));
    }
}
