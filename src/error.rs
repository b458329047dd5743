//! Error types for the listing scraper, the location lookup and the ad store.

use thiserror::Error;

/// The request never produced a response (connect failure, timeout, body read)
#[derive(Debug, Error)]
#[error("transport error: {message}")]
pub struct TransportError {
    pub message: String,
    pub timed_out: bool,
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self {
            timed_out: err.is_timeout(),
            message: err.to_string(),
        }
    }
}

/// Location lookup failures, always returned to the caller
#[derive(Debug, Error)]
pub enum LocationError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Non-200 answer. A 403 usually means the site blocked our address.
    #[error("location lookup returned status {status}{}", blocked_hint(.likely_blocked))]
    BadStatus { status: u16, likely_blocked: bool },

    #[error("malformed location response: {0}")]
    Malformed(String),

    #[error("no location found for {0:?}")]
    NotFound(String),
}

fn blocked_hint(likely_blocked: &bool) -> &'static str {
    if *likely_blocked {
        " (ip address might be blocked)"
    } else {
        ""
    }
}

impl LocationError {
    pub fn bad_status(status: u16) -> Self {
        Self::BadStatus {
            status,
            likely_blocked: status == 403,
        }
    }
}

/// Page-level listing failures. These are reported to the observer and the
/// fetch yields an empty result.
#[derive(Debug, Error)]
pub enum ListingError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("listing page returned status {0}")]
    BadStatus(u16),

    #[error("could not read listing page: {0}")]
    UnreadableBody(String),

    #[error("invalid listing url: {0}")]
    InvalidUrl(String),

    #[error("results container not found in listing page")]
    MissingResults,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("query {0} not found")]
    QueryNotFound(u64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_status_flags_403_as_blocked() {
        match LocationError::bad_status(403) {
            LocationError::BadStatus { status, likely_blocked } => {
                assert_eq!(status, 403);
                assert!(likely_blocked);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(matches!(
            LocationError::bad_status(500),
            LocationError::BadStatus { likely_blocked: false, .. }
        ));
    }

    #[test]
    fn test_blocked_message_mentions_block() {
        let msg = LocationError::bad_status(403).to_string();
        assert!(msg.contains("403"));
        assert!(msg.contains("blocked"));
        assert!(!LocationError::bad_status(502).to_string().contains("blocked"));
    }
}
