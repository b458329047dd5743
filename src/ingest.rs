use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::models::AdSummary;
use crate::scrapers::ListingSource;
use crate::storage::{NewAd, QueryStore};

/// One scrape of a saved search: fetch the first result page, keep the ads
/// not yet stored for the query and record them.
pub struct IngestionCycle {
    source: Arc<dyn ListingSource>,
    store: Arc<dyn QueryStore>,
}

impl IngestionCycle {
    pub fn new(source: Arc<dyn ListingSource>, store: Arc<dyn QueryStore>) -> Self {
        Self { source, store }
    }

    /// Returns the ads seen for the first time, in page order
    pub async fn run(&self, query_id: u64) -> Result<Vec<AdSummary>> {
        let query = self
            .store
            .get_query(query_id)
            .await?
            .with_context(|| format!("Query {query_id} does not exist"))?;

        let fetched = self.source.fetch(&query.search_spec(1)).await;
        let mut seen = self.store.known_external_ids(query.id).await?;

        let fresh: Vec<AdSummary> = fetched
            .into_iter()
            .filter(|ad| seen.insert(ad.external_id.clone()))
            .collect();

        if !fresh.is_empty() {
            let rows = fresh
                .iter()
                .map(|ad| NewAd {
                    external_id: ad.external_id.clone(),
                    location: ad.location_text.clone(),
                })
                .collect();
            self.store.insert_ads(query.id, rows).await?;
        }

        info!(
            query_id = query.id,
            source = self.source.source_name(),
            new_ads = fresh.len(),
            "ingested listing page"
        );
        Ok(fresh)
    }
}

