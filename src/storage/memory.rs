use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashSet};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::StoreError;
use crate::models::{NewQuery, PersistedAd, Query};
use crate::storage::{NewAd, QueryStore};

#[derive(Debug, Default)]
struct Tables {
    queries: BTreeMap<u64, Query>,
    ads: BTreeMap<u64, PersistedAd>,
    next_query_id: u64,
    next_ad_id: u64,
}

/// In-memory `QueryStore`. Both tables live behind one lock, so a query
/// delete and its ad cascade are observed together or not at all.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn ad_count(&self) -> usize {
        self.tables.lock().await.ads.len()
    }
}

#[async_trait]
impl QueryStore for MemoryStore {
    async fn insert_query(&self, query: NewQuery) -> Result<Query, StoreError> {
        let mut tables = self.tables.lock().await;
        tables.next_query_id += 1;

        let stored = Query {
            id: tables.next_query_id,
            chat_id: query.chat_id,
            term: query.term,
            radius: query.radius,
            city_code: query.city.code,
            city_name: query.city.name,
            max_price: query.max_price,
            min_price: query.min_price,
            created_at: Utc::now(),
        };
        tables.queries.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn get_query(&self, id: u64) -> Result<Option<Query>, StoreError> {
        Ok(self.tables.lock().await.queries.get(&id).cloned())
    }

    async fn list_queries_for_chat(&self, chat_id: i64) -> Result<Vec<Query>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .queries
            .values()
            .filter(|q| q.chat_id == chat_id)
            .cloned()
            .collect())
    }

    async fn delete_query(&self, id: u64) -> Result<usize, StoreError> {
        let mut tables = self.tables.lock().await;
        if !tables.queries.contains_key(&id) {
            return Err(StoreError::QueryNotFound(id));
        }

        // Children first, then the parent, under the same guard
        let before = tables.ads.len();
        tables.ads.retain(|_, ad| ad.query_id != id);
        let removed = before - tables.ads.len();
        tables.queries.remove(&id);

        debug!(query_id = id, removed_ads = removed, "deleted query");
        Ok(removed)
    }

    async fn known_external_ids(&self, query_id: u64) -> Result<HashSet<String>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .ads
            .values()
            .filter(|ad| ad.query_id == query_id)
            .map(|ad| ad.external_id.clone())
            .collect())
    }

    async fn insert_ads(&self, query_id: u64, ads: Vec<NewAd>) -> Result<Vec<PersistedAd>, StoreError> {
        let mut tables = self.tables.lock().await;
        if !tables.queries.contains_key(&query_id) {
            return Err(StoreError::QueryNotFound(query_id));
        }

        let mut known: HashSet<String> = tables
            .ads
            .values()
            .filter(|ad| ad.query_id == query_id)
            .map(|ad| ad.external_id.clone())
            .collect();

        let now = Utc::now();
        let mut inserted = Vec::with_capacity(ads.len());
        for ad in ads {
            if !known.insert(ad.external_id.clone()) {
                continue;
            }
            tables.next_ad_id += 1;
            let stored = PersistedAd {
                id: tables.next_ad_id,
                external_id: ad.external_id,
                query_id,
                location: ad.location,
                created_at: now,
            };
            tables.ads.insert(stored.id, stored.clone());
            inserted.push(stored);
        }
        Ok(inserted)
    }

    async fn ads_for_query(&self, query_id: u64) -> Result<Vec<PersistedAd>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .ads
            .values()
            .filter(|ad| ad.query_id == query_id)
            .cloned()
            .collect())
    }
}
