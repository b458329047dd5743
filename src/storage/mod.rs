use async_trait::async_trait;
use std::collections::HashSet;

use crate::error::StoreError;
use crate::models::{NewQuery, PersistedAd, Query};

pub mod memory;
pub use memory::MemoryStore;

/// An ad about to be recorded for a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAd {
    pub external_id: String,
    pub location: String,
}

/// Persistence of saved searches and the ads already seen for them
#[async_trait]
pub trait QueryStore: Send + Sync {
    async fn insert_query(&self, query: NewQuery) -> Result<Query, StoreError>;
    async fn get_query(&self, id: u64) -> Result<Option<Query>, StoreError>;
    async fn list_queries_for_chat(&self, chat_id: i64) -> Result<Vec<Query>, StoreError>;

    /// Delete a query together with all of its ads as one atomic operation.
    /// Returns the number of ads removed.
    async fn delete_query(&self, id: u64) -> Result<usize, StoreError>;

    async fn known_external_ids(&self, query_id: u64) -> Result<HashSet<String>, StoreError>;
    /// Record ads for a query. Ids already stored for the query, or repeated
    /// within `ads`, are left out; the ads actually stored are returned.
    async fn insert_ads(&self, query_id: u64, ads: Vec<NewAd>) -> Result<Vec<PersistedAd>, StoreError>;
    async fn ads_for_query(&self, query_id: u64) -> Result<Vec<PersistedAd>, StoreError>;
}
