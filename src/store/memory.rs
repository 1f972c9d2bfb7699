//! In-memory document store
//!
//! Backs unit and integration tests, and embedders that already hold their
//! records in process. Collections are plain vectors of raw records; reads
//! clone, so a fetched snapshot never changes under the caller.

use super::{DocumentStore, RawRecord};
use crate::error::StoreError;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

/// A document store holding collections in memory
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<RawRecord>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style: add a collection and return the store
    pub fn with_collection(self, name: &str, records: Vec<RawRecord>) -> Self {
        self.collections
            .write()
            .insert(name.to_string(), records);
        self
    }

    /// Replace the contents of a collection
    pub fn set_collection(&self, name: &str, records: Vec<RawRecord>) {
        self.collections.write().insert(name.to_string(), records);
    }

    /// Append one record to a collection, creating it if absent
    pub fn push(&self, name: &str, record: RawRecord) {
        self.collections
            .write()
            .entry(name.to_string())
            .or_default()
            .push(record);
    }

    /// Drop a collection, making subsequent fetches fail
    pub fn remove_collection(&self, name: &str) {
        self.collections.write().remove(name);
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn fetch_all(
        &self,
        collection: &str,
        limit: Option<usize>,
    ) -> Result<Vec<RawRecord>, StoreError> {
        let collections = self.collections.read();
        let records = collections
            .get(collection)
            .ok_or_else(|| StoreError::UnknownCollection(collection.to_string()))?;
        let take = limit.unwrap_or(records.len());
        Ok(records.iter().take(take).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(fields: serde_json::Value) -> RawRecord {
        fields.as_object().unwrap().clone()
    }

    #[tokio::test]
    async fn test_fetch_all_returns_inserted_records() {
        let store = MemoryStore::new().with_collection(
            "surveys",
            vec![
                record(json!({"surveyorName": "Alice"})),
                record(json!({"surveyorName": "Bob"})),
            ],
        );

        let records = store.fetch_all("surveys", None).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["surveyorName"], "Alice");
    }

    #[tokio::test]
    async fn test_fetch_all_honors_limit() {
        let store = MemoryStore::new().with_collection(
            "historicDemand",
            (0..10).map(|i| record(json!({"n": i}))).collect(),
        );

        let records = store.fetch_all("historicDemand", Some(3)).await.unwrap();
        assert_eq!(records.len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_unknown_collection_errors() {
        let store = MemoryStore::new();
        let err = store.fetch_all("missing", None).await.unwrap_err();
        assert!(matches!(err, StoreError::UnknownCollection(_)));
    }
}
