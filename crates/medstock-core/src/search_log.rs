//! Fire-and-forget logging of committed part searches.
//!
//! One record per distinct committed term; the per-session dedup lives in
//! [`crate::catalog::CatalogView`], this module only appends.

use crate::config::CatalogConfig;
use crate::error::Result;
use crate::store::DocumentStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

/// One logged search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRecord {
    pub term: String,
    pub has_matches: bool,
    pub match_count: usize,
    pub timestamp: DateTime<Utc>,
}

impl SearchRecord {
    pub fn new(term: impl Into<String>, match_count: usize) -> Self {
        Self {
            term: term.into(),
            has_matches: match_count > 0,
            match_count,
            timestamp: Utc::now(),
        }
    }
}

/// Appends search records to the external log collection.
pub struct SearchLogger {
    store: Arc<dyn DocumentStore>,
}

impl SearchLogger {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Append a record, awaiting the write. Used directly by tests.
    pub async fn append(&self, record: &SearchRecord) -> Result<()> {
        let fields = match serde_json::to_value(record)? {
            Value::Object(map) => map,
            _ => unreachable!("SearchRecord serializes to an object"),
        };
        self.store
            .add(CatalogConfig::SEARCH_LOG_COLLECTION, fields)
            .await?;
        Ok(())
    }

    /// Fire-and-forget append. Failures are logged, never surfaced.
    pub fn log(self: &Arc<Self>, record: SearchRecord) {
        let logger = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = logger.append(&record).await {
                warn!("Failed to log search '{}': {}", record.term, e);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_append_writes_camel_case_fields() {
        let store = Arc::new(MemoryStore::new());
        let logger = SearchLogger::new(store.clone());
        logger
            .append(&SearchRecord::new("head coil", 3))
            .await
            .unwrap();

        let docs = store.fetch_all("searchLogs").await.unwrap();
        assert_eq!(docs.len(), 1);
        let fields = &docs[0].fields;
        assert_eq!(fields["term"], "head coil");
        assert_eq!(fields["hasMatches"], true);
        assert_eq!(fields["matchCount"], 3);
        assert!(fields.contains_key("timestamp"));
    }

    #[tokio::test]
    async fn test_fire_and_forget_swallows_failure() {
        let store = Arc::new(MemoryStore::new());
        store.set_failing(true);
        let logger = Arc::new(SearchLogger::new(store));
        // Must not panic or propagate.
        logger.log(SearchRecord::new("coil", 0));
        tokio::task::yield_now().await;
    }
}
