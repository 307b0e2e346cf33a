//! In-memory document store for tests and offline development.

use crate::catalog::ingest::RawFields;
use crate::error::{MedstockError, Result};
use crate::store::{DocumentStore, StoredDocument};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::Mutex;

/// Test double holding collections in a mutex-guarded map.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<StoredDocument>>>,
    next_id: AtomicU64,
    /// When set, every operation fails with a store error.
    fail: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection with raw documents.
    pub async fn seed(&self, collection: &str, docs: Vec<StoredDocument>) {
        self.collections
            .lock()
            .await
            .insert(collection.to_string(), docs);
    }

    /// Make every subsequent operation fail, simulating an outage.
    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    /// Number of documents currently in a collection.
    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }

    fn check_failure(&self, collection: &str) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            Err(MedstockError::store(collection, "simulated outage"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn fetch_all(&self, collection: &str) -> Result<Vec<StoredDocument>> {
        self.check_failure(collection)?;
        Ok(self
            .collections
            .lock()
            .await
            .get(collection)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_one(&self, collection: &str, id: &str) -> Result<StoredDocument> {
        self.check_failure(collection)?;
        self.collections
            .lock()
            .await
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned()
            .ok_or_else(|| MedstockError::DocumentNotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })
    }

    async fn add(&self, collection: &str, fields: RawFields) -> Result<String> {
        self.check_failure(collection)?;
        let id = format!("doc{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        self.collections
            .lock()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(StoredDocument {
                id: id.clone(),
                fields,
            });
        Ok(id)
    }

    async fn update(&self, collection: &str, id: &str, fields: RawFields) -> Result<()> {
        self.check_failure(collection)?;
        let mut collections = self.collections.lock().await;
        let doc = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
            .ok_or_else(|| MedstockError::DocumentNotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;
        for (key, value) in fields {
            doc.fields.insert(key, value);
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        self.check_failure(collection)?;
        let mut collections = self.collections.lock().await;
        let docs = collections
            .get_mut(collection)
            .ok_or_else(|| MedstockError::DocumentNotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;
        let before = docs.len();
        docs.retain(|d| d.id != id);
        if docs.len() == before {
            return Err(MedstockError::DocumentNotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
