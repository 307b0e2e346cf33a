//! Document store access.
//!
//! The hosted database is an external collaborator; the engine only depends
//! on the [`DocumentStore`] trait. [`RestStore`] is the production client,
//! [`MemoryStore`] the in-process double used by tests.

mod memory;
mod rest;

pub use memory::MemoryStore;
pub use rest::RestStore;

use crate::catalog::ingest::RawFields;
use crate::error::Result;
use async_trait::async_trait;

/// One raw document as the store hands it back.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StoredDocument {
    pub id: String,
    pub fields: RawFields,
}

/// Minimal document-store contract the catalog needs.
///
/// Reads are unbounded whole-collection fetches; there is no server-side
/// predicate or paging, client-side filtering only.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch every document in a collection in one read.
    async fn fetch_all(&self, collection: &str) -> Result<Vec<StoredDocument>>;

    /// Fetch a single document by id.
    async fn fetch_one(&self, collection: &str, id: &str) -> Result<StoredDocument>;

    /// Create a new document; returns the store-assigned id.
    async fn add(&self, collection: &str, fields: RawFields) -> Result<String>;

    /// Update an existing document by id.
    async fn update(&self, collection: &str, id: &str, fields: RawFields) -> Result<()>;

    /// Delete a document by id.
    async fn delete(&self, collection: &str, id: &str) -> Result<()>;
}
