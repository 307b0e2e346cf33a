//! HTTP client for the hosted document store.
//!
//! Speaks the store's REST surface: `GET /{collection}` returns every
//! document, `POST` creates, `PATCH /{collection}/{id}` merges fields,
//! `DELETE` removes. Query semantics beyond that are out of scope; all
//! filtering happens client-side.

use crate::catalog::ingest::RawFields;
use crate::config::NetworkConfig;
use crate::error::{MedstockError, Result};
use crate::store::{DocumentStore, StoredDocument};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

/// Production document-store client.
#[derive(Debug, Clone)]
pub struct RestStore {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct AddResponse {
    id: String,
}

impl RestStore {
    /// Create a client against a store base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(NetworkConfig::REQUEST_TIMEOUT)
            .user_agent(NetworkConfig::USER_AGENT)
            .build()
            .map_err(|e| MedstockError::Network {
                message: format!("Failed to create HTTP client: {}", e),
                cause: None,
            })?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(collection))
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!(
            "{}/{}",
            self.collection_url(collection),
            urlencoding::encode(id)
        )
    }
}

#[async_trait]
impl DocumentStore for RestStore {
    async fn fetch_all(&self, collection: &str) -> Result<Vec<StoredDocument>> {
        let url = self.collection_url(collection);
        debug!("Fetching collection {}", collection);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(MedstockError::store(
                collection,
                format!("store returned {}", response.status()),
            ));
        }
        let docs: Vec<StoredDocument> = response.json().await.map_err(|e| MedstockError::Json {
            message: format!("Failed to parse store response: {}", e),
            source: None,
        })?;
        debug!("Fetched {} documents from {}", docs.len(), collection);
        Ok(docs)
    }

    async fn fetch_one(&self, collection: &str, id: &str) -> Result<StoredDocument> {
        let response = self
            .client
            .get(self.document_url(collection, id))
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(MedstockError::DocumentNotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        if !response.status().is_success() {
            return Err(MedstockError::store(
                collection,
                format!("store returned {}", response.status()),
            ));
        }
        response.json().await.map_err(|e| MedstockError::Json {
            message: format!("Failed to parse store response: {}", e),
            source: None,
        })
    }

    async fn add(&self, collection: &str, fields: RawFields) -> Result<String> {
        let response = self
            .client
            .post(self.collection_url(collection))
            .json(&fields)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(MedstockError::store(
                collection,
                format!("add rejected with {}", response.status()),
            ));
        }
        let created: AddResponse = response.json().await.map_err(|e| MedstockError::Json {
            message: format!("Failed to parse store response: {}", e),
            source: None,
        })?;
        Ok(created.id)
    }

    async fn update(&self, collection: &str, id: &str, fields: RawFields) -> Result<()> {
        let response = self
            .client
            .patch(self.document_url(collection, id))
            .json(&fields)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(MedstockError::store(
                collection,
                format!("update rejected with {}", response.status()),
            ));
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.document_url(collection, id))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(MedstockError::store(
                collection,
                format!("delete rejected with {}", response.status()),
            ));
        }
        Ok(())
    }
}
