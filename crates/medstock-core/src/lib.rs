//! MedStock Core - headless catalog engine for a used-medical-equipment
//! storefront.
//!
//! The hosted document database, identity provider and mail service are
//! external collaborators behind traits. Everything with actual behavior
//! (ingestion, filtering, pagination, address-bar state, CSV export, search
//! logging) lives here and is testable without a network.
//!
//! # Example
//!
//! ```rust,ignore
//! use medstock_core::{Category, MedstockApi};
//!
//! #[tokio::main]
//! async fn main() -> medstock_core::Result<()> {
//!     let api = MedstockApi::builder()
//!         .store_url("https://store.example.com/v1")
//!         .build()?;
//!
//!     let mut view = api.open_view(Category::Part);
//!     api.load(&mut view).await;
//!     println!("{} parts", view.current_page().match_count);
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod mail;
pub mod search_log;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use catalog::{
    CatalogItem, CatalogPage, CatalogView, Category, FilterState, KeywordCommit, LoadState,
};
pub use error::{MedstockError, Result};
pub use mail::{ContactMessage, HttpMailer, Mailer, OutboundEmail, QuoteRequest};
pub use search_log::{SearchLogger, SearchRecord};
pub use session::{AuthSession, IdentityProvider, UserInfo};
pub use store::{DocumentStore, MemoryStore, RestStore, StoredDocument};

use crate::catalog::ingest;
use std::sync::Arc;

/// Main entry point wiring the engine to its collaborators.
pub struct MedstockApi {
    store: Arc<dyn DocumentStore>,
    mailer: Option<Arc<dyn Mailer>>,
    search_logger: Arc<SearchLogger>,
}

/// Builder for [`MedstockApi`].
#[derive(Default)]
pub struct MedstockApiBuilder {
    store_url: Option<String>,
    store: Option<Arc<dyn DocumentStore>>,
    mail_endpoint: Option<String>,
    mailer: Option<Arc<dyn Mailer>>,
}

impl MedstockApiBuilder {
    /// Base URL of the hosted document store.
    pub fn store_url(mut self, url: impl Into<String>) -> Self {
        self.store_url = Some(url.into());
        self
    }

    /// Use a pre-built store (tests inject a [`MemoryStore`] here).
    pub fn store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Endpoint of the transactional mail API.
    pub fn mail_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.mail_endpoint = Some(endpoint.into());
        self
    }

    /// Use a pre-built mailer.
    pub fn mailer(mut self, mailer: Arc<dyn Mailer>) -> Self {
        self.mailer = Some(mailer);
        self
    }

    pub fn build(self) -> Result<MedstockApi> {
        let store: Arc<dyn DocumentStore> = match (self.store, self.store_url) {
            (Some(store), _) => store,
            (None, Some(url)) => Arc::new(RestStore::new(url)?),
            (None, None) => {
                return Err(MedstockError::Config {
                    message: "a document store (or store URL) is required".to_string(),
                })
            }
        };
        let mailer = match (self.mailer, self.mail_endpoint) {
            (Some(mailer), _) => Some(mailer),
            (None, Some(endpoint)) => Some(Arc::new(HttpMailer::new(endpoint)?) as Arc<dyn Mailer>),
            (None, None) => None,
        };
        let search_logger = Arc::new(SearchLogger::new(store.clone()));
        Ok(MedstockApi {
            store,
            mailer,
            search_logger,
        })
    }
}

impl MedstockApi {
    pub fn builder() -> MedstockApiBuilder {
        MedstockApiBuilder::default()
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    // ========================================
    // Catalog browsing
    // ========================================

    /// Fresh view for one category page visit.
    pub fn open_view(&self, category: Category) -> CatalogView {
        CatalogView::new(category)
    }

    /// One best-effort whole-collection fetch into the view.
    ///
    /// Store failure leaves the view loaded-but-empty; no retry.
    pub async fn load(&self, view: &mut CatalogView) {
        let generation = view.begin_load();
        let result = self.store.fetch_all(view.category().collection()).await;
        view.complete_load(generation, result);
    }

    /// Commit the keyword input and fire the search-log write when due.
    pub fn commit_keyword(&self, view: &mut CatalogView) -> String {
        let commit = view.commit_keyword();
        if let Some(record) = commit.log {
            self.search_logger.log(record);
        }
        commit.query
    }

    /// CSV of the view's whole filtered set, plus the download filename.
    pub fn export_csv(&self, view: &CatalogView) -> Result<(String, String)> {
        let csv = catalog::export_csv(&view.filtered())?;
        let filename = catalog::export_filename(view.category(), view.filters());
        Ok((csv, filename))
    }

    /// Product detail lookup, trying both collections the way the detail
    /// page does (systems first, then parts).
    pub async fn product_detail(&self, id: &str) -> Result<CatalogItem> {
        for category in [Category::System, Category::Part] {
            match self.store.fetch_one(category.collection(), id).await {
                Ok(doc) => return Ok(ingest::map_record(&doc.id, category, &doc.fields)),
                Err(MedstockError::DocumentNotFound { .. }) => continue,
                Err(e) => return Err(e),
            }
        }
        Err(MedstockError::DocumentNotFound {
            collection: "Systems,products".to_string(),
            id: id.to_string(),
        })
    }

    // ========================================
    // Admin mutations
    // ========================================

    /// Create a new item; returns the store-assigned id.
    pub async fn add_item(&self, category: Category, item: &CatalogItem) -> Result<String> {
        let fields = ingest::to_store_fields(category, item);
        self.store.add(category.collection(), fields).await
    }

    /// Update an existing item. Callers update local display state only
    /// after this confirms (see [`CatalogView::apply_update`]).
    pub async fn update_item(&self, category: Category, item: &CatalogItem) -> Result<()> {
        let fields = ingest::to_store_fields(category, item);
        self.store
            .update(category.collection(), &item.id, fields)
            .await
    }

    /// Delete an item by id.
    pub async fn delete_item(&self, category: Category, id: &str) -> Result<()> {
        self.store.delete(category.collection(), id).await
    }

    // ========================================
    // Outbound mail
    // ========================================

    /// Validate and deliver a contact-form submission.
    pub async fn send_contact(&self, message: &ContactMessage) -> Result<()> {
        let email = message.to_email()?;
        self.mailer()?.send(&email).await
    }

    /// Validate and deliver a quote request.
    pub async fn send_quote(&self, quote: &QuoteRequest) -> Result<()> {
        let email = quote.to_email()?;
        self.mailer()?.send(&email).await
    }

    fn mailer(&self) -> Result<&Arc<dyn Mailer>> {
        self.mailer.as_ref().ok_or_else(|| MedstockError::Config {
            message: "no mail endpoint configured".to_string(),
        })
    }
}
