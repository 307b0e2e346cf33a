//! Per-session catalog view state machine.
//!
//! `Idle -> Loading -> Loaded`, with all filtering and pagination synchronous
//! over the loaded snapshot. A fetch failure lands in `Loaded` with an empty
//! snapshot (the user sees "no products found") but the view remembers that
//! the load failed so callers that want to distinguish the two cases can.
//!
//! Loads carry a generation token: when navigation outruns an outstanding
//! fetch, the stale response is discarded instead of overwriting newer data.

use crate::catalog::ingest::map_record;
use crate::catalog::query;
use crate::catalog::types::{CatalogItem, CatalogPage, Category, FilterState};
use crate::catalog::urlstate;
use crate::error::Result;
use crate::search_log::SearchRecord;
use crate::store::StoredDocument;
use tracing::{debug, error};

/// Load lifecycle for one category page visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
}

/// Outcome of committing the keyword input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordCommit {
    /// Query string to push to the address bar.
    pub query: String,
    /// Search record to append, when this commit should be logged.
    pub log: Option<SearchRecord>,
}

/// One browsing session over one category.
pub struct CatalogView {
    category: Category,
    state: LoadState,
    items: Vec<CatalogItem>,
    load_failed: bool,
    filters: FilterState,
    /// Live keyword input, held apart from the committed `filters.keyword`.
    keyword_input: String,
    /// Generation of the most recent load request.
    generation: u64,
    /// Last term written to the search log this session.
    last_logged_term: Option<String>,
}

impl CatalogView {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            state: LoadState::Idle,
            items: Vec::new(),
            load_failed: false,
            filters: FilterState::default(),
            keyword_input: String::new(),
            generation: 0,
            last_logged_term: None,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// True when the most recent load ended in a collaborator error.
    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn keyword_input(&self) -> &str {
        &self.keyword_input
    }

    // ========================================
    // Loading
    // ========================================

    /// Start a load; returns the generation token the response must carry.
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.state = LoadState::Loading;
        self.generation
    }

    /// Complete a load started with [`Self::begin_load`].
    ///
    /// A response from a superseded generation is dropped. A failed fetch
    /// yields an empty snapshot, not an error state; no retry is attempted.
    pub fn complete_load(&mut self, generation: u64, result: Result<Vec<StoredDocument>>) {
        if generation != self.generation {
            debug!(
                "Discarding stale load response (generation {} < {})",
                generation, self.generation
            );
            return;
        }
        match result {
            Ok(docs) => {
                self.items = docs
                    .iter()
                    .map(|doc| map_record(&doc.id, self.category, &doc.fields))
                    .collect();
                self.load_failed = false;
                debug!("Loaded {} {} items", self.items.len(), self.category);
            }
            Err(e) => {
                error!("Error fetching {} catalog: {}", self.category, e);
                self.items = Vec::new();
                self.load_failed = true;
            }
        }
        self.state = LoadState::Loaded;
    }

    // ========================================
    // Filter/page state, mirrored to the address
    // ========================================

    /// Replay state from the address on navigation (including back/forward).
    pub fn apply_query(&mut self, query: &str) {
        self.filters = urlstate::decode(query);
        self.keyword_input = self.filters.keyword.clone();
    }

    /// Dropdown-style filters commit immediately and reset the page.
    pub fn set_modality(&mut self, value: impl Into<String>) -> String {
        self.filters.modality = value.into();
        self.filters.page = 1;
        urlstate::encode(&self.filters)
    }

    pub fn set_brand(&mut self, value: impl Into<String>) -> String {
        self.filters.brand = value.into();
        self.filters.page = 1;
        urlstate::encode(&self.filters)
    }

    pub fn set_location(&mut self, value: impl Into<String>) -> String {
        self.filters.location = value.into();
        self.filters.page = 1;
        urlstate::encode(&self.filters)
    }

    /// Update the live keyword buffer without committing it.
    pub fn set_keyword_input(&mut self, value: impl Into<String>) {
        self.keyword_input = value.into();
    }

    /// Commit the live keyword (blur/Enter), resetting the page.
    ///
    /// A committed part search that changed since the last logged term
    /// produces a [`SearchRecord`]; re-commits of the same term do not.
    pub fn commit_keyword(&mut self) -> KeywordCommit {
        self.filters.keyword = self.keyword_input.clone();
        self.filters.page = 1;
        let query = urlstate::encode(&self.filters);

        let term = self.filters.keyword.trim().to_string();
        let log = if self.category == Category::Part
            && !term.is_empty()
            && self.last_logged_term.as_deref() != Some(term.as_str())
        {
            let match_count = query::filter(&self.items, &self.filters).len();
            self.last_logged_term = Some(term.clone());
            Some(SearchRecord::new(term, match_count))
        } else {
            None
        };

        KeywordCommit { query, log }
    }

    /// Page-only navigation; other filters stay untouched.
    pub fn set_page(&mut self, page: usize) -> String {
        self.filters.page = page.max(1);
        urlstate::encode(&self.filters)
    }

    // ========================================
    // Derived views
    // ========================================

    /// The whole filtered set, for export.
    pub fn filtered(&self) -> Vec<CatalogItem> {
        query::filter(&self.items, &self.filters)
    }

    /// The visible page slice, recomputed (and re-clamped) on every call.
    pub fn current_page(&self) -> CatalogPage {
        query::query(&self.items, &self.filters)
    }

    // ========================================
    // Local mutations after confirmed admin writes
    // ========================================

    /// Reflect a confirmed update in the loaded snapshot.
    pub fn apply_update(&mut self, item: CatalogItem) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            *existing = item;
        }
    }

    /// Reflect a confirmed delete in the loaded snapshot.
    pub fn apply_delete(&mut self, id: &str) {
        self.items.retain(|i| i.id != id);
    }
}
