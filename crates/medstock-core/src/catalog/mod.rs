//! Catalog query engine.
//!
//! Load a whole-collection snapshot, coalesce historical field names into the
//! canonical item shape, then filter/paginate client-side and mirror the
//! filter state to the page address.

pub mod export;
pub mod ingest;
pub mod query;
pub mod types;
pub mod urlstate;
pub mod view;

pub use export::{export_csv, export_filename};
pub use ingest::{map_record, to_store_fields, RawFields};
pub use query::{filter, normalize, paginate};
pub use types::{CatalogItem, CatalogPage, Category, FilterState};
pub use view::{CatalogView, KeywordCommit, LoadState};
