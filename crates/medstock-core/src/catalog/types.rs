//! Catalog types and data structures.
//!
//! `CatalogItem` is the canonical projection every raw store record is mapped
//! into; the historical field-name drift in the upstream data is resolved at
//! ingest (see [`super::ingest`]) and never leaks past this module.

use crate::config::CatalogConfig;
use crate::error::{MedstockError, Result};
use serde::{Deserialize, Serialize};

/// Top-level catalog partition.
///
/// An item belongs to exactly one category for its lifetime; the category is
/// derived from the collection the record was read from and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Complete equipment ("Systems" collection).
    System,
    /// Components ("products" collection).
    Part,
}

impl Category {
    /// Return the canonical lowercase string for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::System => "system",
            Category::Part => "part",
        }
    }

    /// Name of the store collection backing this category.
    pub fn collection(&self) -> &'static str {
        match self {
            Category::System => CatalogConfig::SYSTEMS_COLLECTION,
            Category::Part => CatalogConfig::PARTS_COLLECTION,
        }
    }

    /// Parse a category from a route segment.
    ///
    /// Accepts the page-path spellings ("Systems", "Parts") as well as the
    /// canonical singular forms.
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "system" | "systems" => Ok(Category::System),
            "part" | "parts" => Ok(Category::Part),
            other => Err(MedstockError::UnknownCategory(other.to_string())),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Canonical, read-only projection of one external store record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Opaque stable identifier assigned by the external store.
    pub id: String,
    /// Which collection the record came from.
    pub category: Category,
    /// Free-text classification, e.g. "MRI", "CT".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modality: Option<String>,
    /// Manufacturer name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Title/summary; primary search target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Secondary search target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_number: Option<String>,
    /// Ordered image URLs; empty when the record had none (or an invalid one).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    /// Warehouse location; admin-only visible.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Free-text price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Internal note; admin-only visible.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

impl CatalogItem {
    /// Empty item shell for a given id/category; ingest fills in the rest.
    pub fn new(id: impl Into<String>, category: Category) -> Self {
        Self {
            id: id.into(),
            category,
            modality: None,
            brand: None,
            description: None,
            part_number: None,
            images: Vec::new(),
            location: None,
            price: None,
            comments: None,
        }
    }

    /// First image URL, if any.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Active search/filter/page values for one catalog view.
///
/// The shareable page address is the sole persisted representation of this
/// state; see [`super::urlstate`] for the encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Committed keyword, matched against description and part number.
    #[serde(default)]
    pub keyword: String,
    #[serde(default)]
    pub modality: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub location: String,
    /// 1-based page number, clamped against the filtered result.
    #[serde(default = "default_page")]
    pub page: usize,
}

fn default_page() -> usize {
    1
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            keyword: String::new(),
            modality: String::new(),
            brand: String::new(),
            location: String::new(),
            page: 1,
        }
    }
}

impl FilterState {
    /// True when no filter term is active (page is ignored).
    pub fn is_unfiltered(&self) -> bool {
        self.keyword.trim().is_empty()
            && self.modality.trim().is_empty()
            && self.brand.trim().is_empty()
            && self.location.trim().is_empty()
    }
}

/// One visible page of a filtered catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogPage {
    pub items: Vec<CatalogItem>,
    /// Effective page after clamping.
    pub page: usize,
    pub total_pages: usize,
    /// Size of the whole filtered set, not just this slice.
    pub match_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_route_spellings() {
        assert_eq!(Category::parse("Systems").unwrap(), Category::System);
        assert_eq!(Category::parse("Parts").unwrap(), Category::Part);
        assert_eq!(Category::parse("part").unwrap(), Category::Part);
        assert!(Category::parse("gadgets").is_err());
    }

    #[test]
    fn test_category_collections() {
        assert_eq!(Category::System.collection(), "Systems");
        assert_eq!(Category::Part.collection(), "products");
    }

    #[test]
    fn test_filter_state_default_is_unfiltered() {
        let state = FilterState::default();
        assert!(state.is_unfiltered());
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_whitespace_terms_count_as_unfiltered() {
        let state = FilterState {
            keyword: "   ".into(),
            ..FilterState::default()
        };
        assert!(state.is_unfiltered());
    }
}
