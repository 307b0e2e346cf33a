//! Pure filtering and pagination over an in-memory catalog snapshot.
//!
//! Matching is substring containment after a shared normalization pass, so
//! formatting noise in the historical data ("PALLET ON-SHELF" vs
//! "palletonshelf") never breaks a match.

use crate::catalog::types::{CatalogItem, CatalogPage, FilterState};
use crate::config::CatalogConfig;

/// Normalize a term or field for matching.
///
/// Lowercases, then strips everything that is not an ASCII letter or digit.
///
/// # Examples
///
/// ```
/// use medstock_core::catalog::normalize;
///
/// assert_eq!(normalize("PALLET ON-SHELF"), "palletonshelf");
/// assert_eq!(normalize("123-456"), "123456");
/// ```
pub fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// True when `field`, normalized, contains the normalized `term`.
///
/// An absent field never matches a non-empty term.
fn field_contains(field: Option<&str>, normalized_term: &str) -> bool {
    match field {
        Some(f) => normalize(f).contains(normalized_term),
        None => false,
    }
}

/// Apply all active filters, combined with logical AND.
///
/// Pure and deterministic; blank or whitespace-only terms impose no
/// constraint. The keyword matches description OR part number; the remaining
/// terms each match their own field.
pub fn filter(items: &[CatalogItem], state: &FilterState) -> Vec<CatalogItem> {
    let keyword = normalize(state.keyword.trim());
    let modality = normalize(state.modality.trim());
    let brand = normalize(state.brand.trim());
    let location = normalize(state.location.trim());

    items
        .iter()
        .filter(|item| {
            keyword.is_empty()
                || field_contains(item.description.as_deref(), &keyword)
                || field_contains(item.part_number.as_deref(), &keyword)
        })
        .filter(|item| modality.is_empty() || field_contains(item.modality.as_deref(), &modality))
        .filter(|item| brand.is_empty() || field_contains(item.brand.as_deref(), &brand))
        .filter(|item| location.is_empty() || field_contains(item.location.as_deref(), &location))
        .cloned()
        .collect()
}

/// Slice one page out of a filtered set.
///
/// `total_pages` is `ceil(len / page_size)` (0 for an empty set); the
/// requested page is clamped into `[1, max(1, total_pages)]` first, so a
/// stale page number in the address bar never produces an empty slice.
pub fn paginate(items: &[CatalogItem], page: usize, page_size: usize) -> CatalogPage {
    let match_count = items.len();
    let total_pages = match_count.div_ceil(page_size);
    let page = page.clamp(1, total_pages.max(1));
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(match_count);
    let items = if start < match_count {
        items[start..end].to_vec()
    } else {
        Vec::new()
    };
    CatalogPage {
        items,
        page,
        total_pages,
        match_count,
    }
}

/// Filter then paginate with the configured page size.
pub fn query(items: &[CatalogItem], state: &FilterState) -> CatalogPage {
    let filtered = filter(items, state);
    paginate(&filtered, state.page, CatalogConfig::PAGE_SIZE)
}
