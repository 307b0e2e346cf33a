//! CSV export of a filtered catalog.
//!
//! Exports the whole filtered set, not just the visible page. Every field is
//! quoted, embedded quotes are doubled, and an empty input is rejected before
//! any output is produced.

use crate::catalog::types::{CatalogItem, Category, FilterState};
use crate::error::{MedstockError, Result};

/// Fixed, ordered column list for the export.
const HEADER: &[&str] = &[
    "id",
    "brand",
    "modality",
    "part_number",
    "description",
    "location",
    "price",
    "image",
];

/// Build the CSV text for a filtered item set.
///
/// Returns [`MedstockError::ExportEmpty`] when there is nothing to export.
pub fn export_csv(items: &[CatalogItem]) -> Result<String> {
    if items.is_empty() {
        return Err(MedstockError::ExportEmpty);
    }

    let mut lines = Vec::with_capacity(items.len() + 1);
    lines.push(csv_row(HEADER.iter().copied()));
    for item in items {
        lines.push(csv_row(
            [
                item.id.as_str(),
                item.brand.as_deref().unwrap_or(""),
                item.modality.as_deref().unwrap_or(""),
                item.part_number.as_deref().unwrap_or(""),
                item.description.as_deref().unwrap_or(""),
                item.location.as_deref().unwrap_or(""),
                item.price.as_deref().unwrap_or(""),
                item.primary_image().unwrap_or(""),
            ]
            .into_iter(),
        ));
    }
    Ok(lines.join("\n"))
}

/// Quote every field and double embedded quotes.
fn csv_row<'a>(fields: impl Iterator<Item = &'a str>) -> String {
    fields
        .map(|f| format!("\"{}\"", f.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(",")
}

/// Filename for a download, reflecting the active filter.
///
/// `..._search_<term>.csv` for a keyword search, `..._<brand>.csv` for a
/// brand filter, a generic full-export name otherwise.
pub fn export_filename(category: Category, state: &FilterState) -> String {
    let prefix = match category {
        Category::System => "medstock_systems",
        Category::Part => "medstock_parts",
    };
    let keyword = state.keyword.trim();
    let brand = state.brand.trim();
    if !keyword.is_empty() {
        format!("{}_search_{}.csv", prefix, filename_fragment(keyword))
    } else if !brand.is_empty() {
        format!("{}_{}.csv", prefix, filename_fragment(brand))
    } else {
        format!("{}_full_export.csv", prefix)
    }
}

/// Keep filter terms filename-safe.
fn filename_fragment(term: &str) -> String {
    term.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, description: &str) -> CatalogItem {
        let mut item = CatalogItem::new(id, Category::Part);
        item.description = Some(description.to_string());
        item
    }

    #[test]
    fn test_empty_export_is_rejected() {
        assert!(matches!(export_csv(&[]), Err(MedstockError::ExportEmpty)));
    }

    #[test]
    fn test_embedded_quote_is_doubled() {
        let items = vec![
            item("a", "Coil"),
            item("b", "12\" Monitor"),
            item("c", "Cable"),
        ];
        let csv = export_csv(&items).unwrap();
        let lines: Vec<&str> = csv.split('\n').collect();
        assert_eq!(lines.len(), 4); // header + 3 rows
        assert!(lines[2].contains("\"12\"\" Monitor\""));
    }

    #[test]
    fn test_header_order_is_fixed() {
        let csv = export_csv(&[item("a", "Coil")]).unwrap();
        let header = csv.split('\n').next().unwrap();
        assert_eq!(
            header,
            "\"id\",\"brand\",\"modality\",\"part_number\",\"description\",\"location\",\"price\",\"image\""
        );
    }

    #[test]
    fn test_absent_fields_export_as_empty_strings() {
        let csv = export_csv(&[item("a", "Coil")]).unwrap();
        let row = csv.split('\n').nth(1).unwrap();
        assert_eq!(row, "\"a\",\"\",\"\",\"\",\"Coil\",\"\",\"\",\"\"");
    }

    #[test]
    fn test_filename_reflects_active_filter() {
        let mut state = FilterState::default();
        assert_eq!(
            export_filename(Category::Part, &state),
            "medstock_parts_full_export.csv"
        );
        state.brand = "GE Healthcare".into();
        assert_eq!(
            export_filename(Category::Part, &state),
            "medstock_parts_ge_healthcare.csv"
        );
        state.keyword = "Head Coil".into();
        assert_eq!(
            export_filename(Category::Part, &state),
            "medstock_parts_search_head_coil.csv"
        );
    }
}
