//! Raw record ingestion and field-name coalescing.
//!
//! The upstream data carries years of naming drift (`MODALITY` vs `MODELITY`,
//! `IMAGE` vs `IMAGES`, `COMMENT` vs `COMMENTS`). Each canonical field owns an
//! explicit alias list here, first present value wins, and the reverse mapping
//! used for admin writes targets the spelling each collection historically
//! uses.

use crate::config::CatalogConfig;
use crate::catalog::types::{CatalogItem, Category};
use serde_json::{Map, Value};

/// Alias lists for each canonical field, in precedence order.
const MODALITY_ALIASES: &[&str] = &["MODALITY", "MODELITY"];
const BRAND_ALIASES: &[&str] = &["MANUFACTURER", "BRAND"];
const DESCRIPTION_ALIASES: &[&str] = &["DESCRIPTION"];
const PART_NUMBER_ALIASES: &[&str] = &["PART NUMBER", "PART_NUMBER", "PART NO", "PARTNUMBER"];
const IMAGE_ALIASES: &[&str] = &["IMAGES", "IMAGE"];
const LOCATION_ALIASES: &[&str] = &["LOCATION"];
const PRICE_ALIASES: &[&str] = &["PRICE"];
const COMMENT_ALIASES: &[&str] = &["COMMENT", "COMMENTS"];

/// Raw field map as returned by the document store.
pub type RawFields = Map<String, Value>;

/// Map one raw store record into the canonical item shape.
pub fn map_record(id: &str, category: Category, fields: &RawFields) -> CatalogItem {
    let mut item = CatalogItem::new(id, category);
    item.modality = coalesce(fields, MODALITY_ALIASES);
    item.brand = coalesce(fields, BRAND_ALIASES);
    item.description = coalesce(fields, DESCRIPTION_ALIASES);
    item.part_number = coalesce(fields, PART_NUMBER_ALIASES);
    item.images = parse_images(coalesce(fields, IMAGE_ALIASES).as_deref());
    item.location = coalesce(fields, LOCATION_ALIASES);
    item.price = coalesce(fields, PRICE_ALIASES);
    item.comments = coalesce(fields, COMMENT_ALIASES).filter(|c| !looks_like_url(c));
    item
}

/// First non-empty string value among the aliases, in precedence order.
fn coalesce(fields: &RawFields, aliases: &[&str]) -> Option<String> {
    for alias in aliases {
        if let Some(value) = fields.get(*alias) {
            if let Some(text) = value_to_text(value) {
                return Some(text);
            }
        }
    }
    None
}

/// Coerce a store value to text. Numbers are accepted (prices in particular
/// appear both quoted and unquoted in the historical data).
fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Split a semicolon-joined image field into an ordered URL list.
///
/// The whole field is rejected when it does not start with a recognized URL
/// scheme; the item is then treated as imageless.
pub fn parse_images(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    if !has_url_scheme(raw) {
        return Vec::new();
    }
    raw.split(CatalogConfig::IMAGE_SEPARATOR)
        .map(str::trim)
        .filter(|part| has_url_scheme(part))
        .map(String::from)
        .collect()
}

fn has_url_scheme(s: &str) -> bool {
    CatalogConfig::IMAGE_URL_SCHEMES
        .iter()
        .any(|scheme| s.starts_with(scheme))
}

/// A comment value that is itself a URL is a historic data error; treat it as
/// "no comment".
fn looks_like_url(s: &str) -> bool {
    has_url_scheme(s.trim())
}

/// Translate canonical fields back to the historical spelling a collection
/// expects, for admin create/update writes.
pub fn to_store_fields(category: Category, item: &CatalogItem) -> RawFields {
    let mut fields = RawFields::new();
    let mut put = |key: &str, value: &Option<String>| {
        if let Some(v) = value {
            fields.insert(key.to_string(), Value::String(v.clone()));
        }
    };
    match category {
        Category::System => {
            put("MODALITY", &item.modality);
            put("MANUFACTURER", &item.brand);
            put("DESCRIPTION", &item.description);
            put("COMMENT", &item.comments);
            if !item.images.is_empty() {
                fields.insert(
                    "IMAGES".to_string(),
                    Value::String(item.images.join(&CatalogConfig::IMAGE_SEPARATOR.to_string())),
                );
            }
        }
        Category::Part => {
            put("MODELITY", &item.modality);
            put("BRAND", &item.brand);
            put("DESCRIPTION", &item.description);
            put("PART NUMBER", &item.part_number);
            put("LOCATION", &item.location);
            put("PRICE", &item.price);
            put("COMMENTS", &item.comments);
            if !item.images.is_empty() {
                fields.insert(
                    "IMAGE".to_string(),
                    Value::String(item.images.join(&CatalogConfig::IMAGE_SEPARATOR.to_string())),
                );
            }
        }
    }
    fields
}
