//! Centralized configuration for MedStock.
//!
//! Constants for the catalog engine, network operations, and the admin
//! allow-list live here so the rest of the crate never hardcodes them.

use std::time::Duration;

/// Application-level configuration.
pub struct AppConfig;

impl AppConfig {
    pub const APP_NAME: &'static str = "MedStock";
    /// Fixed recipient for contact-form and quote mail.
    pub const SUPPORT_EMAIL: &'static str = "support@medstock.example.com";
    /// Emails granted admin mode (inline edit/delete, CSV export, add forms).
    pub const ADMIN_EMAILS: &'static [&'static str] = &["support@medstock.example.com"];
}

/// Catalog query engine configuration.
pub struct CatalogConfig;

impl CatalogConfig {
    /// Items per page on the browse views.
    pub const PAGE_SIZE: usize = 20;
    /// Collection holding complete systems.
    pub const SYSTEMS_COLLECTION: &'static str = "Systems";
    /// Collection holding parts. Historical name, kept for data compatibility.
    pub const PARTS_COLLECTION: &'static str = "products";
    /// Collection that committed part searches are appended to.
    pub const SEARCH_LOG_COLLECTION: &'static str = "searchLogs";
    /// An image value is accepted only when it starts with one of these.
    pub const IMAGE_URL_SCHEMES: &'static [&'static str] = &["http://", "https://"];
    /// Separator between multiple image URLs in one source field.
    pub const IMAGE_SEPARATOR: char = ';';
}

/// Network-related configuration.
pub struct NetworkConfig;

impl NetworkConfig {
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
    pub const USER_AGENT: &'static str = "medstock/0.3";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_support_address_is_admin() {
        assert!(AppConfig::ADMIN_EMAILS.contains(&AppConfig::SUPPORT_EMAIL));
    }

    #[test]
    fn test_timeouts_are_reasonable() {
        assert!(NetworkConfig::REQUEST_TIMEOUT > Duration::ZERO);
        assert!(CatalogConfig::PAGE_SIZE > 0);
    }
}
