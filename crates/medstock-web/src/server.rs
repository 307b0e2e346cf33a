//! HTTP server implementation using Axum.

use crate::handlers;
use axum::{
    routing::{get, patch, post},
    Router,
};
use medstock_core::MedstockApi;
use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Application state shared across handlers.
pub struct AppState {
    /// Core API (catalog engine, store, mail)
    pub api: MedstockApi,
    /// Search terms already written to the search log, keyed by category and
    /// normalized term. Browse requests are stateless, so the dedup memory
    /// lives here instead of in a per-request view.
    logged_terms: Mutex<HashSet<String>>,
}

impl AppState {
    /// Cleared wholesale once the term memory reaches this size.
    const LOGGED_TERMS_CAP: usize = 1024;

    /// True the first time a term key is seen; repeats return false.
    pub async fn first_search_for(&self, key: String) -> bool {
        let mut terms = self.logged_terms.lock().await;
        if terms.len() >= Self::LOGGED_TERMS_CAP {
            terms.clear();
        }
        terms.insert(key)
    }
}

/// Build the router for the storefront API.
pub fn build_router(api: MedstockApi) -> Router {
    let state = Arc::new(AppState {
        api,
        logged_terms: Mutex::new(HashSet::new()),
    });

    // Configure CORS for the browser front-end
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::handle_health))
        .route("/api/products/:category", get(handlers::handle_browse))
        .route(
            "/api/products/:category/export",
            get(handlers::handle_export),
        )
        .route("/api/product/:id", get(handlers::handle_product_detail))
        .route("/api/contact", post(handlers::handle_contact))
        .route("/api/quote", post(handlers::handle_quote))
        .route("/api/admin/:category", post(handlers::handle_add_item))
        .route(
            "/api/admin/:category/:id",
            patch(handlers::handle_update_item).delete(handlers::handle_delete_item),
        )
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server.
///
/// Returns the actual address the server is bound to (useful when port=0).
pub async fn start_server(api: MedstockApi, host: &str, port: u16) -> anyhow::Result<SocketAddr> {
    let app = build_router(api);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let actual_addr = listener.local_addr()?;

    info!("Server listening on {}", actual_addr);

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server error");
    });

    Ok(actual_addr)
}
