//! Request handlers for the storefront API.
//!
//! Each handler is a direct pass-through to `medstock-core`: decode the
//! address-bar state, run the engine, map engine errors onto HTTP statuses.

use crate::server::AppState;
use axum::{
    extract::{Path, RawQuery, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use medstock_core::catalog::normalize;
use medstock_core::{CatalogItem, Category, ContactMessage, MedstockError, QuoteRequest};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// Map an engine error onto an HTTP status.
fn status_for(err: &MedstockError) -> StatusCode {
    match err {
        MedstockError::Validation { .. } => StatusCode::BAD_REQUEST,
        MedstockError::NotAdmin => StatusCode::FORBIDDEN,
        MedstockError::UnknownCategory(_) | MedstockError::DocumentNotFound { .. } => {
            StatusCode::NOT_FOUND
        }
        MedstockError::ExportEmpty => StatusCode::UNPROCESSABLE_ENTITY,
        MedstockError::Network { .. }
        | MedstockError::Timeout(_)
        | MedstockError::Store { .. }
        | MedstockError::Mail { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(err: MedstockError) -> Response {
    let status = status_for(&err);
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}

/// Admin gating: the caller's identity arrives in `X-Admin-Email` and must be
/// on the allow-list. (Token verification belongs to the identity provider,
/// which is out of scope.)
fn ensure_admin(headers: &HeaderMap) -> Result<(), MedstockError> {
    let email = headers
        .get("x-admin-email")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if medstock_core::config::AppConfig::ADMIN_EMAILS.contains(&email) {
        Ok(())
    } else {
        Err(MedstockError::NotAdmin)
    }
}

/// Health check endpoint.
pub async fn handle_health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

/// Browse response: one visible page plus the whole-set counters.
#[derive(Debug, Serialize)]
struct BrowsePage {
    items: Vec<CatalogItem>,
    page: usize,
    total_pages: usize,
    match_count: usize,
    /// True when the snapshot fetch failed and the empty set is not real data.
    load_failed: bool,
}

/// `GET /api/products/{category}?search&modality&brand&location&page`
pub async fn handle_browse(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
    RawQuery(query): RawQuery,
) -> Response {
    let category = match Category::parse(&category) {
        Ok(c) => c,
        Err(e) => return error_response(e),
    };
    let query = query.unwrap_or_default();
    debug!("Browse {} with query {:?}", category, query);

    let mut view = state.api.open_view(category);
    state.api.load(&mut view).await;
    view.apply_query(&query);

    // A request carrying a fresh keyword is a committed search; run it
    // through the commit path so part searches reach the search log. The
    // shared term memory keeps refreshes and history replays of the same
    // search from appending duplicate records.
    if !view.filters().keyword.trim().is_empty() && view.filters().page <= 1 {
        let key = format!(
            "{}:{}",
            category.as_str(),
            normalize(&view.filters().keyword)
        );
        if state.first_search_for(key).await {
            view.set_keyword_input(view.filters().keyword.clone());
            state.api.commit_keyword(&mut view);
        }
    }

    let page = view.current_page();
    Json(BrowsePage {
        items: page.items,
        page: page.page,
        total_pages: page.total_pages,
        match_count: page.match_count,
        load_failed: view.load_failed(),
    })
    .into_response()
}

/// `GET /api/products/{category}/export`: CSV of the whole filtered set.
pub async fn handle_export(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    if let Err(e) = ensure_admin(&headers) {
        return error_response(e);
    }
    let category = match Category::parse(&category) {
        Ok(c) => c,
        Err(e) => return error_response(e),
    };

    let mut view = state.api.open_view(category);
    state.api.load(&mut view).await;
    view.apply_query(&query.unwrap_or_default());

    match state.api.export_csv(&view) {
        Ok((csv, filename)) => (
            [
                (header::CONTENT_TYPE, "text/csv".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", filename),
                ),
            ],
            csv,
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// `GET /api/product/{id}`: detail lookup across both collections.
pub async fn handle_product_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    match state.api.product_detail(&id).await {
        Ok(item) => Json(item).into_response(),
        Err(e) => error_response(e),
    }
}

/// `POST /api/contact`
pub async fn handle_contact(
    State(state): State<Arc<AppState>>,
    Json(message): Json<ContactMessage>,
) -> Response {
    match state.api.send_contact(&message).await {
        Ok(()) => Json(json!({"message": "Email sent successfully!"})).into_response(),
        Err(e) => error_response(e),
    }
}

/// `POST /api/quote`
pub async fn handle_quote(
    State(state): State<Arc<AppState>>,
    Json(quote): Json<QuoteRequest>,
) -> Response {
    match state.api.send_quote(&quote).await {
        Ok(()) => Json(json!({"message": "Email sent successfully!"})).into_response(),
        Err(e) => error_response(e),
    }
}

/// Item fields as submitted by the admin forms.
#[derive(Debug, Default, Deserialize)]
pub struct ItemPayload {
    #[serde(default)]
    modality: Option<String>,
    #[serde(default)]
    brand: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    part_number: Option<String>,
    #[serde(default)]
    images: Vec<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    price: Option<String>,
    #[serde(default)]
    comments: Option<String>,
}

impl ItemPayload {
    fn into_item(self, id: impl Into<String>, category: Category) -> CatalogItem {
        let mut item = CatalogItem::new(id, category);
        item.modality = self.modality;
        item.brand = self.brand;
        item.description = self.description;
        item.part_number = self.part_number;
        item.images = self.images;
        item.location = self.location;
        item.price = self.price;
        item.comments = self.comments;
        item
    }
}

/// `POST /api/admin/{category}`: create a new item.
pub async fn handle_add_item(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<ItemPayload>,
) -> Response {
    if let Err(e) = ensure_admin(&headers) {
        return error_response(e);
    }
    let category = match Category::parse(&category) {
        Ok(c) => c,
        Err(e) => return error_response(e),
    };
    let item = payload.into_item("", category);
    match state.api.add_item(category, &item).await {
        Ok(id) => (StatusCode::CREATED, Json(json!({ "id": id }))).into_response(),
        Err(e) => error_response(e),
    }
}

/// `PATCH /api/admin/{category}/{id}`: update an existing item.
pub async fn handle_update_item(
    State(state): State<Arc<AppState>>,
    Path((category, id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(payload): Json<ItemPayload>,
) -> Response {
    if let Err(e) = ensure_admin(&headers) {
        return error_response(e);
    }
    let category = match Category::parse(&category) {
        Ok(c) => c,
        Err(e) => return error_response(e),
    };
    let item = payload.into_item(id, category);
    match state.api.update_item(category, &item).await {
        Ok(()) => Json(item).into_response(),
        Err(e) => error_response(e),
    }
}

/// `DELETE /api/admin/{category}/{id}`
pub async fn handle_delete_item(
    State(state): State<Arc<AppState>>,
    Path((category, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    if let Err(e) = ensure_admin(&headers) {
        return error_response(e);
    }
    let category = match Category::parse(&category) {
        Ok(c) => c,
        Err(e) => return error_response(e),
    };
    match state.api.delete_item(category, &id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}
