//! Route definitions for the Inventory Tracker

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes (mounted under `/api`)
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Purchase orders
        .route("/po-entry", post(handlers::create_po_entry))
        .route("/po-entries", get(handlers::list_po_entries))
        .route("/po-summary", get(handlers::get_po_summary))
        // Stock and history
        .route("/transaction-history", get(handlers::get_transaction_history))
        .route("/live-stock", get(handlers::get_live_stock))
        // Catalog
        .route("/catalog/upload", post(handlers::upload_catalog))
}
