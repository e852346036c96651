pub mod stock;

use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::database::Database;

/// Builds the application router with the full endpoint set.
pub fn router(db: Database) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/dailystock", get(stock::list_stocks).post(stock::create_stock))
        .route("/dailystock/filter", get(stock::filter_stocks))
        .route(
            "/dailystock/:id",
            get(stock::get_stock)
                .put(stock::update_stock)
                .delete(stock::delete_stock),
        )
        .route("/dailystock/stats/summary", get(stock::stock_summary))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(db)
}

/// Service index listing the available endpoints.
async fn index() -> Json<Value> {
    Json(json!({
        "message": "Daily Stock Management API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoints": {
            "health":       { "method": "GET",    "path": "/health" },
            "getAllStocks": { "method": "GET",    "path": "/dailystock" },
            "filterStocks": { "method": "GET",    "path": "/dailystock/filter?category=&location=&status=" },
            "getStockById": { "method": "GET",    "path": "/dailystock/:id" },
            "addStock":     { "method": "POST",   "path": "/dailystock" },
            "updateStock":  { "method": "PUT",    "path": "/dailystock/:id" },
            "deleteStock":  { "method": "DELETE", "path": "/dailystock/:id" },
            "getStats":     { "method": "GET",    "path": "/dailystock/stats/summary" }
        }
    }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "OK", "message": "Server is running" }))
}

async fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "API endpoint not found" })),
    )
}
