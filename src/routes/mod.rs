use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::AppState;

pub mod insights;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "CSV insights backend is running" }))
}

async fn health_check() -> &'static str {
    "OK"
}
