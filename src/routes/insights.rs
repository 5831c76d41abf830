use axum::{
    extract::{Multipart, State},
    http::Method,
    routing::post,
    Json, Router,
};
use bytes::Bytes;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::InsightSuggestion,
    services::{csv_analyzer, llm_client::LlmClient, prompt_builder},
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/api/generate-insights", post(generate_insights))
        .layer(cors)
}

#[derive(Debug, Serialize)]
pub struct InsightResponse {
    suggestions: Vec<InsightSuggestion>,
}

/// Uploaded bytes written under a unique name in the upload directory.
/// The file is removed when the guard drops, on every exit path.
struct TempUpload {
    path: PathBuf,
}

impl TempUpload {
    async fn write(dir: &Path, extension: &str, data: Bytes) -> Result<Self, AppError> {
        let path = dir.join(format!("{}.{}", Uuid::new_v4(), extension));
        tokio::fs::write(&path, &data).await?;
        Ok(Self { path })
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempUpload {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            tracing::warn!("Failed to remove temp upload {:?}: {}", self.path, e);
        }
    }
}

#[axum::debug_handler]
async fn generate_insights(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<InsightResponse>, AppError> {
    let start = std::time::Instant::now();

    let mut upload: Option<(String, Bytes)> = None;
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::InvalidInput(format!("Invalid multipart payload: {}", e))
    })? {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let data = field.bytes().await.map_err(|e| {
            AppError::InvalidInput(format!("Failed to read uploaded file: {}", e))
        })?;
        upload = Some((file_name, data));
        break;
    }

    let (file_name, data) =
        upload.ok_or_else(|| AppError::InvalidInput("No file provided".to_string()))?;

    let extension = Path::new(&file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .ok_or_else(|| AppError::InvalidInput("Invalid file: missing extension".to_string()))?;

    if extension != "csv" {
        tracing::error!("Unsupported file type: {}", extension);
        return Err(AppError::InvalidInput("Only CSV files are supported".to_string()));
    }

    tracing::info!("Received upload {} ({}KB)", file_name, data.len() / 1024);

    let temp = TempUpload::write(&state.config.upload_dir, &extension, data).await?;

    let summary = csv_analyzer::analyze_csv(temp.path())?;
    tracing::info!(
        "CSV summarized: {} rows, {} columns",
        summary.num_rows,
        summary.num_columns
    );

    let prompt = prompt_builder::build_insight_prompt(&summary);

    let llm = LlmClient::new(&state.config.openai_key, &state.config.model);
    let suggestions = llm.generate_suggestions(&prompt).await?;
    tracing::info!(
        "LLM returned {} suggestions in {:?}",
        suggestions.len(),
        start.elapsed()
    );

    Ok(Json(InsightResponse { suggestions }))
}
