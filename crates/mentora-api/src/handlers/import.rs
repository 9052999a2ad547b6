//! Handler for the bulk import endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use mentora_graph::{ImportDocument, ImportSummary};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub message: String,
    pub summary: ImportSummary,
}

/// POST /api/import-data
///
/// Merge an export-shaped document into the graph, upserting each entity by
/// id. Properties only: relationships are not reconstructed here.
pub async fn import_data(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(doc): Json<ImportDocument>,
) -> AppResult<Json<ImportResponse>> {
    let summary = state.graph.import_document(&doc).await?;

    tracing::info!(
        user_id = %auth.user_id,
        lessons = summary.lessons,
        models = summary.models,
        tutorials = summary.tutorials,
        prompts = summary.prompts,
        users = summary.users,
        "Bulk import complete"
    );

    Ok(Json(ImportResponse {
        message: "Data imported successfully".to_string(),
        summary,
    }))
}
