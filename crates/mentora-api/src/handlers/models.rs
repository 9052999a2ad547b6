//! Read-only AI-model catalog endpoints.

use axum::extract::{Path, State};
use axum::Json;

use mentora_core::types::AiModel;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/models
pub async fn list_models(State(state): State<AppState>) -> AppResult<Json<Vec<AiModel>>> {
    Ok(Json(state.graph.list_models().await?))
}

/// GET /api/models/{id}
pub async fn get_model(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<AiModel>> {
    Ok(Json(state.graph.get_model(&id).await?))
}
