//! Read-only tutorial catalog endpoints.

use axum::extract::{Path, State};
use axum::Json;

use mentora_core::types::Tutorial;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/tutorials
pub async fn list_tutorials(State(state): State<AppState>) -> AppResult<Json<Vec<Tutorial>>> {
    Ok(Json(state.graph.list_tutorials().await?))
}

/// GET /api/tutorials/{id}
pub async fn get_tutorial(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Tutorial>> {
    Ok(Json(state.graph.get_tutorial(&id).await?))
}
