//! Read-only lesson catalog endpoints.

use axum::extract::{Path, State};
use axum::Json;

use mentora_core::types::Lesson;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/lessons
pub async fn list_lessons(State(state): State<AppState>) -> AppResult<Json<Vec<Lesson>>> {
    Ok(Json(state.graph.list_lessons().await?))
}

/// GET /api/lessons/{id}
pub async fn get_lesson(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Lesson>> {
    Ok(Json(state.graph.get_lesson(&id).await?))
}
