//! Handlers for per-lesson notes.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SaveNoteRequest {
    pub content: Value,
}

/// GET /api/notes/{lesson_id}
///
/// Fetch the user's note for a lesson. A lesson with no note returns `{}`.
pub async fn get_note(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(lesson_id): Path<String>,
) -> AppResult<Json<Value>> {
    Ok(Json(state.graph.get_note(&auth.user_id, &lesson_id).await?))
}

/// POST /api/notes/{lesson_id}
///
/// Upsert the user's note for a lesson.
pub async fn put_note(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(lesson_id): Path<String>,
    Json(input): Json<SaveNoteRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .graph
        .put_note(&auth.user_id, &lesson_id, &input.content)
        .await?;

    Ok(Json(MessageResponse::new("Notes saved.")))
}
