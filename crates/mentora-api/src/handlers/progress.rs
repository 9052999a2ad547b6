//! Handlers for per-user lesson progress.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Progress payload the frontend consumes. Badges and streaks are part of
/// the client contract but have no backing logic yet, so they are fixed
/// defaults.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub completed_lessons: Vec<String>,
    pub quiz_scores: HashMap<String, f64>,
    pub badges: Vec<String>,
    pub current_streak: u32,
    pub longest_streak: u32,
}

#[derive(Debug, Deserialize)]
pub struct RecordCompletionRequest {
    pub score: f64,
}

/// GET /api/progress
pub async fn get_progress(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<UserProgress>> {
    let summary = state.graph.get_progress(&auth.user_id).await?;

    Ok(Json(UserProgress {
        completed_lessons: summary.completed_lesson_ids,
        quiz_scores: summary.scores,
        badges: Vec::new(),
        current_streak: 0,
        longest_streak: 0,
    }))
}

/// POST /api/progress/lesson/{lesson_id}
///
/// Record (or update) the completion of a lesson with a quiz score.
pub async fn record_completion(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(lesson_id): Path<String>,
    Json(input): Json<RecordCompletionRequest>,
) -> AppResult<Json<MessageResponse>> {
    if !input.score.is_finite() {
        return Err(AppError::Validation("A numeric score is required".into()));
    }

    state
        .graph
        .record_completion(&auth.user_id, &lesson_id, input.score)
        .await?;

    tracing::info!(user_id = %auth.user_id, lesson_id = %lesson_id, "Lesson completion recorded");

    Ok(Json(MessageResponse::new("Lesson progress saved.")))
}
