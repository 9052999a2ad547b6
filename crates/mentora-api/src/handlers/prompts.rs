//! Handlers for a user's saved prompts.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use mentora_core::types::{PromptInput, SavedPrompt};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/prompts
///
/// List the authenticated user's prompts, most recent first.
pub async fn list_prompts(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<SavedPrompt>>> {
    Ok(Json(state.graph.list_prompts(&auth.user_id).await?))
}

/// POST /api/prompts
///
/// Save a prompt, upserting by id. Re-saving an existing prompt updates it
/// in place.
pub async fn save_prompt(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<PromptInput>,
) -> AppResult<Json<SavedPrompt>> {
    if input.name.trim().is_empty() {
        return Err(AppError::Validation("Prompt name is required".into()));
    }

    let saved = state.graph.save_prompt(&auth.user_id, &input).await?;

    tracing::info!(user_id = %auth.user_id, prompt_id = %saved.id, "Prompt saved");

    Ok(Json(saved))
}

/// DELETE /api/prompts/{id}
///
/// Delete a prompt owned by the authenticated user. Another user's prompt
/// with the same id is invisible here, so this cannot cross owners.
pub async fn delete_prompt(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let deleted = state.graph.delete_prompt(&auth.user_id, &id).await?;
    if !deleted {
        return Err(AppError::NotFound {
            entity: "Prompt",
            id,
        });
    }

    tracing::info!(user_id = %auth.user_id, prompt_id = %id, "Prompt deleted");

    Ok(StatusCode::NO_CONTENT)
}
