//! Pass-through proxy to the Google generative-language API.
//!
//! The backend holds the API key; clients send a prompt and optionally a
//! model name, and the upstream response (or error payload) is relayed
//! verbatim.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const GENERATE_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    #[serde(default)]
    pub model: Option<String>,
}

/// POST /api/gemini
pub async fn generate(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<GenerateRequest>,
) -> AppResult<Json<Value>> {
    if input.prompt.trim().is_empty() {
        return Err(AppError::Validation("Prompt is required.".into()));
    }

    let api_key = state
        .config
        .gemini_api_key
        .as_deref()
        .ok_or_else(|| AppError::Internal("GEMINI_API_KEY is not configured".into()))?;

    let model = input.model.as_deref().unwrap_or(DEFAULT_MODEL);
    let url = format!("{GENERATE_BASE_URL}/{model}:generateContent");
    let body = json!({
        "contents": [{"parts": [{"text": input.prompt}]}]
    });

    let response = state
        .http
        .post(&url)
        .query(&[("key", api_key)])
        .json(&body)
        .send()
        .await
        .map_err(|e| AppError::Internal(format!("Upstream request failed: {e}")))?;

    if !response.status().is_success() {
        let payload: Value = response.json().await.unwrap_or(Value::Null);
        return Err(AppError::Upstream(payload));
    }

    let data: Value = response
        .json()
        .await
        .map_err(|e| AppError::Internal(format!("Invalid upstream response: {e}")))?;
    Ok(Json(data))
}
