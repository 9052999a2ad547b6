//! Core domain types for the Mentora content graph.
//!
//! Entities are persisted as graph nodes keyed by a unique string `id`.
//! Fields whose in-memory shape is structured (sections, quiz, tags, ...)
//! are held as [`serde_json::Value`] and pass through the field codec at the
//! store boundary. Node properties are snake_case; the HTTP surface speaks
//! camelCase via the serde renames below.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── Codec field lists ─────────────────────────────────────────────
//
// The schema contract: each list names the fields of an entity that are
// stored as serialized strings. The same list must drive every write path
// (repositories, seed, import) and every decoding read path.

/// Lesson fields stored as serialized strings on the node.
pub const LESSON_CODEC_FIELDS: &[&str] = &[
    "introduction",
    "sections",
    "model_specific_strategies",
    "common_mistakes_and_troubleshooting",
    "advanced_techniques",
    "practice_exercises",
    "reflection_and_discussion",
    "summary",
    "quiz",
    "tags",
    "related_lessons",
];

/// AIModel fields stored as serialized strings on the node.
pub const MODEL_CODEC_FIELDS: &[&str] = &["capabilities"];

/// Tutorial fields stored as serialized strings on the node.
pub const TUTORIAL_CODEC_FIELDS: &[&str] = &["steps", "troubleshooting"];

/// Prompt fields stored as serialized strings on the node.
pub const PROMPT_CODEC_FIELDS: &[&str] = &["tags"];

// ── Entities ──────────────────────────────────────────────────────

/// A registered account. The password hash is an argon2id PHC string and
/// never leaves the auth endpoints.
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password_hash: String,
}

/// A lesson in the learning catalog.
///
/// `prerequisites` and `model_id` are not node properties: they are resolved
/// from `IS_PREREQUISITE_FOR` and `USES_MODEL` edges on read, and become
/// edges (not properties) on seed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub introduction: Value,
    #[serde(default)]
    pub sections: Value,
    #[serde(default)]
    pub model_specific_strategies: Value,
    #[serde(default)]
    pub common_mistakes_and_troubleshooting: Value,
    #[serde(default)]
    pub advanced_techniques: Value,
    #[serde(default)]
    pub practice_exercises: Value,
    #[serde(default)]
    pub reflection_and_discussion: Value,
    #[serde(default)]
    pub summary: Value,
    #[serde(default)]
    pub quiz: Value,
    #[serde(default)]
    pub tags: Value,
    #[serde(default)]
    pub related_lessons: Value,
    /// Ids of lessons that must be completed first.
    #[serde(default)]
    pub prerequisites: Vec<String>,
    /// The model this lesson teaches against, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
}

/// Metadata about a generative model covered by the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiModel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub capabilities: Value,
}

/// A step-by-step tutorial. `model_ids` is resolved from `USES_MODEL` edges
/// on read and becomes edges on seed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tutorial {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub steps: Value,
    #[serde(default)]
    pub troubleshooting: Value,
    #[serde(default)]
    pub model_ids: Vec<String>,
}

/// A prompt a user has saved, owned via a `SAVED_PROMPT` edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPrompt {
    pub id: String,
    pub name: String,
    pub prompt_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    #[serde(default)]
    pub tags: Value,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_preview: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Input for saving a prompt. An id is generated when absent, so re-saving
/// an existing prompt updates it in place.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptInput {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub prompt_text: String,
    #[serde(default)]
    pub model_id: Option<String>,
    #[serde(default)]
    pub tags: Value,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub response_preview: Option<String>,
}

/// A user's completion state across the lesson catalog.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub completed_lesson_ids: Vec<String>,
    pub scores: HashMap<String, f64>,
}
