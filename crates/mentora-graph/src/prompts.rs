//! Saved-prompt repository.
//!
//! Prompts are owned by exactly one user through a `SAVED_PROMPT` edge.
//! Saves MERGE both the node and the ownership edge, so re-saving an
//! existing prompt never duplicates either.

use chrono::{DateTime, Utc};
use neo4rs::query;
use serde_json::Value;
use uuid::Uuid;

use mentora_core::codec;
use mentora_core::types::{PromptInput, SavedPrompt};

use crate::client::{get_decoded, get_opt_string, get_string, opt_string, GraphClient, GraphError};

impl GraphClient {
    /// List a user's saved prompts, most recent first.
    pub async fn list_prompts(&self, user_id: &str) -> Result<Vec<SavedPrompt>, GraphError> {
        let q = query(
            "MATCH (u:User {id: $user_id})-[:SAVED_PROMPT]->(p:Prompt)
             RETURN p
             ORDER BY p.timestamp DESC",
        )
        .param("user_id", user_id.to_string());

        let rows = self.query_rows(q).await?;
        rows.iter().map(prompt_from_row).collect()
    }

    /// Upsert a prompt by id, generating one when absent, and MERGE the
    /// ownership edge. A missing user is `NotFound`.
    pub async fn save_prompt(
        &self,
        user_id: &str,
        input: &PromptInput,
    ) -> Result<SavedPrompt, GraphError> {
        let id = input
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let tags = if input.tags.is_null() {
            Value::Array(Vec::new())
        } else {
            input.tags.clone()
        };

        let q = query(
            "MATCH (u:User {id: $user_id})
             MERGE (p:Prompt {id: $id})
             MERGE (u)-[:SAVED_PROMPT]->(p)
             SET p.name = $name, p.prompt_text = $prompt_text,
                 p.model_id = $model_id, p.tags = $tags,
                 p.is_favorite = $is_favorite,
                 p.response_preview = $response_preview,
                 p.timestamp = $timestamp
             RETURN p",
        )
        .param("user_id", user_id.to_string())
        .param("id", id)
        .param("name", input.name.clone())
        .param("prompt_text", input.prompt_text.clone())
        .param("model_id", opt_string(&input.model_id))
        .param("tags", codec::encode_value(&tags))
        .param("is_favorite", input.is_favorite)
        .param("response_preview", opt_string(&input.response_preview))
        .param("timestamp", Utc::now().to_rfc3339());

        match self.query_one(q).await? {
            Some(row) => prompt_from_row(&row),
            None => Err(GraphError::NotFound {
                label: "User",
                id: user_id.to_string(),
            }),
        }
    }

    /// Detach-delete a prompt, scoped to the owning user by the match
    /// pattern. Returns whether a prompt was deleted.
    pub async fn delete_prompt(&self, user_id: &str, prompt_id: &str) -> Result<bool, GraphError> {
        let q = query(
            "MATCH (u:User {id: $user_id})-[:SAVED_PROMPT]->(p:Prompt {id: $prompt_id})
             DETACH DELETE p
             RETURN count(*) AS deleted",
        )
        .param("user_id", user_id.to_string())
        .param("prompt_id", prompt_id.to_string());

        match self.query_one(q).await? {
            Some(row) => Ok(row.get::<i64>("deleted").unwrap_or(0) > 0),
            None => Ok(false),
        }
    }
}

fn prompt_from_row(row: &neo4rs::Row) -> Result<SavedPrompt, GraphError> {
    let node: neo4rs::Node = row
        .get("p")
        .map_err(|e| GraphError::Serialization(format!("Failed to read prompt node: {e}")))?;

    let timestamp = node
        .get::<String>("timestamp")
        .ok()
        .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(DateTime::UNIX_EPOCH);

    Ok(SavedPrompt {
        id: get_string(&node, "id"),
        name: get_string(&node, "name"),
        prompt_text: get_string(&node, "prompt_text"),
        model_id: get_opt_string(&node, "model_id"),
        tags: get_decoded(&node, "tags"),
        is_favorite: node.get::<bool>("is_favorite").unwrap_or(false),
        response_preview: get_opt_string(&node, "response_preview"),
        timestamp,
    })
}
