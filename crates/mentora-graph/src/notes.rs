//! Per-(user, lesson) note repository.
//!
//! Notes are keyed by composite (`user_id`, `lesson_id`) properties on the
//! Note node itself, with a `HAS_NOTE` edge linking the owner. The MERGE on
//! the composite key makes writes idempotent: one note per user per lesson.

use neo4rs::query;
use serde_json::{Map, Value};

use mentora_core::codec;

use crate::client::{GraphClient, GraphError};

impl GraphClient {
    /// Fetch a user's note for a lesson. Absence is an empty JSON object,
    /// not `NotFound`.
    pub async fn get_note(&self, user_id: &str, lesson_id: &str) -> Result<Value, GraphError> {
        let q = query(
            "MATCH (n:Note {user_id: $user_id, lesson_id: $lesson_id})
             RETURN n.content AS content",
        )
        .param("user_id", user_id.to_string())
        .param("lesson_id", lesson_id.to_string());

        match self.query_one(q).await? {
            Some(row) => {
                let raw: String = row.get("content").unwrap_or_default();
                if raw.is_empty() {
                    Ok(Value::Object(Map::new()))
                } else {
                    Ok(codec::decode_value(raw))
                }
            }
            None => Ok(Value::Object(Map::new())),
        }
    }

    /// Upsert a user's note for a lesson. The user must exist.
    pub async fn put_note(
        &self,
        user_id: &str,
        lesson_id: &str,
        content: &Value,
    ) -> Result<(), GraphError> {
        let q = query(
            "MATCH (u:User {id: $user_id})
             MERGE (u)-[:HAS_NOTE]->(n:Note {user_id: $user_id, lesson_id: $lesson_id})
             SET n.content = $content
             RETURN n.lesson_id AS lesson_id",
        )
        .param("user_id", user_id.to_string())
        .param("lesson_id", lesson_id.to_string())
        .param("content", codec::encode_value(content));

        match self.query_one(q).await? {
            Some(_) => Ok(()),
            None => Err(GraphError::NotFound {
                label: "User",
                id: user_id.to_string(),
            }),
        }
    }
}
