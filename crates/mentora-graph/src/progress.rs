//! Lesson-completion repository.
//!
//! Completion is the existence of a `COMPLETED` edge from User to Lesson,
//! carrying `score` and `completed_at`. The edge is MERGEd, so repeating a
//! lesson updates the score in place rather than duplicating the edge.

use chrono::Utc;
use neo4rs::query;

use mentora_core::types::ProgressSummary;

use crate::client::{GraphClient, GraphError};

impl GraphClient {
    /// Summarize a user's completed lessons and quiz scores.
    pub async fn get_progress(&self, user_id: &str) -> Result<ProgressSummary, GraphError> {
        let q = query(
            "MATCH (u:User {id: $user_id})-[r:COMPLETED]->(l:Lesson)
             RETURN l.id AS lesson_id, r.score AS score",
        )
        .param("user_id", user_id.to_string());

        let rows = self.query_rows(q).await?;
        let mut summary = ProgressSummary::default();
        for row in rows {
            let lesson_id: String = row.get("lesson_id").unwrap_or_default();
            let score: f64 = row.get("score").unwrap_or(0.0);
            summary.scores.insert(lesson_id.clone(), score);
            summary.completed_lesson_ids.push(lesson_id);
        }
        Ok(summary)
    }

    /// Upsert the `COMPLETED` edge for (user, lesson), stamping the current
    /// time. Missing user or lesson is a hard `NotFound`.
    pub async fn record_completion(
        &self,
        user_id: &str,
        lesson_id: &str,
        score: f64,
    ) -> Result<(), GraphError> {
        let q = query(
            "MATCH (u:User {id: $user_id})
             MATCH (l:Lesson {id: $lesson_id})
             MERGE (u)-[r:COMPLETED]->(l)
             SET r.score = $score, r.completed_at = $now
             RETURN r.score AS score",
        )
        .param("user_id", user_id.to_string())
        .param("lesson_id", lesson_id.to_string())
        .param("score", score)
        .param("now", Utc::now().to_rfc3339());

        match self.query_one(q).await? {
            Some(_) => Ok(()),
            None => Err(GraphError::NotFound {
                label: "User or Lesson",
                id: format!("{user_id} -> {lesson_id}"),
            }),
        }
    }
}
