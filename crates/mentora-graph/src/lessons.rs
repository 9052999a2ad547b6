//! Lesson repository: catalog reads with relationship traversal, node
//! creation for the seed pipeline, and link operations.

use neo4rs::query;

use mentora_core::codec;
use mentora_core::types::Lesson;

use crate::client::{get_decoded, get_string, GraphClient, GraphError};

impl GraphClient {
    /// List every lesson, decoded, with prerequisite and model ids resolved
    /// from the graph.
    pub async fn list_lessons(&self) -> Result<Vec<Lesson>, GraphError> {
        let q = query(
            "MATCH (l:Lesson)
             OPTIONAL MATCH (p:Lesson)-[:IS_PREREQUISITE_FOR]->(l)
             OPTIONAL MATCH (l)-[:USES_MODEL]->(m:AIModel)
             RETURN l, collect(DISTINCT p.id) AS prerequisites,
                    collect(DISTINCT m.id) AS model_ids",
        );

        let rows = self.query_rows(q).await?;
        rows.iter().map(lesson_from_row).collect()
    }

    /// Get one lesson by id. A missing id is `NotFound`, never a partial
    /// result.
    pub async fn get_lesson(&self, id: &str) -> Result<Lesson, GraphError> {
        let q = query(
            "MATCH (l:Lesson {id: $id})
             OPTIONAL MATCH (p:Lesson)-[:IS_PREREQUISITE_FOR]->(l)
             OPTIONAL MATCH (l)-[:USES_MODEL]->(m:AIModel)
             RETURN l, collect(DISTINCT p.id) AS prerequisites,
                    collect(DISTINCT m.id) AS model_ids",
        )
        .param("id", id.to_string());

        match self.query_one(q).await? {
            Some(row) => lesson_from_row(&row),
            None => Err(GraphError::NotFound {
                label: "Lesson",
                id: id.to_string(),
            }),
        }
    }

    /// Create a lesson node with codec-encoded structured fields.
    ///
    /// `prerequisites` and `model_id` are intentionally not stored as
    /// properties; they become edges in the relationship pass.
    pub async fn create_lesson(&self, lesson: &Lesson) -> Result<(), GraphError> {
        let q = query(
            "CREATE (l:Lesson {
               id: $id, title: $title, description: $description,
               introduction: $introduction, sections: $sections,
               model_specific_strategies: $model_specific_strategies,
               common_mistakes_and_troubleshooting: $common_mistakes_and_troubleshooting,
               advanced_techniques: $advanced_techniques,
               practice_exercises: $practice_exercises,
               reflection_and_discussion: $reflection_and_discussion,
               summary: $summary, quiz: $quiz, tags: $tags,
               related_lessons: $related_lessons
             })",
        )
        .param("id", lesson.id.clone())
        .param("title", lesson.title.clone())
        .param("description", lesson.description.clone())
        .param("introduction", codec::encode_value(&lesson.introduction))
        .param("sections", codec::encode_value(&lesson.sections))
        .param(
            "model_specific_strategies",
            codec::encode_value(&lesson.model_specific_strategies),
        )
        .param(
            "common_mistakes_and_troubleshooting",
            codec::encode_value(&lesson.common_mistakes_and_troubleshooting),
        )
        .param(
            "advanced_techniques",
            codec::encode_value(&lesson.advanced_techniques),
        )
        .param(
            "practice_exercises",
            codec::encode_value(&lesson.practice_exercises),
        )
        .param(
            "reflection_and_discussion",
            codec::encode_value(&lesson.reflection_and_discussion),
        )
        .param("summary", codec::encode_value(&lesson.summary))
        .param("quiz", codec::encode_value(&lesson.quiz))
        .param("tags", codec::encode_value(&lesson.tags))
        .param(
            "related_lessons",
            codec::encode_value(&lesson.related_lessons),
        );

        self.run(q).await
    }

    /// Attach the model a lesson teaches against. Both endpoints must
    /// already exist; a missing endpoint is a hard `NotFound`.
    pub async fn link_lesson_model(
        &self,
        lesson_id: &str,
        model_id: &str,
    ) -> Result<(), GraphError> {
        let q = query(
            "MATCH (l:Lesson {id: $lesson_id})
             MATCH (m:AIModel {id: $model_id})
             MERGE (l)-[:USES_MODEL]->(m)
             RETURN l.id AS id",
        )
        .param("lesson_id", lesson_id.to_string())
        .param("model_id", model_id.to_string());

        match self.query_one(q).await? {
            Some(_) => Ok(()),
            None => Err(GraphError::NotFound {
                label: "Lesson or AIModel",
                id: format!("{lesson_id} -> {model_id}"),
            }),
        }
    }

    /// Record that `prerequisite_id` must be completed before `lesson_id`.
    /// Both lessons must already exist.
    pub async fn add_prerequisite(
        &self,
        prerequisite_id: &str,
        lesson_id: &str,
    ) -> Result<(), GraphError> {
        let q = query(
            "MATCH (p:Lesson {id: $prerequisite_id})
             MATCH (l:Lesson {id: $lesson_id})
             MERGE (p)-[:IS_PREREQUISITE_FOR]->(l)
             RETURN l.id AS id",
        )
        .param("prerequisite_id", prerequisite_id.to_string())
        .param("lesson_id", lesson_id.to_string());

        match self.query_one(q).await? {
            Some(_) => Ok(()),
            None => Err(GraphError::NotFound {
                label: "Lesson",
                id: format!("{prerequisite_id} -> {lesson_id}"),
            }),
        }
    }
}

fn lesson_from_row(row: &neo4rs::Row) -> Result<Lesson, GraphError> {
    let node: neo4rs::Node = row
        .get("l")
        .map_err(|e| GraphError::Serialization(format!("Failed to read lesson node: {e}")))?;
    let prerequisites: Vec<String> = row.get("prerequisites").unwrap_or_default();
    let model_ids: Vec<String> = row.get("model_ids").unwrap_or_default();

    Ok(Lesson {
        id: get_string(&node, "id"),
        title: get_string(&node, "title"),
        description: get_string(&node, "description"),
        introduction: get_decoded(&node, "introduction"),
        sections: get_decoded(&node, "sections"),
        model_specific_strategies: get_decoded(&node, "model_specific_strategies"),
        common_mistakes_and_troubleshooting: get_decoded(
            &node,
            "common_mistakes_and_troubleshooting",
        ),
        advanced_techniques: get_decoded(&node, "advanced_techniques"),
        practice_exercises: get_decoded(&node, "practice_exercises"),
        reflection_and_discussion: get_decoded(&node, "reflection_and_discussion"),
        summary: get_decoded(&node, "summary"),
        quiz: get_decoded(&node, "quiz"),
        tags: get_decoded(&node, "tags"),
        related_lessons: get_decoded(&node, "related_lessons"),
        prerequisites,
        model_id: model_ids.into_iter().next(),
    })
}
