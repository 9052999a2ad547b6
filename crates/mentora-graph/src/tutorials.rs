//! Tutorial repository: reads with model-edge traversal, creation, and
//! link operations.

use neo4rs::query;

use mentora_core::codec;
use mentora_core::types::Tutorial;

use crate::client::{get_decoded, get_string, GraphClient, GraphError};

impl GraphClient {
    pub async fn list_tutorials(&self) -> Result<Vec<Tutorial>, GraphError> {
        let q = query(
            "MATCH (t:Tutorial)
             OPTIONAL MATCH (t)-[:USES_MODEL]->(m:AIModel)
             RETURN t, collect(DISTINCT m.id) AS model_ids",
        );

        let rows = self.query_rows(q).await?;
        rows.iter().map(tutorial_from_row).collect()
    }

    pub async fn get_tutorial(&self, id: &str) -> Result<Tutorial, GraphError> {
        let q = query(
            "MATCH (t:Tutorial {id: $id})
             OPTIONAL MATCH (t)-[:USES_MODEL]->(m:AIModel)
             RETURN t, collect(DISTINCT m.id) AS model_ids",
        )
        .param("id", id.to_string());

        match self.query_one(q).await? {
            Some(row) => tutorial_from_row(&row),
            None => Err(GraphError::NotFound {
                label: "Tutorial",
                id: id.to_string(),
            }),
        }
    }

    /// Create a tutorial node with codec-encoded structured fields.
    /// `model_ids` becomes edges in the relationship pass.
    pub async fn create_tutorial(&self, tutorial: &Tutorial) -> Result<(), GraphError> {
        let q = query(
            "CREATE (t:Tutorial {
               id: $id, title: $title, description: $description,
               steps: $steps, troubleshooting: $troubleshooting
             })",
        )
        .param("id", tutorial.id.clone())
        .param("title", tutorial.title.clone())
        .param("description", tutorial.description.clone())
        .param("steps", codec::encode_value(&tutorial.steps))
        .param(
            "troubleshooting",
            codec::encode_value(&tutorial.troubleshooting),
        );

        self.run(q).await
    }

    /// Attach a model covered by a tutorial. Both endpoints must already
    /// exist; a missing endpoint is a hard `NotFound`.
    pub async fn link_tutorial_model(
        &self,
        tutorial_id: &str,
        model_id: &str,
    ) -> Result<(), GraphError> {
        let q = query(
            "MATCH (t:Tutorial {id: $tutorial_id})
             MATCH (m:AIModel {id: $model_id})
             MERGE (t)-[:USES_MODEL]->(m)
             RETURN t.id AS id",
        )
        .param("tutorial_id", tutorial_id.to_string())
        .param("model_id", model_id.to_string());

        match self.query_one(q).await? {
            Some(_) => Ok(()),
            None => Err(GraphError::NotFound {
                label: "Tutorial or AIModel",
                id: format!("{tutorial_id} -> {model_id}"),
            }),
        }
    }
}

fn tutorial_from_row(row: &neo4rs::Row) -> Result<Tutorial, GraphError> {
    let node: neo4rs::Node = row
        .get("t")
        .map_err(|e| GraphError::Serialization(format!("Failed to read tutorial node: {e}")))?;
    let model_ids: Vec<String> = row.get("model_ids").unwrap_or_default();

    Ok(Tutorial {
        id: get_string(&node, "id"),
        title: get_string(&node, "title"),
        description: get_string(&node, "description"),
        steps: get_decoded(&node, "steps"),
        troubleshooting: get_decoded(&node, "troubleshooting"),
        model_ids,
    })
}
