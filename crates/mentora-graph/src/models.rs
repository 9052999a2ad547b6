//! AIModel repository.

use neo4rs::query;

use mentora_core::codec;
use mentora_core::types::AiModel;

use crate::client::{get_decoded, get_string, GraphClient, GraphError};

impl GraphClient {
    pub async fn list_models(&self) -> Result<Vec<AiModel>, GraphError> {
        let rows = self.query_rows(query("MATCH (m:AIModel) RETURN m")).await?;
        rows.iter().map(model_from_row).collect()
    }

    pub async fn get_model(&self, id: &str) -> Result<AiModel, GraphError> {
        let q = query("MATCH (m:AIModel {id: $id}) RETURN m").param("id", id.to_string());

        match self.query_one(q).await? {
            Some(row) => model_from_row(&row),
            None => Err(GraphError::NotFound {
                label: "AIModel",
                id: id.to_string(),
            }),
        }
    }

    /// Create a model node with codec-encoded capabilities.
    pub async fn create_model(&self, model: &AiModel) -> Result<(), GraphError> {
        let q = query(
            "CREATE (m:AIModel {
               id: $id, name: $name, provider: $provider,
               description: $description, capabilities: $capabilities
             })",
        )
        .param("id", model.id.clone())
        .param("name", model.name.clone())
        .param("provider", model.provider.clone())
        .param("description", model.description.clone())
        .param("capabilities", codec::encode_value(&model.capabilities));

        self.run(q).await
    }
}

fn model_from_row(row: &neo4rs::Row) -> Result<AiModel, GraphError> {
    let node: neo4rs::Node = row
        .get("m")
        .map_err(|e| GraphError::Serialization(format!("Failed to read model node: {e}")))?;

    Ok(AiModel {
        id: get_string(&node, "id"),
        name: get_string(&node, "name"),
        provider: get_string(&node, "provider"),
        description: get_string(&node, "description"),
        capabilities: get_decoded(&node, "capabilities"),
    })
}
