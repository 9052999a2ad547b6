//! User repository.
//!
//! Usernames are unique (enforced by a seed-time constraint and checked by
//! the registration handler before creation).

use neo4rs::query;
use uuid::Uuid;

use mentora_core::types::User;

use crate::client::{get_string, GraphClient, GraphError};

impl GraphClient {
    /// Create a user node with a fresh id.
    pub async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<User, GraphError> {
        let id = Uuid::new_v4().to_string();
        let q = query(
            "CREATE (u:User {id: $id, username: $username, password_hash: $password_hash})
             RETURN u",
        )
        .param("id", id)
        .param("username", username.to_string())
        .param("password_hash", password_hash.to_string());

        match self.query_one(q).await? {
            Some(row) => user_from_row(&row),
            None => Err(GraphError::Serialization(
                "User creation returned no row".to_string(),
            )),
        }
    }

    pub async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, GraphError> {
        let q = query("MATCH (u:User {username: $username}) RETURN u")
            .param("username", username.to_string());

        match self.query_one(q).await? {
            Some(row) => Ok(Some(user_from_row(&row)?)),
            None => Ok(None),
        }
    }
}

fn user_from_row(row: &neo4rs::Row) -> Result<User, GraphError> {
    let node: neo4rs::Node = row
        .get("u")
        .map_err(|e| GraphError::Serialization(format!("Failed to read user node: {e}")))?;

    Ok(User {
        id: get_string(&node, "id"),
        username: get_string(&node, "username"),
        password_hash: get_string(&node, "password_hash"),
    })
}
