//! Bulk operations: uniqueness constraints, destructive reset, raw export,
//! and merge-based import.
//!
//! Export reads entities in their raw stored form (no decode) so that a
//! document can round-trip through import byte-for-byte. Import applies a
//! typed partial update: only fields on the per-entity patchable allowlist
//! are SET, one by one, which gives merge semantics (absent fields are
//! preserved) without spreading arbitrary keys onto nodes. Import does not
//! reconstruct relationships; that is the seed pipeline's job.

use std::collections::HashSet;

use neo4rs::{query, Query};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use mentora_core::codec;
use mentora_core::types::{
    LESSON_CODEC_FIELDS, MODEL_CODEC_FIELDS, PROMPT_CODEC_FIELDS, TUTORIAL_CODEC_FIELDS,
};

use crate::client::{GraphClient, GraphError};

// ── Patchable allowlists ─────────────────────────────────────────

const LESSON_PATCH_FIELDS: &[&str] = &[
    "title",
    "description",
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

const MODEL_PATCH_FIELDS: &[&str] = &["name", "provider", "description", "capabilities"];

const TUTORIAL_PATCH_FIELDS: &[&str] = &["title", "description", "steps", "troubleshooting"];

const PROMPT_PATCH_FIELDS: &[&str] = &[
    "name",
    "prompt_text",
    "model_id",
    "tags",
    "is_favorite",
    "response_preview",
    "timestamp",
];

const USER_PATCH_FIELDS: &[&str] = &["username", "password_hash"];

// ── Document shapes ──────────────────────────────────────────────

/// The export/import document: one JSON object keyed by plural entity
/// names, each holding raw (string-encoded) entity property maps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportDocument {
    pub lessons: Vec<Value>,
    pub models: Vec<Value>,
    pub tutorials: Vec<Value>,
    pub prompts: Vec<Value>,
    pub users: Vec<Value>,
}

/// Import accepts the same shape with every section optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportDocument {
    #[serde(default)]
    pub lessons: Vec<Value>,
    #[serde(default)]
    pub models: Vec<Value>,
    #[serde(default)]
    pub tutorials: Vec<Value>,
    #[serde(default)]
    pub prompts: Vec<Value>,
    #[serde(default)]
    pub users: Vec<Value>,
}

/// Per-type counts of processed import records.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportSummary {
    pub lessons: usize,
    pub models: usize,
    pub tutorials: usize,
    pub prompts: usize,
    pub users: usize,
}

impl GraphClient {
    // ── Reset & constraints ──────────────────────────────────────

    /// Remove every node and relationship. Seed-only.
    pub async fn clear_all(&self) -> Result<(), GraphError> {
        self.run(query("MATCH (n) DETACH DELETE n")).await
    }

    /// Declare id-uniqueness constraints for every entity label, plus the
    /// username constraint on User.
    pub async fn create_constraints(&self) -> Result<(), GraphError> {
        const CONSTRAINTS: &[&str] = &[
            "CREATE CONSTRAINT user_id IF NOT EXISTS FOR (u:User) REQUIRE u.id IS UNIQUE",
            "CREATE CONSTRAINT user_username IF NOT EXISTS FOR (u:User) REQUIRE u.username IS UNIQUE",
            "CREATE CONSTRAINT lesson_id IF NOT EXISTS FOR (l:Lesson) REQUIRE l.id IS UNIQUE",
            "CREATE CONSTRAINT model_id IF NOT EXISTS FOR (m:AIModel) REQUIRE m.id IS UNIQUE",
            "CREATE CONSTRAINT tutorial_id IF NOT EXISTS FOR (t:Tutorial) REQUIRE t.id IS UNIQUE",
            "CREATE CONSTRAINT prompt_id IF NOT EXISTS FOR (p:Prompt) REQUIRE p.id IS UNIQUE",
        ];

        for cypher in CONSTRAINTS {
            self.run(query(cypher)).await?;
        }
        Ok(())
    }

    // ── Export ───────────────────────────────────────────────────

    /// Assemble the full export document in raw stored form.
    pub async fn export_document(&self) -> Result<ExportDocument, GraphError> {
        Ok(ExportDocument {
            lessons: self.export_lessons().await?,
            models: self
                .export_label("AIModel", MODEL_PATCH_FIELDS)
                .await?,
            tutorials: self
                .export_label("Tutorial", TUTORIAL_PATCH_FIELDS)
                .await?,
            prompts: self.export_label("Prompt", PROMPT_PATCH_FIELDS).await?,
            users: self.export_label("User", USER_PATCH_FIELDS).await?,
        })
    }

    /// Read every node of a label as a raw property map.
    async fn export_label(&self, label: &str, fields: &[&str]) -> Result<Vec<Value>, GraphError> {
        let cypher = format!("MATCH (n:{label}) RETURN n");
        let rows = self.query_rows(query(&cypher)).await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let node: neo4rs::Node = row.get("n").map_err(|e| {
                GraphError::Serialization(format!("Failed to read {label} node: {e}"))
            })?;
            out.push(Value::Object(raw_props(&node, fields)));
        }
        Ok(out)
    }

    /// Read lessons with their Section and Quiz sub-nodes eagerly joined and
    /// deduplicated. Sub-node collections only replace the stored string
    /// fields when sub-nodes actually exist, so the common case (no
    /// sub-nodes) round-trips the raw stored form exactly.
    async fn export_lessons(&self) -> Result<Vec<Value>, GraphError> {
        let rows = self.query_rows(query("MATCH (l:Lesson) RETURN l")).await?;

        let mut lessons = Vec::with_capacity(rows.len());
        let mut index = std::collections::HashMap::new();
        for row in rows {
            let node: neo4rs::Node = row.get("l").map_err(|e| {
                GraphError::Serialization(format!("Failed to read lesson node: {e}"))
            })?;
            let props = raw_props(&node, LESSON_PATCH_FIELDS);
            let id = props
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            index.insert(id, lessons.len());
            lessons.push(props);
        }

        self.attach_subnodes(
            &mut lessons,
            &index,
            "HAS_SECTION",
            "Section",
            "sections",
            &["title", "content"],
        )
        .await?;
        self.attach_subnodes(
            &mut lessons,
            &index,
            "HAS_QUIZ",
            "Quiz",
            "quiz",
            &["question", "options", "answer"],
        )
        .await?;

        Ok(lessons.into_iter().map(Value::Object).collect())
    }

    async fn attach_subnodes(
        &self,
        lessons: &mut [Map<String, Value>],
        index: &std::collections::HashMap<String, usize>,
        rel_type: &str,
        label: &str,
        field: &str,
        fields: &[&str],
    ) -> Result<(), GraphError> {
        let cypher = format!(
            "MATCH (l:Lesson)-[:{rel_type}]->(s:{label})
             RETURN l.id AS lesson_id, s"
        );
        let rows = self.query_rows(query(&cypher)).await?;
        if rows.is_empty() {
            return Ok(());
        }

        let mut seen: HashSet<(String, String)> = HashSet::new();
        for row in rows {
            let lesson_id: String = row.get("lesson_id").unwrap_or_default();
            let node: neo4rs::Node = row.get("s").map_err(|e| {
                GraphError::Serialization(format!("Failed to read {label} node: {e}"))
            })?;
            let props = raw_props(&node, fields);
            let sub_id = props
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            if !seen.insert((lesson_id.clone(), sub_id)) {
                continue;
            }

            if let Some(&i) = index.get(&lesson_id) {
                let entry = lessons[i]
                    .entry(field.to_string())
                    .or_insert_with(|| Value::Array(Vec::new()));
                if !entry.is_array() {
                    *entry = Value::Array(Vec::new());
                }
                if let Value::Array(items) = entry {
                    items.push(Value::Object(props));
                }
            }
        }
        Ok(())
    }

    // ── Import ───────────────────────────────────────────────────

    /// Merge a document's entities into the graph, upserting each by id.
    /// Returns per-type processed counts.
    pub async fn import_document(&self, doc: &ImportDocument) -> Result<ImportSummary, GraphError> {
        Ok(ImportSummary {
            lessons: self
                .import_entities("Lesson", &doc.lessons, LESSON_PATCH_FIELDS, LESSON_CODEC_FIELDS)
                .await?,
            models: self
                .import_entities("AIModel", &doc.models, MODEL_PATCH_FIELDS, MODEL_CODEC_FIELDS)
                .await?,
            tutorials: self
                .import_entities(
                    "Tutorial",
                    &doc.tutorials,
                    TUTORIAL_PATCH_FIELDS,
                    TUTORIAL_CODEC_FIELDS,
                )
                .await?,
            prompts: self
                .import_entities("Prompt", &doc.prompts, PROMPT_PATCH_FIELDS, PROMPT_CODEC_FIELDS)
                .await?,
            users: self
                .import_entities("User", &doc.users, USER_PATCH_FIELDS, &[])
                .await?,
        })
    }

    /// Upsert one entity type inside a single transaction.
    async fn import_entities(
        &self,
        label: &'static str,
        entries: &[Value],
        patch_fields: &[&str],
        codec_fields: &[&str],
    ) -> Result<usize, GraphError> {
        if entries.is_empty() {
            return Ok(0);
        }

        let mut txn = self.start_txn().await?;
        let mut count = 0;
        for entry in entries {
            let Some(obj) = entry.as_object() else {
                return Err(GraphError::Serialization(format!(
                    "{label} import entry is not an object"
                )));
            };
            let id = obj
                .get("id")
                .and_then(Value::as_str)
                .map(str::to_owned)
                .unwrap_or_else(|| Uuid::new_v4().to_string());
            let patch = collect_patch(obj, patch_fields, codec_fields);

            txn.run(build_patch_query(label, &id, &patch)).await?;
            count += 1;
        }
        txn.commit().await?;

        tracing::info!(label, count, "Imported entities");
        Ok(count)
    }
}

/// Restrict an import entry to its patchable fields, codec-encoding the
/// managed ones. Nulls are treated as absent so they cannot erase stored
/// properties.
fn collect_patch(
    obj: &Map<String, Value>,
    patch_fields: &[&str],
    codec_fields: &[&str],
) -> Vec<(String, Value)> {
    let mut patch = Vec::new();
    for &field in patch_fields {
        match obj.get(field) {
            None | Some(Value::Null) => {}
            Some(v) => {
                let v = if codec_fields.contains(&field) {
                    Value::String(codec::encode_value(v))
                } else {
                    v.clone()
                };
                patch.push((field.to_string(), v));
            }
        }
    }
    patch
}

/// Render the MERGE-by-id statement that SETs each patch field
/// individually.
fn patch_cypher(label: &str, patch: &[(String, Value)]) -> String {
    if patch.is_empty() {
        return format!("MERGE (n:{label} {{id: $id}})");
    }
    let sets: Vec<String> = patch
        .iter()
        .enumerate()
        .map(|(i, (field, _))| format!("n.{field} = $p{i}"))
        .collect();
    format!("MERGE (n:{label} {{id: $id}}) SET {}", sets.join(", "))
}

fn build_patch_query(label: &str, id: &str, patch: &[(String, Value)]) -> Query {
    let cypher = patch_cypher(label, patch);
    let mut q = query(&cypher).param("id", id.to_string());
    for (i, (_, value)) in patch.iter().enumerate() {
        q = bind_param(q, &format!("p{i}"), value);
    }
    q
}

/// Bind a JSON value as a Cypher parameter. Structured values that slipped
/// past the codec fall back to their encoded string form.
fn bind_param(q: Query, name: &str, value: &Value) -> Query {
    match value {
        Value::String(s) => q.param(name, s.clone()),
        Value::Bool(b) => q.param(name, *b),
        Value::Number(n) if n.is_i64() => q.param(name, n.as_i64().unwrap_or(0)),
        Value::Number(n) => q.param(name, n.as_f64().unwrap_or(0.0)),
        other => q.param(name, codec::encode_value(other)),
    }
}

/// Extract the known properties of a node as raw JSON, without decoding.
fn raw_props(node: &neo4rs::Node, fields: &[&str]) -> Map<String, Value> {
    let mut props = Map::new();
    if let Ok(id) = node.get::<String>("id") {
        props.insert("id".to_string(), Value::String(id));
    }
    for &field in fields {
        if let Some(v) = raw_prop(node, field) {
            props.insert(field.to_string(), v);
        }
    }
    props
}

/// Read one property in whichever scalar form it was stored.
fn raw_prop(node: &neo4rs::Node, key: &str) -> Option<Value> {
    if let Ok(s) = node.get::<String>(key) {
        return Some(Value::String(s));
    }
    if let Ok(b) = node.get::<bool>(key) {
        return Some(Value::Bool(b));
    }
    if let Ok(n) = node.get::<i64>(key) {
        return Some(Value::from(n));
    }
    if let Ok(n) = node.get::<f64>(key) {
        return Some(Value::from(n));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collect_patch_drops_unknown_keys() {
        let obj = json!({
            "id": "m1",
            "name": "GPT-Neo",
            "rogue_field": "should not be imported"
        });
        let patch = collect_patch(
            obj.as_object().unwrap(),
            MODEL_PATCH_FIELDS,
            MODEL_CODEC_FIELDS,
        );
        let keys: Vec<&str> = patch.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["name"]);
    }

    #[test]
    fn test_collect_patch_encodes_codec_fields() {
        let obj = json!({
            "id": "m1",
            "capabilities": {"vision": true}
        });
        let patch = collect_patch(
            obj.as_object().unwrap(),
            MODEL_PATCH_FIELDS,
            MODEL_CODEC_FIELDS,
        );
        assert_eq!(
            patch,
            vec![(
                "capabilities".to_string(),
                json!("{\"vision\":true}")
            )]
        );
    }

    #[test]
    fn test_collect_patch_passes_encoded_fields_through() {
        // A document straight from export already carries string-encoded
        // fields; they must not be double-encoded.
        let obj = json!({"id": "l1", "tags": "[\"basics\"]"});
        let patch = collect_patch(
            obj.as_object().unwrap(),
            LESSON_PATCH_FIELDS,
            LESSON_CODEC_FIELDS,
        );
        assert_eq!(patch, vec![("tags".to_string(), json!("[\"basics\"]"))]);
    }

    #[test]
    fn test_collect_patch_skips_nulls() {
        let obj = json!({"id": "l1", "title": null, "description": "kept"});
        let patch = collect_patch(
            obj.as_object().unwrap(),
            LESSON_PATCH_FIELDS,
            LESSON_CODEC_FIELDS,
        );
        assert_eq!(patch, vec![("description".to_string(), json!("kept"))]);
    }

    #[test]
    fn test_patch_cypher_merges_by_id_and_sets_fields() {
        let patch = vec![
            ("title".to_string(), json!("Prompt Basics")),
            ("tags".to_string(), json!("[\"basics\"]")),
        ];
        assert_eq!(
            patch_cypher("Lesson", &patch),
            "MERGE (n:Lesson {id: $id}) SET n.title = $p0, n.tags = $p1"
        );
    }

    #[test]
    fn test_patch_cypher_with_no_fields_still_upserts() {
        assert_eq!(patch_cypher("User", &[]), "MERGE (n:User {id: $id})");
    }
}
