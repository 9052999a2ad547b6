//! Fixture document loading for the seed pipeline.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use mentora_core::types::{AiModel, Lesson, Tutorial};

/// The fixture document: the content catalog in its structured (decoded)
/// form. Lessons carry `prerequisites`/`modelId` and tutorials carry
/// `modelIds`; those become edges, not properties.
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureData {
    #[serde(default)]
    pub models: Vec<AiModel>,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
    #[serde(default)]
    pub tutorials: Vec<Tutorial>,
}

/// Read and parse a fixture document.
pub fn load(path: &Path) -> anyhow::Result<FixtureData> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read fixture file {}", path.display()))?;
    let data: FixtureData = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse fixture file {}", path.display()))?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fixture_document_parses() {
        let doc = json!({
            "models": [
                {"id": "m1", "name": "Aurora 7B", "provider": "Northwind",
                 "capabilities": {"vision": false}}
            ],
            "lessons": [
                {"id": "l1", "title": "Prompt Basics",
                 "sections": [{"title": "One"}],
                 "tags": ["basics"],
                 "prerequisites": ["l0"],
                 "modelId": "m1"}
            ],
            "tutorials": [
                {"id": "t1", "title": "First Steps",
                 "steps": ["open the editor"],
                 "modelIds": ["m1"]}
            ]
        });

        let data: FixtureData = serde_json::from_value(doc).unwrap();
        assert_eq!(data.models.len(), 1);
        assert_eq!(data.lessons[0].prerequisites, vec!["l0"]);
        assert_eq!(data.lessons[0].model_id.as_deref(), Some("m1"));
        assert_eq!(data.tutorials[0].model_ids, vec!["m1"]);
    }

    #[test]
    fn test_missing_sections_default_empty() {
        let data: FixtureData = serde_json::from_value(json!({})).unwrap();
        assert!(data.models.is_empty());
        assert!(data.lessons.is_empty());
        assert!(data.tutorials.is_empty());
    }
}
