//! Raw export of the full store to one JSON document.

use std::path::Path;

use anyhow::Context;

use mentora_graph::GraphClient;

/// Read every entity in raw stored form and write the export document.
///
/// No decoding happens here: string-encoded fields stay string-encoded so
/// the document round-trips faithfully through import.
pub async fn run_export(graph: &GraphClient, out_path: &Path) -> anyhow::Result<()> {
    let doc = graph.export_document().await?;

    tracing::info!(
        lessons = doc.lessons.len(),
        models = doc.models.len(),
        tutorials = doc.tutorials.len(),
        prompts = doc.prompts.len(),
        users = doc.users.len(),
        "Export assembled"
    );

    let json = serde_json::to_string_pretty(&doc)?;
    std::fs::write(out_path, json)
        .with_context(|| format!("Failed to write export to {}", out_path.display()))?;

    tracing::info!(path = %out_path.display(), "Export written");
    Ok(())
}
