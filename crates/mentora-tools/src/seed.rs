//! Destructive seed: reset the store, declare constraints, load fixture
//! entities, then build relationships in a second pass.

use std::collections::HashSet;

use mentora_graph::GraphClient;

use crate::fixtures::FixtureData;

/// An edge to create once all fixture nodes exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relationship {
    LessonModel {
        lesson_id: String,
        model_id: String,
    },
    Prerequisite {
        prerequisite_id: String,
        lesson_id: String,
    },
    TutorialModel {
        tutorial_id: String,
        model_id: String,
    },
}

/// Run the full seed pipeline. Any failure aborts the run; partial state is
/// acceptable because seeding always starts from a clean store.
pub async fn run_seed(graph: &GraphClient, fixtures: &FixtureData) -> anyhow::Result<()> {
    tracing::info!("Verifying store connectivity");
    graph.health_check().await?;

    tracing::info!("Clearing existing data");
    graph.clear_all().await?;

    tracing::info!("Creating uniqueness constraints");
    graph.create_constraints().await?;

    tracing::info!(count = fixtures.models.len(), "Seeding AI models");
    for model in &fixtures.models {
        graph.create_model(model).await?;
    }

    tracing::info!(count = fixtures.lessons.len(), "Seeding lessons");
    for lesson in &fixtures.lessons {
        graph.create_lesson(lesson).await?;
    }

    tracing::info!(count = fixtures.tutorials.len(), "Seeding tutorials");
    for tutorial in &fixtures.tutorials {
        graph.create_tutorial(tutorial).await?;
    }

    let plan = plan_relationships(fixtures);
    tracing::info!(count = plan.len(), "Creating relationships");
    for rel in &plan {
        match rel {
            Relationship::LessonModel {
                lesson_id,
                model_id,
            } => graph.link_lesson_model(lesson_id, model_id).await?,
            Relationship::Prerequisite {
                prerequisite_id,
                lesson_id,
            } => graph.add_prerequisite(prerequisite_id, lesson_id).await?,
            Relationship::TutorialModel {
                tutorial_id,
                model_id,
            } => graph.link_tutorial_model(tutorial_id, model_id).await?,
        }
    }

    tracing::info!("Seed complete");
    Ok(())
}

/// Plan the edges to create after the node pass.
///
/// Fixture data is trusted but not assumed complete: an edge whose target id
/// is absent from the fixture set is dropped with a warning instead of
/// failing the run.
pub fn plan_relationships(fixtures: &FixtureData) -> Vec<Relationship> {
    let model_ids: HashSet<&str> = fixtures.models.iter().map(|m| m.id.as_str()).collect();
    let lesson_ids: HashSet<&str> = fixtures.lessons.iter().map(|l| l.id.as_str()).collect();

    let mut plan = Vec::new();

    for lesson in &fixtures.lessons {
        if let Some(model_id) = &lesson.model_id {
            if model_ids.contains(model_id.as_str()) {
                plan.push(Relationship::LessonModel {
                    lesson_id: lesson.id.clone(),
                    model_id: model_id.clone(),
                });
            } else {
                tracing::warn!(
                    lesson_id = %lesson.id,
                    model_id = %model_id,
                    "Skipping USES_MODEL edge: model not in fixture set"
                );
            }
        }

        for prereq_id in &lesson.prerequisites {
            if lesson_ids.contains(prereq_id.as_str()) {
                plan.push(Relationship::Prerequisite {
                    prerequisite_id: prereq_id.clone(),
                    lesson_id: lesson.id.clone(),
                });
            } else {
                tracing::warn!(
                    lesson_id = %lesson.id,
                    prerequisite_id = %prereq_id,
                    "Skipping IS_PREREQUISITE_FOR edge: lesson not in fixture set"
                );
            }
        }
    }

    for tutorial in &fixtures.tutorials {
        for model_id in &tutorial.model_ids {
            if model_ids.contains(model_id.as_str()) {
                plan.push(Relationship::TutorialModel {
                    tutorial_id: tutorial.id.clone(),
                    model_id: model_id.clone(),
                });
            } else {
                tracing::warn!(
                    tutorial_id = %tutorial.id,
                    model_id = %model_id,
                    "Skipping USES_MODEL edge: model not in fixture set"
                );
            }
        }
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixtures_from(doc: serde_json::Value) -> FixtureData {
        serde_json::from_value(doc).unwrap()
    }

    #[test]
    fn test_plan_includes_known_targets() {
        let fixtures = fixtures_from(json!({
            "models": [{"id": "m1", "name": "Aurora"}],
            "lessons": [
                {"id": "l0", "title": "Intro"},
                {"id": "l1", "title": "Basics", "prerequisites": ["l0"], "modelId": "m1"}
            ],
            "tutorials": [{"id": "t1", "title": "Tour", "modelIds": ["m1"]}]
        }));

        let plan = plan_relationships(&fixtures);
        assert_eq!(plan.len(), 3);
        assert!(plan.contains(&Relationship::Prerequisite {
            prerequisite_id: "l0".to_string(),
            lesson_id: "l1".to_string(),
        }));
        assert!(plan.contains(&Relationship::LessonModel {
            lesson_id: "l1".to_string(),
            model_id: "m1".to_string(),
        }));
        assert!(plan.contains(&Relationship::TutorialModel {
            tutorial_id: "t1".to_string(),
            model_id: "m1".to_string(),
        }));
    }

    #[test]
    fn test_plan_skips_missing_prerequisite_target() {
        // A lesson referencing a prerequisite that is not in the fixture set
        // must not produce an edge, and must not error.
        let fixtures = fixtures_from(json!({
            "lessons": [{"id": "l1", "title": "Basics", "prerequisites": ["l0"]}]
        }));

        let plan = plan_relationships(&fixtures);
        assert!(plan.is_empty());
    }

    #[test]
    fn test_plan_skips_missing_model_targets() {
        let fixtures = fixtures_from(json!({
            "lessons": [{"id": "l1", "title": "Basics", "modelId": "ghost"}],
            "tutorials": [{"id": "t1", "title": "Tour", "modelIds": ["ghost"]}]
        }));

        let plan = plan_relationships(&fixtures);
        assert!(plan.is_empty());
    }
}
