//! mentora-core: shared domain types and the field codec for the Mentora
//! learning-content platform.
//!
//! This crate provides the foundations used across all Mentora components:
//! - Entity types (Lesson, AiModel, Tutorial, SavedPrompt, ...) for the
//!   content graph
//! - Per-entity codec-managed field lists, the schema contract shared by
//!   every read and write path
//! - The stringify-on-write / parse-on-read codec for nested fields

pub mod codec;
pub mod types;

pub use types::{AiModel, Lesson, ProgressSummary, PromptInput, SavedPrompt, Tutorial, User};
