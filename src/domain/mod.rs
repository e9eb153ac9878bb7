//! Domain types for the knowledge base.
//!
//! This module contains the core data structures:
//! - MetaCategoryId: Top-level catalog partitions (unit of lazy loading)
//! - Category / Topic: Static authored content
//! - Note: User-written study notes

pub mod meta;
pub mod note;
pub mod topic;

use thiserror::Error;

// Re-export commonly used types
pub use meta::MetaCategoryId;
pub use note::Note;
pub use topic::{find_topic, Category, CodeExample, Difficulty, DifficultyFilter, Topic};

/// Errors raised when parsing domain values from user input
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Unknown meta-category: {0}")]
    UnknownMetaCategory(String),

    #[error("Unknown difficulty: {0} (expected beginner, intermediate, advanced or all)")]
    UnknownDifficulty(String),
}
