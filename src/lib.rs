//! fekb - Frontend knowledge base core
//!
//! A curated catalog of frontend-development topics, partitioned into
//! meta-categories (JavaScript, HTML & CSS, frameworks, ...) that are
//! loaded lazily and cached per session.
//!
//! # Architecture
//!
//! - Content is read-only: each meta-category is produced by a
//!   `CategorySource` registered in a `ContentRegistry`
//! - `CategoryCache` loads each meta-category at most once and shares an
//!   in-flight load between concurrent callers
//! - Filtering, search scoring and related-topic resolution are pure
//!   functions over loaded data
//! - Study progress and notes are persisted as whole JSON records
//!
//! # Modules
//!
//! - `content`: Content store boundary (sources, registry)
//! - `core`: Cache, filter, relevance, related topics
//! - `domain`: Data structures (Topic, Category, MetaCategoryId, Note)
//! - `progress`: Learned topics and notes persistence
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Browse a meta-category
//! fekb topics javascript --query "closure async"
//!
//! # Search everything
//! fekb search "event loop"
//!
//! # Track progress
//! fekb learn javascript closures
//! fekb progress
//! ```

pub mod cli;
pub mod config;
pub mod content;
pub mod core;
pub mod domain;
pub mod progress;

// Re-export main types at crate root for convenience
pub use content::{CategorySource, ContentRegistry, DirectorySource, LoadError, StaticSource};
pub use crate::core::{filter_categories, search, CategoryCache, SearchHit, SearchOptions, TopicFilter};
pub use domain::{Category, Difficulty, DifficultyFilter, MetaCategoryId, Note, Topic};
pub use progress::{JsonStore, LearnedTopics, NoteBook, Progress};
