//! Core knowledge-base logic.
//!
//! This module contains:
//! - CategoryCache: Lazy, single-flight loading of meta-categories
//! - filter: Topic listing filter (text, difficulty, tags)
//! - relevance: Search scoring and preview fragments
//! - related: Related-topic resolution by tag/category overlap
//! - text: Unicode whole-word matching helpers

pub mod cache;
pub mod filter;
pub mod related;
pub mod relevance;
pub mod text;

// Re-export commonly used types
pub use cache::{Categories, CategoryCache};
pub use filter::{collect_tags, count_topics, filter_categories, TopicFilter};
pub use related::{resolve_related, tag_matches_category};
pub use relevance::{
    extract_fragment, related_by_tags, score, search, search_words, Fragment, SearchHit,
    SearchOptions,
};
pub use text::{contains_whole_word, find_whole_word};
