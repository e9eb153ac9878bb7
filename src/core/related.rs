//! Related-topic resolution.
//!
//! Besides a topic's explicit links, every topic of a category whose id or
//! title shares a word stem with one of the topic's tags counts as related.
//! Only categories of the topic's own meta-category are considered.

use std::collections::HashSet;

use crate::domain::{Category, Topic};

use super::text::normalize_tokens;

/// Check if two token lists share a stem (either token contains the other)
fn tokens_overlap(a: &[String], b: &[String]) -> bool {
    a.iter()
        .any(|x| b.iter().any(|y| x.contains(y.as_str()) || y.contains(x.as_str())))
}

/// Check if a tag matches a category's id or title
pub fn tag_matches_category(tag: &str, category: &Category) -> bool {
    let tag_tokens = normalize_tokens(tag);
    if tag_tokens.is_empty() {
        return false;
    }

    tokens_overlap(&tag_tokens, &normalize_tokens(&category.id))
        || tokens_overlap(&tag_tokens, &normalize_tokens(&category.title))
}

/// Explicit links first, then tag-discovered topics; deduplicated, source excluded
pub fn resolve_related(topic: &Topic, same_meta_categories: &[Category]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    seen.insert(topic.id.as_str());

    let mut related = Vec::new();

    for id in &topic.related_topics {
        if seen.insert(id.as_str()) {
            related.push(id.clone());
        }
    }

    for category in same_meta_categories {
        if !topic.tags.iter().any(|tag| tag_matches_category(tag, category)) {
            continue;
        }

        for candidate in &category.topics {
            if seen.insert(candidate.id.as_str()) {
                related.push(candidate.id.clone());
            }
        }
    }

    related
}
