//! Topic listing filter.
//!
//! Narrows loaded categories by free text, difficulty and tags. Text and tag
//! constraints are OR within themselves; the three constraint kinds are
//! combined with AND.

use std::collections::BTreeSet;

use crate::domain::{Category, DifficultyFilter, Topic};

use super::text::{contains_whole_word, query_words};

/// Current filter state of a topic listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicFilter {
    /// Free-text query (empty = no text constraint)
    pub query: String,

    pub difficulty: DifficultyFilter,

    /// Required tags; a topic needs at least one of them
    pub tags: BTreeSet<String>,
}

impl TopicFilter {
    /// Filter that accepts everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free-text query
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Set the difficulty constraint
    pub fn with_difficulty(mut self, difficulty: impl Into<DifficultyFilter>) -> Self {
        self.difficulty = difficulty.into();
        self
    }

    /// Add a required tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into().to_lowercase());
        self
    }

    /// Check whether no constraint is active
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty() && self.difficulty == DifficultyFilter::All && self.tags.is_empty()
    }

    /// Check whether a single topic passes every constraint
    pub fn matches(&self, topic: &Topic) -> bool {
        let words = query_words(&self.query, 1);
        self.matches_words(topic, &words)
    }

    fn matches_words(&self, topic: &Topic, words: &[String]) -> bool {
        matches_text(topic, words)
            && self.difficulty.accepts(topic.difficulty)
            && self.matches_tags(topic)
    }

    fn matches_tags(&self, topic: &Topic) -> bool {
        self.tags.is_empty() || self.tags.iter().any(|tag| topic.has_tag(tag))
    }
}

/// At least one word occurs whole in the title, description or a tag
fn matches_text(topic: &Topic, words: &[String]) -> bool {
    words.is_empty()
        || words.iter().any(|word| {
            contains_whole_word(&topic.title, word)
                || contains_whole_word(&topic.description, word)
                || topic.tags.iter().any(|tag| contains_whole_word(tag, word))
        })
}

/// Apply a filter to a category list
///
/// Matching topics are sorted by difficulty (stable within a difficulty);
/// categories left without topics are dropped.
pub fn filter_categories(categories: &[Category], filter: &TopicFilter) -> Vec<Category> {
    let words = query_words(&filter.query, 1);

    categories
        .iter()
        .filter_map(|category| {
            let mut topics: Vec<Topic> = category
                .topics
                .iter()
                .filter(|t| filter.matches_words(t, &words))
                .cloned()
                .collect();

            if topics.is_empty() {
                return None;
            }

            topics.sort_by_key(|t| t.difficulty.rank());

            Some(Category {
                id: category.id.clone(),
                title: category.title.clone(),
                topics,
            })
        })
        .collect()
}

/// Sorted, distinct (lowercased) tags across categories
pub fn collect_tags(categories: &[Category]) -> Vec<String> {
    categories
        .iter()
        .flat_map(|c| c.topics.iter())
        .flat_map(|t| t.tags.iter())
        .map(|t| t.to_lowercase())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Total number of topics across categories
pub fn count_topics(categories: &[Category]) -> usize {
    categories.iter().map(|c| c.topics.len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Difficulty;

    fn topic(id: &str, difficulty: Difficulty) -> Topic {
        Topic::new(id, id.to_uppercase(), format!("About {}", id), difficulty)
    }

    fn ids(categories: &[Category]) -> Vec<Vec<&str>> {
        categories
            .iter()
            .map(|c| c.topics.iter().map(|t| t.id.as_str()).collect())
            .collect()
    }

    #[test]
    fn test_difficulty_sort_is_stable() {
        let categories = vec![Category::new("c", "C")
            .with_topic(topic("a", Difficulty::Advanced))
            .with_topic(topic("b", Difficulty::Beginner))
            .with_topic(topic("c", Difficulty::Beginner))
            .with_topic(topic("d", Difficulty::Intermediate))];

        let filtered = filter_categories(&categories, &TopicFilter::new());
        assert_eq!(ids(&filtered), vec![vec!["b", "c", "d", "a"]]);
    }

    #[test]
    fn test_query_does_not_match_inside_words() {
        let categories = vec![Category::new("c", "C").with_topic(
            Topic::new("t", "Grouping", "Items are grouped", Difficulty::Beginner)
                .with_tag("category"),
        )];

        let filtered = filter_categories(&categories, &TopicFilter::new().with_query("cat"));
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_query_matches_tag_case_insensitively() {
        let categories = vec![Category::new("c", "C").with_topic(
            Topic::new("t", "Components", "UI building blocks", Difficulty::Beginner)
                .with_tag("react"),
        )];

        let filtered = filter_categories(&categories, &TopicFilter::new().with_query("React"));
        assert_eq!(ids(&filtered), vec![vec!["t"]]);
    }

    #[test]
    fn test_single_character_query_word() {
        let categories = vec![Category::new("c", "C")
            .with_topic(Topic::new("x", "Axis x", "Coordinates", Difficulty::Beginner))
            .with_topic(Topic::new("y", "Box", "Model", Difficulty::Beginner))];

        let filtered = filter_categories(&categories, &TopicFilter::new().with_query("x"));
        assert_eq!(ids(&filtered), vec![vec!["x"]]);
    }

    #[test]
    fn test_tags_are_or_and_combine_with_difficulty() {
        let categories = vec![Category::new("c", "C")
            .with_topic(topic("a", Difficulty::Beginner).with_tag("dom"))
            .with_topic(topic("b", Difficulty::Advanced).with_tag("events"))
            .with_topic(topic("c", Difficulty::Beginner).with_tag("Events"))
            .with_topic(topic("d", Difficulty::Beginner).with_tag("css"))];

        let by_tags = TopicFilter::new().with_tag("dom").with_tag("events");
        assert_eq!(ids(&filter_categories(&categories, &by_tags)), vec![vec!["a", "c", "b"]]);

        let beginner = by_tags.with_difficulty(Difficulty::Beginner);
        assert_eq!(ids(&filter_categories(&categories, &beginner)), vec![vec!["a", "c"]]);
    }

    #[test]
    fn test_tag_set_built_directly_matches_case_insensitively() {
        let filter = TopicFilter {
            tags: BTreeSet::from(["React".to_string()]),
            ..TopicFilter::new()
        };
        let topic = topic("hooks", Difficulty::Beginner).with_tag("react");

        assert!(filter.matches(&topic));
    }

    #[test]
    fn test_empty_categories_are_pruned() {
        let categories = vec![
            Category::new("one", "One").with_topic(topic("a", Difficulty::Beginner).with_tag("keep")),
            Category::new("two", "Two").with_topic(topic("b", Difficulty::Beginner)),
            Category::new("three", "Three").with_topic(topic("c", Difficulty::Beginner).with_tag("keep")),
        ];

        let filtered = filter_categories(&categories, &TopicFilter::new().with_tag("keep"));
        let category_ids: Vec<_> = filtered.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(category_ids, vec!["one", "three"]);
    }

    #[test]
    fn test_collect_tags_and_count() {
        let categories = vec![Category::new("c", "C")
            .with_topic(topic("a", Difficulty::Beginner).with_tags(["DOM", "events"]))
            .with_topic(topic("b", Difficulty::Beginner).with_tag("dom"))];

        assert_eq!(collect_tags(&categories), vec!["dom", "events"]);
        assert_eq!(count_topics(&categories), 2);
    }
}
