//! Learned-topics record.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::{Category, MetaCategoryId};

/// Topic ids the user marked as learned, per meta-category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LearnedTopics {
    by_meta: BTreeMap<MetaCategoryId, BTreeSet<String>>,
}

/// Completion of one meta-category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub learned: usize,
    pub total: usize,
}

impl Progress {
    /// Rounded completion percentage (0 when there is nothing to learn)
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.learned * 100 + self.total / 2) / self.total) as u8
    }
}

impl LearnedTopics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip a topic's learned flag; returns the new state
    pub fn toggle(&mut self, meta: MetaCategoryId, topic_id: &str) -> bool {
        let learned = self.by_meta.entry(meta).or_default();

        let now_learned = if learned.remove(topic_id) {
            false
        } else {
            learned.insert(topic_id.to_string());
            true
        };

        if learned.is_empty() {
            self.by_meta.remove(&meta);
        }

        now_learned
    }

    /// Check if a topic is marked as learned
    pub fn is_learned(&self, meta: MetaCategoryId, topic_id: &str) -> bool {
        self.by_meta
            .get(&meta)
            .is_some_and(|ids| ids.contains(topic_id))
    }

    /// Learned topic ids of a meta-category, sorted
    pub fn learned_in(&self, meta: MetaCategoryId) -> Vec<&str> {
        self.by_meta
            .get(&meta)
            .map(|ids| ids.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Forget everything learned in one meta-category
    pub fn clear_category(&mut self, meta: MetaCategoryId) -> usize {
        self.by_meta.remove(&meta).map(|ids| ids.len()).unwrap_or(0)
    }

    /// Forget everything
    pub fn clear_all(&mut self) -> usize {
        let count = self.total_learned();
        self.by_meta.clear();
        count
    }

    /// Number of learned topics across all meta-categories
    pub fn total_learned(&self) -> usize {
        self.by_meta.values().map(BTreeSet::len).sum()
    }

    /// Completion against the topics that currently exist
    ///
    /// Learned ids no longer present in the catalog are not counted.
    pub fn progress(&self, meta: MetaCategoryId, categories: &[Category]) -> Progress {
        let total = categories.iter().map(|c| c.topics.len()).sum();
        let learned = categories
            .iter()
            .flat_map(|c| c.topics.iter())
            .filter(|t| self.is_learned(meta, &t.id))
            .count();

        Progress { learned, total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Difficulty, Topic};

    #[test]
    fn test_toggle_round_trip() {
        let mut learned = LearnedTopics::new();

        assert!(learned.toggle(MetaCategoryId::Javascript, "closures"));
        assert!(learned.is_learned(MetaCategoryId::Javascript, "closures"));
        assert!(!learned.is_learned(MetaCategoryId::Markup, "closures"));

        assert!(!learned.toggle(MetaCategoryId::Javascript, "closures"));
        assert!(!learned.is_learned(MetaCategoryId::Javascript, "closures"));
        assert_eq!(learned, LearnedTopics::new());
    }

    #[test]
    fn test_clear_category_and_all() {
        let mut learned = LearnedTopics::new();
        learned.toggle(MetaCategoryId::Javascript, "a");
        learned.toggle(MetaCategoryId::Javascript, "b");
        learned.toggle(MetaCategoryId::Security, "xss");

        assert_eq!(learned.clear_category(MetaCategoryId::Javascript), 2);
        assert_eq!(learned.learned_in(MetaCategoryId::Security), vec!["xss"]);
        assert_eq!(learned.clear_all(), 1);
        assert_eq!(learned.total_learned(), 0);
    }

    #[test]
    fn test_progress_ignores_unknown_ids() {
        let categories = vec![Category::new("c", "C")
            .with_topic(Topic::new("a", "A", "", Difficulty::Beginner))
            .with_topic(Topic::new("b", "B", "", Difficulty::Beginner))
            .with_topic(Topic::new("c", "C", "", Difficulty::Beginner))];

        let mut learned = LearnedTopics::new();
        learned.toggle(MetaCategoryId::Javascript, "a");
        learned.toggle(MetaCategoryId::Javascript, "removed-topic");

        let progress = learned.progress(MetaCategoryId::Javascript, &categories);
        assert_eq!(progress, Progress { learned: 1, total: 3 });
        assert_eq!(progress.percent(), 33);
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let mut learned = LearnedTopics::new();
        learned.toggle(MetaCategoryId::Markup, "flexbox");

        let json = serde_json::to_string(&learned).unwrap();
        assert_eq!(json, r#"{"markup":["flexbox"]}"#);

        let back: LearnedTopics = serde_json::from_str(&json).unwrap();
        assert_eq!(back, learned);
    }
}
