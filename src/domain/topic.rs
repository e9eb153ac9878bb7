//! Topic and category records.
//!
//! Topics are authored as static data and never mutated at runtime.

use serde::{Deserialize, Serialize};

use super::DomainError;

/// How hard a topic is to learn
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Entry level
    Beginner,

    /// Requires working knowledge
    Intermediate,

    /// Deep internals
    Advanced,
}

impl Difficulty {
    /// Sort rank (beginner=1, intermediate=2, advanced=3)
    pub fn rank(self) -> u8 {
        match self {
            Difficulty::Beginner => 1,
            Difficulty::Intermediate => 2,
            Difficulty::Advanced => 3,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Beginner => write!(f, "beginner"),
            Difficulty::Intermediate => write!(f, "intermediate"),
            Difficulty::Advanced => write!(f, "advanced"),
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            _ => Err(DomainError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// Difficulty constraint of a topic listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DifficultyFilter {
    /// No constraint
    #[default]
    All,

    /// Only topics of exactly this difficulty
    Only(Difficulty),
}

impl DifficultyFilter {
    /// Check whether a difficulty passes the filter
    pub fn accepts(self, difficulty: Difficulty) -> bool {
        match self {
            DifficultyFilter::All => true,
            DifficultyFilter::Only(wanted) => wanted == difficulty,
        }
    }
}

impl std::str::FromStr for DifficultyFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(DifficultyFilter::All)
        } else {
            s.parse().map(DifficultyFilter::Only)
        }
    }
}

impl From<Difficulty> for DifficultyFilter {
    fn from(d: Difficulty) -> Self {
        DifficultyFilter::Only(d)
    }
}

/// A titled code sample attached to a topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeExample {
    pub title: String,
    pub code: String,
}

/// A single learnable content unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    /// Unique topic identifier
    pub id: String,

    /// Display title
    pub title: String,

    /// Long-form description (searched and previewed)
    pub description: String,

    pub difficulty: Difficulty,

    /// Tags; order is irrelevant
    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub key_points: Vec<String>,

    #[serde(default)]
    pub examples: Vec<CodeExample>,

    /// Explicit authorial links to other topic ids
    #[serde(default)]
    pub related_topics: Vec<String>,
}

impl Topic {
    /// Create a topic with no tags, key points, examples or links
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            difficulty,
            tags: Vec::new(),
            key_points: Vec::new(),
            examples: Vec::new(),
            related_topics: Vec::new(),
        }
    }

    /// Add a tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Add multiple tags
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Add a key point
    pub fn with_key_point(mut self, point: impl Into<String>) -> Self {
        self.key_points.push(point.into());
        self
    }

    /// Add a code example
    pub fn with_example(mut self, title: impl Into<String>, code: impl Into<String>) -> Self {
        self.examples.push(CodeExample {
            title: title.into(),
            code: code.into(),
        });
        self
    }

    /// Add an explicit related topic link
    pub fn with_related(mut self, topic_id: impl Into<String>) -> Self {
        self.related_topics.push(topic_id.into());
        self
    }

    /// Case-insensitive tag membership
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == tag)
    }
}

/// A named, ordered grouping of topics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Stable category identifier
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub topics: Vec<Topic>,
}

impl Category {
    /// Create an empty category
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            topics: Vec::new(),
        }
    }

    /// Append a topic
    pub fn with_topic(mut self, topic: Topic) -> Self {
        self.topics.push(topic);
        self
    }

    /// Find a topic by id
    pub fn topic(&self, topic_id: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == topic_id)
    }
}

/// Find a topic (and its owning category) by id across categories
pub fn find_topic<'a>(categories: &'a [Category], topic_id: &str) -> Option<(&'a Category, &'a Topic)> {
    categories
        .iter()
        .find_map(|c| c.topic(topic_id).map(|t| (c, t)))
}
