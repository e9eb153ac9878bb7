//! Meta-categories: the top-level partitions of the catalog.
//!
//! Each meta-category is loaded lazily as one unit.

use serde::{Deserialize, Serialize};

use super::DomainError;

/// Identifier of a top-level subject area
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetaCategoryId {
    Javascript,
    Typescript,
    Markup,
    Frameworks,
    Architecture,
    Performance,
    Security,
    Testing,
    Tooling,
    Networking,
    Interview,
}

impl MetaCategoryId {
    /// Every meta-category, in catalog display order
    pub const ALL: [MetaCategoryId; 11] = [
        MetaCategoryId::Javascript,
        MetaCategoryId::Typescript,
        MetaCategoryId::Markup,
        MetaCategoryId::Frameworks,
        MetaCategoryId::Architecture,
        MetaCategoryId::Performance,
        MetaCategoryId::Security,
        MetaCategoryId::Testing,
        MetaCategoryId::Tooling,
        MetaCategoryId::Networking,
        MetaCategoryId::Interview,
    ];

    /// Stable string id (also the content file stem)
    pub fn as_str(self) -> &'static str {
        match self {
            MetaCategoryId::Javascript => "javascript",
            MetaCategoryId::Typescript => "typescript",
            MetaCategoryId::Markup => "markup",
            MetaCategoryId::Frameworks => "frameworks",
            MetaCategoryId::Architecture => "architecture",
            MetaCategoryId::Performance => "performance",
            MetaCategoryId::Security => "security",
            MetaCategoryId::Testing => "testing",
            MetaCategoryId::Tooling => "tooling",
            MetaCategoryId::Networking => "networking",
            MetaCategoryId::Interview => "interview",
        }
    }

    /// Human-readable title
    pub fn title(self) -> &'static str {
        match self {
            MetaCategoryId::Javascript => "JavaScript",
            MetaCategoryId::Typescript => "TypeScript",
            MetaCategoryId::Markup => "HTML & CSS",
            MetaCategoryId::Frameworks => "Frameworks",
            MetaCategoryId::Architecture => "Architecture",
            MetaCategoryId::Performance => "Performance",
            MetaCategoryId::Security => "Security",
            MetaCategoryId::Testing => "Testing",
            MetaCategoryId::Tooling => "Tooling",
            MetaCategoryId::Networking => "Networking",
            MetaCategoryId::Interview => "Interview Questions",
        }
    }
}

impl std::fmt::Display for MetaCategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MetaCategoryId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        MetaCategoryId::ALL
            .into_iter()
            .find(|id| id.as_str() == wanted)
            .ok_or_else(|| DomainError::UnknownMetaCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_category_round_trips_through_str() {
        for id in MetaCategoryId::ALL {
            assert_eq!(id.as_str().parse::<MetaCategoryId>().unwrap(), id);
        }
        assert_eq!("JavaScript".parse::<MetaCategoryId>().unwrap(), MetaCategoryId::Javascript);
    }

    #[test]
    fn test_unknown_meta_category() {
        let err = "cobol".parse::<MetaCategoryId>().unwrap_err();
        assert!(err.to_string().contains("cobol"));
    }

    #[test]
    fn test_serde_uses_lowercase_id() {
        let json = serde_json::to_string(&MetaCategoryId::Markup).unwrap();
        assert_eq!(json, "\"markup\"");
    }
}
