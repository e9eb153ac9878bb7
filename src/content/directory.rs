//! File-backed content source.
//!
//! Each meta-category lives in one file named after its id:
//!
//! ```text
//! content/
//! ├── javascript.json     # [Category, ...]
//! └── markup.yaml         # YAML is accepted as well
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::CategorySource;
use crate::domain::{Category, MetaCategoryId};

const EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

/// Reads `<dir>/<meta-category>.{json,yaml,yml}`
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// First existing content file for an id
    pub fn content_path(&self, id: MetaCategoryId) -> Option<PathBuf> {
        EXTENSIONS
            .iter()
            .map(|ext| self.dir.join(format!("{}.{}", id.as_str(), ext)))
            .find(|p| p.exists())
    }

    /// Check if a content file exists for an id
    pub fn has_content(&self, id: MetaCategoryId) -> bool {
        self.content_path(id).is_some()
    }
}

/// Parse a content file according to its extension
fn parse_categories(path: &Path, raw: &str) -> Result<Vec<Category>> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(raw)
            .with_context(|| format!("Failed to parse content YAML: {}", path.display())),
        _ => serde_json::from_str(raw)
            .with_context(|| format!("Failed to parse content JSON: {}", path.display())),
    }
}

#[async_trait]
impl CategorySource for DirectorySource {
    fn name(&self) -> &str {
        "directory"
    }

    async fn load(&self, id: MetaCategoryId) -> Result<Vec<Category>> {
        let path = self.content_path(id).with_context(|| {
            format!(
                "No content file for '{}' in {}",
                id,
                self.dir.display()
            )
        })?;

        let raw = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read content file: {}", path.display()))?;

        let categories = parse_categories(&path, &raw)?;
        debug!(meta = %id, path = %path.display(), categories = categories.len(), "Content file parsed");

        Ok(categories)
    }
}
