//! Content store boundary.
//!
//! The catalog is partitioned by meta-category. Each partition is produced
//! by a `CategorySource` registered under its id; the core never cares how
//! the data is produced (bundled file, embedded data, remote fetch).

pub mod directory;

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Category, MetaCategoryId};

pub use directory::DirectorySource;

/// Errors surfaced when loading a meta-category
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    /// No source is registered for the id (a configuration bug, never retried)
    #[error("No content source registered for meta-category '{0}'")]
    UnregisteredSource(MetaCategoryId),

    /// The source rejected; nothing was cached, so the load may be retried
    #[error("Failed to load meta-category '{id}': {cause}")]
    Failed { id: MetaCategoryId, cause: String },
}

/// Asynchronous producer of one meta-category's categories
#[async_trait]
pub trait CategorySource: Send + Sync {
    /// Human-readable source name (for logging)
    fn name(&self) -> &str;

    /// Load every category of the meta-category
    async fn load(&self, id: MetaCategoryId) -> Result<Vec<Category>>;
}

/// In-memory source serving a fixed category list
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    categories: Vec<Category>,
}

impl StaticSource {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }
}

#[async_trait]
impl CategorySource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn load(&self, _id: MetaCategoryId) -> Result<Vec<Category>> {
        Ok(self.categories.clone())
    }
}

/// Lookup table from meta-category id to its source
#[derive(Clone, Default)]
pub struct ContentRegistry {
    sources: BTreeMap<MetaCategoryId, Arc<dyn CategorySource>>,
}

impl ContentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the source for an id
    pub fn register(&mut self, id: MetaCategoryId, source: Arc<dyn CategorySource>) {
        self.sources.insert(id, source);
    }

    /// Builder-style `register`
    pub fn with_source(mut self, id: MetaCategoryId, source: Arc<dyn CategorySource>) -> Self {
        self.register(id, source);
        self
    }

    /// Register a `DirectorySource` for every meta-category that has a content file
    pub fn from_directory(dir: impl Into<std::path::PathBuf>) -> Self {
        let source = Arc::new(DirectorySource::new(dir));
        let mut registry = Self::new();

        for id in MetaCategoryId::ALL {
            if source.has_content(id) {
                registry.register(id, source.clone());
            }
        }

        registry
    }

    /// Resolve the source for an id
    pub fn source_for(&self, id: MetaCategoryId) -> Result<Arc<dyn CategorySource>, LoadError> {
        self.sources
            .get(&id)
            .cloned()
            .ok_or(LoadError::UnregisteredSource(id))
    }

    /// Ids with a registered source, in catalog order
    pub fn registered(&self) -> Vec<MetaCategoryId> {
        self.sources.keys().copied().collect()
    }
}

impl std::fmt::Debug for ContentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.sources.iter().map(|(id, s)| (id, s.name())))
            .finish()
    }
}
