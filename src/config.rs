//! Configuration for fekb.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (FEKB_HOME, FEKB_CONTENT_DIR)
//! 2. Config file (.fekb/config.yaml)
//! 3. Defaults (~/.fekb for state, ./content for the catalog)
//!
//! Config file discovery:
//! - Searches current directory and parents for .fekb/config.yaml
//! - Relative paths in the config file resolve against the project root
//!   (the directory containing .fekb/)

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::relevance::{DEFAULT_CONTEXT_LENGTH, DEFAULT_PREVIEW_LENGTH};
use crate::core::SearchOptions;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub search: Option<SearchConfig>,
    #[serde(default)]
    pub related: Option<RelatedConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// Study state directory
    pub home: Option<String>,
    /// Catalog content directory
    pub content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    pub context_length: Option<usize>,
    pub preview_length: Option<usize>,
    pub result_limit: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelatedConfig {
    pub limit: Option<usize>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Study state directory (learned topics, notes)
    pub home: PathBuf,
    /// Catalog content directory
    pub content: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    pub search: SearchSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    pub context_length: usize,
    pub preview_length: usize,
    pub result_limit: usize,
    pub related_limit: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            context_length: DEFAULT_CONTEXT_LENGTH,
            preview_length: DEFAULT_PREVIEW_LENGTH,
            result_limit: 20,
            related_limit: 10,
        }
    }
}

impl SearchSettings {
    /// Search options with an optional per-call limit override
    pub fn options(&self, limit: Option<usize>) -> SearchOptions {
        SearchOptions {
            context_length: self.context_length,
            preview_length: self.preview_length,
            limit: Some(limit.unwrap_or(self.result_limit)),
        }
    }

    fn apply(mut self, search: Option<&SearchConfig>, related: Option<&RelatedConfig>) -> Self {
        if let Some(search) = search {
            self.context_length = search.context_length.unwrap_or(self.context_length);
            self.preview_length = search.preview_length.unwrap_or(self.preview_length);
            self.result_limit = search.result_limit.unwrap_or(self.result_limit);
        }
        if let Some(limit) = related.and_then(|r| r.limit) {
            self.related_limit = limit;
        }
        self
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".fekb").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to a base directory
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}

/// Build the resolved configuration from an optional config file
fn resolve(config_file: Option<PathBuf>) -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".fekb");
    let default_content = PathBuf::from("content");

    let parsed = config_file.as_deref().map(load_config_file).transpose()?;

    // Project root is the parent of .fekb/
    let base_dir = config_file
        .as_deref()
        .and_then(Path::parent)
        .and_then(Path::parent)
        .unwrap_or(Path::new("."));

    let home = env_path("FEKB_HOME")
        .or_else(|| {
            parsed
                .as_ref()
                .and_then(|c| c.paths.home.as_deref())
                .map(|p| resolve_path(base_dir, p))
        })
        .unwrap_or(default_home);

    let content = env_path("FEKB_CONTENT_DIR")
        .or_else(|| {
            parsed
                .as_ref()
                .and_then(|c| c.paths.content.as_deref())
                .map(|p| resolve_path(base_dir, p))
        })
        .unwrap_or(default_content);

    let search = SearchSettings::default().apply(
        parsed.as_ref().and_then(|c| c.search.as_ref()),
        parsed.as_ref().and_then(|c| c.related.as_ref()),
    );

    Ok(ResolvedConfig {
        home,
        content,
        config_file,
        search,
    })
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    resolve(find_config_file())
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{:#}", e)));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Get the study state directory
pub fn fekb_home() -> Result<PathBuf> {
    Ok(config()?.home.clone())
}

/// Get the catalog content directory
pub fn content_dir() -> Result<PathBuf> {
    Ok(config()?.content.clone())
}
