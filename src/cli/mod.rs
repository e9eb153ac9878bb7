//! Command-line interface for fekb.
//!
//! Provides commands for browsing the catalog, filtering topic listings,
//! searching content, following related topics, and tracking study
//! progress and notes.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config;
use crate::content::ContentRegistry;
use crate::core::{
    collect_tags, count_topics, filter_categories, related_by_tags, resolve_related, search,
    CategoryCache, SearchHit, TopicFilter,
};
use crate::domain::{find_topic, DifficultyFilter, MetaCategoryId};
use crate::progress::{self, LearnedTopics};

pub mod notes;

/// fekb - Frontend knowledge base
#[derive(Parser, Debug)]
#[command(name = "fekb")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Catalog content directory (overrides config)
    #[arg(long, global = true, env = "FEKB_CONTENT_DIR")]
    pub content: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List meta-categories
    Metas,

    /// List the topics of a meta-category
    Topics {
        /// Meta-category id (e.g. javascript, markup)
        meta: MetaCategoryId,

        /// Free-text filter (whole words, any word matches)
        #[arg(short, long, default_value = "")]
        query: String,

        /// Difficulty filter (beginner, intermediate, advanced, all)
        #[arg(short, long, default_value = "all")]
        difficulty: DifficultyFilter,

        /// Required tag (repeatable; any tag matches)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// List the available tags instead of topics
        #[arg(long)]
        list_tags: bool,
    },

    /// Show a topic
    Show {
        meta: MetaCategoryId,
        topic_id: String,
    },

    /// Search topic content
    Search {
        /// Search query
        query: String,

        /// Restrict to meta-categories (repeatable; default all)
        #[arg(short, long = "meta")]
        metas: Vec<MetaCategoryId>,

        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show topics related to a topic
    Related {
        meta: MetaCategoryId,
        topic_id: String,
    },

    /// Toggle a topic's learned flag
    Learn {
        meta: MetaCategoryId,
        topic_id: String,
    },

    /// Show study progress
    Progress {
        /// Only this meta-category
        #[arg(short, long)]
        meta: Option<MetaCategoryId>,
    },

    /// Forget learned topics
    Reset {
        /// Only this meta-category (default: everything)
        #[arg(short, long)]
        meta: Option<MetaCategoryId>,
    },

    /// Manage study notes
    Notes {
        #[command(subcommand)]
        command: notes::NotesCommands,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let content_dir = match self.content {
            Some(dir) => dir,
            None => config::content_dir()?,
        };
        let cache = CategoryCache::new(ContentRegistry::from_directory(&content_dir));

        match self.command {
            Commands::Metas => list_metas(&cache).await,
            Commands::Topics {
                meta,
                query,
                difficulty,
                tags,
                list_tags,
            } => {
                let filter = tags
                    .into_iter()
                    .fold(TopicFilter::new().with_query(query).with_difficulty(difficulty), |f, t| {
                        f.with_tag(t)
                    });
                list_topics(&cache, meta, &filter, list_tags).await
            }
            Commands::Show { meta, topic_id } => show_topic(&cache, meta, &topic_id).await,
            Commands::Search {
                query,
                metas,
                limit,
            } => search_content(&cache, &query, metas, limit).await,
            Commands::Related { meta, topic_id } => show_related(&cache, meta, &topic_id).await,
            Commands::Learn { meta, topic_id } => toggle_learned(&cache, meta, &topic_id).await,
            Commands::Progress { meta } => show_progress(&cache, meta).await,
            Commands::Reset { meta } => reset_progress(meta),
            Commands::Notes { command } => notes::execute(command),
            Commands::Config => show_config(&content_dir),
        }
    }
}

/// Load a meta-category, attaching the id to any failure
async fn load(cache: &CategoryCache, meta: MetaCategoryId) -> Result<crate::core::Categories> {
    cache
        .load(meta)
        .await
        .with_context(|| format!("Cannot open meta-category '{}'", meta))
}

fn learned_topics() -> Result<LearnedTopics> {
    let home = config::fekb_home()?;
    Ok(progress::learned_store(&home).load()?)
}

/// List meta-categories and their availability
async fn list_metas(cache: &CategoryCache) -> Result<()> {
    let registered = cache.registry().registered();

    println!("{:<14} {:<22} {:<8}", "ID", "TITLE", "TOPICS");
    println!("{}", "-".repeat(46));

    for (meta, result) in cache.load_all(&registered).await {
        let topics = match result {
            Ok(categories) => count_topics(&categories).to_string(),
            Err(e) => {
                tracing::warn!(%meta, error = %e, "Skipping unreadable meta-category");
                "error".to_string()
            }
        };
        println!("{:<14} {:<22} {:<8}", meta.as_str(), meta.title(), topics);
    }

    let missing: Vec<_> = MetaCategoryId::ALL
        .into_iter()
        .filter(|id| !registered.contains(id))
        .map(MetaCategoryId::as_str)
        .collect();
    if !missing.is_empty() {
        println!("\nNo content for: {}", missing.join(", "));
    }

    Ok(())
}

/// List the filtered topics of a meta-category
async fn list_topics(
    cache: &CategoryCache,
    meta: MetaCategoryId,
    filter: &TopicFilter,
    list_tags: bool,
) -> Result<()> {
    let categories = load(cache, meta).await?;

    if list_tags {
        for tag in collect_tags(&categories) {
            println!("{}", tag);
        }
        return Ok(());
    }

    let filtered = filter_categories(&categories, filter);
    if filtered.is_empty() {
        println!("No topics match the current filter.");
        return Ok(());
    }

    let learned = learned_topics()?;

    for category in &filtered {
        println!("\n{} ({})", category.title, category.id);
        for topic in &category.topics {
            let mark = if learned.is_learned(meta, &topic.id) { "x" } else { " " };
            println!(
                "  [{}] {:<28} {:<13} {}",
                mark,
                topic.id,
                topic.difficulty.to_string(),
                topic.title
            );
        }
    }

    println!(
        "\n{} of {} topics shown",
        count_topics(&filtered),
        count_topics(&categories)
    );

    Ok(())
}

/// Show a single topic
async fn show_topic(cache: &CategoryCache, meta: MetaCategoryId, topic_id: &str) -> Result<()> {
    let categories = load(cache, meta).await?;
    let (category, topic) = find_topic(&categories, topic_id)
        .ok_or_else(|| anyhow::anyhow!("Topic not found in {}: {}", meta, topic_id))?;

    let learned = learned_topics()?;

    println!("{}", topic.title);
    println!("{}", "=".repeat(topic.title.chars().count()));
    println!("  ID: {}", topic.id);
    println!("  Category: {} / {}", meta.title(), category.title);
    println!("  Difficulty: {}", topic.difficulty);
    if !topic.tags.is_empty() {
        println!("  Tags: {}", topic.tags.join(", "));
    }
    println!("  Learned: {}", if learned.is_learned(meta, &topic.id) { "yes" } else { "no" });
    println!("\n{}", topic.description);

    if !topic.key_points.is_empty() {
        println!("\nKey points:");
        for point in &topic.key_points {
            println!("  - {}", point);
        }
    }

    for example in &topic.examples {
        println!("\n--- {} ---\n{}", example.title, example.code);
    }

    let related = resolve_related(topic, &categories);
    if !related.is_empty() {
        println!("\nRelated: {}", related.join(", "));
    }

    Ok(())
}

fn print_hits(hits: &[SearchHit]) {
    for hit in hits {
        println!(
            "\n[{:>2}] {} / {} / {}  ({})",
            hit.score, hit.meta, hit.category_id, hit.topic.id, hit.topic.title
        );
        println!("     {}", hit.fragment.text.replace('\n', " "));
    }
}

/// Search across meta-categories
async fn search_content(
    cache: &CategoryCache,
    query: &str,
    metas: Vec<MetaCategoryId>,
    limit: Option<usize>,
) -> Result<()> {
    let settings = &config::config()?.search;
    let metas = if metas.is_empty() {
        cache.registry().registered()
    } else {
        metas
    };

    let mut groups = Vec::new();
    for (meta, result) in cache.load_all(&metas).await {
        match result {
            Ok(categories) => groups.push((meta, categories)),
            Err(e) => eprintln!("Skipping {}: {}", meta, e),
        }
    }

    let hits = search(&groups, query, &settings.options(limit));
    if hits.is_empty() {
        println!("No results found for: {}", query);
        return Ok(());
    }

    println!("Found {} result(s) for \"{}\":", hits.len(), query);
    print_hits(&hits);

    Ok(())
}

/// Show explicit, category-discovered and tag-ranked related topics
async fn show_related(cache: &CategoryCache, meta: MetaCategoryId, topic_id: &str) -> Result<()> {
    let settings = &config::config()?.search;
    let categories = load(cache, meta).await?;
    let (_, topic) = find_topic(&categories, topic_id)
        .ok_or_else(|| anyhow::anyhow!("Topic not found in {}: {}", meta, topic_id))?;

    let related = resolve_related(topic, &categories);
    println!("Related to {} ({}):", topic.title, topic.id);
    if related.is_empty() {
        println!("  (none)");
    }
    for id in &related {
        match find_topic(&categories, id) {
            Some((category, t)) => println!("  {:<28} {} / {}", t.id, category.title, t.title),
            None => println!("  {:<28} (not in {})", id, meta),
        }
    }

    let suggestions = related_by_tags(topic, &[(meta, categories.clone())], settings.related_limit);
    if !suggestions.is_empty() {
        println!("\nSuggested by tags:");
        print_hits(&suggestions);
    }

    Ok(())
}

/// Toggle the learned flag of an existing topic
async fn toggle_learned(cache: &CategoryCache, meta: MetaCategoryId, topic_id: &str) -> Result<()> {
    let categories = load(cache, meta).await?;
    let (_, topic) = find_topic(&categories, topic_id)
        .ok_or_else(|| anyhow::anyhow!("Topic not found in {}: {}", meta, topic_id))?;

    let home = config::fekb_home()?;
    let now_learned = progress::learned_store(&home).update(|learned| learned.toggle(meta, &topic.id))?;

    if now_learned {
        println!("Marked as learned: {}", topic.title);
    } else {
        println!("Marked as not learned: {}", topic.title);
    }

    Ok(())
}

/// Show learned/total per meta-category
async fn show_progress(cache: &CategoryCache, meta: Option<MetaCategoryId>) -> Result<()> {
    let learned = learned_topics()?;
    let metas = match meta {
        Some(meta) => vec![meta],
        None => cache.registry().registered(),
    };

    println!("{:<14} {:>8} {:>8} {:>6}", "META", "LEARNED", "TOTAL", "%");
    println!("{}", "-".repeat(40));

    for (meta, result) in cache.load_all(&metas).await {
        let categories = result.with_context(|| format!("Cannot open meta-category '{}'", meta))?;
        let progress = learned.progress(meta, &categories);
        println!(
            "{:<14} {:>8} {:>8} {:>5}%",
            meta.as_str(),
            progress.learned,
            progress.total,
            progress.percent()
        );
    }

    Ok(())
}

/// Clear learned topics for one or all meta-categories
fn reset_progress(meta: Option<MetaCategoryId>) -> Result<()> {
    let home = config::fekb_home()?;
    let cleared = progress::learned_store(&home).update(|learned| match meta {
        Some(meta) => learned.clear_category(meta),
        None => learned.clear_all(),
    })?;

    match meta {
        Some(meta) => println!("Cleared {} learned topic(s) in {}", cleared, meta),
        None => println!("Cleared {} learned topic(s)", cleared),
    }

    Ok(())
}

/// Show the resolved configuration (for debugging)
fn show_config(content_dir: &std::path::Path) -> Result<()> {
    let cfg = config::config()?;

    println!("Config file: {}", cfg
        .config_file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none - using defaults)".to_string()));
    println!();
    println!("Paths:");
    println!("  Home (study state): {}", cfg.home.display());
    println!("  Content (catalog):  {}", content_dir.display());
    println!("  Learned topics:     {}", cfg.home.join(progress::LEARNED_TOPICS_FILE).display());
    println!("  Notes:              {}", cfg.home.join(progress::NOTES_FILE).display());
    println!();
    println!("Search:");
    println!("  Context length: {}", cfg.search.context_length);
    println!("  Preview length: {}", cfg.search.preview_length);
    println!("  Result limit:   {}", cfg.search.result_limit);
    println!("  Related limit:  {}", cfg.search.related_limit);

    Ok(())
}
