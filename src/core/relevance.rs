//! Relevance scoring and preview fragments.
//!
//! Search hits are ranked by an additive score over four independent
//! signals (title, category, description, tags). Previews show the part of
//! the description around the first matching search word instead of the
//! opening text.

use tracing::debug;

use crate::domain::{Category, MetaCategoryId, Topic};

use super::cache::Categories;
use super::text::{contains_whole_word, find_whole_word, normalize_search_word};

/// Score for a search word in the topic title
pub const TITLE_WEIGHT: u32 = 10;
/// Score for a search word in the category or meta-category title/id
pub const CATEGORY_WEIGHT: u32 = 8;
/// Score for a search word in the description
pub const DESCRIPTION_WEIGHT: u32 = 6;
/// Score for a search word in a tag
pub const TAG_WEIGHT: u32 = 4;

/// Chars of context kept on each side of a match
pub const DEFAULT_CONTEXT_LENGTH: usize = 80;
/// Chars shown when no search word occurs in the description
pub const DEFAULT_PREVIEW_LENGTH: usize = 200;
/// Search words shorter than this are ignored
pub const MIN_SEARCH_WORD_LEN: usize = 3;

const CLIPPED: &str = "…";
const TRUNCATED: &str = "...";

/// Preview text cut from a description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,

    /// Normalized search word the fragment is centred on
    pub found_word: Option<String>,
}

/// Extract a preview around the first matching search word
///
/// Search words are tried in the given order and the first one occurring
/// anywhere in the description wins, even if a later word occurs earlier in
/// the text.
pub fn extract_fragment<S: AsRef<str>>(description: &str, words: &[S], context_length: usize) -> Fragment {
    extract_fragment_with(description, words, context_length, DEFAULT_PREVIEW_LENGTH)
}

/// `extract_fragment` with an explicit fallback preview length
pub fn extract_fragment_with<S: AsRef<str>>(
    description: &str,
    words: &[S],
    context_length: usize,
    preview_length: usize,
) -> Fragment {
    let chars: Vec<char> = description.chars().collect();

    let found = words
        .iter()
        .map(|w| normalize_search_word(w.as_ref()))
        .filter(|w| !w.trim().is_empty())
        .find_map(|w| find_whole_word(description, &w).map(|m| (w, m)));

    let Some((word, m)) = found else {
        let text = if chars.len() > preview_length {
            let head: String = chars[..preview_length].iter().collect();
            format!("{}{}", head, TRUNCATED)
        } else {
            description.to_string()
        };
        return Fragment {
            text,
            found_word: None,
        };
    };

    let start = m.start.saturating_sub(context_length);
    let end = m.end().saturating_add(context_length).min(chars.len());

    let mut text = String::new();
    if start > 0 {
        text.push_str(CLIPPED);
    }
    text.extend(&chars[start..end]);
    if end < chars.len() {
        text.push_str(CLIPPED);
    }

    Fragment {
        text,
        found_word: Some(word),
    }
}

/// Derive search words from a query, falling back to reference words
///
/// A query counts only when it has at least three chars after trimming.
/// Either way, words shorter than three chars are dropped.
pub fn search_words<S: AsRef<str>>(query: Option<&str>, reference: &[S]) -> Vec<String> {
    let normalize = |raw: &str| -> Option<String> {
        let word = normalize_search_word(raw).trim().to_string();
        (word.chars().count() >= MIN_SEARCH_WORD_LEN).then_some(word)
    };

    if let Some(query) = query.map(str::trim) {
        if query.chars().count() >= MIN_SEARCH_WORD_LEN {
            let words: Vec<String> = query.split_whitespace().filter_map(normalize).collect();
            if !words.is_empty() {
                return words;
            }
        }
    }

    reference.iter().filter_map(|w| normalize(w.as_ref())).collect()
}

/// Score a topic against search words (0 when `words` is empty)
pub fn score(topic: &Topic, category: &Category, meta: MetaCategoryId, words: &[String]) -> u32 {
    if words.is_empty() {
        return 0;
    }

    let any = |text: &str| words.iter().any(|w| contains_whole_word(text, w));

    let mut total = 0;
    if any(&topic.title) {
        total += TITLE_WEIGHT;
    }
    if any(&category.title) || any(&category.id) || any(meta.title()) || any(meta.as_str()) {
        total += CATEGORY_WEIGHT;
    }
    if extract_fragment(&topic.description, words, DEFAULT_CONTEXT_LENGTH)
        .found_word
        .is_some()
    {
        total += DESCRIPTION_WEIGHT;
    }
    if topic.tags.iter().any(|tag| any(tag)) {
        total += TAG_WEIGHT;
    }

    total
}

/// Tuning knobs for content search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub context_length: usize,
    pub preview_length: usize,

    /// Maximum number of hits (None = unlimited)
    pub limit: Option<usize>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            context_length: DEFAULT_CONTEXT_LENGTH,
            preview_length: DEFAULT_PREVIEW_LENGTH,
            limit: None,
        }
    }
}

/// A ranked search result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub meta: MetaCategoryId,
    pub category_id: String,
    pub category_title: String,
    pub topic: Topic,
    pub score: u32,
    pub fragment: Fragment,
}

/// Score every topic except `skip`, keep positive scores, rank by score
fn rank(
    groups: &[(MetaCategoryId, Categories)],
    words: &[String],
    skip: Option<&str>,
    opts: &SearchOptions,
) -> Vec<SearchHit> {
    if words.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<SearchHit> = groups
        .iter()
        .flat_map(|(meta, categories)| {
            categories
                .iter()
                .flat_map(move |c| c.topics.iter().map(move |t| (*meta, c, t)))
        })
        .filter(|(_, _, topic)| skip != Some(topic.id.as_str()))
        .filter_map(|(meta, category, topic)| {
            let score = score(topic, category, meta, words);
            (score > 0).then(|| SearchHit {
                meta,
                category_id: category.id.clone(),
                category_title: category.title.clone(),
                topic: topic.clone(),
                score,
                fragment: extract_fragment_with(
                    &topic.description,
                    words,
                    opts.context_length,
                    opts.preview_length,
                ),
            })
        })
        .collect();

    // Stable: equal scores keep enumeration order
    hits.sort_by(|a, b| b.score.cmp(&a.score));

    if let Some(limit) = opts.limit {
        hits.truncate(limit);
    }

    hits
}

/// Full-text search across loaded meta-categories
pub fn search(groups: &[(MetaCategoryId, Categories)], query: &str, opts: &SearchOptions) -> Vec<SearchHit> {
    let words = search_words::<&str>(Some(query), &[]);
    let hits = rank(groups, &words, None, opts);
    debug!(query, words = ?words, hits = hits.len(), "Content search");
    hits
}

/// Topics ranked by relevance to another topic's tags
pub fn related_by_tags(
    topic: &Topic,
    groups: &[(MetaCategoryId, Categories)],
    limit: usize,
) -> Vec<SearchHit> {
    let words = search_words(None, &topic.tags);
    let opts = SearchOptions {
        limit: Some(limit),
        ..Default::default()
    };
    rank(groups, &words, Some(&topic.id), &opts)
}
