//! Unicode-aware word matching.
//!
//! A "word character" is any Unicode letter or digit, or `_`. Whole-word
//! matches are bounded on both sides by a non-word character or the end of
//! the text, so Latin and Cyrillic text behave the same way. All positions
//! are measured in chars, not bytes.

/// Check if a character belongs to a word
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Location of a whole-word match, in chars
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordMatch {
    pub start: usize,
    pub len: usize,
}

impl WordMatch {
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Lowercase char by char so positions stay aligned with the source text
pub(crate) fn lower_chars(s: &str) -> Vec<char> {
    s.chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect()
}

/// First case-insensitive whole-word occurrence of `needle` in `haystack`
pub fn find_whole_word(haystack: &str, needle: &str) -> Option<WordMatch> {
    let needle = lower_chars(needle.trim());
    if needle.is_empty() {
        return None;
    }

    let hay = lower_chars(haystack);
    if needle.len() > hay.len() {
        return None;
    }

    (0..=hay.len() - needle.len()).find_map(|start| {
        let end = start + needle.len();
        if hay[start..end] != needle[..] {
            return None;
        }

        let bounded_before = start == 0 || !is_word_char(hay[start - 1]);
        let bounded_after = end == hay.len() || !is_word_char(hay[end]);

        (bounded_before && bounded_after).then_some(WordMatch {
            start,
            len: needle.len(),
        })
    })
}

/// Check if `needle` occurs in `haystack` as a whole word
pub fn contains_whole_word(haystack: &str, needle: &str) -> bool {
    find_whole_word(haystack, needle).is_some()
}

/// Lowercase and keep only word characters, whitespace and hyphens
pub fn normalize_search_word(word: &str) -> String {
    lower_chars(word)
        .into_iter()
        .filter(|&c| is_word_char(c) || c.is_whitespace() || c == '-')
        .collect()
}

/// Split a free-text query into lowercase words of at least `min_len` chars
pub fn query_words(query: &str, min_len: usize) -> Vec<String> {
    query
        .split_whitespace()
        .map(|w| lower_chars(w).into_iter().collect::<String>())
        .filter(|w| w.chars().count() >= min_len)
        .collect()
}

/// Lowercase, strip punctuation, and split on whitespace, hyphens and underscores
pub fn normalize_tokens(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|&c| c.is_alphanumeric() || c.is_whitespace() || c == '-' || c == '_')
        .collect();

    cleaned
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
