//! Relevance Integration Tests
//!
//! Tests for preview fragment boundaries, score additivity and related-topic
//! scoping.

use fekb::core::relevance::{
    extract_fragment, score, search_words, CATEGORY_WEIGHT, DESCRIPTION_WEIGHT, TAG_WEIGHT,
    TITLE_WEIGHT,
};
use fekb::core::{resolve_related, TopicFilter};
use fekb::domain::{Category, Difficulty, MetaCategoryId, Topic};

#[test]
fn test_fragment_of_short_description_has_no_ellipses() {
    let description = "Debounce delays a call until input has gone quiet.";
    assert_eq!(description.chars().count(), 50);

    let fragment = extract_fragment(description, &["input"], 80);
    assert_eq!(fragment.text, description);
    assert_eq!(fragment.found_word.as_deref(), Some("input"));
}

#[test]
fn test_fragment_near_end_keeps_only_leading_ellipsis() {
    let description = format!("{} throttle ends here", "filler ".repeat(40));
    let fragment = extract_fragment(&description, &["throttle"], 80);

    assert!(fragment.text.starts_with('…'));
    assert!(!fragment.text.ends_with('…'));
    assert!(fragment.text.ends_with("ends here"));
}

#[test]
fn test_fragment_miss_truncates_to_200_chars() {
    let description = "a".repeat(300);
    let fragment = extract_fragment(&description, &["missing"], 80);

    assert_eq!(fragment.text, format!("{}...", "a".repeat(200)));
    assert!(fragment.found_word.is_none());
}

#[test]
fn test_fragment_miss_on_short_text_is_untouched() {
    let fragment = extract_fragment("Short text", &["missing"], 80);
    assert_eq!(fragment.text, "Short text");
    assert!(fragment.found_word.is_none());
}

#[test]
fn test_fragment_with_unbounded_context_is_whole_description() {
    let fragment = extract_fragment("a needle here", &["needle"], usize::MAX);

    assert_eq!(fragment.text, "a needle here");
    assert_eq!(fragment.found_word.as_deref(), Some("needle"));
}

#[test]
fn test_fragment_handles_cyrillic() {
    let description = format!("{}Замыкание хранит окружение", "ж".repeat(100));
    let fragment = extract_fragment(&description, &["хранит"], 5);

    assert_eq!(fragment.found_word.as_deref(), Some("хранит"));
    assert_eq!(fragment.text, "…ание хранит окру…");
}

#[test]
fn test_fragment_search_word_order_beats_text_order() {
    let description = "Memoization caches results. Recursion calls itself.";
    let fragment = extract_fragment(description, &["recursion", "memoization"], 0);

    assert_eq!(fragment.found_word.as_deref(), Some("recursion"));
    assert_eq!(fragment.text, "…Recursion…");
}

#[test]
fn test_score_all_signals_is_28() {
    let topic = Topic::new(
        "react-hooks",
        "React hooks",
        "Hooks bring state to React function components.",
        Difficulty::Intermediate,
    )
    .with_tag("react");
    let category = Category::new("react", "React");
    let words = search_words::<&str>(Some("react"), &[]);

    assert_eq!(
        score(&topic, &category, MetaCategoryId::Frameworks, &words),
        TITLE_WEIGHT + CATEGORY_WEIGHT + DESCRIPTION_WEIGHT + TAG_WEIGHT
    );
    assert_eq!(score(&topic, &category, MetaCategoryId::Frameworks, &words), 28);
}

#[test]
fn test_score_tag_only_is_4() {
    let topic = Topic::new("memo", "Memoization", "Caching results of pure calls.", Difficulty::Advanced)
        .with_tag("performance-react");
    let category = Category::new("optimizations", "Optimizations");
    let words = search_words::<&str>(Some("react"), &[]);

    assert_eq!(score(&topic, &category, MetaCategoryId::Frameworks, &words), 4);
}

#[test]
fn test_score_uses_reference_words_when_query_is_short() {
    let topic = Topic::new("xss", "Cross-site scripting", "Injected scripts", Difficulty::Intermediate)
        .with_tag("injection");
    let category = Category::new("attacks", "Attacks");
    let reference = vec!["injection".to_string()];

    let words = search_words(Some("x"), &reference);
    assert_eq!(words, vec!["injection"]);
    assert_eq!(score(&topic, &category, MetaCategoryId::Security, &words), TAG_WEIGHT);
}

#[test]
fn test_related_topics_stay_within_meta_category() {
    let source = Topic::new("csp", "Content Security Policy", "Restricts sources", Difficulty::Advanced)
        .with_tag("headers");

    let security = vec![
        Category::new("policies", "Policies").with_topic(source.clone()),
        Category::new("transport", "Transport").with_topic(Topic::new(
            "hsts",
            "HSTS",
            "Force HTTPS",
            Difficulty::Intermediate,
        )),
    ];
    let networking = vec![Category::new("http-headers", "HTTP Headers").with_topic(Topic::new(
        "cache-control",
        "Cache-Control",
        "Caching directives",
        Difficulty::Beginner,
    ))];

    // Caller passes only the topic's own meta-category
    assert!(resolve_related(&source, &security).is_empty());

    // The same tag would match a networking category if it were passed in
    assert_eq!(resolve_related(&source, &networking), vec!["cache-control"]);
}

#[test]
fn test_filter_state_accessors() {
    let filter = TopicFilter::new();
    assert!(filter.is_empty());

    let filter = filter.with_query("dom").with_tag("Events");
    assert!(!filter.is_empty());
    assert!(filter.tags.contains("events"));

    let topic = Topic::new("delegation", "Event delegation", "DOM listener trick", Difficulty::Beginner)
        .with_tag("events");
    assert!(filter.matches(&topic));
}
