//! Keyword-table intent classification

use sophia_domain::Intent;

/// Keyword table walked in declared order; the first intent with a match wins
///
/// "describe" appears under both analyze and write, so it classifies as
/// analyze.
pub const INTENT_KEYWORDS: [(Intent, &[&str]); 8] = [
    (
        Intent::Brainstorm,
        &["brainstorm", "ideas", "suggest concepts", "what about", "could we"],
    ),
    (
        Intent::Organize,
        &["organize", "structure", "categorize", "arrange", "group"],
    ),
    (
        Intent::Analyze,
        &["analyze", "explain", "what is", "tell me about", "describe"],
    ),
    (
        Intent::Expand,
        &["expand", "grow", "add more", "elaborate", "develop"],
    ),
    (
        Intent::Connect,
        &["connect", "relate", "link", "relationship", "how does"],
    ),
    (
        Intent::Write,
        &["write", "compose", "create text", "draft", "describe"],
    ),
    (
        Intent::Evaluate,
        &["evaluate", "assess", "quality", "rate", "review"],
    ),
    (
        Intent::Search,
        &["find", "search", "look for", "locate", "show me"],
    ),
];

/// Classify an utterance by case-insensitive substring match
pub fn classify(text: &str) -> Intent {
    let lowered = text.to_lowercase();
    INTENT_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| lowered.contains(keyword)))
        .map(|(intent, _)| *intent)
        .unwrap_or(Intent::General)
}
