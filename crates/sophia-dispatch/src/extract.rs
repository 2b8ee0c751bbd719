//! Fixed-pattern extraction of topics, subjects, and queries from utterances

use regex::Regex;
use sophia_domain::GraphDocument;
use std::sync::OnceLock;

/// Terms recognised as a brainstorm or write topic
pub const PHILOSOPHICAL_TERMS: [&str; 15] = [
    "nihiltheism",
    "existential",
    "anxiety",
    "void",
    "nothingness",
    "transcendence",
    "meaninglessness",
    "despair",
    "absurd",
    "divine",
    "nietzsche",
    "heidegger",
    "cioran",
    "suffering",
    "death",
];

/// Topic used when no recognised term appears
pub const DEFAULT_TOPIC: &str = "philosophical concepts";

/// Subject used when no analysis pattern matches
pub const DEFAULT_SUBJECT: &str = "this concept";

/// Expansion target used when no node label appears in the utterance
pub const DEFAULT_TARGET: &str = "the graph";

/// Most concept tokens taken from one utterance
pub const MAX_CONCEPTS: usize = 5;

const PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':'];

const SUBJECT_PATTERNS: [&str; 4] = [
    r"(?i)analyze\s+(\w+)",
    r"(?i)what is\s+(\w+)",
    r"(?i)tell me about\s+(\w+)",
    r"(?i)explain\s+(\w+)",
];

const QUERY_PATTERNS: [&str; 4] = [
    r"(?i)find\s+(.+)",
    r"(?i)search\s+(?:for\s+)?(.+)",
    r"(?i)look for\s+(.+)",
    r"(?i)show me\s+(.+)",
];

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|pattern| Regex::new(pattern).ok())
        .collect()
}

fn subject_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| compile(&SUBJECT_PATTERNS))
}

fn query_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| compile(&QUERY_PATTERNS))
}

/// First capture group of the first pattern that matches
fn first_capture<'t>(patterns: &[Regex], text: &'t str) -> Option<&'t str> {
    patterns
        .iter()
        .find_map(|pattern| pattern.captures(text))
        .and_then(|captures| captures.get(1))
        .map(|group| group.as_str())
}

/// Strip leading and trailing `.,!?;:`
pub fn trim_punctuation(text: &str) -> &str {
    text.trim_matches(PUNCTUATION)
}

/// Capitalise the first letter of every alphabetic run, lowercase the rest
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// First whitespace token that is a recognised term, lowercased
pub fn extract_topic(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .find(|word| PHILOSOPHICAL_TERMS.contains(&word.as_str()))
        .unwrap_or_else(|| DEFAULT_TOPIC.to_string())
}

/// Word following "analyze", "what is", "tell me about", or "explain"
pub fn extract_subject(text: &str) -> String {
    first_capture(subject_patterns(), text)
        .unwrap_or(DEFAULT_SUBJECT)
        .to_string()
}

/// Label of the first node whose label occurs in the utterance
pub fn extract_expansion_target(text: &str, graph: Option<&GraphDocument>) -> String {
    let lowered = text.to_lowercase();
    graph
        .into_iter()
        .flat_map(|graph| graph.nodes.iter())
        .find(|node| !node.label.is_empty() && lowered.contains(&node.label.to_lowercase()))
        .map(|node| node.label.clone())
        .unwrap_or_else(|| DEFAULT_TARGET.to_string())
}

/// Capitalised or long (more than eight characters) tokens, at most five
pub fn extract_concepts(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(trim_punctuation)
        .filter(|token| {
            token.chars().next().is_some_and(char::is_uppercase) || token.chars().count() > 8
        })
        .take(MAX_CONCEPTS)
        .map(str::to_string)
        .collect()
}

/// Text after "find", "search [for]", "look for", or "show me"; else the whole utterance
pub fn extract_search_query(text: &str) -> String {
    match first_capture(query_patterns(), text) {
        Some(query) => trim_punctuation(query).to_string(),
        None => text.to_string(),
    }
}
