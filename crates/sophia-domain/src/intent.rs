//! Intent module - the closed set of utterance purposes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classified purpose of a user utterance
///
/// Every utterance maps to exactly one intent. `General` is the fallback when
/// no keyword matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    /// Generate new concepts around a topic
    Brainstorm,

    /// Restructure the current graph
    Organize,

    /// Explain a single subject
    Analyze,

    /// Grow an existing node
    Expand,

    /// Relate concepts to each other
    Connect,

    /// Produce prose about a topic
    Write,

    /// Score the current graph
    Evaluate,

    /// Look nodes up by text
    Search,

    /// Anything else
    General,
}

impl Intent {
    /// All intents, in classification order, with `General` last
    pub const ALL: [Intent; 9] = [
        Intent::Brainstorm,
        Intent::Organize,
        Intent::Analyze,
        Intent::Expand,
        Intent::Connect,
        Intent::Write,
        Intent::Evaluate,
        Intent::Search,
        Intent::General,
    ];

    /// Get the intent name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Brainstorm => "brainstorm",
            Intent::Organize => "organize",
            Intent::Analyze => "analyze",
            Intent::Expand => "expand",
            Intent::Connect => "connect",
            Intent::Write => "write",
            Intent::Evaluate => "evaluate",
            Intent::Search => "search",
            Intent::General => "general",
        }
    }

    /// Parse an intent from its name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        let lowered = s.to_lowercase();
        Self::ALL.into_iter().find(|intent| intent.as_str() == lowered)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Intent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid intent: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for intent in Intent::ALL {
            assert_eq!(Intent::parse(intent.as_str()), Some(intent));
        }
        assert_eq!(Intent::parse("SEARCH"), Some(Intent::Search));
        assert_eq!(Intent::parse("chat"), None);
    }

    #[test]
    fn test_serde_name() {
        let json = serde_json::to_string(&Intent::Evaluate).unwrap();
        assert_eq!(json, "\"evaluate\"");
    }
}
