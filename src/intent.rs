//! Intent Matching
//!
//! Classifies an input string into one supported [`Operation`]. Two independent
//! matchers implement [`IntentMatcher`] and are tried in priority order: literal
//! CLI-style prefixes first, natural-language keyword sets second. Matching is a pure
//! function of the input and the static tables.

mod cli_prefix;
mod keywords;

pub use cli_prefix::CliPrefixMatcher;
pub use keywords::KeywordMatcher;
pub(crate) use keywords::{contains_word, subject_words, DESCRIBE_VERBS, LINK_VERBS, LIST_VERBS};

use crate::operation::Operation;
use serde::Serialize;

/// Which recognition strategy produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Cli,
    NaturalLanguage,
}

/// What the matcher learned about the input that the extractor needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParameterHints {
    pub strategy: Strategy,
    /// Number of leading whitespace tokens consumed by a CLI prefix (0 for natural language).
    pub consumed_tokens: usize,
}

impl ParameterHints {
    pub fn natural_language() -> Self {
        Self {
            strategy: Strategy::NaturalLanguage,
            consumed_tokens: 0,
        }
    }

    pub fn cli(consumed_tokens: usize) -> Self {
        Self {
            strategy: Strategy::Cli,
            consumed_tokens,
        }
    }
}

/// A recognized operation together with its hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntentMatch {
    pub operation: Operation,
    pub hints: ParameterHints,
}

/// Input as seen by matchers: the original text plus its normalized form.
#[derive(Debug, Clone)]
pub struct Utterance<'a> {
    raw: &'a str,
    normalized: String,
}

impl<'a> Utterance<'a> {
    pub fn new(raw: &'a str) -> Self {
        let normalized = raw
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(" ");
        Self { raw, normalized }
    }

    /// Original text, untouched (identifiers keep their case).
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// Trimmed, lower-cased, whitespace-collapsed text.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn normalized_tokens(&self) -> impl Iterator<Item = &str> {
        self.normalized.split(' ').filter(|t| !t.is_empty())
    }

    pub fn raw_tokens(&self) -> impl Iterator<Item = &'a str> {
        self.raw.split_whitespace()
    }
}

/// One recognition strategy.
pub trait IntentMatcher: Send + Sync {
    fn matches(&self, utterance: &Utterance<'_>) -> Option<IntentMatch>;
}

/// Matchers composed in priority order; the first that recognizes the input wins.
pub struct MatcherChain {
    matchers: Vec<Box<dyn IntentMatcher>>,
}

impl MatcherChain {
    pub fn new(matchers: Vec<Box<dyn IntentMatcher>>) -> Self {
        Self { matchers }
    }

    pub fn matches(&self, utterance: &Utterance<'_>) -> Option<IntentMatch> {
        self.matchers.iter().find_map(|m| m.matches(utterance))
    }
}

impl Default for MatcherChain {
    fn default() -> Self {
        Self::new(vec![
            Box::new(CliPrefixMatcher),
            Box::new(KeywordMatcher),
        ])
    }
}

/// Classify `input`; `None` means the request is unrecognized.
pub fn match_intent(input: &str) -> Option<IntentMatch> {
    let utterance = Utterance::new(input);
    if utterance.normalized().is_empty() {
        return None;
    }
    let matched = MatcherChain::default().matches(&utterance);
    match &matched {
        Some(m) => tracing::debug!(
            operation = %m.operation,
            strategy = ?m.hints.strategy,
            "Intent matched"
        ),
        None => tracing::debug!(input = utterance.normalized(), "No intent matched"),
    }
    matched
}
