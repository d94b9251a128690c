//! Best-effort identifier scanning in free text.

use crate::intent::{DESCRIBE_VERBS, LINK_VERBS, LIST_VERBS};
use crate::operation::ParamKey;

/// Words that may sit between a trigger and its value ("project id foo").
const FILLERS: &[&str] = &["id", "named", "called", "=", ":"];

/// Words that can never be an identifier; seeing one after a trigger means "absent".
/// The keyword matcher's verbs are stop words too, see [`is_stop_word`].
const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "as", "at", "by", "for", "from", "in", "into", "is", "my", "of", "on",
    "or", "the", "to", "under", "using", "with", "json", "format", "table", "tables", "project",
    "projects", "dataset", "datasets", "account", "accounts", "billing",
];

fn is_stop_word(word: &str) -> bool {
    STOP_WORDS
        .iter()
        .chain(LIST_VERBS)
        .chain(DESCRIBE_VERBS)
        .chain(LINK_VERBS)
        .any(|s| word.eq_ignore_ascii_case(s))
}

fn triggers(key: ParamKey) -> &'static [&'static str] {
    match key {
        ParamKey::ProjectId => &["project"],
        ParamKey::Dataset => &["dataset"],
        ParamKey::BillingAccountId => &["account"],
        ParamKey::Format => &[],
    }
}

/// Strip quotes and sentence punctuation around a word. Shell metacharacters are
/// left in place so that validation sees them.
pub fn clean_token(token: &str) -> &str {
    token
        .trim_matches(|c| c == '"' || c == '\'')
        .trim_end_matches(|c| matches!(c, '.' | ',' | '!' | '?' | ':'))
        .trim_matches(|c| c == '"' || c == '\'')
}

/// The token following the first trigger word for `key` that is followed by
/// something usable. Tokens are expected to be cleaned already.
pub fn find_identifier<'a>(tokens: &[&'a str], key: ParamKey) -> Option<&'a str> {
    let trigger_words = triggers(key);
    tokens.iter().enumerate().find_map(|(i, token)| {
        if !trigger_words.iter().any(|t| token.eq_ignore_ascii_case(t)) {
            return None;
        }
        tokens[i + 1..]
            .iter()
            .find(|next| !FILLERS.iter().any(|f| next.eq_ignore_ascii_case(f)))
            .copied()
            .filter(|next| !next.is_empty())
            .filter(|next| !is_stop_word(next))
    })
}

/// Whether the text asks for machine-readable output.
pub fn requests_json(tokens: &[&str]) -> bool {
    tokens.iter().any(|t| {
        let lowered = t.to_ascii_lowercase();
        lowered == "json" || lowered == "--format=json"
    })
}
