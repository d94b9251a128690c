//! Natural-language recognition: per-operation keyword slots.
//!
//! Every operation owns a list of slots; a slot is a set of alternative words and is
//! satisfied when any alternative appears in the input (plural forms included). An
//! operation matches when all of its slots are satisfied.
//!
//! Ties are broken by, in order: more slots matched, more of the operation's
//! parameters found after their trigger words, earlier position in [`MATCH_ORDER`].

use super::{IntentMatch, IntentMatcher, ParameterHints, Utterance};
use crate::operation::{Operation, ParamKey};
use crate::params::natural::{clean_token, find_identifier};

pub(crate) const LIST_VERBS: &[&str] = &["list", "show", "get", "display", "view", "enumerate", "all"];
pub(crate) const DESCRIBE_VERBS: &[&str] = &["describe", "detail", "details", "info", "information", "inspect"];
pub(crate) const LINK_VERBS: &[&str] = &["link", "connect", "attach", "associate", "set"];
const BIGQUERY_OR_LIST: &[&str] = &[
    "bigquery", "bq", "list", "show", "get", "display", "view", "enumerate", "all",
];

/// Order in which candidates are considered, which is also the final tie-break.
/// DescribeProject sits ahead of ListProjects: "get project details" names a describe
/// verb, while "get" alone is only a generic list verb.
const MATCH_ORDER: [Operation; 11] = [
    Operation::DescribeProject,
    Operation::ListProjects,
    Operation::ListInstances,
    Operation::ListBuckets,
    Operation::ListRegions,
    Operation::ListZones,
    Operation::ListServices,
    Operation::ListBillingAccounts,
    Operation::LinkBilling,
    Operation::ListDatasets,
    Operation::ListTables,
];

fn slots(operation: Operation) -> &'static [&'static [&'static str]] {
    match operation {
        Operation::ListProjects => &[LIST_VERBS, &["project"]],
        Operation::ListInstances => &[LIST_VERBS, &["instance", "vm"]],
        Operation::ListBuckets => &[LIST_VERBS, &["bucket", "storage"]],
        Operation::DescribeProject => &[DESCRIBE_VERBS, &["project"]],
        Operation::ListRegions => &[LIST_VERBS, &["region"]],
        Operation::ListZones => &[LIST_VERBS, &["zone"]],
        Operation::ListServices => &[LIST_VERBS, &["service", "api"]],
        Operation::ListBillingAccounts => &[LIST_VERBS, &["billing"], &["account"]],
        Operation::LinkBilling => &[LINK_VERBS, &["billing"], &["account", "project"]],
        Operation::ListDatasets => &[BIGQUERY_OR_LIST, &["dataset"]],
        Operation::ListTables => &[BIGQUERY_OR_LIST, &["table"]],
    }
}

/// Nouns that identify an operation's subject, used for suggestions.
pub(crate) fn subject_words(operation: Operation) -> &'static [&'static str] {
    let all = slots(operation);
    match operation {
        Operation::ListBillingAccounts | Operation::LinkBilling => all[1],
        _ => all[all.len() - 1],
    }
}

fn word_matches(token: &str, keyword: &str) -> bool {
    match token.strip_prefix(keyword) {
        Some("") | Some("s") | Some("es") => true,
        _ => false,
    }
}

pub(crate) fn contains_word(tokens: &[String], alternatives: &[&str]) -> bool {
    tokens
        .iter()
        .any(|t| alternatives.iter().any(|kw| word_matches(t, kw)))
}

#[derive(Debug)]
struct Candidate {
    operation: Operation,
    slots: usize,
    params_found: usize,
}

/// Matches free text against the keyword tables.
pub struct KeywordMatcher;

impl KeywordMatcher {
    fn params_found(operation: Operation, raw_tokens: &[&str]) -> usize {
        let schema = operation.schema();
        schema
            .required
            .iter()
            .chain(schema.optional)
            .filter(|key| **key != ParamKey::Format)
            .filter(|key| find_identifier(raw_tokens, **key).is_some())
            .count()
    }
}

impl IntentMatcher for KeywordMatcher {
    fn matches(&self, utterance: &Utterance<'_>) -> Option<IntentMatch> {
        let raw_tokens: Vec<&str> = utterance.raw_tokens().map(clean_token).collect();
        let lowered: Vec<String> = raw_tokens.iter().map(|t| t.to_lowercase()).collect();

        let mut best: Option<Candidate> = None;
        for operation in MATCH_ORDER {
            let operation_slots = slots(operation);
            if !operation_slots
                .iter()
                .all(|alternatives| contains_word(&lowered, alternatives))
            {
                continue;
            }
            let candidate = Candidate {
                operation,
                slots: operation_slots.len(),
                params_found: Self::params_found(operation, &raw_tokens),
            };
            tracing::trace!(?candidate, "Keyword candidate");
            // Strict comparison keeps the earliest operation in MATCH_ORDER on a full tie.
            let better = match &best {
                None => true,
                Some(current) => {
                    (candidate.slots, candidate.params_found) > (current.slots, current.params_found)
                }
            };
            if better {
                best = Some(candidate);
            }
        }

        best.map(|c| IntentMatch {
            operation: c.operation,
            hints: ParameterHints::natural_language(),
        })
    }
}
