//! CLI-style recognition: literal command prefixes, longest first.

use super::{IntentMatch, IntentMatcher, ParameterHints, Utterance};
use crate::operation::Operation;
use crate::params::cli_args::CliArgs;

struct PrefixRule {
    tokens: &'static [&'static str],
    operation: Operation,
    /// Operation to use instead when a positional argument follows the prefix.
    with_positional: Option<Operation>,
}

const fn rule(tokens: &'static [&'static str], operation: Operation) -> PrefixRule {
    PrefixRule {
        tokens,
        operation,
        with_positional: None,
    }
}

/// Prefix table. Lookup order is by token count, longest first, so a short prefix
/// never shadows a more specific one regardless of its position here.
const PREFIXES: &[PrefixRule] = &[
    rule(&["gcloud", "projects", "list"], Operation::ListProjects),
    rule(&["gcloud", "projects", "describe"], Operation::DescribeProject),
    rule(&["gcloud", "compute", "instances", "list"], Operation::ListInstances),
    rule(&["gcloud", "compute", "regions", "list"], Operation::ListRegions),
    rule(&["gcloud", "compute", "zones", "list"], Operation::ListZones),
    rule(&["gcloud", "storage", "ls"], Operation::ListBuckets),
    rule(&["gcloud", "storage", "buckets", "list"], Operation::ListBuckets),
    rule(&["gsutil", "ls"], Operation::ListBuckets),
    rule(&["gcloud", "services", "list"], Operation::ListServices),
    rule(&["gcloud", "billing", "accounts", "list"], Operation::ListBillingAccounts),
    rule(&["gcloud", "billing", "projects", "link"], Operation::LinkBilling),
    PrefixRule {
        tokens: &["bq", "ls"],
        operation: Operation::ListDatasets,
        with_positional: Some(Operation::ListTables),
    },
];

/// Matches inputs that start with one of the supported command prefixes.
pub struct CliPrefixMatcher;

impl CliPrefixMatcher {
    fn rules_longest_first() -> Vec<&'static PrefixRule> {
        let mut rules: Vec<&PrefixRule> = PREFIXES.iter().collect();
        // Stable sort keeps table order among equal lengths.
        rules.sort_by(|a, b| b.tokens.len().cmp(&a.tokens.len()));
        rules
    }
}

impl IntentMatcher for CliPrefixMatcher {
    fn matches(&self, utterance: &Utterance<'_>) -> Option<IntentMatch> {
        let tokens: Vec<&str> = utterance.normalized_tokens().collect();
        let rule = Self::rules_longest_first().into_iter().find(|rule| {
            tokens.len() >= rule.tokens.len()
                && rule.tokens.iter().zip(&tokens).all(|(want, got)| want == got)
        })?;

        let consumed = rule.tokens.len();
        let operation = match rule.with_positional {
            Some(alternative) => {
                let rest: Vec<&str> = utterance.raw_tokens().skip(consumed).collect();
                if CliArgs::parse(&rest).positionals.is_empty() {
                    rule.operation
                } else {
                    alternative
                }
            }
            None => rule.operation,
        };

        Some(IntentMatch {
            operation,
            hints: ParameterHints::cli(consumed),
        })
    }
}
