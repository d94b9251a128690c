//! Property-based tests for matching determinism

use gcp_assist::intent::match_intent;
use gcp_assist::params::ParameterExtractor;
use proptest::prelude::*;

const WORDS: &[&str] = &[
    "list", "show", "describe", "link", "all", "my", "gcp", "project", "projects", "instances",
    "buckets", "zones", "regions", "services", "billing", "account", "dataset", "tables",
    "bigquery", "in", "to", "alpha", "beta-1", "json", "gcloud", "bq", "ls", "compute",
];

fn sentence() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 0..8).prop_map(|words| words.join(" "))
}

proptest! {
    /// Matching the same input twice gives the same answer.
    #[test]
    fn test_match_is_idempotent(input in sentence()) {
        prop_assert_eq!(match_intent(&input), match_intent(&input));
    }

    /// Case and surrounding whitespace never change the matched operation.
    #[test]
    fn test_match_ignores_case_and_padding(input in sentence()) {
        let shouted = format!("  {}\t", input.to_uppercase());
        prop_assert_eq!(
            match_intent(&input).map(|m| m.operation),
            match_intent(&shouted).map(|m| m.operation)
        );
    }

    /// Extraction is a pure function of its input.
    #[test]
    fn test_extraction_is_deterministic(input in sentence()) {
        if let Some(m) = match_intent(&input) {
            let extractor = ParameterExtractor::new(Some("default-proj".to_string()));
            let first = extractor.extract(m.operation, &input, &m.hints).ok();
            let second = extractor.extract(m.operation, &input, &m.hints).ok();
            prop_assert_eq!(first, second);
        }
    }
}
