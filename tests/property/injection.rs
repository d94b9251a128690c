//! Property-based tests: hostile identifiers never reach an invocation.

use gcp_assist::invocation::{Invocation, ToolPaths};
use gcp_assist::intent::match_intent;
use gcp_assist::params::{validate_identifier, ParameterExtractor};
use gcp_assist::ParamKey;
use proptest::prelude::*;

const METACHARACTERS: &[&str] = &[";", "`", "$(", "|", "&", ">", "<", "\\", "*", "'", "\"", "\n"];

fn hostile() -> impl Strategy<Value = String> {
    ("[a-z0-9]{0,6}", prop::sample::select(METACHARACTERS), "[a-z0-9]{0,6}")
        .prop_map(|(head, meta, tail)| format!("{}{}{}", head, meta, tail))
}

proptest! {
    #[test]
    fn test_metacharacters_are_rejected(value in hostile()) {
        prop_assert!(validate_identifier(ParamKey::ProjectId, &value).is_err());
        prop_assert!(validate_identifier(ParamKey::Dataset, &value).is_err());
    }

    #[test]
    fn test_hostile_project_never_planned(value in hostile(), template in 0usize..3) {
        let input = match template {
            0 => format!("gcloud projects describe {}", value),
            1 => format!("gcloud services list --project={}", value),
            _ => format!("bq ls --project_id={} sales", value),
        };
        // Quotes and newlines may be stripped or split away by tokenization; whatever
        // survives into a parameter set must still be a clean identifier.
        if let Some(m) = match_intent(&input) {
            if let Ok(params) = ParameterExtractor::default().extract(m.operation, &input, &m.hints) {
                let invocation = Invocation::build(m.operation, &params, &ToolPaths::default());
                for arg in &invocation.args {
                    for meta in METACHARACTERS {
                        prop_assert!(!arg.contains(meta), "{:?} in {:?}", meta, invocation.args);
                    }
                }
            }
        }
    }

    #[test]
    fn test_valid_identifiers_are_accepted(value in "[a-zA-Z0-9][a-zA-Z0-9._-]{0,40}") {
        prop_assert!(validate_identifier(ParamKey::ProjectId, &value).is_ok());
    }
}
