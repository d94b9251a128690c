//! Parameter Extraction
//!
//! Turns a matched operation plus the raw input into a validated [`ParameterSet`].
//! CLI-style input is scanned as flags and positionals; free text is scanned for
//! identifiers following trigger words. Every identifier is checked against a strict
//! character allow-list here, before anything can reach a process invocation.

pub mod cli_args;
pub mod natural;

use crate::error::AssistError;
use crate::intent::{ParameterHints, Strategy};
use crate::operation::{Operation, ParamKey};
use cli_args::CliArgs;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

const MAX_IDENTIFIER_LEN: usize = 128;
const BILLING_ACCOUNT_PREFIX: &str = "billingAccounts/";

/// Output format requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Table,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Table => "table",
        }
    }

    /// Anything naming a JSON flavour (`json`, `prettyjson`) counts as JSON.
    fn from_flag(value: &str) -> Self {
        if value.to_ascii_lowercase().contains("json") {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        }
    }
}

/// Validated parameters for one request. Absent keys are simply not present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ParameterSet {
    values: BTreeMap<ParamKey, String>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: ParamKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    pub fn contains(&self, key: ParamKey) -> bool {
        self.values.contains_key(&key)
    }

    pub fn insert(&mut self, key: ParamKey, value: impl Into<String>) {
        self.values.insert(key, value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParamKey, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn format(&self) -> OutputFormat {
        match self.get(ParamKey::Format) {
            Some("json") => OutputFormat::Json,
            _ => OutputFormat::Table,
        }
    }
}

/// Check an identifier against the allow-list: ASCII letters, digits, `-`, `_`, `.`.
/// A leading `-` is rejected too, since the external CLI would read it as a flag.
pub fn validate_identifier(field: ParamKey, value: &str) -> Result<(), AssistError> {
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.');
    let valid = !value.is_empty()
        && value.len() <= MAX_IDENTIFIER_LEN
        && !value.starts_with('-')
        && value.chars().all(allowed);
    if valid {
        Ok(())
    } else {
        Err(AssistError::InvalidParameter {
            field,
            value: value.to_string(),
        })
    }
}

fn normalize_value(key: ParamKey, value: &str) -> &str {
    match key {
        ParamKey::BillingAccountId => value.strip_prefix(BILLING_ACCOUNT_PREFIX).unwrap_or(value),
        _ => value,
    }
}

/// Extracts parameters, applying the configured default project where allowed.
#[derive(Debug, Clone, Default)]
pub struct ParameterExtractor {
    default_project: Option<String>,
}

impl ParameterExtractor {
    pub fn new(default_project: Option<String>) -> Self {
        Self { default_project }
    }

    pub fn default_project(&self) -> Option<&str> {
        self.default_project.as_deref()
    }

    pub fn extract(
        &self,
        operation: Operation,
        input: &str,
        hints: &ParameterHints,
    ) -> Result<ParameterSet, AssistError> {
        let (raw, format) = match hints.strategy {
            Strategy::Cli => Self::scan_cli(operation, input, hints.consumed_tokens),
            Strategy::NaturalLanguage => Self::scan_natural(operation, input),
        };

        let mut params = ParameterSet::new();
        for (key, value) in raw {
            let value = normalize_value(key, value);
            validate_identifier(key, value)?;
            params.insert(key, value);
        }

        let schema = operation.schema();
        if schema.default_project && !params.contains(ParamKey::ProjectId) {
            if let Some(project) = &self.default_project {
                validate_identifier(ParamKey::ProjectId, project)?;
                debug!(project = %project, "Using default project");
                params.insert(ParamKey::ProjectId, project.clone());
            }
        }

        let missing: Vec<ParamKey> = schema
            .required
            .iter()
            .copied()
            .filter(|key| !params.contains(*key))
            .collect();
        if !missing.is_empty() {
            return Err(AssistError::MissingParameter(missing));
        }

        params.insert(ParamKey::Format, format.as_str());
        debug!(operation = %operation, ?params, "Parameters extracted");
        Ok(params)
    }

    fn scan_cli(
        operation: Operation,
        input: &str,
        consumed_tokens: usize,
    ) -> (Vec<(ParamKey, &str)>, OutputFormat) {
        let tokens: Vec<&str> = input.split_whitespace().skip(consumed_tokens).collect();
        let args = CliArgs::parse(&tokens);
        let mut found = Vec::new();

        let flag_keys: [(ParamKey, &[&str]); 2] = [
            (ParamKey::ProjectId, &["project", "project_id"]),
            (ParamKey::BillingAccountId, &["billing-account", "billing_account"]),
        ];
        for (key, names) in flag_keys {
            if operation.accepts(key) {
                if let Some(value) = args.flag_value(names) {
                    found.push((key, value));
                }
            }
        }

        for (slot, value) in operation.schema().positional.iter().zip(&args.positionals) {
            // A positional never overrides the same parameter given as a flag.
            if !found.iter().any(|(key, _)| key == slot) {
                found.push((*slot, *value));
            }
        }
        if args.positionals.len() > operation.schema().positional.len() {
            debug!(
                extra = ?&args.positionals[operation.schema().positional.len()..],
                "Ignoring extra positional arguments"
            );
        }

        let format = args
            .flag_value(&["format"])
            .map(OutputFormat::from_flag)
            .unwrap_or(OutputFormat::Table);
        (found, format)
    }

    fn scan_natural(operation: Operation, input: &str) -> (Vec<(ParamKey, &str)>, OutputFormat) {
        let tokens: Vec<&str> = input.split_whitespace().map(natural::clean_token).collect();
        let schema = operation.schema();
        let found = schema
            .required
            .iter()
            .chain(schema.optional)
            .filter_map(|key| natural::find_identifier(&tokens, *key).map(|v| (*key, v)))
            .collect();
        let format = if natural::requests_json(&tokens) {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        };
        (found, format)
    }
}
