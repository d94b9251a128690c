//! Command suggestions for requests that could not be served.

use crate::intent::{contains_word, subject_words};
use crate::operation::Operation;
use crate::params::natural::clean_token;

/// CLI forms of the operations whose subject is mentioned in `input`, or of every
/// operation when nothing relevant is mentioned.
pub fn suggested_commands(input: &str) -> Vec<String> {
    let lowered: Vec<String> = input
        .split_whitespace()
        .map(|t| clean_token(t).to_lowercase())
        .collect();
    let relevant: Vec<String> = Operation::ALL
        .iter()
        .filter(|op| contains_word(&lowered, subject_words(**op)))
        .map(Operation::cli_usage)
        .collect();
    if relevant.is_empty() {
        Operation::ALL.iter().map(Operation::cli_usage).collect()
    } else {
        relevant
    }
}

/// Help text for input that matched no operation.
pub fn unrecognized_message(input: &str) -> String {
    format!(
        "I'm not sure how to process your query: '{}'. Try asking about listing projects, \
         instances, buckets, regions, zones, services, billing accounts, or BigQuery \
         datasets and tables.",
        input.trim()
    )
}

/// Suggestions rendered as one block of text.
pub fn render_suggestions(commands: &[String]) -> String {
    let mut out = String::from("You can try these commands (type the full command to execute directly):");
    for command in commands {
        out.push('\n');
        out.push_str(command);
    }
    out
}
