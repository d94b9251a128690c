//! Whitespace-tokenized CLI argument scanning.

/// Flags whose value may follow as a separate token (`--flag value`).
const VALUE_FLAGS: &[&str] = &[
    "format",
    "project",
    "project_id",
    "billing-account",
    "billing_account",
];

/// Flags and positionals found after a command prefix.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CliArgs<'a> {
    /// `(name, value)` with the leading dashes removed.
    pub flags: Vec<(&'a str, Option<&'a str>)>,
    pub positionals: Vec<&'a str>,
}

impl<'a> CliArgs<'a> {
    /// Scan tokens into flags and positionals.
    ///
    /// `--flag=value` always carries its value. `--flag value` only consumes the next
    /// token for known value flags; any other flag is a boolean switch. Single-dash
    /// tokens are treated as switches too.
    pub fn parse(tokens: &[&'a str]) -> Self {
        let mut args = CliArgs::default();
        let mut iter = tokens.iter().copied().peekable();
        while let Some(token) = iter.next() {
            if let Some(flag) = token.strip_prefix("--") {
                match flag.split_once('=') {
                    Some((name, value)) => args.flags.push((name, Some(value))),
                    None if VALUE_FLAGS.contains(&flag) => {
                        let value = iter.next_if(|next| !next.starts_with('-'));
                        args.flags.push((flag, value));
                    }
                    None => args.flags.push((flag, None)),
                }
            } else if token.len() > 1 && token.starts_with('-') {
                args.flags.push((&token[1..], None));
            } else {
                args.positionals.push(token);
            }
        }
        args
    }

    /// Last value given for any of `names`.
    pub fn flag_value(&self, names: &[&str]) -> Option<&'a str> {
        self.flags
            .iter()
            .rev()
            .find(|(name, _)| names.contains(name))
            .and_then(|(_, value)| *value)
    }
}
