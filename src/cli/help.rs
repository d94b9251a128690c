//! CLI help and command-name contract for logging.

use crate::cli::parse::Commands;

/// Command name string used in log events (e.g. "ask", "operations").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Ask { .. } => "ask",
        Commands::Plan { .. } => "plan",
        Commands::Operations { .. } => "operations",
        Commands::Config { .. } => "config",
        Commands::Shell => "shell",
    }
}
