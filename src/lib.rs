//! gcp-assist: Natural-Language Front-End for Google Cloud CLIs
//!
//! Maps free-form requests ("list instances in project alpha") and CLI-style
//! strings ("gcloud compute instances list --project=alpha") onto a closed set of
//! operations, validates their parameters, runs `gcloud` or `bq` under a timeout,
//! and returns a human-readable reply.

pub mod assistant;
pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod format;
pub mod intent;
pub mod invocation;
pub mod logging;
pub mod operation;
pub mod params;
pub mod suggest;
pub mod tool;

pub use assistant::{Assistant, Plan};
pub use error::AssistError;
pub use operation::{Operation, ParamKey};
pub use tool::{tool_declaration, ToolReply};
