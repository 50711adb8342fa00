//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod parse;
pub mod report;
pub mod utils;

// Re-export main command functions
pub use parse::{execute_parse, ParseArgs};
pub use report::{execute_report, validate_args, ReportArgs};
pub use utils::{display_schema, display_version, read_input};
