//! CLI module for triagemap
//!
//! - Argument parsing (`args`)
//! - Runtime setup: configuration resolution and logging (`setup`)

pub mod args;
pub mod setup;

pub use args::{parse_args, Cli, Commands, OutputFormat, PatientCommand};
pub use setup::{init_logging, log_filter, resolve_config};
