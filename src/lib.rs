//
// lib.rs
// Toolsuite-rs
//
// Exposes the dispatcher pieces and the shipped tools for both the binary and library consumers.
//
// Thales Matheus Mendonça Santos - November 2025

// Dispatcher core: version lookup, tool contract, registry, parser surface, and the pipeline itself.
pub mod args;
pub mod cli;
pub mod config;
pub mod contract;
pub mod error;
pub mod logging;
pub mod parser;
pub mod registry;
pub mod version;

// Tools, one module per declared tool name (dashes become underscores).
pub mod remove_background;

pub use args::{ArgValue, ParsedArgs};
pub use cli::{dispatch, run as run_cli, run_tool, Outcome};
pub use config::SuiteConfig;
pub use contract::{ToolCli, ValidationError};
pub use error::DispatchError;
