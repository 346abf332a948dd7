//
// contract.rs
// Toolsuite-rs
//
// The capability set every pluggable tool implements so the dispatcher can name, validate, and run it.
//
// Thales Matheus Mendonça Santos - November 2025

use crate::args::ParsedArgs;

/// Tool-specific rejection of arguments that parsed fine but make no sense together.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Contract for a sub-tool invoked as `toolsuite TOOL-NAME --flag value ...`.
///
/// Each tool module exposes a `cli` unit whose factory builds a value implementing
/// this trait, plus an `argparser` unit registering the tool's flags.
pub trait ToolCli {
    /// Command-line name of the tool.
    fn get_name(&self) -> &str;

    /// Tool-specific argument checks. May normalize or default-fill fields and
    /// returns the record `run` will receive.
    fn validate_args(&self, args: ParsedArgs) -> Result<ParsedArgs, ValidationError>;

    /// Run the tool using the validated arguments.
    fn run(&self, args: &ParsedArgs) -> anyhow::Result<()>;
}
