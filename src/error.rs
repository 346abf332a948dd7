//
// error.rs
// Toolsuite-rs
//
// Failure taxonomy for the dispatcher: startup resolution, argument parsing, validation, and tool execution.
//
// Thales Matheus Mendonça Santos - November 2025

use std::path::PathBuf;

use crate::contract::ValidationError;

pub type Result<T> = std::result::Result<T, DispatchError>;

/// Every way a dispatcher invocation can end in failure.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The packaged version resource could not be located or opened.
    #[error("version resource not found at {}", path.display())]
    ResourceMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A declared tool has no matching unit, or the unit has the wrong shape.
    #[error("cannot resolve tool '{tool}' ({unit}): {reason}")]
    ToolResolution {
        tool: String,
        unit: String,
        reason: String,
    },

    /// Malformed or unknown command-line input, rendered by clap.
    #[error(transparent)]
    ArgumentParse(#[from] clap::Error),

    /// The selected tool rejected otherwise well-formed arguments.
    #[error("invalid arguments for '{tool}': {error}")]
    Validation { tool: String, error: ValidationError },

    /// Help or version text could not be written out.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),

    /// Anything the tool's run step raised, passed through untouched.
    #[error("'{tool}' failed: {error:#}")]
    Run { tool: String, error: anyhow::Error },
}

impl DispatchError {
    pub(crate) fn resolution(
        tool: impl Into<String>,
        unit: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::ToolResolution {
            tool: tool.into(),
            unit: unit.into(),
            reason: reason.into(),
        }
    }
}
