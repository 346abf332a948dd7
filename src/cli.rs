//
// cli.rs
// Toolsuite-rs
//
// Dispatcher: builds the parser and tool registry, then routes parsed arguments through the selected tool's validation and run steps.
//
// Thales Matheus Mendonça Santos - November 2025

use std::ffi::OsString;
use std::io::Write;

use clap::error::ErrorKind;

use crate::args::ParsedArgs;
use crate::config::SuiteConfig;
use crate::error::{DispatchError, Result};
use crate::parser;
use crate::registry::ToolRegistry;
use crate::version;

/// How a successful invocation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Help text was printed (no arguments, or an explicit help request).
    Help,
    /// The version token was printed.
    Version(String),
    /// The named tool validated its arguments and ran to completion.
    Ran { tool: String },
}

/// Parse `argv` (program name first) against `suite`, then validate and run the selected tool.
///
/// Help and version text go to `out`. Every failure is returned unhandled; argument
/// errors come back as [`DispatchError::ArgumentParse`] for clap to render.
pub fn dispatch<I, T>(suite: &SuiteConfig, argv: I, out: &mut dyn Write) -> Result<Outcome>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();

    let version = version::get_version(&suite.install_root)?;
    let mut parser = parser::build_parser(suite, &version)?;
    tracing::debug!(tools = suite.tool_names().len(), "parser built");

    if argv.len() <= 1 {
        write!(out, "{}", parser.render_help())?;
        return Ok(Outcome::Help);
    }

    // The version flag wins over anything after it, like an immediate-exit action.
    if requests_version(&argv) {
        writeln!(out, "{version}")?;
        return Ok(Outcome::Version(version));
    }

    let matches = match parser.try_get_matches_from_mut(argv.iter()) {
        Ok(matches) => matches,
        Err(err) if err.kind() == ErrorKind::DisplayHelp => {
            write!(out, "{}", err.render())?;
            return Ok(Outcome::Help);
        }
        Err(err) => return Err(err.into()),
    };

    let args = ParsedArgs::from_matches(&parser, &matches);
    let Some(tool_name) = args.tool().map(str::to_string) else {
        let err = parser.error(
            ErrorKind::MissingSubcommand,
            format!("a sub-command is required; run '{}' for the list", suite.prog),
        );
        return Err(err.into());
    };

    // Every declared tool must resolve, even though only one will run.
    let registry = ToolRegistry::build(suite.tool_names(), &suite.modules)?;
    let tool = registry.get(&tool_name).ok_or_else(|| {
        DispatchError::resolution(&tool_name, "registry", "sub-command has no registered tool")
    })?;

    tracing::debug!(tool = %tool_name, "validating arguments");
    let validated = tool
        .validate_args(args)
        .map_err(|error| DispatchError::Validation {
            tool: tool_name.clone(),
            error,
        })?;

    tracing::debug!(tool = %tool_name, "running tool");
    tool.run(&validated).map_err(|error| DispatchError::Run {
        tool: tool_name.clone(),
        error,
    })?;

    Ok(Outcome::Ran { tool: tool_name })
}

/// Whether `-v`/`--version` is the first exiting flag among the top-level flags,
/// i.e. before the first sub-command token or `--`. An earlier help flag wins.
fn requests_version(argv: &[OsString]) -> bool {
    argv.iter()
        .skip(1)
        .map(|arg| arg.to_string_lossy())
        .take_while(|arg| arg.starts_with('-') && arg != "--")
        .find(|arg| matches!(&**arg, "-v" | "--version" | "-h" | "--help"))
        .map_or(false, |arg| matches!(&*arg, "-v" | "--version"))
}

/// Process entry point: the standard suite driven by the real command line.
pub fn run() -> Result<Outcome> {
    let suite = SuiteConfig::standard()?;
    dispatch(&suite, std::env::args_os(), &mut std::io::stdout())
}

/// Run one tool programmatically, as if invoked as `<prog> <tool> <args...>`.
pub fn run_tool_in<I, T>(
    suite: &SuiteConfig,
    tool: &str,
    args: I,
    out: &mut dyn Write,
) -> Result<Outcome>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut argv: Vec<OsString> = vec![suite.prog.clone().into(), tool.into()];
    argv.extend(args.into_iter().map(Into::into));
    dispatch(suite, argv, out)
}

/// [`run_tool_in`] against the standard suite, printing to stdout.
pub fn run_tool<I, T>(tool: &str, args: I) -> Result<Outcome>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let suite = SuiteConfig::standard()?;
    run_tool_in(&suite, tool, args, &mut std::io::stdout())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(raw: &[&str]) -> Vec<OsString> {
        raw.iter().map(OsString::from).collect()
    }

    #[test]
    fn version_is_found_among_top_level_flags_only() {
        assert!(requests_version(&argv(&["toolsuite", "-v"])));
        assert!(requests_version(&argv(&["toolsuite", "--version", "remove-background"])));
        assert!(requests_version(&argv(&["toolsuite", "-v", "-h"])));
        assert!(!requests_version(&argv(&["toolsuite", "-h", "-v"])));

        // After the sub-command or `--`, the flag belongs to someone else.
        assert!(!requests_version(&argv(&["toolsuite", "remove-background", "-v"])));
        assert!(!requests_version(&argv(&["toolsuite", "--", "-v"])));
        assert!(!requests_version(&argv(&["toolsuite"])));
    }
}
