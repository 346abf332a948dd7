//
// parser.rs
// Toolsuite-rs
//
// Builds the top-level Clap command and lets each declared tool register its own sub-command.
//
// Thales Matheus Mendonça Santos - November 2025

use clap::{Arg, ArgAction, Command};

use crate::args::TOOL_FIELD;
use crate::config::SuiteConfig;
use crate::error::{DispatchError, Result};

/// Id of the global `-v/--version` flag.
pub const VERSION_ARG: &str = "version";

/// Top-level command with one sub-command per declared tool, in declaration order.
///
/// Only the outer shape lives here; every tool flag comes from that tool's
/// `argparser` unit.
pub fn build_parser(suite: &SuiteConfig, version: &str) -> Result<Command> {
    let mut parser = Command::new(suite.prog.clone())
        .about(suite.description.clone())
        .version(version.to_string())
        // Clap's own version flag prints "<prog> <version>"; ours prints the bare token.
        .disable_version_flag(true)
        .arg(
            Arg::new(VERSION_ARG)
                .short('v')
                .long("version")
                .action(ArgAction::SetTrue)
                .help("Print version"),
        )
        .subcommand_required(true)
        .subcommand_help_heading("sub-commands")
        .subcommand_value_name("TOOL");

    for name in suite.tool_names() {
        let add_subparser_args = suite.modules.resolve_argparser(name)?;
        parser = add_subparser_args(parser);

        let Some(sub) = parser.find_subcommand(name.as_str()) else {
            return Err(DispatchError::resolution(
                name.as_str(),
                name.argparser_path(),
                "argparser did not register a sub-command with this name",
            ));
        };
        if sub.get_arguments().any(|arg| arg.get_id().as_str() == TOOL_FIELD) {
            return Err(DispatchError::resolution(
                name.as_str(),
                name.argparser_path(),
                format!("argument id '{TOOL_FIELD}' is reserved"),
            ));
        }
    }

    Ok(parser)
}

/// Sub-command names and their argument ids, for comparing two parsers.
pub fn surface(parser: &Command) -> Vec<(String, Vec<String>)> {
    parser
        .get_subcommands()
        .map(|sub| {
            let ids = sub
                .get_arguments()
                .map(|arg| arg.get_id().to_string())
                .collect();
            (sub.get_name().to_string(), ids)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{standard_modules, DESCRIPTION, PROG, TOOL_NAMES};
    use crate::registry::ModuleTable;
    use std::path::PathBuf;

    fn standard() -> SuiteConfig {
        SuiteConfig::new(PROG, DESCRIPTION, TOOL_NAMES, standard_modules(), PathBuf::from("."))
            .unwrap()
    }

    #[test]
    fn help_lists_program_and_every_tool() {
        let mut parser = build_parser(&standard(), "0.3.0").unwrap();
        let help = parser.render_help().to_string();

        assert!(help.contains("toolsuite"));
        assert!(help.contains("sub-commands"));
        assert!(help.contains("<TOOL>"), "sub-command should render as required: {help}");
        for name in TOOL_NAMES {
            assert!(help.contains(name), "help should list {name}");
        }
    }

    #[test]
    fn building_twice_yields_the_same_surface() {
        let first = build_parser(&standard(), "0.3.0").unwrap();
        let second = build_parser(&standard(), "0.3.0").unwrap();
        assert_eq!(surface(&first), surface(&second));
        assert_eq!(surface(&first)[0].0, "remove-background");
    }

    #[test]
    fn argparser_must_register_its_own_name() {
        fn wrong_name(cmd: Command) -> Command {
            cmd.subcommand(Command::new("something-else"))
        }
        let modules = ModuleTable::new().with_argparser("remove_background::argparser", wrong_name);
        let suite = SuiteConfig::new(PROG, DESCRIPTION, TOOL_NAMES, modules, PathBuf::from("."))
            .unwrap();

        let err = build_parser(&suite, "0.3.0").unwrap_err();
        assert!(matches!(err, DispatchError::ToolResolution { .. }));
    }

    #[test]
    fn reserved_tool_field_cannot_be_claimed() {
        fn claims_tool(cmd: Command) -> Command {
            cmd.subcommand(Command::new("remove-background").arg(Arg::new("tool").long("tool")))
        }
        let modules = ModuleTable::new().with_argparser("remove_background::argparser", claims_tool);
        let suite = SuiteConfig::new(PROG, DESCRIPTION, TOOL_NAMES, modules, PathBuf::from("."))
            .unwrap();

        assert!(build_parser(&suite, "0.3.0").is_err());
    }
}
