//
// registry.rs
// Toolsuite-rs
//
// Maps declared tool names to their implementations through a fixed naming convention over a static module table.
//
// Thales Matheus Mendonça Santos - November 2025

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

use clap::Command;

use crate::contract::ToolCli;
use crate::error::{DispatchError, Result};

/// Builds the executable logic of a tool (the `CLI` type of its `cli` unit).
pub type CliFactory = fn() -> Box<dyn ToolCli>;

/// Registers a tool's flags on the shared sub-command set and hands it back.
pub type SubparserFn = fn(Command) -> Command;

/// Canonical command-line identifier of a pluggable tool.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToolName(String);

impl ToolName {
    /// Lowercase ASCII words separated by single dashes, e.g. `remove-background`.
    pub fn parse(raw: &str) -> Result<Self> {
        let well_formed = !raw.is_empty()
            && raw.split('-').all(|word| {
                !word.is_empty()
                    && word
                        .chars()
                        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            });
        if !well_formed {
            return Err(DispatchError::resolution(
                raw,
                "name",
                "tool names are lowercase words separated by single dashes",
            ));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Module the tool's units live under: dashes become underscores.
    pub fn module_stem(&self) -> String {
        self.0.replace('-', "_")
    }

    /// Path of the unit exposing the tool's `CLI` type.
    pub fn cli_path(&self) -> String {
        format!("{}::cli", self.module_stem())
    }

    /// Path of the unit exposing the tool's argument schema.
    pub fn argparser_path(&self) -> String {
        format!("{}::argparser", self.module_stem())
    }
}

impl Borrow<str> for ToolName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a module path resolves to.
#[derive(Clone, Copy)]
pub enum Unit {
    Cli(CliFactory),
    Argparser(SubparserFn),
}

impl Unit {
    fn kind(&self) -> &'static str {
        match self {
            Unit::Cli(_) => "cli",
            Unit::Argparser(_) => "argparser",
        }
    }
}

/// Static stand-in for dynamic module lookup: module path -> unit.
#[derive(Clone, Default)]
pub struct ModuleTable {
    units: Vec<(&'static str, Unit)>,
}

impl ModuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cli(mut self, path: &'static str, factory: CliFactory) -> Self {
        self.units.push((path, Unit::Cli(factory)));
        self
    }

    pub fn with_argparser(mut self, path: &'static str, add_args: SubparserFn) -> Self {
        self.units.push((path, Unit::Argparser(add_args)));
        self
    }

    fn lookup(&self, path: &str) -> Option<Unit> {
        self.units
            .iter()
            .find(|(candidate, _)| *candidate == path)
            .map(|(_, unit)| *unit)
    }

    /// Resolve `<stem>::cli` for a tool and require it to expose a `CLI` factory.
    pub fn resolve_cli(&self, tool: &ToolName) -> Result<CliFactory> {
        let path = tool.cli_path();
        match self.lookup(&path) {
            Some(Unit::Cli(factory)) => Ok(factory),
            Some(other) => Err(DispatchError::resolution(
                tool.as_str(),
                &path,
                format!("expected a CLI type, found an {} unit", other.kind()),
            )),
            None => Err(DispatchError::resolution(tool.as_str(), &path, "no such module")),
        }
    }

    /// Resolve `<stem>::argparser` for a tool and require it to expose `add_subparser_args`.
    pub fn resolve_argparser(&self, tool: &ToolName) -> Result<SubparserFn> {
        let path = tool.argparser_path();
        match self.lookup(&path) {
            Some(Unit::Argparser(add_args)) => Ok(add_args),
            Some(other) => Err(DispatchError::resolution(
                tool.as_str(),
                &path,
                format!("expected add_subparser_args, found a {} unit", other.kind()),
            )),
            None => Err(DispatchError::resolution(tool.as_str(), &path, "no such module")),
        }
    }
}

/// Instantiated tools for one process run, keyed by declared name.
pub struct ToolRegistry {
    order: Vec<ToolName>,
    tools: HashMap<ToolName, Box<dyn ToolCli>>,
}

impl ToolRegistry {
    /// Resolve and instantiate every declared tool. Fails on the first tool that
    /// cannot be resolved; a partial registry is never returned.
    pub fn build(tool_names: &[ToolName], modules: &ModuleTable) -> Result<Self> {
        let mut tools = HashMap::with_capacity(tool_names.len());
        for name in tool_names {
            let factory = modules.resolve_cli(name)?;
            let cli = factory();
            tracing::debug!(tool = %name, cli_name = cli.get_name(), "registered tool");
            if tools.insert(name.clone(), cli).is_some() {
                return Err(DispatchError::resolution(
                    name.as_str(),
                    name.cli_path(),
                    "declared more than once",
                ));
            }
        }

        Ok(Self {
            order: tool_names.to_vec(),
            tools,
        })
    }

    pub fn get(&self, name: &str) -> Option<&dyn ToolCli> {
        self.tools.get(name).map(|cli| cli.as_ref())
    }

    /// Declared tool names in declaration order.
    pub fn names(&self) -> &[ToolName] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
