//
// config.rs
// Toolsuite-rs
//
// Immutable description of the suite: program identity, the ordered tool list, and where tool units are found.
//
// Thales Matheus Mendonça Santos - November 2025

use std::collections::HashSet;
use std::path::PathBuf;

use crate::error::{DispatchError, Result};
use crate::registry::{ModuleTable, ToolName};
use crate::{remove_background, version};

/// New tools are added to this list, with their units registered in `standard_modules`.
pub const TOOL_NAMES: &[&str] = &["remove-background"];

pub const PROG: &str = "toolsuite";

pub const DESCRIPTION: &str = "Toolsuite is a software package for eliminating technical \
     artifacts from high-throughput single-cell RNA sequencing (scRNA-seq) data.";

/// Module table for the tools shipped with the suite.
pub fn standard_modules() -> ModuleTable {
    ModuleTable::new()
        .with_cli("remove_background::cli", remove_background::cli::factory)
        .with_argparser(
            "remove_background::argparser",
            remove_background::argparser::add_subparser_args,
        )
}

#[derive(Clone)]
pub struct SuiteConfig {
    pub prog: String,
    pub description: String,
    tool_names: Vec<ToolName>,
    pub modules: ModuleTable,
    pub install_root: PathBuf,
}

impl SuiteConfig {
    /// Declare a suite. Tool names must be well formed and unique.
    pub fn new<S: AsRef<str>>(
        prog: impl Into<String>,
        description: impl Into<String>,
        tool_names: &[S],
        modules: ModuleTable,
        install_root: PathBuf,
    ) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut names = Vec::with_capacity(tool_names.len());
        for raw in tool_names {
            let name = ToolName::parse(raw.as_ref())?;
            if !seen.insert(name.clone()) {
                return Err(DispatchError::resolution(
                    name.as_str(),
                    "name",
                    "declared more than once",
                ));
            }
            names.push(name);
        }

        Ok(Self {
            prog: prog.into(),
            description: description.into(),
            tool_names: names,
            modules,
            install_root,
        })
    }

    /// The shipped suite, rooted at the resolved install directory.
    pub fn standard() -> Result<Self> {
        Self::new(
            PROG,
            DESCRIPTION,
            TOOL_NAMES,
            standard_modules(),
            version::install_root()?,
        )
    }

    pub fn tool_names(&self) -> &[ToolName] {
        &self.tool_names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_suite_declares_remove_background() {
        let suite = SuiteConfig::new(
            PROG,
            DESCRIPTION,
            TOOL_NAMES,
            standard_modules(),
            PathBuf::from("."),
        )
        .unwrap();

        let names: Vec<&str> = suite.tool_names().iter().map(ToolName::as_str).collect();
        assert_eq!(names, ["remove-background"]);
        assert!(suite.modules.resolve_cli(&suite.tool_names()[0]).is_ok());
        assert!(suite.modules.resolve_argparser(&suite.tool_names()[0]).is_ok());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let result = SuiteConfig::new(
            PROG,
            DESCRIPTION,
            &["remove-background", "remove-background"],
            ModuleTable::new(),
            PathBuf::from("."),
        );
        assert!(result.is_err());
    }
}
