//
// args.rs
// Toolsuite-rs
//
// Tool-agnostic record of parsed command-line input, handed to a tool for validation and then to its run step.
//
// Thales Matheus Mendonça Santos - November 2025

use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use clap::{ArgAction, ArgMatches, Command};
use serde::Serialize;

use crate::contract::ValidationError;

/// Field name reserved for the selected sub-command.
pub const TOOL_FIELD: &str = "tool";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ArgValue {
    Flag(bool),
    Values(Vec<String>),
}

/// Parsed arguments: the selected tool plus each of its fields keyed by argument id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedArgs {
    tool: Option<String>,
    #[serde(flatten)]
    fields: BTreeMap<String, ArgValue>,
}

impl ParsedArgs {
    pub fn new(tool: Option<&str>) -> Self {
        Self {
            tool: tool.filter(|t| !t.is_empty()).map(str::to_string),
            fields: BTreeMap::new(),
        }
    }

    /// Capture the selected sub-command's arguments from clap matches.
    ///
    /// `cmd` must be the command the matches were produced by, so every argument the
    /// tool declared (including defaulted ones) ends up in the record.
    pub fn from_matches(cmd: &Command, matches: &ArgMatches) -> Self {
        let Some((name, sub_matches)) = matches.subcommand() else {
            return Self::default();
        };
        let mut parsed = Self::new(Some(name));
        let Some(sub_cmd) = cmd.find_subcommand(name) else {
            return parsed;
        };

        for arg in sub_cmd.get_arguments() {
            let id = arg.get_id().as_str();
            match arg.get_action() {
                ArgAction::Help
                | ArgAction::HelpShort
                | ArgAction::HelpLong
                | ArgAction::Version => {}
                ArgAction::SetTrue | ArgAction::SetFalse => {
                    parsed.set_flag(id, sub_matches.get_flag(id));
                }
                ArgAction::Count => {
                    parsed.set_value(id, sub_matches.get_count(id).to_string());
                }
                _ => {
                    // Raw values work regardless of the value parser the tool picked.
                    if let Some(raw) = sub_matches.get_raw(id) {
                        let values = raw.map(|v| v.to_string_lossy().into_owned()).collect();
                        parsed.set_values(id, values);
                    }
                }
            }
        }

        parsed
    }

    /// Selected tool name, `None` when no sub-command was chosen.
    pub fn tool(&self) -> Option<&str> {
        self.tool.as_deref()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.fields.contains_key(id)
    }

    pub fn flag(&self, id: &str) -> bool {
        matches!(self.fields.get(id), Some(ArgValue::Flag(true)))
    }

    /// First value of a field.
    pub fn value(&self, id: &str) -> Option<&str> {
        self.values(id).first().map(String::as_str)
    }

    pub fn values(&self, id: &str) -> &[String] {
        match self.fields.get(id) {
            Some(ArgValue::Values(values)) => values,
            _ => &[],
        }
    }

    /// Parse the first value of a field, reporting failures as validation errors.
    pub fn parse_value<T>(&self, id: &str) -> Result<Option<T>, ValidationError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.value(id)
            .map(|raw| parse_one(id, raw))
            .transpose()
    }

    pub fn parse_values<T>(&self, id: &str) -> Result<Vec<T>, ValidationError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.values(id).iter().map(|raw| parse_one(id, raw)).collect()
    }

    pub fn set_flag(&mut self, id: &str, value: bool) {
        self.fields.insert(id.to_string(), ArgValue::Flag(value));
    }

    pub fn set_value(&mut self, id: &str, value: impl Into<String>) {
        self.set_values(id, vec![value.into()]);
    }

    pub fn set_values(&mut self, id: &str, values: Vec<String>) {
        self.fields.insert(id.to_string(), ArgValue::Values(values));
    }

    pub fn remove(&mut self, id: &str) -> Option<ArgValue> {
        self.fields.remove(id)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

fn parse_one<T>(id: &str, raw: &str) -> Result<T, ValidationError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse::<T>()
        .map_err(|e| ValidationError::new(format!("--{}: invalid value '{}': {}", id, raw, e)))
}
