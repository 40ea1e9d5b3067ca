//! Direct queries against a single script's commands

use std::io::{self, Write};
use std::path::Path;

use log::debug;
use thiserror::Error;

use crate::command::CommandRecord;
use crate::listing::listing_lines;
use crate::parser::{ParseError, parse_file};

const EMPTY_SCRIPT: &str = r"
                                       \   ^
    erm... uhm... it's empty...?      o   O  ... ?
                                       _--_-
                                        |\\
                                         /|    ...?!!
";

#[derive(Error, Debug)]
pub enum InspectError {
    #[error("{0} is not a valid command. Use 'help' to see all commands.")]
    NotFound(String),
    /// Lookup misses fail without printing anything
    #[error("no command named {0}")]
    LookupMiss(String),
    #[error("Unknown command {0}.")]
    UnknownSubcommand(String),
    #[error("{0}")]
    MissingArgument(&'static str),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Which command `help` was asked about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpTarget {
    /// No name argument at all
    NotProvided,
    /// Listing requested without the instruction line
    ProvidedEmpty,
    Provided(String),
}

impl From<Option<&str>> for HelpTarget {
    fn from(arg: Option<&str>) -> Self {
        match arg {
            None => HelpTarget::NotProvided,
            Some("") => HelpTarget::ProvidedEmpty,
            Some(name) => HelpTarget::Provided(name.to_string()),
        }
    }
}

/// A parsed inspector subcommand
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Help(HelpTarget),
    Lookup(String),
}

impl Query {
    /// Build a query from the subcommand and the arguments following it.
    ///
    /// This needs no script, so callers validate the subcommand before reading one: an
    /// unknown subcommand is reported even when the script itself would fail to parse.
    ///
    /// # Errors
    ///
    /// Returns `InspectError::UnknownSubcommand` for anything other than `help`, `helpall`
    /// or `lookup`, and `InspectError::MissingArgument` when `lookup` has no name.
    pub fn parse(subcommand: &str, args: &[String]) -> Result<Self, InspectError> {
        let first = args.first().map(String::as_str);
        match subcommand {
            "help" => Ok(Query::Help(HelpTarget::from(first))),
            "helpall" => Ok(Query::Help(HelpTarget::ProvidedEmpty)),
            "lookup" => first
                .map(|name| Query::Lookup(name.to_string()))
                .ok_or(InspectError::MissingArgument(
                    "Expected a subcommand name for argument 3.",
                )),
            other => Err(InspectError::UnknownSubcommand(other.to_string())),
        }
    }
}

/// The commands of one script
#[derive(Debug, Clone, Default)]
pub struct Script {
    commands: Vec<CommandRecord>,
}

impl Script {
    #[must_use]
    pub fn new(commands: Vec<CommandRecord>) -> Self {
        Self { commands }
    }

    /// Parse a script file.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the file cannot be read or holds a malformed definition.
    pub fn from_file(path: &Path) -> Result<Self, ParseError> {
        parse_file(path).map(Self::new)
    }

    #[must_use]
    pub fn commands(&self) -> &[CommandRecord] {
        &self.commands
    }

    /// Find a command by name. With duplicates the last definition wins.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&CommandRecord> {
        self.commands.iter().rev().find(|c| c.name == name)
    }

    /// Answer a query, writing the result to `out`.
    ///
    /// # Errors
    ///
    /// Returns `InspectError::NotFound` or `InspectError::LookupMiss` for unknown names,
    /// or `InspectError::Io` if writing fails.
    pub fn run<W: Write>(&self, query: &Query, out: &mut W) -> Result<(), InspectError> {
        debug!("Running {query:?} against {} commands", self.commands.len());
        match query {
            Query::Help(target) => self.show_help(target, out),
            Query::Lookup(name) => self.lookup(name, out),
        }
    }

    /// Print the underlying shell function for a command name.
    ///
    /// # Errors
    ///
    /// Returns `InspectError::LookupMiss` without writing anything if the name is unknown.
    pub fn lookup<W: Write>(&self, name: &str, out: &mut W) -> Result<(), InspectError> {
        let cmd = self
            .find(name)
            .ok_or_else(|| InspectError::LookupMiss(name.to_string()))?;
        writeln!(out, "{}", cmd.function_name)?;
        Ok(())
    }

    /// Print the listing or the documentation of one command.
    ///
    /// # Errors
    ///
    /// Returns `InspectError::NotFound` if a named command does not exist.
    pub fn show_help<W: Write>(&self, target: &HelpTarget, out: &mut W) -> Result<(), InspectError> {
        match target {
            HelpTarget::NotProvided => {
                writeln!(out, "Specify a command to see more information (if available).")?;
                self.show_listing(out)
            }
            HelpTarget::ProvidedEmpty => self.show_listing(out),
            HelpTarget::Provided(name) => {
                let cmd = self
                    .find(name)
                    .ok_or_else(|| InspectError::NotFound(name.clone()))?;
                writeln!(out, "{}", cmd.documentation)?;
                writeln!(out)?;
                Ok(())
            }
        }
    }

    fn show_listing<W: Write>(&self, out: &mut W) -> Result<(), InspectError> {
        if self.commands.is_empty() {
            writeln!(out, "{EMPTY_SCRIPT}")?;
            return Ok(());
        }
        for line in listing_lines(&self.commands) {
            writeln!(out, "{line}")?;
        }
        writeln!(out)?;
        Ok(())
    }
}
