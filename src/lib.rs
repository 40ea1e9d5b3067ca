//! Boilerplate generator for command style shell scripts
//!
//! Bashi scans shell scripts for functions named `cmd_*`, reads the comment block right after
//! each definition as its documentation, and emits a dispatcher with a `help` command. The
//! `inspect` module answers the same questions about a single script without generating code.

use std::path::Path;

use log::info;
use thiserror::Error;

use crate::command::CommandRecord;
use crate::parser::{ParseError, parse_file};

pub mod command;
pub mod generate;
pub mod inspect;
pub mod listing;
pub mod logger;
pub mod parser;

/// Missing command line arguments
#[derive(Error, Debug)]
#[error("{0}")]
pub struct UsageError(pub &'static str);

/// Parse every script in order, concatenating their commands.
///
/// # Errors
///
/// Returns `ParseError` for the first file that cannot be read or parsed. Files after it
/// are not opened.
pub fn load_scripts<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<CommandRecord>, ParseError> {
    let mut commands = Vec::new();
    for path in paths {
        commands.extend(parse_file(path.as_ref())?);
    }
    info!(
        "Loaded {} commands from {} scripts",
        commands.len(),
        paths.len()
    );
    Ok(commands)
}
