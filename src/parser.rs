//! Line scanner that discovers `function cmd_*` definitions in shell scripts
//!
//! A definition is any line starting with the literal `function cmd_`. The comment lines
//! directly after it form its documentation, up to the first line that is not a comment
//! (a blank line included).

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::{debug, trace};
use thiserror::Error;

use crate::command::CommandRecord;

const COMMAND_PREFIX: &str = "function cmd_";
const COMMENT_MARKER: char = '#';

/// Errors that can occur while scanning a script
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Line {line}: missing opening parenthesis in command definition")]
    MalformedDefinition { line: usize },
    #[error("Unable to read script: {0}")]
    Io(#[from] std::io::Error),
    #[error("{}: {source}", path.display())]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<ParseError>,
    },
}

impl ParseError {
    /// Line of the offending definition, looking through file context.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::MalformedDefinition { line } => Some(*line),
            ParseError::Io(_) => None,
            ParseError::InFile { source, .. } => source.line(),
        }
    }
}

/// Single pass scanner state
#[derive(Debug, Default)]
struct Scanner {
    commands: Vec<CommandRecord>,
    collecting_docs: bool,
}

impl Scanner {
    fn feed(&mut self, line_number: usize, line: &str) -> Result<(), ParseError> {
        if let Some(rest) = line.strip_prefix(COMMAND_PREFIX) {
            let paren = rest.find('(').ok_or(ParseError::MalformedDefinition {
                line: line_number,
            })?;
            self.commands.push(CommandRecord::new(&rest[..paren], line_number));
            self.collecting_docs = true;
        } else if self.collecting_docs {
            match line.trim().strip_prefix(COMMENT_MARKER) {
                Some(text) => {
                    if let Some(current) = self.commands.last_mut() {
                        current.push_doc_line(text.trim());
                    }
                }
                None => self.collecting_docs = false,
            }
        }
        Ok(())
    }
}

/// Scan lines in order and return every command found.
///
/// # Errors
///
/// Returns `ParseError::MalformedDefinition` if a definition line has no `(`.
pub fn parse_lines<I, S>(lines: I) -> Result<Vec<CommandRecord>, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut scanner = Scanner::default();
    for (index, line) in lines.into_iter().enumerate() {
        scanner.feed(index + 1, line.as_ref())?;
    }
    Ok(scanner.commands)
}

/// Scan a buffered reader line by line.
///
/// # Errors
///
/// Returns `ParseError::Io` if reading fails, or `ParseError::MalformedDefinition`
/// for a definition line without `(`.
pub fn parse_reader<R: BufRead>(reader: R) -> Result<Vec<CommandRecord>, ParseError> {
    let mut scanner = Scanner::default();
    for (index, line) in reader.lines().enumerate() {
        scanner.feed(index + 1, &line?)?;
    }
    Ok(scanner.commands)
}

/// Open and scan a script. The file is closed before returning, on success or error.
///
/// # Errors
///
/// Returns `ParseError::InFile` wrapping the underlying read or parse error.
pub fn parse_file(path: &Path) -> Result<Vec<CommandRecord>, ParseError> {
    let in_file = |source: ParseError| ParseError::InFile {
        path: path.to_path_buf(),
        source: Box::new(source),
    };
    let file = File::open(path).map_err(|e| in_file(e.into()))?;
    let commands = parse_reader(BufReader::new(file)).map_err(in_file)?;
    debug!("Found {} commands in {}", commands.len(), path.display());
    for cmd in &commands {
        trace!(
            "{}:{}: {} -> {}",
            path.display(),
            cmd.line,
            cmd.name,
            cmd.function_name
        );
    }
    Ok(commands)
}
