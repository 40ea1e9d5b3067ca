use crate::command::CommandRecord;

const INDENT: &str = "    ";

/// Width of the longest command name, zero for an empty set.
#[must_use]
pub fn name_width(commands: &[CommandRecord]) -> usize {
    commands
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(0)
}

/// One line per command, names padded to a common column, followed by ` - summary`
/// when the command has one.
#[must_use]
pub fn listing_lines(commands: &[CommandRecord]) -> Vec<String> {
    let width = name_width(commands);
    commands
        .iter()
        .map(|cmd| {
            let summary = cmd.summary();
            if summary.is_empty() {
                format!("{INDENT}{}", cmd.name)
            } else {
                format!("{INDENT}{:<width$} - {summary}", cmd.name)
            }
        })
        .collect()
}
