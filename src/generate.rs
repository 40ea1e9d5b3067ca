//! Emits the shell dispatcher for a set of parsed commands
//!
//! The generated fragment is meant to be sourced (or pasted) into a script that defines the
//! `cmd_*` functions. It provides `bashi_help` and `bashi_run`, the latter being the entry
//! point a script calls with `bashi_run "$@"`.

use std::fmt::{self, Write};

use crate::command::CommandRecord;
use crate::listing::listing_lines;

/// Defaults written into the preamble. Each stays overridable by the sourcing script.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Name shown in the usage line, `$0` when unset
    pub base_command: Option<String>,
    pub help_preamble: String,
    pub exit_code_on_help: u8,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            base_command: None,
            help_preamble: "Commands".to_string(),
            exit_code_on_help: 1,
        }
    }
}

/// Escape single quotes for use inside a single quoted shell string.
#[must_use]
pub fn escape_single_quotes(text: &str) -> String {
    text.replace('\'', r"'\''")
}

/// Wrap text in single quotes so the shell reads it literally.
#[must_use]
pub fn shell_quote(text: &str) -> String {
    format!("'{}'", escape_single_quotes(text))
}

/// One record per distinct name, in order of first appearance. A later definition of a
/// name replaces the earlier one.
fn dispatch_targets(commands: &[CommandRecord]) -> Vec<&CommandRecord> {
    let mut targets: Vec<&CommandRecord> = Vec::with_capacity(commands.len());
    for cmd in commands {
        match targets.iter_mut().find(|t| t.name == cmd.name) {
            Some(slot) => *slot = cmd,
            None => targets.push(cmd),
        }
    }
    targets
}

/// Render the complete dispatcher fragment.
#[must_use]
pub fn generate(commands: &[CommandRecord], options: &GeneratorOptions) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = render(&mut out, commands, options);
    out
}

fn render(out: &mut String, commands: &[CommandRecord], options: &GeneratorOptions) -> fmt::Result {
    render_preamble(out, options)?;
    render_help(out, commands)?;
    render_run(out, commands)
}

fn render_preamble(out: &mut String, options: &GeneratorOptions) -> fmt::Result {
    let base_command = options
        .base_command
        .as_deref()
        .map_or_else(|| "\"$0\"".to_string(), shell_quote);
    writeln!(out)?;
    writeln!(
        out,
        "[ -n \"${{bashi_base_command:-}}\" ] || bashi_base_command={base_command}"
    )?;
    writeln!(
        out,
        "[ -n \"${{bashi_help_preamble:-}}\" ] || bashi_help_preamble={}",
        shell_quote(&options.help_preamble)
    )?;
    writeln!(
        out,
        "bashi_exit_code_on_help=\"${{bashi_exit_code_on_help:-{}}}\"",
        options.exit_code_on_help
    )?;
    out.push_str(
        r#"
function on_bashi_help() {
    # Overwrite this to change behavior.
    :
}
"#,
    );
    Ok(())
}

fn render_help(out: &mut String, commands: &[CommandRecord]) -> fmt::Result {
    out.push_str(
        r#"
function bashi_help() {
    on_bashi_help
    if [ $# -lt 1 ]; then
        if [ "" != "${bashi_called_help:-}" ]; then
            echo "Specify a command to show help for."
        else
            echo "Usage: ${bashi_base_command} [command]"
        fi
        echo
        echo "${bashi_help_preamble} :"
"#,
    );
    for line in listing_lines(commands) {
        writeln!(out, "        echo {}", shell_quote(&line))?;
    }
    out.push_str(
        r#"        echo
    else
        case "$1" in
"#,
    );
    for cmd in dispatch_targets(commands) {
        writeln!(
            out,
            "            {} ) printf '%s\\n' {} ;;",
            shell_quote(&cmd.name),
            shell_quote(&cmd.documentation)
        )?;
    }
    out.push_str(
        r#"            * ) echo "${1} is not a valid command."
                shift
                bashi_help
        esac
    fi
    exit "${bashi_exit_code_on_help}"
}
"#,
    );
    Ok(())
}

fn render_run(out: &mut String, commands: &[CommandRecord]) -> fmt::Result {
    out.push_str(
        r#"
function bashi_run() {
    # Print the available commands
    if [ $# -lt 1 ]; then
        bashi_help
        exit "${bashi_exit_code_on_help}"
    fi

    case "$1" in
        "help" ) shift; bashi_called_help=true; bashi_help "$@";;
        "debug" ) shift; set -o xtrace; bashi_run "$@";;
"#,
    );
    for cmd in dispatch_targets(commands) {
        writeln!(
            out,
            "        {} ) {} ;;",
            shell_quote(&cmd.name),
            cmd.function_name
        )?;
    }
    out.push_str(
        r#"        * ) echo "${1} is not a valid command. Use 'help' to see all commands."
            exit 1
    esac
}
"#,
    );
    Ok(())
}
