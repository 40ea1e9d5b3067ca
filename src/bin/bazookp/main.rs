use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use log::debug;

use bashi::UsageError;
use bashi::inspect::{InspectError, Query, Script};

#[derive(Parser, Debug)]
#[command(
    name = "bazookp",
    about = "Answer questions about the commands in a shell script",
    after_help = "Subcommands:\n    help [name]\n    helpall\n    lookup <name>"
)]
struct Cli {
    /// Shell script defining `cmd_*` functions
    script: Option<PathBuf>,

    /// One of `help`, `helpall` or `lookup`
    subcommand: Option<String>,

    /// Arguments for the subcommand
    #[arg(num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            if e.is::<UsageError>() {
                eprintln!("{}", Cli::command().render_long_help());
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            e.print()?;
            return Ok(match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            });
        }
    };

    let log_file = cli.log_file.as_ref().map(File::create).transpose()?;
    bashi::logger::init(log_file)?;

    let script_path = cli
        .script
        .ok_or(UsageError("Expected a bash file to parse for argument 1."))?;
    let subcommand = cli
        .subcommand
        .ok_or(UsageError("Expected a subcommand for argument 2."))?;

    let mut stdout = std::io::stdout().lock();
    let query = match Query::parse(&subcommand, &cli.args) {
        Ok(query) => query,
        Err(InspectError::MissingArgument(message)) => return Err(UsageError(message).into()),
        Err(e) => {
            writeln!(stdout, "{e}")?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let script = Script::from_file(&script_path)?;
    match script.run(&query, &mut stdout) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(InspectError::LookupMiss(name)) => {
            debug!("No command named {name}");
            Ok(ExitCode::FAILURE)
        }
        Err(e @ InspectError::NotFound(_)) => {
            writeln!(stdout, "{e}")?;
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}
