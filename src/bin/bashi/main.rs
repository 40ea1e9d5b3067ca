use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use bashi::generate::{GeneratorOptions, generate};
use bashi::{UsageError, load_scripts};

#[derive(Parser, Debug)]
#[command(
    name = "bashi",
    about = "Generate command dispatch boilerplate for shell scripts"
)]
struct Cli {
    /// Shell scripts defining `cmd_*` functions, parsed in order
    files: Vec<PathBuf>,

    /// Command name shown in the usage line (defaults to `$0` at runtime)
    #[arg(long)]
    base_command: Option<String>,

    /// Heading printed above the command listing
    #[arg(long, default_value = "Commands")]
    help_preamble: String,

    /// Exit status used after help is shown
    #[arg(long, default_value_t = 1)]
    exit_code_on_help: u8,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl From<&Cli> for GeneratorOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            base_command: cli.base_command.clone(),
            help_preamble: cli.help_preamble.clone(),
            exit_code_on_help: cli.exit_code_on_help,
        }
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            if e.is::<UsageError>() {
                eprintln!("{}", Cli::command().render_usage());
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

    if cli.files.is_empty() {
        return Err(UsageError("Expected one or more files to parse.").into());
    }

    // Everything is parsed before anything is written
    let commands = load_scripts(&cli.files)?;
    let script = generate(&commands, &GeneratorOptions::from(&cli));

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(script.as_bytes())?;
    stdout.flush()?;
    Ok(ExitCode::SUCCESS)
}
