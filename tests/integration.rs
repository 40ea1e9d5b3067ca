use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use bashi::generate::{GeneratorOptions, generate};
use bashi::load_scripts;
use bashi::parser::ParseError;

const BUILD_SCRIPT: &str = "\
#!/usr/bin/env bash
function cmd_build() {
    # Builds the project.
    echo \"building $*\"
}

function cmd_say_hi() {
    # Say 'hi'
    # to everyone.
    echo hi
}
";

fn write_script(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn bashi(args: &[&Path]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bashi"))
        .args(args)
        .output()
        .unwrap()
}

fn bazookp(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bazookp"))
        .args(args)
        .output()
        .unwrap()
}

/// Script source followed by its generated dispatcher and a call into it
fn write_runner(dir: &Path, name: &str, source: &str) -> PathBuf {
    let script = write_script(dir, "source.sh", source);
    let commands = load_scripts(&[script]).unwrap();
    write_script(
        dir,
        name,
        &format!(
            "{source}{}\nbashi_run \"$@\"\n",
            generate(&commands, &GeneratorOptions::default())
        ),
    )
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_load_scripts_keeps_file_order() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_script(dir.path(), "first.sh", "function cmd_zeta() {\n# last letter\n}\n");
    let second = write_script(dir.path(), "second.sh", "function cmd_alpha() {\n}\n");
    let commands = load_scripts(&[first, second]).unwrap();
    let names: Vec<_> = commands.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["zeta", "alpha"]);
    assert_eq!(commands[0].summary(), "last letter");
}

#[test]
fn test_load_scripts_stops_at_malformed_file() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_script(dir.path(), "good.sh", "function cmd_ok() {\n}\n");
    let bad = write_script(dir.path(), "bad.sh", "# header\nfunction cmd_bad\n");
    let err = load_scripts(&[good, bad]).unwrap_err();
    assert_eq!(err.line(), Some(2));
    assert!(matches!(err, ParseError::InFile { .. }));
}

#[test]
fn test_generate_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(
        dir.path(),
        "tasks.sh",
        "function cmd_build() {\n# Builds the project.\nfunction cmd_test() {\n",
    );
    let commands = load_scripts(&[path]).unwrap();
    let script = generate(&commands, &GeneratorOptions::default());
    assert!(script.contains("'build' ) cmd_build ;;"));
    assert!(script.contains("'test' ) cmd_test ;;"));
    assert!(script.contains("echo '    build - Builds the project.'\n"));
    assert!(script.contains("echo '    test'\n"));
}

#[test]
fn test_bashi_without_files_is_usage_error() {
    let output = bashi(&[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Expected one or more files to parse."));
    assert!(stderr.contains("Usage:"));
}

#[test]
fn test_bashi_prints_dispatcher() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(dir.path(), "tasks.sh", BUILD_SCRIPT);
    let output = bashi(&[&path]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("function bashi_run()"));
    assert!(out.contains("'say-hi' ) cmd_say_hi ;;"));
}

#[test]
fn test_bashi_malformed_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_script(dir.path(), "good.sh", BUILD_SCRIPT);
    let bad = write_script(dir.path(), "bad.sh", "\nfunction cmd_oops {\n");
    let output = bashi(&[&good, &bad]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Line 2"));
}

#[test]
fn test_generated_script_runs_under_bash() {
    let dir = tempfile::tempdir().unwrap();
    let runner = write_runner(dir.path(), "run.sh", BUILD_SCRIPT);
    let bash = |args: &[&str]| Command::new("bash").arg(&runner).args(args).output();
    let Ok(output) = bash(&["build", "ignored"]) else {
        // bash is not installed
        return;
    };
    assert!(output.status.success());
    assert_eq!(stdout(&output), "building \n");

    let output = bash(&["help", "say-hi"]).unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "Say 'hi'\nto everyone.\n");

    let output = bash(&["help"]).unwrap();
    assert_eq!(
        stdout(&output),
        "Specify a command to show help for.\n\nCommands :\n    build  - Builds the project.\n    say-hi - Say 'hi'\n\n"
    );

    let output = bash(&["deploy"]).unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "deploy is not a valid command. Use 'help' to see all commands.\n"
    );

    let output = bash(&["debug", "build"]).unwrap();
    assert!(output.status.success());
    assert_eq!(stdout(&output), "building \n");
    assert!(String::from_utf8_lossy(&output.stderr).contains("cmd_build"));

    let empty = write_runner(dir.path(), "empty.sh", "#!/usr/bin/env bash\n");
    let output = Command::new("bash").arg(&empty).arg("help").output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "Specify a command to show help for.\n\nCommands :\n\n"
    );
    let output = Command::new("bash").arg(&empty).arg("build").output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "build is not a valid command. Use 'help' to see all commands.\n"
    );
}

#[test]
fn test_duplicate_names_agree_between_dispatcher_and_inspector() {
    let source = "\
function cmd_a_b() {
    # one
    echo first
}
function cmd_a-b() {
    # two
    echo second
}
";
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(dir.path(), "dup.sh", source);
    let script = script.to_str().unwrap();

    let output = bazookp(&[script, "help", "a-b"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "two\n\n");
    let output = bazookp(&[script, "lookup", "a-b"]);
    assert_eq!(stdout(&output), "cmd_a-b\n");
    let output = bazookp(&[script, "helpall"]);
    assert_eq!(stdout(&output), "    a-b - one\n    a-b - two\n\n");

    let runner = write_runner(dir.path(), "run.sh", source);
    let bash = |args: &[&str]| Command::new("bash").arg(&runner).args(args).output();
    let Ok(output) = bash(&["help", "a-b"]) else {
        // bash is not installed
        return;
    };
    assert_eq!(stdout(&output), "two\n");
    let output = bash(&["a-b"]).unwrap();
    assert!(output.status.success());
    assert_eq!(stdout(&output), "second\n");
}

#[test]
fn test_bad_flags_exit_with_failure() {
    let output = Command::new(env!("CARGO_BIN_EXE_bashi"))
        .arg("--bogus")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage:"));

    let output = Command::new(env!("CARGO_BIN_EXE_bashi"))
        .args(["--exit-code-on-help", "300", "tasks.sh"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let output = bazookp(&["--bogus", "tasks.sh", "help"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());

    let output = Command::new(env!("CARGO_BIN_EXE_bashi"))
        .arg("--help")
        .output()
        .unwrap();
    assert!(output.status.success());
}

#[test]
fn test_bazookp_lookup() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(dir.path(), "tasks.sh", BUILD_SCRIPT);
    let path = path.to_str().unwrap();

    let output = bazookp(&[path, "lookup", "say-hi"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "cmd_say_hi\n");

    let output = bazookp(&[path, "lookup", "deploy"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());

    let output = bazookp(&[path, "lookup"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Expected a subcommand name"));
}

#[test]
fn test_bazookp_help() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(dir.path(), "tasks.sh", BUILD_SCRIPT);
    let path = path.to_str().unwrap();

    let output = bazookp(&[path, "help", "build"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Builds the project.\n\n");

    let output = bazookp(&[path, "help", "deploy"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "deploy is not a valid command. Use 'help' to see all commands.\n"
    );

    let output = bazookp(&[path, "help"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "Specify a command to see more information (if available).\n    build  - Builds the project.\n    say-hi - Say 'hi'\n\n"
    );

    let output = bazookp(&[path, "helpall", "build"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "    build  - Builds the project.\n    say-hi - Say 'hi'\n\n"
    );
}

#[test]
fn test_bazookp_argument_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(dir.path(), "tasks.sh", BUILD_SCRIPT);
    let path = path.to_str().unwrap();

    let output = bazookp(&[path, "call", "build"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "Unknown command call.\n");

    let output = bazookp(&[path]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Expected a subcommand"));

    let output = bazookp(&[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Expected a bash file"));
}

#[test]
fn test_bazookp_malformed_script() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(dir.path(), "bad.sh", "function cmd_bad\n");
    let output = bazookp(&[path.to_str().unwrap(), "helpall"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Line 1"));

    // The subcommand is checked before the script is read
    let output = bazookp(&[path.to_str().unwrap(), "call"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "Unknown command call.\n");
    assert!(!String::from_utf8_lossy(&output.stderr).contains("Line 1"));
}
