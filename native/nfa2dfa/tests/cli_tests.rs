//! Tests for the command layer: argument dispatch, conversion output and the
//! binary's exit status.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

use clap::Parser;
use nfa2dfa::automaton::{DFA, Recognizer};
use nfa2dfa::cli::{Cli, commands};

/// a,b with 0 -a-> 1 and 1 -b-> 1, state 1 accepting.
const TWO_STATE: &str = "a,b\n2\n1\n{},{}\n{1},{}\n{},{1}\n";

/// The conversion of `TWO_STATE`: sink 0, start {0} as 1, {1} as 2.
const TWO_STATE_DFA: &str = "a,b\n3\n2\n{0},{2},{0}\n{0},{0},{2}\n";

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn parse(args: &[&Path]) -> Cli {
    let args = std::iter::once(Path::new("nfa2dfa")).chain(args.iter().copied());
    Cli::try_parse_from(args).unwrap()
}

/// Run the binary with `stdin` piped in and colors disabled.
fn run_binary(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_nfa2dfa"))
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_execute_convert_writes_dfa_file() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "two.nfa", TWO_STATE);
    let output = dir.path().join("two.dfa");

    let cli = parse(&[&input, Path::new("--to-dfa"), &output]);
    commands::execute(cli).unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), TWO_STATE_DFA);
    let dfa = DFA::load(&output).unwrap();
    assert!(dfa.accepts("a"));
    assert!(dfa.accepts("ab"));
    assert!(!dfa.accepts("b"));
}

#[test]
fn test_execute_convert_missing_input() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("missing.nfa");
    let output = dir.path().join("out.dfa");

    let cli = parse(&[&input, Path::new("--to-dfa"), &output]);
    let err = commands::execute(cli).unwrap_err();

    let message = format!("{err:#}");
    assert!(message.contains("Failed to load NFA"), "{message}");
    assert!(message.contains("missing.nfa"), "{message}");
    assert!(!output.exists());
}

#[test]
fn test_execute_convert_unwritable_output() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "two.nfa", TWO_STATE);
    let output = dir.path().join("no-such-dir").join("out.dfa");

    let cli = parse(&[&input, Path::new("--to-dfa"), &output]);
    let err = commands::execute(cli).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to write DFA"));
}

#[test]
fn test_execute_convert_reports_malformed_line() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "bad.nfa", "a,b\n2\n1\n{},{}\n{1},{}\n");
    let output = dir.path().join("out.dfa");

    let cli = parse(&[&input, Path::new("--to-dfa"), &output]);
    let message = format!("{:#}", commands::execute(cli).unwrap_err());
    assert!(message.contains("Failed to load NFA"), "{message}");
    assert!(message.contains("line 6"), "{message}");
}

#[test]
fn test_execute_dfa_flag_loads_as_dfa() {
    let dir = TempDir::new().unwrap();
    // A valid NFA file is not a valid DFA file: its epsilon row shifts
    // every row down and leaves one row too many.
    let input = write(&dir, "two.nfa", TWO_STATE);

    let cli = parse(&[&input, Path::new("--dfa")]);
    let message = format!("{:#}", commands::execute(cli).unwrap_err());
    assert!(message.contains("Failed to load DFA"), "{message}");
}

#[test]
fn test_binary_converts_and_reports() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "two.nfa", TWO_STATE);
    let output = dir.path().join("two.dfa");

    let result = run_binary(
        &[input.to_str().unwrap(), "--to-afd", output.to_str().unwrap()],
        "",
    );

    assert!(result.status.success());
    let stdout = String::from_utf8(result.stdout).unwrap();
    assert!(stdout.contains("DFA written to"), "{stdout}");
    assert!(stdout.contains("(3 states)"), "{stdout}");
    assert_eq!(fs::read_to_string(&output).unwrap(), TWO_STATE_DFA);
}

#[test]
fn test_binary_evaluates_dfa_session() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "two.dfa", TWO_STATE_DFA);

    let result = run_binary(&[input.to_str().unwrap(), "--dfa", "-q"], "a\nb\nab\n\nb\n");

    assert!(result.status.success());
    let stdout = String::from_utf8(result.stdout).unwrap();
    assert_eq!(stdout, "ACCEPTED\nREJECTED\nACCEPTED\n");
}

#[test]
fn test_binary_prompts_for_nfa_session() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "two.nfa", TWO_STATE);

    let result = run_binary(&[input.to_str().unwrap()], "a\n");

    assert!(result.status.success());
    let stdout = String::from_utf8(result.stdout).unwrap();
    assert!(stdout.starts_with("Enter a string"), "{stdout}");
    assert!(stdout.contains("ACCEPTED"), "{stdout}");
}

#[test]
fn test_binary_error_exits_with_status_one() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("missing.nfa");

    let result = run_binary(&[input.to_str().unwrap(), "-q"], "");

    assert_eq!(result.status.code(), Some(1));
    let stderr = String::from_utf8(result.stderr).unwrap();
    assert!(stderr.starts_with("Error: Failed to load NFA"), "{stderr}");
    assert!(result.stdout.is_empty());
}
