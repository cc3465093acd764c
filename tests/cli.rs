// ABOUTME: Binary-level tests exercising the built `djerba` CLI end to end

use std::io::Write;
use std::process::Command;

fn djerba_bin() -> &'static str {
    env!("CARGO_BIN_EXE_djerba")
}

fn run_source(source: &str, extra_args: &[&str]) -> std::process::Output {
    let mut file = tempfile::Builder::new()
        .suffix(".djerba")
        .tempfile()
        .unwrap();
    write!(file, "{}", source).unwrap();

    Command::new(djerba_bin())
        .arg(file.path())
        .args(extra_args)
        .output()
        .expect("failed to run djerba binary")
}

#[test]
fn test_cli_runs_script_and_prints_output() {
    let output = run_source(":> 1 + 2", &[]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "3");
}

#[test]
fn test_cli_exits_nonzero_on_parse_error() {
    let output = run_source("$x <-", &[]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("djerba:"));
}

#[test]
fn test_cli_exits_nonzero_on_missing_file() {
    let output = Command::new(djerba_bin())
        .arg("/nonexistent/path.djerba")
        .output()
        .expect("failed to run djerba binary");
    assert!(!output.status.success());
}

#[test]
fn test_cli_raw_floats_flag_changes_number_formatting() {
    let default_output = run_source(":> 14 / 2", &[]);
    let raw_output = run_source(":> 14 / 2", &["--raw-floats"]);
    assert_eq!(String::from_utf8_lossy(&default_output.stdout).trim(), "7");
    assert_eq!(String::from_utf8_lossy(&raw_output.stdout).trim(), "7.0");
}

#[test]
fn test_cli_missing_file_argument_prints_usage_to_stdout_and_exits_one() {
    let output = Command::new(djerba_bin())
        .output()
        .expect("failed to run djerba binary");
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "Usage: djerba <file.djerba>"
    );
    assert!(output.stderr.is_empty());
}

#[test]
fn test_cli_extra_argument_prints_usage_to_stdout_and_exits_one() {
    let mut file = tempfile::Builder::new()
        .suffix(".djerba")
        .tempfile()
        .unwrap();
    write!(file, ":> 1").unwrap();

    let output = Command::new(djerba_bin())
        .arg(file.path())
        .arg("extra-unexpected-argument")
        .output()
        .expect("failed to run djerba binary");
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "Usage: djerba <file.djerba>"
    );
}
