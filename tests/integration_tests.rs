//! Integration tests for end-to-end analysis.
//!
//! These tests run the complete pipeline, from source text through
//! tokenization, parsing, scope tracing and the reaching-definition
//! reduction, and drive the `defchain` binary the way a user would.

use std::process::{Command, Output};

use defchain::{analyze, errors::errors::ErrorImpl};

const COUNTER: &str = include_str!("fixtures/counter.cs");
const ACCOUNT: &str = include_str!("fixtures/account.cs");
const BROKEN: &str = include_str!("fixtures/broken.cs");
const GENERIC: &str = include_str!("fixtures/generic.cs");

const COUNTER_REPORT: &str = "<
Variable Demo:Counter.count [line: 5, column: 13],
Defined [Modified] at [line: 9, column: 13],
Demo:Counter.Increment.if [line: 10, column: 17]
>";

const ACCOUNT_REPORT: &str = "<
Variable Bank:Account.balance [line: 5, column: 17],
Defined [Modified] at [line: 15, column: 13],
Bank:Account.Deposit [line: 16, column: 17]
>";

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_defchain"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("binary should run")
}

#[test]
fn test_analyze_counter() {
    let analysis = analyze(COUNTER).unwrap();

    let reports: Vec<String> = analysis.reports.iter().map(|r| r.to_string()).collect();
    assert_eq!(reports, vec![COUNTER_REPORT.to_string()]);
    assert!(analysis.ast.diagnostics.is_empty());
}

#[test]
fn test_analyze_counter_scopes() {
    let analysis = analyze(COUNTER).unwrap();

    let paths: Vec<&str> = analysis
        .scopes
        .ids()
        .map(|id| analysis.scopes.get(id).path.as_str())
        .collect();
    assert_eq!(
        paths,
        vec![
            "",
            "Demo",
            "Demo:Counter",
            "Demo:Counter.Increment",
            "Demo:Counter.Increment.if",
            "Demo:Counter.Reset",
        ]
    );
    assert_eq!(analysis.pairs.len(), 4);
}

#[test]
fn test_analyze_account() {
    let analysis = analyze(ACCOUNT).unwrap();

    let reports: Vec<String> = analysis.reports.iter().map(|r| r.to_string()).collect();
    assert_eq!(reports, vec![ACCOUNT_REPORT.to_string()]);

    let writes = analysis.pairs.iter().filter(|pair| pair.is_assignment).count();
    let reads = analysis.pairs.len() - writes;
    assert_eq!(writes, 2);
    assert_eq!(reads, 3);
}

#[test]
fn test_analyze_is_repeatable() {
    let first = analyze(ACCOUNT).unwrap();
    let second = analyze(ACCOUNT).unwrap();

    assert_eq!(first.ast.tokens, second.ast.tokens);
    assert_eq!(first.reports, second.reports);
    assert_eq!(first.pairs.len(), second.pairs.len());
}

#[test]
fn test_analyze_broken_input() {
    let error = analyze(BROKEN).err().expect("mismatched bracket");

    assert!(matches!(error.get_kind(), ErrorImpl::MismatchedBracket { .. }));
    assert_eq!(error.get_position().line, 5);
    assert_eq!(error.get_position().column, 15);
}

#[test]
fn test_analyze_unsupported_input() {
    let error = analyze(GENERIC).err().expect("template argument list");

    assert_eq!(
        error.get_kind(),
        &ErrorImpl::UnsupportedConstruct {
            construct: "generic template argument list".to_string()
        }
    );
}

#[test]
fn test_cli_prints_reports() {
    let output = run(&[fixture("counter.cs").as_str()]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        format!("{}\n", COUNTER_REPORT)
    );
}

#[test]
fn test_cli_accepts_legacy_flags() {
    let output = run(&[fixture("account.cs").as_str(), "-ld", "-lr", "-vars", "balance", "amount"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        format!("{}\n", ACCOUNT_REPORT)
    );
}

#[test]
fn test_cli_usage() {
    let output = run(&[]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Usage:\ndefchain filename.cs [-ld -lr] [-vars var0 var1 var2]\n"
    );
}

#[test]
fn test_cli_file_not_found() {
    let missing = fixture("missing.cs");
    let output = run(&[missing.as_str()]);

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        format!("File \"{}\" not found!\n", missing)
    );
}

#[test]
fn test_cli_analysis_error() {
    let output = run(&[fixture("broken.cs").as_str()]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(3));
    assert!(output.stdout.is_empty());
    assert!(stderr.contains("Error: MismatchedBracket"));
    assert!(stderr.contains("broken.cs"));
    assert!(stderr.contains("5 | Call(1];"));
}
