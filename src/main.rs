//! defchain: reaching-definition reports for curly-brace source files.
//!
//! Usage:
//!   defchain filename.cs [-ld -lr] [-vars var0 var1 var2]

use std::{fs, io::ErrorKind, path::PathBuf, process::ExitCode};

use clap::{error::ErrorKind as ClapErrorKind, Parser as ClapParser};
use defchain::{analyze, render_error};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const EXIT_USAGE: u8 = 1;
const EXIT_NOT_FOUND: u8 = 2;
const EXIT_ANALYSIS: u8 = 3;
const EXIT_UNREADABLE: u8 = 4;

#[derive(ClapParser, Debug)]
#[command(name = "defchain", about = "Trace variable definitions to the reads they reach")]
struct Cli {
    /// Source file to analyze.
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Accepted for compatibility, no effect on the output.
    #[arg(long)]
    ld: bool,

    /// Accepted for compatibility, no effect on the output.
    #[arg(long)]
    lr: bool,

    /// Variable names to report on. Consumes every remaining argument.
    #[arg(long, value_name = "VAR")]
    vars: Vec<String>,
}

/// Rewrites the single-dash spellings into ones clap understands. Everything
/// after `-vars` becomes one `--vars=<name>` each.
fn normalize_args(args: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut normalized = vec![];
    let mut in_vars = false;

    for arg in args {
        if in_vars {
            normalized.push(format!("--vars={}", arg));
            continue;
        }

        match arg.as_str() {
            "-ld" => normalized.push(String::from("--ld")),
            "-lr" => normalized.push(String::from("--lr")),
            "-vars" | "--vars" => in_vars = true,
            _ => normalized.push(arg),
        }
    }

    normalized
}

fn print_usage() {
    println!("Usage:");
    println!("defchain filename.cs [-ld -lr] [-vars var0 var1 var2]");
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = match Cli::try_parse_from(normalize_args(std::env::args())) {
        Ok(cli) => cli,
        Err(error) if error.kind() == ClapErrorKind::DisplayHelp => {
            let _ = error.print();
            return ExitCode::SUCCESS;
        }
        Err(error) => {
            debug!("{}", error);
            print_usage();
            return ExitCode::from(EXIT_USAGE);
        }
    };

    let Some(file) = cli.file.filter(|file| !file.as_os_str().is_empty()) else {
        print_usage();
        return ExitCode::from(EXIT_USAGE);
    };

    if !file.exists() {
        println!("File \"{}\" not found!", file.display());
        return ExitCode::from(EXIT_NOT_FOUND);
    }

    let code = match fs::read_to_string(&file) {
        Ok(code) => code,
        Err(error) => {
            let reason = match error.kind() {
                ErrorKind::InvalidData => String::from("not valid UTF-8"),
                _ => error.to_string(),
            };
            eprintln!("Could not read \"{}\": {}", file.display(), reason);
            return ExitCode::from(EXIT_UNREADABLE);
        }
    };

    info!(file = %file.display(), ld = cli.ld, lr = cli.lr, vars = ?cli.vars, "analyzing");

    let analysis = match analyze(&code) {
        Ok(analysis) => analysis,
        Err(error) => {
            let source = defchain::lexer::source::Source::new(&code);
            eprintln!("{}", render_error(&error, &source, &file.to_string_lossy()));
            return ExitCode::from(EXIT_ANALYSIS);
        }
    };

    for diagnostic in &analysis.ast.diagnostics {
        if let Some(token) = analysis.ast.tokens.get(diagnostic.token) {
            debug!(line = token.line(), column = token.column(), "{}", diagnostic.message);
        }
    }

    for report in &analysis.reports {
        println!("{}", report);
    }

    ExitCode::SUCCESS
}
