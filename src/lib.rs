#![allow(clippy::module_inception)]

use std::fmt::Write;

use tracing::{debug, instrument};

use crate::{
    ast::ast::Ast,
    errors::errors::{Error, ErrorTip},
    lexer::{lexer::tokenize, source::Source},
    parser::parser::parse,
    tracer::{
        reaching::{reaching_definitions, ReachingDefinition},
        scope::ScopeTree,
        tracer::{trace, UsagePair},
    },
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod tracer;

extern crate regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn null() -> Self {
        Position {
            offset: 0,
            line: 0,
            column: 0,
        }
    }
}

/// Everything one run over one input produces.
#[derive(Debug)]
pub struct Analysis {
    pub source: Source,
    pub ast: Ast,
    pub scopes: ScopeTree,
    pub pairs: Vec<UsagePair>,
    pub reports: Vec<ReachingDefinition>,
}

#[instrument(level = "debug", skip_all, fields(bytes = code.len()))]
pub fn analyze(code: &str) -> Result<Analysis, Error> {
    let source = Source::new(code);
    let tokens = tokenize(&source);
    let ast = parse(tokens)?;

    let traced = trace(&ast);
    let reports = reaching_definitions(&ast, &traced);
    debug!(reports = reports.len(), "analyzed");

    Ok(Analysis {
        source,
        ast,
        scopes: traced.scopes,
        pairs: traced.pairs,
        reports,
    })
}

/// Line number, line text and 0-based character position within that line
/// for a byte offset. Offsets past the end land on the last line.
pub fn get_line_at_position(source: &Source, offset: usize) -> (usize, String, usize) {
    let code = source.code();
    let mut start = 0;
    let mut line_number = 1;

    for line in code.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&offset) {
            let line_pos = code[start..offset].chars().count();
            return (line_number, line.to_string(), line_pos);
        }

        start = end;
        line_number += 1;
    }

    let last = code.rsplit('\n').next().unwrap_or("");
    let number = code.matches('\n').count() + 1;
    let line_pos = if code.ends_with('\n') { 0 } else { last.chars().count() };
    (number, last.to_string(), line_pos)
}

pub fn render_error(error: &Error, source: &Source, file: &str) -> String {
    /*
        Error: Name (tip)
        -> file.cs
           |
        20 | if (a > b) { x = 1; );
           |                     ^
    */

    let position = error.get_position();
    let (line, line_text, line_pos) = get_line_at_position(source, position.offset);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;
    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        let _ = writeln!(out, "Error: {}", error.get_error_name());
    } else {
        let _ = writeln!(out, "Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    let _ = writeln!(out, "-> {}", file);
    let _ = writeln!(out, "{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    let _ = writeln!(out, "{} | {}", line_string, line_text_removed.trim_end());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    let _ = write!(out, "{:>padding$} {:->arrows$}", "|", "^");

    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
