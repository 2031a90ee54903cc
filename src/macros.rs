//! Utility macros for the analyzer.
//!
//! This module defines helper macros used throughout the pipeline:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_NODE!` - Allocates a node in an AST arena and returns its id
//!
//! These macros reduce boilerplate in the tokenizer and the parser.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$source` - Shared handle on the source text
/// * `$offset` - Byte offset of the first character
/// * `$line` - 1-based line number
/// * `$column` - 1-based, tab-expanded column
/// * `$length` - Length in bytes
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(source.handle(), 0, 1, 1, 3);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($source:expr, $offset:expr, $line:expr, $column:expr, $length:expr) => {
        $crate::lexer::tokens::Token::new($source, $offset, $line, $column, $length)
    };
}

/// Allocates a node anchored at an optional token.
///
/// # Example
///
/// ```ignore
/// let id = MK_NODE!(parser, Some(token), NodeKind::Literal { value });
/// ```
#[macro_export]
macro_rules! MK_NODE {
    ($parser:expr, $token:expr, $kind:expr) => {
        $parser.alloc($crate::ast::ast::Node {
            token: $token,
            kind: $kind,
        })
    };
}
