//! Lexical analysis module for the analyzer.
//!
//! This module turns source text into a stream of positioned tokens.
//! It handles:
//!
//! - The line index and tab-aware column math
//! - Splitting on whitespace and notation characters
//! - String and char literals, line and block comments
//! - Merging multi-character operators and split decimal literals

pub mod lexer;
pub mod source;
pub mod tokens;
