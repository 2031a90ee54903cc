//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into an Abstract Syntax Tree without a grammar. Each construct is
//! recognised from a small window of tokens around the cursor:
//!
//! - Declarations (types, namespaces, methods, properties, variables)
//! - Control-flow keywords and their bodies
//! - Calls, casts, references, literals, labels and operators
//! - Bracket balance checking across every nesting level
//!
//! Input shapes it does not handle (generic argument lists, `switch`,
//! attributes, interpolated strings) stop the parse with an error.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
