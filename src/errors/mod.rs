//! Error types and error handling for the analyzer.
//!
//! This module defines the error types used throughout the pipeline.
//! Only structural problems are errors: a closing bracket of the wrong
//! family, brackets left open at the end of input, and constructs the
//! parser refuses to guess at (templates, `switch`, attributes,
//! interpolated strings). Lexical anomalies and unmatched tokens are
//! tolerated and never surface here.

pub mod errors;

#[cfg(test)]
mod tests;
