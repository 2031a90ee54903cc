//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::Position;

fn at(offset: usize, line: usize, column: usize) -> Position {
    Position {
        offset,
        line,
        column,
    }
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnbalancedBracket {
            token: ")".to_string(),
        },
        at(10, 1, 11),
    );

    assert_eq!(error.get_error_name(), "UnbalancedBracket");
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::UnsupportedConstruct {
            construct: "switch statement".to_string(),
        },
        at(42, 3, 5),
    );

    assert_eq!(error.get_position().offset, 42);
    assert_eq!(error.get_position().line, 3);
    assert_eq!(error.get_position().column, 5);
}

#[test]
fn test_mismatched_bracket_error() {
    let error = Error::new(
        ErrorImpl::MismatchedBracket {
            expected: "block".to_string(),
            found: ")".to_string(),
        },
        Position::null(),
    );

    assert_eq!(error.get_error_name(), "MismatchedBracket");
    match error.get_tip() {
        ErrorTip::Suggestion(tip) => {
            assert!(tip.contains("argument"));
            assert!(tip.contains("block"));
        }
        ErrorTip::None => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_end_of_input_error() {
    let error = Error::new(
        ErrorImpl::UnexpectedEndOfInput {
            expected: "`}`".to_string(),
        },
        Position::null(),
    );

    assert_eq!(error.get_error_name(), "UnexpectedEndOfInput");
}

#[test]
fn test_unexpected_token_error() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "value".to_string(),
            message: "expected a property accessor".to_string(),
        },
        Position::null(),
    );

    assert_eq!(error.get_error_name(), "UnexpectedToken");
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnbalancedBracket {
            token: "]".to_string(),
        },
        Position::null(),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_error_display_includes_location() {
    let error = Error::new(
        ErrorImpl::UnsupportedConstruct {
            construct: "attribute".to_string(),
        },
        at(0, 7, 9),
    );

    assert_eq!(
        error.to_string(),
        "unsupported construct: attribute at line 7, column 9"
    );
}
