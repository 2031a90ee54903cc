use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::MismatchedBracket { .. } => "MismatchedBracket",
            ErrorImpl::UnbalancedBracket { .. } => "UnbalancedBracket",
            ErrorImpl::UnexpectedEndOfInput { .. } => "UnexpectedEndOfInput",
            ErrorImpl::UnsupportedConstruct { .. } => "UnsupportedConstruct",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::MismatchedBracket { expected, found } => ErrorTip::Suggestion(format!(
                "`{}` is a closing {} bracket, but the innermost open bracket is of the {} family",
                found,
                found_family(found),
                expected
            )),
            ErrorImpl::UnbalancedBracket { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedEndOfInput { expected } => {
                ErrorTip::Suggestion(format!("Input ended while expecting {}", expected))
            }
            ErrorImpl::UnsupportedConstruct { construct } => ErrorTip::Suggestion(format!(
                "{} is not supported by the analyzer",
                construct
            )),
            ErrorImpl::UnexpectedToken { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
        }
    }
}

fn found_family(token: &str) -> &'static str {
    match token {
        "}" => "block",
        ")" => "argument",
        "]" => "array",
        _ => "unknown",
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at line {}, column {}",
            self.internal_error, self.position.line, self.position.column
        )
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("mismatched bracket: expected a {expected} bracket to close, found {found:?}")]
    MismatchedBracket { expected: String, found: String },
    #[error("unbalanced bracket: {token:?} closes nothing")]
    UnbalancedBracket { token: String },
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEndOfInput { expected: String },
    #[error("unsupported construct: {construct}")]
    UnsupportedConstruct { construct: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedToken { token: String, message: String },
}
