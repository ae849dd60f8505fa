//! Runtime error kinds.
//!
//! The set is closed: these are the only kinds an opcode handler can raise
//! and the only names an `ERRH` filter may mention.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A recoverable runtime error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    BadArgument,
    IncorrectTermination,
    #[serde(rename = "EMPTY_VWHEEL")]
    EmptyWheel,
    NumericDataRequired,
    NotEnoughArgs,
    DivisionByZero,
    UndefinedFunction,
    ArithmeticError,
}

/// Returned when a name does not denote any [`ErrorKind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown error kind '{0}'")]
pub struct UnknownErrorKind(pub String);

impl ErrorKind {
    pub const ALL: [ErrorKind; 8] = [
        Self::BadArgument,
        Self::IncorrectTermination,
        Self::EmptyWheel,
        Self::NumericDataRequired,
        Self::NotEnoughArgs,
        Self::DivisionByZero,
        Self::UndefinedFunction,
        Self::ArithmeticError,
    ];

    /// Canonical name, as written in an `ERRH` filter.
    pub fn name(self) -> &'static str {
        match self {
            Self::BadArgument => "BAD_ARGUMENT",
            Self::IncorrectTermination => "INCORRECT_TERMINATION",
            Self::EmptyWheel => "EMPTY_VWHEEL",
            Self::NumericDataRequired => "NUMERIC_DATA_REQUIRED",
            Self::NotEnoughArgs => "NOT_ENOUGH_ARGS",
            Self::DivisionByZero => "DIVISION_BY_ZERO",
            Self::UndefinedFunction => "UNDEFINED_FUNCTION",
            Self::ArithmeticError => "ARITHMETIC_ERROR",
        }
    }

    /// Older spelling still found in existing programs.
    fn legacy_name(self) -> &'static str {
        match self {
            Self::BadArgument => "BAD_ARGUMENT_ERROR",
            Self::IncorrectTermination => "INCORRECT_TERMINATION_ERROR",
            Self::EmptyWheel => "EMPTY_VWHEEL_ERROR",
            Self::NumericDataRequired => "NUMERIC_DATA_ERROR",
            Self::NotEnoughArgs => "NOT_ENOUGH_ARGS_ERROR",
            Self::DivisionByZero => "DIVISION_BY_ZERO_ERROR",
            Self::UndefinedFunction => "UNDEFINED_FUNCTION_ERROR",
            Self::ArithmeticError => "ARITHMETIC_ERROR",
        }
    }

    /// Human-readable message used in fatal diagnostics.
    pub fn message(self) -> &'static str {
        match self {
            Self::BadArgument => "Bad argument",
            Self::IncorrectTermination => "Incorrect termination",
            Self::EmptyWheel => "Cannot operate on empty wheel",
            Self::NumericDataRequired => "Numeric data required in wheel",
            Self::NotEnoughArgs => "Not enough arguments",
            Self::DivisionByZero => "Division by zero",
            Self::UndefinedFunction => "Call to undefined function",
            Self::ArithmeticError => "Arithmetic error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ErrorKind {
    type Err = UnknownErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s || kind.legacy_name() == s)
            .ok_or_else(|| UnknownErrorKind(s.to_string()))
    }
}
