//! Runtime fault and run-termination types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use twist_types::{ErrorKind, Opcode, Value};

/// A recoverable runtime fault raised by an opcode handler.
///
/// Faults never unwind by themselves: the dispatch loop receives them as
/// values and decides between `ERRH` recovery and a fatal [`Diagnostic`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", self.message())]
pub struct Fault {
    pub kind: ErrorKind,
    /// Extra context appended to the kind's message.
    pub detail: Option<String>,
}

impl Fault {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, detail: None }
    }

    pub fn with_detail(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: Some(detail.into()),
        }
    }

    /// A queue-sourced operand that is not an integer.
    pub(crate) fn non_numeric_operand(value: &Value) -> Self {
        Self::with_detail(
            ErrorKind::ArithmeticError,
            format!("{}: {} '{value}'", ErrorKind::BadArgument.message(), value.type_name()),
        )
    }

    /// A wheel value that had to be an integer but wasn't.
    pub(crate) fn non_numeric_data(value: &Value) -> Self {
        Self::with_detail(
            ErrorKind::NumericDataRequired,
            format!("found {} '{value}'", value.type_name()),
        )
    }

    /// Full human-readable message.
    pub fn message(&self) -> String {
        match &self.detail {
            Some(detail) => format!("{}: {detail}", self.kind.message()),
            None => self.kind.message().to_string(),
        }
    }
}

impl From<ErrorKind> for Fault {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

/// Everything needed to report an unrecovered fault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    pub message: String,
    /// Control cursor of the failing instruction.
    pub cursor: usize,
    pub opcode: Opcode,
    /// The failing instruction's integer argument.
    pub argument: i64,
    /// Source line of the failing instruction (0 when built by hand).
    pub line: u32,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} @ cursor {}, instruction {}, argument {}",
            self.message, self.cursor, self.opcode, self.argument
        )?;
        if self.line > 0 {
            write!(f, " (line {})", self.line)?;
        }
        Ok(())
    }
}

/// Why a run stopped without a clean exit.
#[derive(Debug, Error)]
pub enum RunError {
    /// A fault with no matching `ERRH` after it.
    #[error("{0}")]
    Fatal(Diagnostic),

    /// The configured step budget ran out. `ERRH` cannot catch this.
    #[error("step limit of {0} instructions exceeded")]
    StepLimitExceeded(u64),

    /// The host failed to read or write a line.
    #[error("host i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl RunError {
    /// The diagnostic, when the run ended on an unrecovered fault.
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Self::Fatal(diag) => Some(diag),
            _ => None,
        }
    }
}

/// Result alias for whole-run operations.
pub type RunResult<T> = Result<T, RunError>;
