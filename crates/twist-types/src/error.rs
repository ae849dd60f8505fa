use crate::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of errors reported before the loader stops collecting.
pub const MAX_ERRORS: usize = 20;

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Diagnostic category, determined by error code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Syntax,
    Instruction,
    Definition,
}

/// Numeric load error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    // ── Syntax errors (E100–E199) ──
    pub const UNEXPECTED_CHARACTER: Self = Self(100);
    pub const UNTERMINATED_STRING: Self = Self(101);
    pub const INVALID_NUMBER: Self = Self(102);
    pub const EXPECTED_MNEMONIC: Self = Self(103);

    // ── Instruction errors (E200–E299) ──
    pub const UNKNOWN_MNEMONIC: Self = Self(200);
    pub const UNKNOWN_ERROR_KIND: Self = Self(201);
    pub const MISSING_FUNCTION_NAME: Self = Self(202);

    // ── Definition warnings (E300–E399) ──
    pub const DUPLICATE_FUNCTION: Self = Self(300);

    /// Get the category for this error code.
    pub fn category(self) -> ErrorCategory {
        match self.0 {
            200..=299 => ErrorCategory::Instruction,
            300..=399 => ErrorCategory::Definition,
            _ => ErrorCategory::Syntax,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// A structured load-time diagnostic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwistError {
    /// Source file name.
    pub file: String,
    pub code: ErrorCode,
    pub severity: Severity,
    /// Derived from `code`.
    pub category: ErrorCategory,
    pub message: String,
    #[serde(flatten)]
    pub span: Span,
    /// The offending source line, verbatim.
    pub source_line: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl TwistError {
    pub fn new(
        file: impl Into<String>,
        code: ErrorCode,
        message: impl Into<String>,
        span: Span,
        source_line: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            code,
            severity: Severity::Error,
            category: code.category(),
            message: message.into(),
            span,
            source_line: source_line.into(),
            suggestion: None,
        }
    }

    /// Same as [`TwistError::new`], reported as a warning.
    pub fn warning(
        file: impl Into<String>,
        code: ErrorCode,
        message: impl Into<String>,
        span: Span,
        source_line: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::new(file, code, message, span, source_line)
        }
    }

    /// Attach a fix suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for TwistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {} [{}] {}",
            self.file, self.span, self.code, self.category, self.message
        )
    }
}

impl std::error::Error for TwistError {}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax => write!(f, "syntax"),
            Self::Instruction => write!(f, "instruction"),
            Self::Definition => write!(f, "definition"),
        }
    }
}

/// Diagnostics collected while loading one source file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadErrors {
    pub errors: Vec<TwistError>,
    pub warnings: Vec<TwistError>,
    pub total_errors: usize,
    pub total_warnings: usize,
}

impl LoadErrors {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn has_errors(&self) -> bool {
        self.total_errors > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.total_warnings > 0
    }

    /// Whether the error cap has been reached.
    pub fn is_full(&self) -> bool {
        self.total_errors >= MAX_ERRORS
    }

    /// Add an error, respecting the [`MAX_ERRORS`] limit.
    pub fn push_error(&mut self, error: TwistError) {
        if self.errors.len() < MAX_ERRORS {
            self.errors.push(error);
        }
        self.total_errors += 1;
    }

    pub fn push_warning(&mut self, warning: TwistError) {
        self.warnings.push(warning);
        self.total_warnings += 1;
    }

    /// Append everything from `other`, keeping the cap.
    pub fn extend(&mut self, other: LoadErrors) {
        // Errors dropped by `other`'s own cap still count.
        self.total_errors += other.total_errors - other.errors.len();
        for err in other.errors {
            self.push_error(err);
        }
        for warning in other.warnings {
            self.push_warning(warning);
        }
    }
}

impl fmt::Display for LoadErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for err in &self.errors {
            writeln!(f, "{err}")?;
            if !err.source_line.is_empty() {
                writeln!(f, "    | {}", err.source_line)?;
            }
            if let Some(suggestion) = &err.suggestion {
                writeln!(f, "    = help: {suggestion}")?;
            }
        }
        if self.total_errors > self.errors.len() {
            writeln!(
                f,
                "... and {} more errors",
                self.total_errors - self.errors.len()
            )?;
        }
        for warning in &self.warnings {
            writeln!(f, "warning: {warning}")?;
        }
        Ok(())
    }
}
