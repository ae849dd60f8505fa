//! Serializable run reports.

use serde::{Deserialize, Serialize};
use twist_types::LoadErrors;
use twist_vm::{Diagnostic, Exit, RunError, RunOutcome, RunResult};

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitReason {
    EndOfStream,
    Returned,
    Fault,
    StepLimit,
    HostError,
    LoadFailed,
}

impl From<Exit> for ExitReason {
    fn from(exit: Exit) -> Self {
        match exit {
            Exit::EndOfStream => Self::EndOfStream,
            Exit::Returned => Self::Returned,
        }
    }
}

/// Everything a caller needs to know about one load-and-run.
///
/// ```json
/// {
///   "success": false,
///   "exit": "fault",
///   "steps": 6,
///   "output": [],
///   "diagnostic": { "kind": "DIVISION_BY_ZERO", "cursor": 5, ... },
///   "error": "Division by zero @ cursor 5, instruction DIV, argument 2 (line 6)",
///   "errors": { "errors": [], "warnings": [], ... },
///   "fingerprint": "9f2c..."
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub success: bool,
    pub exit: ExitReason,
    /// Instructions dispatched before the run stopped.
    pub steps: u64,
    /// Captured program output, when the host buffers it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Vec<String>>,
    /// Set when an unrecovered fault ended the run.
    pub diagnostic: Option<Diagnostic>,
    /// One-line description of any failure.
    pub error: Option<String>,
    /// Load-time diagnostics. A program that ran may still carry warnings.
    pub errors: LoadErrors,
    pub fingerprint: Option<String>,
}

impl RunReport {
    pub(crate) fn load_failed(errors: LoadErrors) -> Self {
        let error = errors
            .errors
            .first()
            .map(|first| format!("{} load error(s); first: {first}", errors.total_errors));
        Self {
            success: false,
            exit: ExitReason::LoadFailed,
            steps: 0,
            output: None,
            diagnostic: None,
            error,
            errors,
            fingerprint: None,
        }
    }

    pub(crate) fn from_run(
        result: RunResult<RunOutcome>,
        steps: u64,
        errors: LoadErrors,
        fingerprint: Option<String>,
    ) -> Self {
        let mut report = Self {
            success: false,
            exit: ExitReason::EndOfStream,
            steps,
            output: None,
            diagnostic: None,
            error: None,
            errors,
            fingerprint,
        };
        match result {
            Ok(outcome) => {
                report.success = true;
                report.exit = outcome.exit.into();
            }
            Err(err) => {
                report.error = Some(err.to_string());
                report.exit = match err {
                    RunError::Fatal(diagnostic) => {
                        report.diagnostic = Some(diagnostic);
                        ExitReason::Fault
                    }
                    RunError::StepLimitExceeded(_) => ExitReason::StepLimit,
                    RunError::Io(_) => ExitReason::HostError,
                };
            }
        }
        report
    }
}
