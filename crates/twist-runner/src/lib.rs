//! Twist runner: orchestrates the load-and-run pipeline.
//!
//! ```text
//! Twist source → Lexer → Parser → Program → Machine → RunReport
//! ```
//!
//! Every entry point here is total: load errors, runtime faults and host
//! failures all come back as data, ready to print or serialize.

mod report;

pub use report::{ExitReason, RunReport};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use thiserror::Error;
use twist_lexer::Lexer;
use twist_parser::Parser;
use twist_types::{LoadErrors, Program, SourceFile};
use twist_vm::{BufferedHost, EngineConfig, Host, Machine};

/// Failures outside the program itself.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot serialize program: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result of loading a source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadResult {
    pub success: bool,
    /// The instruction sequence, when loading succeeded.
    pub program: Option<Program>,
    pub errors: LoadErrors,
    /// Hex SHA-256 of the program's canonical JSON.
    pub fingerprint: Option<String>,
}

/// Read a source file from disk.
pub fn read_source(path: &Path) -> Result<String, RunnerError> {
    std::fs::read_to_string(path).map_err(|source| RunnerError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Lex and parse `source`. Lexing errors stop the pipeline before parsing.
pub fn load(source: &str, name: &str) -> LoadResult {
    let span = tracing::info_span!("load", file = name);
    let _guard = span.enter();

    let sf = SourceFile::new(name, source);
    let lexed = Lexer::new(&sf).lex();
    let mut errors = lexed.errors;
    if errors.has_errors() {
        tracing::debug!(errors = errors.total_errors, "lexing failed");
        return LoadResult::failed(errors);
    }

    let parsed = Parser::new(lexed.tokens, &sf).parse();
    errors.extend(parsed.errors);
    match parsed.program {
        Some(program) if !errors.has_errors() => {
            let fingerprint = fingerprint(&program)
                .inspect_err(|err| tracing::warn!(%err, "fingerprint unavailable"))
                .ok();
            tracing::debug!(instructions = program.len(), "program loaded");
            LoadResult {
                success: true,
                program: Some(program),
                errors,
                fingerprint,
            }
        }
        _ => {
            tracing::debug!(errors = errors.total_errors, "parsing failed");
            LoadResult::failed(errors)
        }
    }
}

/// Load-time diagnostics only.
pub fn check(source: &str, name: &str) -> LoadErrors {
    load(source, name).errors
}

/// Hex-encoded SHA-256 of the program's canonical JSON form.
pub fn fingerprint(program: &Program) -> Result<String, RunnerError> {
    let canonical = serde_json::to_vec(program)?;
    Ok(format!("{:x}", Sha256::digest(&canonical)))
}

/// Load and run `source` against `host`.
///
/// The report carries no captured output; use [`run_buffered`] for that.
pub fn run_source<H: Host>(source: &str, name: &str, host: H, config: &EngineConfig) -> RunReport {
    let loaded = load(source, name);
    let Some(program) = loaded.program else {
        return RunReport::load_failed(loaded.errors);
    };
    let mut machine = Machine::with_config(&program, host, config.clone());
    let result = machine.run();
    RunReport::from_run(result, machine.steps(), loaded.errors, loaded.fingerprint)
}

/// Load and run `source` with scripted input, capturing every output line.
pub fn run_buffered<I, S>(source: &str, name: &str, input: I, config: &EngineConfig) -> RunReport
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut host = BufferedHost::with_input(input);
    let mut report = run_source(source, name, &mut host, config);
    if report.exit != ExitReason::LoadFailed {
        report.output = Some(host.output);
    }
    report
}

impl LoadResult {
    fn failed(errors: LoadErrors) -> Self {
        Self {
            success: false,
            program: None,
            errors,
            fingerprint: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_hex_sha256() {
        let program = load("NEWV 1\n", "t.whl").program.unwrap();
        let fp = fingerprint(&program).unwrap();
        assert_eq!(fp.len(), 64);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_source(Path::new("/definitely/not/here.whl")).unwrap_err();
        assert!(err.to_string().starts_with("cannot read /definitely/not/here.whl"));
    }
}
