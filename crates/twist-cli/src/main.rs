//! Run, check or dump a Twist program.
//!
//! Usage:
//! - `twist run <file> [--step-limit N]`
//! - `twist check <file>`
//! - `twist dump <file> [--emit text|json]`

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};
use twist_runner::{load, read_source, run_source, ExitReason, LoadResult};
use twist_vm::{EngineConfig, StdHost};

#[derive(Parser, Debug)]
#[command(name = "twist")]
#[command(about = "Run programs written in the Twist wheel language", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load and execute a program
    Run {
        /// Path to the source file
        file: PathBuf,

        /// Stop after this many instructions
        #[arg(long = "step-limit")]
        step_limit: Option<u64>,
    },

    /// Report load errors without running
    Check {
        /// Path to the source file
        file: PathBuf,
    },

    /// Print the loaded instruction sequence
    Dump {
        /// Path to the source file
        file: PathBuf,

        #[arg(long, value_enum, default_value_t = Emit::Text)]
        emit: Emit,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Emit {
    Text,
    Json,
}

/// Install the stderr subscriber. `RUST_LOG` overrides the `warn` default.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    debug!(?cli, "arguments parsed");

    match cli.command {
        Command::Run { file, step_limit } => cmd_run(&file, EngineConfig { step_limit }),
        Command::Check { file } => cmd_check(&file),
        Command::Dump { file, emit } => cmd_dump(&file, emit),
    }
}

fn cmd_run(file: &Path, config: EngineConfig) -> ExitCode {
    let Some(source) = read(file) else {
        return ExitCode::FAILURE;
    };
    let name = file.display().to_string();
    let report = run_source(&source, &name, StdHost, &config);
    info!(exit = ?report.exit, steps = report.steps, "finished");
    if report.errors.has_errors() || report.errors.has_warnings() {
        eprint!("{}", report.errors);
    }

    match report.exit {
        ExitReason::EndOfStream | ExitReason::Returned => ExitCode::SUCCESS,
        ExitReason::LoadFailed => ExitCode::FAILURE,
        ExitReason::Fault | ExitReason::StepLimit | ExitReason::HostError => {
            if let Some(error) = &report.error {
                eprintln!("error: {error}");
            }
            ExitCode::FAILURE
        }
    }
}

fn cmd_check(file: &Path) -> ExitCode {
    let Some(loaded) = load_file(file) else {
        return ExitCode::FAILURE;
    };
    match loaded.program {
        Some(program) => {
            println!("{}: ok ({} instructions)", file.display(), program.len());
            ExitCode::SUCCESS
        }
        None => ExitCode::FAILURE,
    }
}

fn cmd_dump(file: &Path, emit: Emit) -> ExitCode {
    let Some(loaded) = load_file(file) else {
        return ExitCode::FAILURE;
    };
    let Some(program) = &loaded.program else {
        return ExitCode::FAILURE;
    };
    match emit {
        Emit::Text => {
            if let Some(fingerprint) = &loaded.fingerprint {
                println!("; sha256 {fingerprint}");
            }
            print!("{}", program.listing());
        }
        Emit::Json => match serde_json::to_string_pretty(program) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: cannot encode program: {err}");
                return ExitCode::FAILURE;
            }
        },
    }
    ExitCode::SUCCESS
}

/// Read and load `file`, printing any errors to stderr.
fn load_file(file: &Path) -> Option<LoadResult> {
    let source = read(file)?;
    let loaded = load(&source, &file.display().to_string());
    if loaded.errors.has_errors() || loaded.errors.has_warnings() {
        eprint!("{}", loaded.errors);
    }
    Some(loaded)
}

fn read(file: &Path) -> Option<String> {
    match read_source(file) {
        Ok(source) => Some(source),
        Err(err) => {
            eprintln!("error: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_with_step_limit() {
        let cli = Cli::try_parse_from(["twist", "run", "prog.whl", "--step-limit", "100"]).unwrap();
        match cli.command {
            Command::Run { file, step_limit } => {
                assert_eq!(file, PathBuf::from("prog.whl"));
                assert_eq!(step_limit, Some(100));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_dump_defaults_to_text() {
        let cli = Cli::try_parse_from(["twist", "dump", "prog.whl"]).unwrap();
        assert!(matches!(cli.command, Command::Dump { emit: Emit::Text, .. }));
        let cli = Cli::try_parse_from(["twist", "dump", "prog.whl", "--emit", "json"]).unwrap();
        assert!(matches!(cli.command, Command::Dump { emit: Emit::Json, .. }));
    }

    #[test]
    fn test_missing_file_argument() {
        assert!(Cli::try_parse_from(["twist", "check"]).is_err());
    }
}
