//! Shared types for the Twist toolchain.
//!
//! This crate defines the runtime value model, the closed opcode set, the
//! instruction records handed from the loader to the engine, the runtime
//! error kinds recognised by `ERRH`, and the load-time diagnostics.

mod error;
mod instruction;
mod kind;
mod span;
mod value;

pub use error::{ErrorCategory, ErrorCode, LoadErrors, Severity, TwistError, MAX_ERRORS};
pub use instruction::{Instruction, Opcode, Program, UnknownMnemonic};
pub use kind::{ErrorKind, UnknownErrorKind};
pub use span::{SourceFile, Span};
pub use value::Value;
