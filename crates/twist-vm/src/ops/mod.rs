//! Opcode handlers.
//!
//! Wheel and arithmetic handlers are free functions over the active wheel
//! and the argument queue. Handlers that move the control cursor or talk to
//! the host live on [`Machine`](crate::Machine) in `flow` and `io`.

pub(crate) mod arith;
pub(crate) mod flow;
pub(crate) mod io;
pub(crate) mod wheel;

use crate::error::Fault;

/// What the dispatch loop does after a handler succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    /// Advance the cursor by one.
    Next,
    /// Move the cursor to an absolute index.
    Goto(usize),
    /// Stop the run cleanly.
    Halt,
}

/// Why a handler failed.
#[derive(Debug)]
pub(crate) enum Trap {
    /// A runtime fault, subject to `ERRH` recovery.
    Fault(Fault),
    /// Host i/o failure. Never recoverable.
    Io(std::io::Error),
}

impl From<Fault> for Trap {
    fn from(fault: Fault) -> Self {
        Self::Fault(fault)
    }
}

impl From<std::io::Error> for Trap {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

pub(crate) type OpResult = Result<Flow, Trap>;
