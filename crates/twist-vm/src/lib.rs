//! Twist execution engine.
//!
//! Runs a loaded [`twist_types::Program`] against a stack of circular
//! variable wheels. The control stream has its own cursor and direction;
//! relative jumps wrap around it, calls and returns use absolute indices.
//! A failing instruction may be caught by an `ERRH` on the very next line;
//! anything else ends the run with a [`Diagnostic`].

mod circular;
mod config;
mod control;
mod error;
mod frames;
mod functions;
mod host;
mod machine;
mod ops;
mod queue;
mod visualize;
mod wheel;

pub use circular::{step_index, Direction};
pub use config::EngineConfig;
pub use control::ControlStream;
pub use error::{Diagnostic, Fault, RunError, RunResult};
pub use frames::{CallStack, FrameStack};
pub use functions::{FunctionEntry, FunctionTable};
pub use host::{BufferedHost, Host, StdHost};
pub use machine::{Exit, Machine, RunOutcome};
pub use queue::ArgQueue;
pub use visualize::{render_control, render_wheel, MAX_RING_ITEMS};
pub use wheel::Wheel;
