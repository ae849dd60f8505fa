//! The dispatch loop.

use crate::config::EngineConfig;
use crate::control::ControlStream;
use crate::error::{Diagnostic, Fault, RunError, RunResult};
use crate::frames::{CallStack, FrameStack};
use crate::functions::FunctionTable;
use crate::host::Host;
use crate::ops::{arith, wheel, Flow, OpResult, Trap};
use crate::queue::ArgQueue;
use crate::wheel::Wheel;
use serde::{Deserialize, Serialize};
use twist_types::{ErrorKind, Instruction, Opcode, Program};

/// How a run finished cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Exit {
    /// The cursor moved past the last instruction.
    EndOfStream,
    /// `RET` ran with no pending call.
    Returned,
}

/// Summary of a clean run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub exit: Exit,
    /// Instructions dispatched, including ones that faulted and recovered.
    pub steps: u64,
}

/// One execution of a program.
///
/// Owns every piece of run state: the control stream, the frame and call
/// stacks, the argument queue and the function table. The host supplies
/// output, input and sleeping.
pub struct Machine<'p, H: Host> {
    pub(crate) control: ControlStream<'p>,
    pub(crate) frames: FrameStack,
    pub(crate) calls: CallStack,
    pub(crate) queue: ArgQueue,
    pub(crate) functions: FunctionTable,
    pub(crate) host: H,
    config: EngineConfig,
    steps: u64,
}

impl<'p, H: Host> Machine<'p, H> {
    pub fn new(program: &'p Program, host: H) -> Self {
        Self::with_config(program, host, EngineConfig::default())
    }

    pub fn with_config(program: &'p Program, host: H, config: EngineConfig) -> Self {
        let functions = FunctionTable::build(&program.instructions);
        tracing::debug!(functions = ?functions.names(), "function table built");
        Self {
            control: ControlStream::new(&program.instructions),
            frames: FrameStack::new(),
            calls: CallStack::new(),
            queue: ArgQueue::new(),
            functions,
            host,
            config,
            steps: 0,
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Running
    // ══════════════════════════════════════════════════════════════════════

    /// Run until the stream ends, a top-level `RET` halts, or a fault goes
    /// unrecovered.
    pub fn run(&mut self) -> RunResult<RunOutcome> {
        let span = tracing::info_span!("run", instructions = self.control.len());
        let _guard = span.enter();
        loop {
            if let Some(exit) = self.step()? {
                tracing::info!(?exit, steps = self.steps, "run finished");
                return Ok(RunOutcome {
                    exit,
                    steps: self.steps,
                });
            }
        }
    }

    /// Dispatch one instruction. Returns `Some` once the run has finished.
    pub fn step(&mut self) -> RunResult<Option<Exit>> {
        let Some(inst) = self.control.current() else {
            return Ok(Some(Exit::EndOfStream));
        };
        if let Some(limit) = self.config.step_limit {
            if self.steps >= limit {
                return Err(RunError::StepLimitExceeded(limit));
            }
        }
        self.steps += 1;

        let cursor = self.control.cursor();
        tracing::trace!(cursor, instruction = %inst, "dispatch");
        match self.execute(inst) {
            Ok(Flow::Next) => self.control.goto(cursor + 1),
            Ok(Flow::Goto(target)) => self.control.goto(target),
            Ok(Flow::Halt) => return Ok(Some(Exit::Returned)),
            Err(Trap::Io(err)) => return Err(err.into()),
            Err(Trap::Fault(fault)) => self.recover(cursor, inst, fault)?,
        }

        Ok(self.control.at_end().then_some(Exit::EndOfStream))
    }

    fn execute(&mut self, inst: &'p Instruction) -> OpResult {
        let active = self.frames.active_mut();
        match inst.opcode {
            Opcode::Newv => wheel::newv(inst, active),
            Opcode::Movvw => wheel::movvw(inst, active)?,
            Opcode::Whldirv => wheel::whldirv(inst, active)?,
            Opcode::Addarg => wheel::addarg(active, &mut self.queue)?,
            Opcode::Cmp => wheel::cmp(inst, active, &mut self.queue)?,
            Opcode::Add => arith::add(inst, active, &mut self.queue)?,
            Opcode::Sub => arith::sub(inst, active, &mut self.queue)?,
            Opcode::Mul => arith::mul(inst, active, &mut self.queue)?,
            Opcode::Div => arith::div(inst, active, &mut self.queue)?,
            Opcode::Jmp => return Ok(self.jump(inst)),
            Opcode::Jiz => return Ok(self.jump_if_zero(inst)),
            Opcode::Whldirc => self.set_control_direction(inst)?,
            Opcode::Def => return Ok(self.skip_definition()?),
            Opcode::Call => return Ok(self.call(inst)?),
            Opcode::Ret => return Ok(self.ret()),
            Opcode::Del => self.delay(inst)?,
            Opcode::Errh => {}
            Opcode::Out => self.out(inst)?,
            Opcode::Inp => self.input(inst)?,
            Opcode::Argview => self.argview()?,
            Opcode::Dbgprintv => self.debug_wheel()?,
            Opcode::Dbgprintc => self.debug_control()?,
        }
        Ok(Flow::Next)
    }

    /// Consult the instruction after the failing one. An `ERRH` there either
    /// redirects the cursor or, on a kind mismatch, skips past itself.
    /// Anything else makes the fault fatal.
    fn recover(&mut self, cursor: usize, inst: &Instruction, fault: Fault) -> RunResult<()> {
        let handler = self
            .control
            .get(cursor + 1)
            .filter(|next| next.opcode == Opcode::Errh);
        let Some(handler) = handler else {
            let diagnostic = Diagnostic {
                kind: fault.kind,
                message: fault.message(),
                cursor,
                opcode: inst.opcode,
                argument: inst.int_arg,
                line: inst.line,
            };
            tracing::warn!(%diagnostic, "unrecovered fault");
            return Err(RunError::Fatal(diagnostic));
        };

        let matches = !handler.has_text()
            || handler
                .text_arg
                .parse::<ErrorKind>()
                .is_ok_and(|kind| kind == fault.kind);
        let target = if matches {
            self.control.relative(cursor, handler.int_arg)
        } else {
            cursor + 2
        };
        tracing::debug!(
            kind = %fault.kind,
            cursor,
            target,
            matched = matches,
            "fault handled by ERRH"
        );
        self.control.goto(target);
        Ok(())
    }

    // ══════════════════════════════════════════════════════════════════════
    // Inspection
    // ══════════════════════════════════════════════════════════════════════

    pub fn cursor(&self) -> usize {
        self.control.cursor()
    }

    pub fn control(&self) -> &ControlStream<'p> {
        &self.control
    }

    /// The top wheel of the frame stack.
    pub fn active_wheel(&self) -> &Wheel {
        self.frames.active()
    }

    pub fn global_wheel(&self) -> &Wheel {
        self.frames.global()
    }

    pub fn queue(&self) -> &ArgQueue {
        &self.queue
    }

    /// Number of wheels on the frame stack, global included.
    pub fn frame_depth(&self) -> usize {
        self.frames.depth()
    }

    /// Number of pending calls.
    pub fn call_depth(&self) -> usize {
        self.calls.depth()
    }

    pub fn functions(&self) -> &FunctionTable {
        &self.functions
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }
}
