//! Control-flow opcodes: jumps, definitions, calls, returns and `DEL`.

use super::wheel::direction_arg;
use super::Flow;
use crate::error::Fault;
use crate::host::Host;
use crate::machine::Machine;
use crate::wheel::Wheel;
use std::time::Duration;
use twist_types::{ErrorKind, Instruction, Opcode};

impl<H: Host> Machine<'_, H> {
    /// `JMP`: relative, circular, in the control stream's direction.
    pub(crate) fn jump(&self, inst: &Instruction) -> Flow {
        Flow::Goto(self.control.relative(self.control.cursor(), inst.int_arg))
    }

    /// `JIZ`: jump while the active wheel's comparison flag is clear.
    pub(crate) fn jump_if_zero(&self, inst: &Instruction) -> Flow {
        if self.frames.active().flag() {
            Flow::Next
        } else {
            self.jump(inst)
        }
    }

    /// `WHLDIRC`
    pub(crate) fn set_control_direction(&mut self, inst: &Instruction) -> Result<(), Fault> {
        let direction = direction_arg(inst.int_arg)?;
        self.control.set_direction(direction);
        Ok(())
    }

    /// `DEF` reached in sequence: skip the body, landing after its `RET`.
    pub(crate) fn skip_definition(&self) -> Result<Flow, Fault> {
        let start = self.control.cursor() + 1;
        self.control.instructions()[start..]
            .iter()
            .position(|inst| inst.opcode == Opcode::Ret)
            .map(|offset| Flow::Goto(start + offset + 1))
            .ok_or_else(|| {
                Fault::with_detail(ErrorKind::IncorrectTermination, "DEF without a following RET")
            })
    }

    /// `CALL`: move arguments from the queue into a fresh wheel and enter
    /// the function. Nothing changes unless the call can go through.
    pub(crate) fn call(&mut self, inst: &Instruction) -> Result<Flow, Fault> {
        let function = self.functions.get(&inst.text_arg)?;
        let count = if inst.int_arg != 0 {
            inst.int_arg
        } else if inst.args_flag {
            function.arity
        } else {
            0
        };
        let count = usize::try_from(count).map_err(|_| {
            Fault::with_detail(ErrorKind::BadArgument, format!("negative argument count {count}"))
        })?;
        let arguments = self.queue.drain_front(count)?;

        let return_to = self.control.cursor() + 1;
        self.calls.push(return_to);
        self.frames.push(Wheel::from_values(arguments));
        tracing::debug!(
            function = %inst.text_arg,
            arguments = count,
            entry = function.entry,
            return_to,
            depth = self.calls.depth(),
            "call"
        );
        Ok(Flow::Goto(function.entry))
    }

    /// `RET`: resume after the matching `CALL`, or halt at top level.
    pub(crate) fn ret(&mut self) -> Flow {
        let Some(return_to) = self.calls.pop() else {
            tracing::debug!("RET with no pending call, halting");
            return Flow::Halt;
        };
        self.frames.pop();
        tracing::debug!(return_to, depth = self.calls.depth(), "return");
        Flow::Goto(return_to)
    }

    /// `DEL`: sleep for a number of milliseconds. Negative durations sleep
    /// for zero.
    pub(crate) fn delay(&mut self, inst: &Instruction) -> Result<(), Fault> {
        let millis = if inst.args_flag {
            let value = self.queue.pop_front()?;
            value
                .as_integer()
                .ok_or_else(|| Fault::non_numeric_operand(&value))?
        } else {
            inst.int_arg
        };
        let duration = Duration::from_millis(u64::try_from(millis).unwrap_or(0));
        self.host.sleep(duration);
        Ok(())
    }
}
