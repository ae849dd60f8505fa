//! Host-facing opcodes: `OUT`, `INP`, `ARGVIEW` and the debug views.

use super::Trap;
use crate::host::Host;
use crate::machine::Machine;
use crate::visualize::{render_control, render_wheel};
use twist_types::{Instruction, Value};

impl<H: Host> Machine<'_, H> {
    /// `OUT`: the text argument if present, else the cursor value.
    pub(crate) fn out(&mut self, inst: &Instruction) -> Result<(), Trap> {
        let line = if inst.has_text() {
            inst.text_arg.clone()
        } else {
            self.frames.active().current()?.to_string()
        };
        self.host.write_line(&line)?;
        Ok(())
    }

    /// `INP`: optionally prompt, read a line and store it at the cursor.
    /// End of input stores empty text.
    pub(crate) fn input(&mut self, inst: &Instruction) -> Result<(), Trap> {
        self.frames.active().ensure_not_empty()?;
        if inst.has_text() {
            self.host.write_line(&inst.text_arg)?;
        }
        let line = self.host.read_line()?.unwrap_or_default();
        self.frames.active_mut().set_current(Value::from_input(&line))?;
        Ok(())
    }

    /// `ARGVIEW`: print the queue without consuming it.
    pub(crate) fn argview(&mut self) -> Result<(), Trap> {
        let line = self
            .queue
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        self.host.write_line(&line)?;
        Ok(())
    }

    /// `DBGPRINTV`
    pub(crate) fn debug_wheel(&mut self) -> Result<(), Trap> {
        for line in render_wheel(self.frames.active()) {
            self.host.write_line(&line)?;
        }
        Ok(())
    }

    /// `DBGPRINTC`
    pub(crate) fn debug_control(&mut self) -> Result<(), Trap> {
        for line in render_control(&self.control) {
            self.host.write_line(&line)?;
        }
        Ok(())
    }
}
