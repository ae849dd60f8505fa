//! Frame stack and call stack.

use crate::wheel::Wheel;

/// Stack of wheels. The bottom wheel is the global scope and is never
/// popped; the top wheel is the one every wheel opcode acts on.
#[derive(Debug, Clone)]
pub struct FrameStack {
    frames: Vec<Wheel>,
}

impl FrameStack {
    /// A stack holding only an empty global wheel.
    pub fn new() -> Self {
        Self {
            frames: vec![Wheel::new()],
        }
    }

    pub fn active(&self) -> &Wheel {
        // `frames` is never empty: `pop` refuses to remove the global wheel.
        &self.frames[self.frames.len() - 1]
    }

    pub fn active_mut(&mut self) -> &mut Wheel {
        let top = self.frames.len() - 1;
        &mut self.frames[top]
    }

    pub fn global(&self) -> &Wheel {
        &self.frames[0]
    }

    pub fn push(&mut self, wheel: Wheel) {
        self.frames.push(wheel);
    }

    /// Pop the active wheel unless it is the global one.
    pub fn pop(&mut self) -> Option<Wheel> {
        if self.frames.len() > 1 {
            self.frames.pop()
        } else {
            None
        }
    }

    /// Number of wheels, global included.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

impl Default for FrameStack {
    fn default() -> Self {
        Self::new()
    }
}

/// Saved return addresses, one per pending `CALL`.
#[derive(Debug, Clone, Default)]
pub struct CallStack {
    returns: Vec<usize>,
}

impl CallStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, return_to: usize) {
        self.returns.push(return_to);
    }

    pub fn pop(&mut self) -> Option<usize> {
        self.returns.pop()
    }

    pub fn depth(&self) -> usize {
        self.returns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.returns.is_empty()
    }
}
