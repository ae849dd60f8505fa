//! The control stream: the loaded instructions plus a cursor and direction.

use crate::circular::{step_index, Direction};
use twist_types::Instruction;

/// Read-only instruction sequence with a movable cursor.
///
/// Relative jumps wrap around the stream in its current direction. The
/// cursor may sit at `len()` after falling off the end, which is how a run
/// finishes normally.
#[derive(Debug, Clone, Copy)]
pub struct ControlStream<'p> {
    instructions: &'p [Instruction],
    cursor: usize,
    direction: Direction,
}

impl<'p> ControlStream<'p> {
    pub fn new(instructions: &'p [Instruction]) -> Self {
        Self {
            instructions,
            cursor: 0,
            direction: Direction::Forward,
        }
    }

    pub fn instructions(&self) -> &'p [Instruction] {
        self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// The instruction under the cursor, or `None` past the end.
    pub fn current(&self) -> Option<&'p Instruction> {
        self.instructions.get(self.cursor)
    }

    /// The instruction at `index`, without wrap-around.
    pub fn get(&self, index: usize) -> Option<&'p Instruction> {
        self.instructions.get(index)
    }

    pub fn at_end(&self) -> bool {
        self.cursor >= self.instructions.len()
    }

    /// Move the cursor to an absolute index.
    pub fn goto(&mut self, index: usize) {
        self.cursor = index;
    }

    /// Target of a relative jump of `steps` from `from` in the stream's
    /// direction. The stream must be non-empty.
    pub fn relative(&self, from: usize, steps: i64) -> usize {
        step_index(from, self.direction, steps, self.instructions.len())
    }
}
