//! Variable wheels: circular value storage with a cursor.

use crate::circular::{step_index, Direction};
use crate::error::Fault;
use serde::Serialize;
use twist_types::{ErrorKind, Value};

/// A circular sequence of values with a cursor, a travel direction and the
/// comparison flag set by `CMP`.
///
/// The cursor is always in `[0, len)` while the wheel holds values. Every
/// accessor that needs a slot fails with `EMPTY_VWHEEL` on an empty wheel.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Wheel {
    values: Vec<Value>,
    cursor: usize,
    direction: Direction,
    flag: bool,
}

impl Wheel {
    /// An empty wheel: cursor 0, forward, flag clear.
    pub fn new() -> Self {
        Self::default()
    }

    /// A wheel preloaded with `values`, cursor on the first one.
    pub fn from_values(values: Vec<Value>) -> Self {
        Self {
            values,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The comparison flag read by `JIZ`.
    pub fn flag(&self) -> bool {
        self.flag
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn set_flag(&mut self, flag: bool) {
        self.flag = flag;
    }

    /// Append a value. The cursor does not move.
    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    /// Fail with `EMPTY_VWHEEL` unless the wheel holds a value.
    pub fn ensure_not_empty(&self) -> Result<(), Fault> {
        if self.values.is_empty() {
            Err(Fault::new(ErrorKind::EmptyWheel))
        } else {
            Ok(())
        }
    }

    /// The value under the cursor.
    pub fn current(&self) -> Result<&Value, Fault> {
        self.values
            .get(self.cursor)
            .ok_or_else(|| Fault::new(ErrorKind::EmptyWheel))
    }

    /// The integer under the cursor. `NUMERIC_DATA_REQUIRED` for any other kind.
    pub fn current_integer(&self) -> Result<i64, Fault> {
        let value = self.current()?;
        value
            .as_integer()
            .ok_or_else(|| Fault::non_numeric_data(value))
    }

    /// Overwrite the slot under the cursor.
    pub fn set_current(&mut self, value: Value) -> Result<(), Fault> {
        let slot = self
            .values
            .get_mut(self.cursor)
            .ok_or_else(|| Fault::new(ErrorKind::EmptyWheel))?;
        *slot = value;
        Ok(())
    }

    /// Rotate the cursor by `steps` in the wheel's direction.
    pub fn rotate(&mut self, steps: i64) -> Result<(), Fault> {
        self.ensure_not_empty()?;
        self.cursor = step_index(self.cursor, self.direction, steps, self.values.len());
        Ok(())
    }
}
