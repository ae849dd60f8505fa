//! The pending-argument queue.

use crate::error::Fault;
use std::collections::VecDeque;
use twist_types::{ErrorKind, Value};

/// FIFO of values staged by `ADDARG` and consumed from the front by
/// `CALL`, `CMP`, `DEL` and the arithmetic opcodes. One queue lives for
/// the whole run; calls do not get their own.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgQueue {
    items: VecDeque<Value>,
}

impl ArgQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.items.iter()
    }

    pub fn push_back(&mut self, value: Value) {
        self.items.push_back(value);
    }

    /// Take the oldest value. `NOT_ENOUGH_ARGS` when the queue is empty.
    pub fn pop_front(&mut self) -> Result<Value, Fault> {
        self.items
            .pop_front()
            .ok_or_else(|| Fault::new(ErrorKind::NotEnoughArgs))
    }

    /// Fail with `NOT_ENOUGH_ARGS` unless at least `count` values are queued.
    pub fn ensure_len(&self, count: usize) -> Result<(), Fault> {
        if self.items.len() < count {
            return Err(Fault::with_detail(
                ErrorKind::NotEnoughArgs,
                format!("need {count}, {} queued", self.items.len()),
            ));
        }
        Ok(())
    }

    /// Take the `count` oldest values in order. Nothing is removed when the
    /// queue holds fewer than `count`.
    pub fn drain_front(&mut self, count: usize) -> Result<Vec<Value>, Fault> {
        self.ensure_len(count)?;
        Ok(self.items.drain(..count).collect())
    }
}
