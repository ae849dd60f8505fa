//! Circular addressing shared by wheels and the control stream.

use serde::{Deserialize, Serialize};

/// Travel direction of a wheel or of the control stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    /// Decode a `WHLDIRV` / `WHLDIRC` argument. Only `1` and `-1` are valid.
    pub fn from_arg(arg: i64) -> Option<Self> {
        match arg {
            1 => Some(Self::Forward),
            -1 => Some(Self::Backward),
            _ => None,
        }
    }

    pub fn sign(self) -> i64 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

/// Move `steps` positions from `position` in `direction` on a ring of
/// `len` slots, using floored modulo so the result is always in `[0, len)`.
///
/// `len` must be non-zero.
pub fn step_index(position: usize, direction: Direction, steps: i64, len: usize) -> usize {
    debug_assert!(len > 0, "step_index on an empty ring");
    let target = position as i128 + i128::from(direction.sign()) * i128::from(steps);
    target.rem_euclid(len as i128) as usize
}
