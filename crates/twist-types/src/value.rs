use serde::{Deserialize, Serialize};
use std::fmt;

/// A runtime datum held by a wheel slot or the pending-argument queue.
///
/// Values are immutable; overwriting a slot replaces the whole value.
/// `Float` is never produced by the loader. It only appears as the result of
/// a whole-wheel `DIV`, and every integer-consuming opcode rejects it the
/// same way it rejects `Text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Value {
    Integer(i64),
    Text(String),
    Float(f64),
}

impl Value {
    /// Returns the integer payload, if this is an `Integer`.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the text payload, if this is a `Text`.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Human-readable kind name, used in fault details.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Text(_) => "text",
            Self::Float(_) => "float",
        }
    }

    /// Parse a line of input: an integer if it parses as one, text otherwise.
    pub fn from_input(line: &str) -> Self {
        let trimmed = line.trim();
        match trimmed.parse::<i64>() {
            Ok(n) => Self::Integer(n),
            Err(_) => Self::Text(trimmed.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::Float(x) => write!(f, "{x}"),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}
