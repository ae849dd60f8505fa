//! Opcodes and instruction records.
//!
//! An [`Instruction`] is the record the loader hands to the engine. The
//! opcode set is closed; the loader rejects any other mnemonic.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Every Twist opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Opcode {
    // ── Functions ──
    Def,
    Call,
    Ret,

    // ── Wheel ──
    Newv,
    Whldirv,
    Whldirc,
    Addarg,
    Cmp,
    Movvw,

    // ── I/O ──
    Out,
    Inp,

    // ── Branching ──
    Jiz,
    Jmp,

    // ── Arithmetic ──
    Add,
    Sub,
    Mul,
    Div,

    // ── Misc ──
    Del,
    Argview,
    Errh,
    Dbgprintv,
    Dbgprintc,
}

/// Returned when a mnemonic is not part of the opcode set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mnemonic '{0}'")]
pub struct UnknownMnemonic(pub String);

impl Opcode {
    pub const ALL: [Opcode; 22] = [
        Self::Def,
        Self::Call,
        Self::Ret,
        Self::Newv,
        Self::Whldirv,
        Self::Whldirc,
        Self::Addarg,
        Self::Cmp,
        Self::Movvw,
        Self::Out,
        Self::Inp,
        Self::Jiz,
        Self::Jmp,
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Del,
        Self::Argview,
        Self::Errh,
        Self::Dbgprintv,
        Self::Dbgprintc,
    ];

    /// The source mnemonic for this opcode.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Self::Def => "DEF",
            Self::Call => "CALL",
            Self::Ret => "RET",
            Self::Newv => "NEWV",
            Self::Whldirv => "WHLDIRV",
            Self::Whldirc => "WHLDIRC",
            Self::Addarg => "ADDARG",
            Self::Cmp => "CMP",
            Self::Movvw => "MOVVW",
            Self::Out => "OUT",
            Self::Inp => "INP",
            Self::Jiz => "JIZ",
            Self::Jmp => "JMP",
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::Div => "DIV",
            Self::Del => "DEL",
            Self::Argview => "ARGVIEW",
            Self::Errh => "ERRH",
            Self::Dbgprintv => "DBGPRINTV",
            Self::Dbgprintc => "DBGPRINTC",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

impl FromStr for Opcode {
    type Err = UnknownMnemonic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.mnemonic() == s)
            .ok_or_else(|| UnknownMnemonic(s.to_string()))
    }
}

/// One loaded instruction.
///
/// `float_arg` is carried through from the source but no opcode reads it.
/// `line` is the 1-based source line, kept for diagnostics only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub opcode: Opcode,
    #[serde(default)]
    pub int_arg: i64,
    #[serde(default)]
    pub text_arg: String,
    #[serde(default)]
    pub float_arg: f64,
    #[serde(default)]
    pub args_flag: bool,
    #[serde(default)]
    pub line: u32,
}

impl Instruction {
    /// An instruction with every argument at its default.
    pub fn new(opcode: Opcode) -> Self {
        Self {
            opcode,
            int_arg: 0,
            text_arg: String::new(),
            float_arg: 0.0,
            args_flag: false,
            line: 0,
        }
    }

    pub fn with_int(mut self, n: i64) -> Self {
        self.int_arg = n;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_arg = text.into();
        self
    }

    pub fn with_float(mut self, x: f64) -> Self {
        self.float_arg = x;
        self
    }

    /// Set the `%` flag (operands come from the pending-argument queue).
    pub fn with_args(mut self) -> Self {
        self.args_flag = true;
        self
    }

    pub fn at_line(mut self, line: u32) -> Self {
        self.line = line;
        self
    }

    /// Whether a non-empty text argument is present.
    pub fn has_text(&self) -> bool {
        !self.text_arg.is_empty()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.opcode)?;
        if self.has_text() {
            write!(f, " \"{}\"", self.text_arg)?;
        }
        if self.int_arg != 0 {
            write!(f, " {}", self.int_arg)?;
        }
        if self.float_arg != 0.0 {
            write!(f, " {}", float_literal(self.float_arg))?;
        }
        if self.args_flag {
            f.write_str(" %")?;
        }
        Ok(())
    }
}

/// `x` as `digits.digits`. `Display` for `f64` never uses an exponent but
/// drops the fraction of whole numbers, which would read back as an integer.
fn float_literal(x: f64) -> String {
    let text = x.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}

/// A loaded program: the control stream's instruction sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub instructions: Vec<Instruction>,
}

impl Program {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Render the program back to source form, one instruction per line.
    pub fn listing(&self) -> String {
        self.instructions
            .iter()
            .map(|inst| format!("{inst}\n"))
            .collect()
    }
}
