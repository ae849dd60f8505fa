//! Token types for the Twist lexer.

use twist_types::Span;
use std::fmt;

/// A single token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Every token kind in Twist source.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// A bare word: a mnemonic at the start of a line, a name anywhere else.
    Word(String),
    /// `42`, `-3`
    Integer(i64),
    /// `1.5`, `-0.25`
    Float(f64),
    /// `"hello"` (no escapes, single line)
    StringLit(String),
    /// `%`: operands come from the pending-argument queue.
    ArgsMarker,
    /// End of a line.
    Newline,
    /// End of input.
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Word(w) => write!(f, "{w}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x:?}"),
            Self::StringLit(s) => write!(f, "\"{s}\""),
            Self::ArgsMarker => write!(f, "%"),
            Self::Newline => write!(f, "newline"),
            Self::Eof => write!(f, "end of file"),
        }
    }
}
