//! Twist parser: converts a token stream into a [`twist_types::Program`].

mod parser;

pub use parser::{ParseResult, Parser};
