//! Line parser: one instruction per non-empty line.
//!
//! ```text
//! line     = MNEMONIC arg* NEWLINE
//! arg      = INTEGER | FLOAT | STRING | WORD | '%'
//! ```
//!
//! Arguments may come in any order. A later argument of the same kind
//! replaces an earlier one.

use std::collections::HashMap;
use twist_lexer::token::{Token, TokenKind};
use twist_types::{
    ErrorCode, ErrorKind, Instruction, LoadErrors, Opcode, Program, SourceFile, Span, TwistError,
};

/// The Twist parser.
///
/// Consumes a token stream produced by the lexer and builds the
/// instruction sequence. Errors are collected; a bad line is skipped and
/// parsing resumes on the next one.
pub struct Parser<'src> {
    tokens: Vec<Token>,
    /// Current index into `tokens`.
    pos: usize,
    source_file: &'src SourceFile,
    errors: LoadErrors,
    /// First DEF line per function name.
    defined: HashMap<String, u32>,
}

/// Result of parsing.
pub struct ParseResult {
    /// `None` when any error was reported.
    pub program: Option<Program>,
    pub errors: LoadErrors,
}

impl<'src> Parser<'src> {
    pub fn new(tokens: Vec<Token>, source_file: &'src SourceFile) -> Self {
        Self {
            tokens,
            pos: 0,
            source_file,
            errors: LoadErrors::empty(),
            defined: HashMap::new(),
        }
    }

    /// Parse the whole token stream.
    pub fn parse(mut self) -> ParseResult {
        let mut instructions = Vec::new();

        loop {
            self.skip_newlines();
            if self.at_end() || self.errors.is_full() {
                break;
            }
            if let Some(inst) = self.parse_line() {
                instructions.push(inst);
            }
        }

        let program = if self.errors.has_errors() {
            None
        } else {
            Some(Program::new(instructions))
        };
        ParseResult {
            program,
            errors: self.errors,
        }
    }

    // ── Token Cursor ──────────────────────────────────────────────────────────

    fn peek(&self) -> &Token {
        // The lexer guarantees a trailing Eof, so `last()` is only a fallback
        // for hand-built token vectors.
        static EOF: Token = Token {
            kind: TokenKind::Eof,
            span: Span {
                line: 1,
                start_col: 1,
                end_col: 1,
            },
        };
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .unwrap_or(&EOF)
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn at_line_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Newline | TokenKind::Eof)
    }

    fn skip_newlines(&mut self) {
        while self.peek().kind == TokenKind::Newline {
            self.advance();
        }
    }

    /// Discard the rest of the current line.
    fn skip_line(&mut self) {
        while !self.at_line_end() {
            self.advance();
        }
    }

    // ── Error Reporting ───────────────────────────────────────────────────────

    fn error(&mut self, code: ErrorCode, message: impl Into<String>, span: Span) {
        let source_line = self.source_file.line(span.line).unwrap_or("");
        let err = TwistError::new(&self.source_file.name, code, message, span, source_line);
        self.errors.push_error(err);
    }

    fn error_with_suggestion(
        &mut self,
        code: ErrorCode,
        message: impl Into<String>,
        span: Span,
        suggestion: impl Into<String>,
    ) {
        let source_line = self.source_file.line(span.line).unwrap_or("");
        let err = TwistError::new(&self.source_file.name, code, message, span, source_line)
            .with_suggestion(suggestion);
        self.errors.push_error(err);
    }

    // ── Lines ─────────────────────────────────────────────────────────────────

    fn parse_line(&mut self) -> Option<Instruction> {
        let head = self.advance();
        let TokenKind::Word(mnemonic) = &head.kind else {
            self.error(
                ErrorCode::EXPECTED_MNEMONIC,
                format!("Expected a mnemonic at the start of the line, found {}", head.kind),
                head.span,
            );
            self.skip_line();
            return None;
        };

        let opcode = match mnemonic.parse::<Opcode>() {
            Ok(op) => op,
            Err(err) => {
                let upper = mnemonic.to_ascii_uppercase();
                if upper.parse::<Opcode>().is_ok() {
                    self.error_with_suggestion(
                        ErrorCode::UNKNOWN_MNEMONIC,
                        capitalize(&err.to_string()),
                        head.span,
                        format!("Mnemonics are upper-case: {upper}"),
                    );
                } else {
                    self.error(ErrorCode::UNKNOWN_MNEMONIC, capitalize(&err.to_string()), head.span);
                }
                self.skip_line();
                return None;
            }
        };

        let mut inst = Instruction::new(opcode).at_line(head.span.line);
        let mut text_span = head.span;
        while !self.at_line_end() {
            let tok = self.advance();
            match tok.kind {
                TokenKind::Integer(n) => inst.int_arg = n,
                TokenKind::Float(x) => inst.float_arg = x,
                TokenKind::StringLit(s) | TokenKind::Word(s) => {
                    inst.text_arg = s;
                    text_span = tok.span;
                }
                TokenKind::ArgsMarker => inst.args_flag = true,
                TokenKind::Newline | TokenKind::Eof => break,
            }
        }

        if !self.validate(&inst, head.span, text_span) {
            return None;
        }
        if inst.opcode == Opcode::Def {
            self.note_definition(&inst.text_arg, text_span);
        }
        Some(inst)
    }

    /// Warn when a function name is defined twice. The later DEF wins at run time.
    fn note_definition(&mut self, name: &str, span: Span) {
        let Some(&first) = self.defined.get(name) else {
            self.defined.insert(name.to_string(), span.line);
            return;
        };
        let source_line = self.source_file.line(span.line).unwrap_or("");
        let warning = TwistError::warning(
            &self.source_file.name,
            ErrorCode::DUPLICATE_FUNCTION,
            format!("Function '{name}' is already defined on line {first}"),
            span,
            source_line,
        )
        .with_suggestion("Calls will use this later definition");
        self.errors.push_warning(warning);
    }

    /// Per-opcode checks that can be decided before execution.
    fn validate(&mut self, inst: &Instruction, head_span: Span, text_span: Span) -> bool {
        match inst.opcode {
            Opcode::Errh if inst.has_text() => {
                if let Err(err) = inst.text_arg.parse::<ErrorKind>() {
                    let known = ErrorKind::ALL
                        .iter()
                        .map(|k| k.name())
                        .collect::<Vec<_>>()
                        .join(", ");
                    self.error_with_suggestion(
                        ErrorCode::UNKNOWN_ERROR_KIND,
                        capitalize(&err.to_string()),
                        text_span,
                        format!("Expected one of: {known}"),
                    );
                    return false;
                }
                true
            }
            Opcode::Def | Opcode::Call if !inst.has_text() => {
                self.error_with_suggestion(
                    ErrorCode::MISSING_FUNCTION_NAME,
                    format!("{} requires a function name", inst.opcode),
                    head_span,
                    format!("Write `{} name`", inst.opcode),
                );
                false
            }
            _ => true,
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
