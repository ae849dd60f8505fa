//! Core Twist lexer: converts source text to a token stream.
//!
//! Twist is line-oriented: every newline is a token, `;` starts a comment
//! that runs to the end of the line, and strings never span lines. Errors
//! are collected (up to [`twist_types::MAX_ERRORS`]) and scanning resumes
//! after the offending character.

use twist_types::{ErrorCode, LoadErrors, SourceFile, Span, TwistError};

use crate::token::{Token, TokenKind};

/// The Twist lexer.
pub struct Lexer<'src> {
    /// The full source text.
    text: &'src str,
    /// The same text as bytes, for cheap peeking.
    source: &'src [u8],
    source_file: &'src SourceFile,
    /// Current byte offset into `source`.
    pos: usize,
    /// Current line number (1-based).
    line: u32,
    /// Current column number (1-based).
    col: u32,
    errors: LoadErrors,
}

/// Result of lexing: tokens + any errors collected.
pub struct LexResult {
    /// The token stream (always ends with [`TokenKind::Eof`]).
    pub tokens: Vec<Token>,
    pub errors: LoadErrors,
}

impl<'src> Lexer<'src> {
    pub fn new(source_file: &'src SourceFile) -> Self {
        Self {
            text: &source_file.source,
            source: source_file.source.as_bytes(),
            source_file,
            pos: 0,
            line: 1,
            col: 1,
            errors: LoadErrors::empty(),
        }
    }

    /// Lex the entire source file into a token stream.
    pub fn lex(mut self) -> LexResult {
        let mut tokens = Vec::new();

        loop {
            if self.errors.is_full() {
                break;
            }
            let token = self.scan();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }

        if tokens.last().is_none_or(|t| t.kind != TokenKind::Eof) {
            tokens.push(Token::new(TokenKind::Eof, self.current_span()));
        }

        LexResult {
            tokens,
            errors: self.errors,
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Character-level helpers
    // ─────────────────────────────────────────────────────────────

    fn peek(&self) -> Option<u8> {
        self.source.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.source.get(self.pos + offset).copied()
    }

    /// Advance over one full character (multi-byte aware).
    fn advance(&mut self) -> Option<char> {
        let ch = self.text[self.pos..].chars().next()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn current_span(&self) -> Span {
        Span::point(self.line, self.col)
    }

    fn span_from(&self, start_col: u32) -> Span {
        Span::new(self.line, start_col, self.col.saturating_sub(1).max(start_col))
    }

    fn emit_error(&mut self, code: ErrorCode, message: impl Into<String>, span: Span) {
        let source_line = self.source_file.line(span.line).unwrap_or("");
        let err = TwistError::new(&self.source_file.name, code, message, span, source_line);
        self.errors.push_error(err);
    }

    fn emit_error_with_suggestion(
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

    // ─────────────────────────────────────────────────────────────
    // Whitespace & comments
    // ─────────────────────────────────────────────────────────────

    /// Skip spaces, tabs and carriage returns (newlines are tokens).
    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\r') = self.peek() {
            self.advance();
        }
    }

    /// Skip a `;` comment up to (not including) the newline.
    fn skip_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == b'\n' {
                break;
            }
            self.advance();
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Scanning
    // ─────────────────────────────────────────────────────────────

    fn scan(&mut self) -> Token {
        loop {
            self.skip_whitespace();
            if self.peek() == Some(b';') {
                self.skip_comment();
                continue;
            }

            let start_col = self.col;
            let Some(ch) = self.peek() else {
                return Token::new(TokenKind::Eof, self.current_span());
            };

            match ch {
                b'\n' => {
                    self.advance();
                    return Token::new(TokenKind::Newline, Span::point(self.line - 1, start_col));
                }
                b'"' => return self.scan_string(start_col),
                b'%' => {
                    self.advance();
                    return Token::new(TokenKind::ArgsMarker, self.span_from(start_col));
                }
                b'0'..=b'9' => return self.scan_number(start_col),
                b'-' if self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) => {
                    return self.scan_number(start_col)
                }
                b'a'..=b'z' | b'A'..=b'Z' => return self.scan_word(start_col),
                _ => {
                    let bad = self.advance().unwrap_or('\0');
                    let span = self.span_from(start_col);
                    if bad == '#' || bad == '/' {
                        self.emit_error_with_suggestion(
                            ErrorCode::UNEXPECTED_CHARACTER,
                            format!("Unexpected character '{bad}'"),
                            span,
                            "Comments start with ';'",
                        );
                    } else {
                        self.emit_error(
                            ErrorCode::UNEXPECTED_CHARACTER,
                            format!("Unexpected character '{bad}'"),
                            span,
                        );
                    }
                    if self.errors.is_full() {
                        return Token::new(TokenKind::Eof, self.current_span());
                    }
                }
            }
        }
    }

    /// Scan `"..."`. The string ends at the closing quote; a newline or end
    /// of input before it is an error, and the partial text is kept.
    fn scan_string(&mut self, start_col: u32) -> Token {
        self.advance(); // opening quote
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if ch == b'"' || ch == b'\n' {
                break;
            }
            self.advance();
        }
        let text = self.text[start..self.pos].to_string();

        if self.peek() == Some(b'"') {
            self.advance();
        } else {
            let span = self.span_from(start_col);
            self.emit_error_with_suggestion(
                ErrorCode::UNTERMINATED_STRING,
                "Unterminated string literal",
                span,
                "Close the string with '\"' before the end of the line",
            );
        }
        Token::new(TokenKind::StringLit(text), self.span_from(start_col))
    }

    /// Scan an integer (`-12`) or float (`3.25`).
    fn scan_number(&mut self, start_col: u32) -> Token {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.advance();
        }
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        let is_float = self.peek() == Some(b'.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit());
        if is_float {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let literal = &self.text[start..self.pos];
        let span = self.span_from(start_col);

        if is_float {
            return match literal.parse::<f64>() {
                Ok(x) => Token::new(TokenKind::Float(x), span),
                Err(_) => {
                    self.emit_error(
                        ErrorCode::INVALID_NUMBER,
                        format!("Malformed number '{literal}'"),
                        span,
                    );
                    Token::new(TokenKind::Float(0.0), span)
                }
            };
        }

        match literal.parse::<i64>() {
            Ok(n) => Token::new(TokenKind::Integer(n), span),
            Err(_) => {
                let literal = literal.to_string();
                self.emit_error_with_suggestion(
                    ErrorCode::INVALID_NUMBER,
                    format!("Integer literal '{literal}' is out of range"),
                    span,
                    "Integers are 64-bit signed",
                );
                Token::new(TokenKind::Integer(0), span)
            }
        }
    }

    /// Scan a word: a letter followed by letters, digits or `_`.
    fn scan_word(&mut self, start_col: u32) -> Token {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == b'_')
        {
            self.advance();
        }
        let word = self.text[start..self.pos].to_string();
        Token::new(TokenKind::Word(word), self.span_from(start_col))
    }
}
