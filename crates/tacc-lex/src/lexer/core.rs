//! Main lexer dispatch loop.

use tacc_util::{Diagnostic, Diagnostics, Kind, Line};

use crate::cursor::Cursor;
use crate::{Token, TokenKind};

/// Scans a source string into a token stream.
///
/// `Lexer` owns its [`Diagnostics`] accumulator and hands it back to the
/// caller from [`Lexer::tokenize`] rather than being threaded through by
/// `&mut` reference - there is exactly one lexing pass per compilation,
/// so there is no need to share the accumulator across lexer instances.
pub struct Lexer<'a> {
    pub(crate) cursor: Cursor<'a>,
    pub(crate) diagnostics: Diagnostics,
    token_start: usize,
    token_start_line: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            diagnostics: Diagnostics::new(),
            token_start: 0,
            token_start_line: 1,
        }
    }

    /// Runs the lexer to completion, producing an `EOF`-terminated token
    /// stream and the diagnostics recorded along the way.
    pub fn tokenize(mut self) -> (Vec<Token>, Diagnostics) {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        (tokens, self.diagnostics)
    }

    fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();

        if self.cursor.is_at_end() {
            return Token::eof(Line(self.token_start_line));
        }

        let c = self.cursor.current_char();
        if c.is_ascii_alphabetic() || c == '_' {
            return self.lex_identifier();
        }
        if c.is_ascii_digit() {
            return self.lex_number();
        }
        match c {
            '\'' => self.lex_char_literal(),
            '{' | '}' | '(' | ')' | ';' | ',' => self.lex_punctuation(),
            '+' | '-' | '*' | '/' | '%' | '=' | '!' | '<' | '>' | '&' | '|' => self.lex_operator(),
            other => {
                self.error_with_lexeme(format!("unknown character '{other}'"), other.to_string());
                self.cursor.advance();
                self.next_token()
            }
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while !self.cursor.is_at_end() && self.cursor.current_char().is_whitespace() {
                self.cursor.advance();
            }
            if self.cursor.current_char() == '/' && self.cursor.peek_char(1) == '/' {
                while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
                    self.cursor.advance();
                }
                continue;
            }
            break;
        }
    }

    pub(crate) fn start_line(&self) -> Line {
        Line(self.token_start_line)
    }

    pub(crate) fn lexeme(&self) -> &'a str {
        self.cursor.slice_from(self.token_start)
    }

    pub(crate) fn make(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.lexeme(), self.start_line())
    }

    /// Records a `LEXICAL` error at the current token's starting line.
    pub(crate) fn error(&mut self, message: impl Into<String>) {
        self.diagnostics
            .push(Diagnostic::error(Kind::Lexical, self.start_line(), message));
    }

    /// Records a `LEXICAL` error and attaches the offending lexeme.
    pub(crate) fn error_with_lexeme(&mut self, message: impl Into<String>, lexeme: impl Into<String>) {
        self.diagnostics.push(
            Diagnostic::error(Kind::Lexical, self.start_line(), message).with_lexeme(lexeme),
        );
    }
}
