//! tacc-par - recursive-descent parser and AST for the tacc language.
//!
//! The parser turns the token stream produced by `tacc-lex` into a
//! `Program` (a flat list of top-level statements). It is a classic
//! recursive-descent parser with one token of lookahead: one function
//! per grammar production, no backtracking.
//!
//! On a syntax error the parser records a `SYNTAX` diagnostic and
//! synchronizes to the next `;`, `}`, or statement-starting keyword
//! before resuming - it never panics and always returns a (possibly
//! partial) AST alongside whatever diagnostics were recorded.

pub mod ast;
mod expr;
mod items;
mod stmt;
mod types;

pub use ast::*;

use tacc_lex::{Token, TokenKind};
use tacc_util::{Diagnostic, Diagnostics, Kind, Line};

/// Recursive-descent parser state: the token stream, a cursor into it,
/// and the diagnostics accumulated so far.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    diagnostics: Diagnostics,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Parses the whole token stream into a `Program`, returning the
    /// (possibly partial) AST together with any diagnostics recorded.
    pub fn parse(mut self) -> (Program, Diagnostics) {
        let mut program = Vec::new();
        while !self.at_end() {
            if let Some(stmt) = self.parse_top_decl() {
                program.push(stmt);
            }
            // On `None`, `parse_top_decl` already recorded a diagnostic
            // and synchronized the cursor; the loop condition re-checks
            // EOF and otherwise just tries the next top-level form.
        }
        (program, self.diagnostics)
    }

    // ------------------------------------------------------------------
    // Cursor primitives
    // ------------------------------------------------------------------

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.pos.saturating_sub(1)]
    }

    pub(crate) fn line(&self) -> Line {
        self.peek().line
    }

    pub(crate) fn at_end(&self) -> bool {
        self.peek_kind() == TokenKind::Eof
    }

    pub(crate) fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if !self.at_end() {
            self.pos += 1;
        }
        tok
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    /// Peeks one token past the current one. Used only to distinguish
    /// `IDENT =` (assignment) from an identifier heading into a larger
    /// expression - the one place this parser needs two tokens of
    /// lookahead instead of one.
    pub(crate) fn peek_next_is(&self, kind: TokenKind) -> bool {
        self.tokens
            .get(self.pos + 1)
            .map(|t| t.kind == kind)
            .unwrap_or(false)
    }

    pub(crate) fn matches(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the current token if it has `kind`, else records a
    /// `SYNTAX` diagnostic naming what was expected vs what was found.
    pub(crate) fn expect(&mut self, kind: TokenKind, what: &str) -> Option<Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            let found = self.peek().clone();
            self.error(format!(
                "expected {what}, found '{}'",
                if found.kind == TokenKind::Eof { "EOF" } else { &found.lexeme }
            ));
            None
        }
    }

    pub(crate) fn error(&mut self, message: impl Into<String>) {
        let line = self.line();
        let lexeme = self.peek().lexeme.clone();
        let mut diag = Diagnostic::error(Kind::Syntax, line, message);
        if !lexeme.is_empty() {
            diag = diag.with_lexeme(lexeme);
        }
        self.diagnostics.push(diag);
    }

    /// True for the token kinds that start a new statement - used both
    /// to recognize a top-level declaration and as one of the
    /// synchronization points after a syntax error.
    pub(crate) fn starts_statement(kind: TokenKind) -> bool {
        matches!(
            kind,
            TokenKind::Int
                | TokenKind::Float
                | TokenKind::Char
                | TokenKind::Func
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Loop
                | TokenKind::Return
                | TokenKind::Print
                | TokenKind::Input
                | TokenKind::LBrace
                | TokenKind::Identifier
        )
    }

    /// Advances past tokens until a synchronization point: a `;`, a
    /// `}`, a statement-starting keyword, or EOF.
    pub(crate) fn synchronize(&mut self) {
        while !self.at_end() {
            if self.previous().kind == TokenKind::Semicolon {
                return;
            }
            if self.check(TokenKind::RBrace) {
                return;
            }
            if Self::starts_statement(self.peek_kind()) {
                return;
            }
            self.advance();
        }
    }
}

/// Parses `tokens` into a `Program`, synchronizing past syntax errors.
pub fn parse(tokens: Vec<Token>) -> (Program, Diagnostics) {
    Parser::new(tokens).parse()
}

#[cfg(test)]
mod edge_cases;
