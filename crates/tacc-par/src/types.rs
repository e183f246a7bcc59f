//! Parsing of the `type` grammar production (`int | float | char`).

use tacc_lex::TokenKind;

use crate::{Parser, Type};

impl Parser {
    /// True when the current token starts a `type` production.
    pub(crate) fn at_type_start(&self) -> bool {
        matches!(self.peek_kind(), TokenKind::Int | TokenKind::Float | TokenKind::Char)
    }

    /// Parses a `type` token into the corresponding `ast::Type`.
    pub(crate) fn parse_type(&mut self) -> Option<Type> {
        let ty = match self.peek_kind() {
            TokenKind::Int => Type::Int,
            TokenKind::Float => Type::Float,
            TokenKind::Char => Type::Char,
            _ => {
                self.error("expected a type ('int', 'float', or 'char')");
                return None;
            }
        };
        self.advance();
        Some(ty)
    }
}
