//! Operator and punctuation scanning.
//!
//! Two-character operators (`==`, `!=`, `<=`, `>=`, `&&`, `||`) are
//! matched before falling back to their single-character prefix, giving
//! the longest-match behavior the lexer promises.

use super::Lexer;
use crate::{Token, TokenKind};

impl<'a> Lexer<'a> {
    pub(crate) fn lex_punctuation(&mut self) -> Token {
        let c = self.cursor.current_char();
        self.cursor.advance();
        let kind = match c {
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            _ => unreachable!("lex_punctuation called on non-punctuation byte"),
        };
        self.make(kind)
    }

    pub(crate) fn lex_operator(&mut self) -> Token {
        let c = self.cursor.current_char();
        self.cursor.advance();
        let kind = match c {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '=' => self.two_char_or(TokenKind::EqEq, '=', TokenKind::Assign),
            '!' => self.two_char_or(TokenKind::NotEq, '=', TokenKind::Bang),
            '<' => self.two_char_or(TokenKind::LtEq, '=', TokenKind::Lt),
            '>' => self.two_char_or(TokenKind::GtEq, '=', TokenKind::Gt),
            '&' => self.two_char_or(TokenKind::AndAnd, '&', TokenKind::AndAnd),
            '|' => self.two_char_or(TokenKind::OrOr, '|', TokenKind::OrOr),
            _ => unreachable!("lex_operator called on non-operator byte"),
        };
        self.make(kind)
    }

    /// Consumes `expected` if it follows and returns `multi`; otherwise
    /// returns `single` without consuming anything further. `&` and `|`
    /// use this with `multi == single` since this language has no
    /// single-character bitwise forms - a lone `&` or `|` is still
    /// reported as the logical operator so callers get a clear error
    /// about the missing second character instead of "unknown byte".
    fn two_char_or(&mut self, multi: TokenKind, expected: char, single: TokenKind) -> TokenKind {
        if self.cursor.current_char() == expected {
            self.cursor.advance();
            multi
        } else {
            single
        }
    }
}
