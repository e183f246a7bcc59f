//! Integer and floating-point literal scanning.

use super::Lexer;
use crate::{Literal, Token, TokenKind};

impl<'a> Lexer<'a> {
    pub(crate) fn lex_number(&mut self) -> Token {
        while !self.cursor.is_at_end() && self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        let mut is_float = false;
        if self.cursor.current_char() == '.' && self.cursor.peek_char(1).is_ascii_digit() {
            is_float = true;
            self.cursor.advance(); // '.'
            while !self.cursor.is_at_end() && self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }
        } else if self.cursor.current_char() == '.' {
            // A trailing '.' with no digits after it is a malformed number,
            // not a separate token - consume it so it isn't re-reported.
            self.cursor.advance();
            self.error_with_lexeme("malformed number literal", self.lexeme().to_string());
            return self.make(TokenKind::IntegerLiteral);
        }

        // A second decimal point (e.g. `1.2.3`) is also malformed; consume
        // the whole run so the lexer doesn't re-report the same digits.
        if self.cursor.current_char() == '.' {
            while self.cursor.current_char() == '.' || self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }
            self.error_with_lexeme("malformed number literal", self.lexeme().to_string());
            return self.make(TokenKind::FloatLiteral);
        }

        let text = self.lexeme();
        if is_float {
            match text.parse::<f64>() {
                Ok(v) => self.make(TokenKind::FloatLiteral).with_literal(Literal::Float(v)),
                Err(_) => {
                    self.error_with_lexeme("malformed float literal", text.to_string());
                    self.make(TokenKind::FloatLiteral)
                }
            }
        } else {
            match text.parse::<i64>() {
                Ok(v) => self.make(TokenKind::IntegerLiteral).with_literal(Literal::Int(v)),
                Err(_) => {
                    self.error_with_lexeme("malformed integer literal", text.to_string());
                    self.make(TokenKind::IntegerLiteral)
                }
            }
        }
    }
}
