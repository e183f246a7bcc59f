//! Character literal scanning (`'x'`).

use super::Lexer;
use crate::{Literal, Token, TokenKind};

impl<'a> Lexer<'a> {
    pub(crate) fn lex_char_literal(&mut self) -> Token {
        self.cursor.advance(); // opening quote

        if self.cursor.current_char() == '\'' {
            self.cursor.advance();
            self.error_with_lexeme("empty character literal", self.lexeme().to_string());
            return self.make(TokenKind::CharLiteral);
        }

        if self.cursor.is_at_end() || self.cursor.current_char() == '\n' {
            self.error_with_lexeme("unterminated character literal", self.lexeme().to_string());
            return self.make(TokenKind::CharLiteral);
        }

        let value = self.cursor.current_char();
        self.cursor.advance();

        if self.cursor.current_char() != '\'' {
            // Consume until the closing quote (or end of line) so a
            // multi-character literal is reported once, not once per byte.
            while !self.cursor.is_at_end()
                && self.cursor.current_char() != '\''
                && self.cursor.current_char() != '\n'
            {
                self.cursor.advance();
            }
            if self.cursor.current_char() == '\'' {
                self.cursor.advance();
            }
            self.error_with_lexeme(
                "character literal must contain exactly one character",
                self.lexeme().to_string(),
            );
            return self.make(TokenKind::CharLiteral);
        }

        self.cursor.advance(); // closing quote
        self.make(TokenKind::CharLiteral).with_literal(Literal::Char(value))
    }
}
