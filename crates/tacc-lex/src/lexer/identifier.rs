//! Identifier and keyword scanning.

use super::Lexer;
use crate::{Token, TokenKind};

impl<'a> Lexer<'a> {
    pub(crate) fn lex_identifier(&mut self) -> Token {
        while !self.cursor.is_at_end()
            && (self.cursor.current_char().is_ascii_alphanumeric() || self.cursor.current_char() == '_')
        {
            self.cursor.advance();
        }
        let text = self.lexeme();
        let kind = TokenKind::keyword_for(text).unwrap_or(TokenKind::Identifier);
        self.make(kind)
    }
}
