//! `//` line comment skipping.

use super::Lexer;

impl<'a> Lexer<'a> {
    /// Returns true and consumes a `//` comment (up to but not including
    /// the newline) if one starts at the cursor.
    pub(crate) fn skip_line_comment(&mut self) -> bool {
        if self.cursor.current_char() == '/' && self.cursor.peek_char(1) == '/' {
            while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
                self.cursor.advance();
            }
            true
        } else {
            false
        }
    }
}
