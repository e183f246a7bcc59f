//! Fluent construction of [`Diagnostic`] values.

use super::{Diagnostic, Kind, Level};
use crate::Line;

/// Builds a [`Diagnostic`] one field at a time.
///
/// ```
/// use tacc_util::diagnostic::{DiagnosticBuilder, Kind};
/// use tacc_util::Line;
///
/// let diag = DiagnosticBuilder::error(Kind::Syntax, Line(4), "unexpected token")
///     .lexeme("}")
///     .build();
/// assert_eq!(diag.line, Line(4));
/// ```
pub struct DiagnosticBuilder {
    level: Level,
    kind: Kind,
    line: Line,
    message: String,
    lexeme: Option<String>,
}

impl DiagnosticBuilder {
    pub fn error(kind: Kind, line: Line, message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            kind,
            line,
            message: message.into(),
            lexeme: None,
        }
    }

    pub fn warning(kind: Kind, line: Line, message: impl Into<String>) -> Self {
        Self {
            level: Level::Warning,
            kind,
            line,
            message: message.into(),
            lexeme: None,
        }
    }

    pub fn lexeme(mut self, lexeme: impl Into<String>) -> Self {
        self.lexeme = Some(lexeme.into());
        self
    }

    pub fn build(self) -> Diagnostic {
        Diagnostic {
            level: self.level,
            kind: self.kind,
            line: self.line,
            message: self.message,
            lexeme: self.lexeme,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_error_with_lexeme() {
        let d = DiagnosticBuilder::error(Kind::Lexical, Line(2), "bad byte")
            .lexeme("#")
            .build();
        assert_eq!(d.level, Level::Error);
        assert_eq!(d.lexeme.as_deref(), Some("#"));
    }
}
