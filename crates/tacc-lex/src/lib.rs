//! tacc-lex - lexical analyzer for the tacc intermediate language.
//!
//! Lexical analysis is the first pipeline phase: it turns the raw source
//! text into a finite sequence of [`Token`]s terminated by `EOF`. The
//! lexer never fails outright - a malformed number, an unterminated
//! character literal, or an unrecognized byte is recorded as a
//! `LEXICAL` diagnostic and the lexer skips past the offending text and
//! keeps scanning, so a single typo doesn't hide every other problem in
//! the file.
//!
//! Tokenization is greedy/longest-match: `==` is preferred over `=`
//! followed by `=`, `1.5` is one `FLOAT_LITERAL` rather than `1`, `.`,
//! `5`, and so on. A `//` starts a line comment that runs to the next
//! newline.

pub mod cursor;
mod lexer;

pub use lexer::Lexer;

use tacc_util::Line;

/// The category a token belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    // Keywords
    Int,
    Float,
    Char,
    If,
    Elif,
    Else,
    While,
    For,
    Loop,
    From,
    To,
    Step,
    Func,
    Return,
    Print,
    Input,
    True,
    False,

    // Literals / names
    Identifier,
    IntegerLiteral,
    FloatLiteral,
    CharLiteral,

    // Punctuation
    LBrace,
    RBrace,
    LParen,
    RParen,
    Semicolon,
    Comma,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Assign,
    EqEq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    AndAnd,
    OrOr,
    Bang,

    Eof,
}

impl TokenKind {
    /// Looks up the keyword `TokenKind` for an identifier-shaped lexeme,
    /// if any; otherwise the lexeme is a plain `IDENTIFIER`.
    pub fn keyword_for(text: &str) -> Option<TokenKind> {
        use TokenKind::*;
        Some(match text {
            "int" => Int,
            "float" => Float,
            "char" => Char,
            "if" => If,
            "elif" => Elif,
            "else" => Else,
            "while" => While,
            "for" => For,
            "loop" => Loop,
            "from" => From,
            "to" => To,
            "step" => Step,
            "func" => Func,
            "return" => Return,
            "print" => Print,
            "input" => Input,
            "true" => True,
            "false" => False,
            _ => return None,
        })
    }
}

/// A literal value carried by a token, when its kind demands one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Char(char),
}

/// A single lexical unit: its kind, the source text it came from, an
/// optional literal value, and the line it started on.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub literal: Option<Literal>,
    pub line: Line,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: Line) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            literal: None,
            line,
        }
    }

    pub fn with_literal(mut self, literal: Literal) -> Self {
        self.literal = Some(literal);
        self
    }

    pub fn eof(line: Line) -> Self {
        Self::new(TokenKind::Eof, "", line)
    }
}

/// Runs the lexer over `source`, returning the token stream (always
/// `EOF`-terminated) and any diagnostics recorded along the way.
pub fn lex(source: &str) -> (Vec<Token>, tacc_util::Diagnostics) {
    Lexer::new(source).tokenize()
}

#[cfg(test)]
mod edge_cases;
