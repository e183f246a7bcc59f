//! Edge case tests for `tacc-lex`.

use crate::{Lexer, Literal, TokenKind};

fn lex_all(source: &str) -> (Vec<crate::Token>, tacc_util::Diagnostics) {
    Lexer::new(source).tokenize()
}

fn kinds(source: &str) -> Vec<TokenKind> {
    lex_all(source).0.into_iter().map(|t| t.kind).collect()
}

#[test]
fn longest_match_multi_char_operators() {
    assert_eq!(kinds("=="), vec![TokenKind::EqEq, TokenKind::Eof]);
    assert_eq!(kinds("!="), vec![TokenKind::NotEq, TokenKind::Eof]);
    assert_eq!(kinds("<="), vec![TokenKind::LtEq, TokenKind::Eof]);
    assert_eq!(kinds(">="), vec![TokenKind::GtEq, TokenKind::Eof]);
    assert_eq!(kinds("&&"), vec![TokenKind::AndAnd, TokenKind::Eof]);
    assert_eq!(kinds("||"), vec![TokenKind::OrOr, TokenKind::Eof]);
}

#[test]
fn single_char_operators_not_swallowed_by_multi_char_rule() {
    assert_eq!(kinds("="), vec![TokenKind::Assign, TokenKind::Eof]);
    assert_eq!(kinds("!"), vec![TokenKind::Bang, TokenKind::Eof]);
    assert_eq!(kinds("<"), vec![TokenKind::Lt, TokenKind::Eof]);
    assert_eq!(kinds(">"), vec![TokenKind::Gt, TokenKind::Eof]);
}

#[test]
fn bitwise_and_or_single_char_is_unknown_byte() {
    // `&` / `|` alone are not part of this language's operator set.
    let (_, diags) = lex_all("&");
    assert!(diags.error_count() >= 1);
}

#[test]
fn malformed_number_with_two_dots_is_one_lexical_error() {
    let (_, diags) = lex_all("1.2.3");
    assert!(diags.error_count() >= 1);
}

#[test]
fn trailing_dot_with_no_digits_is_malformed() {
    let (_, diags) = lex_all("1.");
    assert!(diags.error_count() >= 1);
}

#[test]
fn integer_vs_float_literal_kinds() {
    assert_eq!(kinds("42"), vec![TokenKind::IntegerLiteral, TokenKind::Eof]);
    assert_eq!(kinds("4.2"), vec![TokenKind::FloatLiteral, TokenKind::Eof]);
}

#[test]
fn keyword_lookalikes_stay_identifiers() {
    assert_eq!(kinds("integer"), vec![TokenKind::Identifier, TokenKind::Eof]);
    assert_eq!(kinds("iffy"), vec![TokenKind::Identifier, TokenKind::Eof]);
    assert_eq!(kinds("_underscored"), vec![TokenKind::Identifier, TokenKind::Eof]);
}

#[test]
fn all_reserved_words_classify_as_keywords() {
    let words = [
        "int", "float", "char", "if", "elif", "else", "while", "for", "loop", "from", "to",
        "step", "func", "return", "print", "input", "true", "false",
    ];
    for word in words {
        let ks = kinds(word);
        assert_ne!(ks[0], TokenKind::Identifier, "{word} should not lex as IDENTIFIER");
    }
}

#[test]
fn line_numbers_advance_on_newline() {
    let (tokens, _) = lex_all("int x;\nint y;\n");
    let line_of = |lexeme: &str| {
        tokens
            .iter()
            .find(|t| t.lexeme == lexeme)
            .unwrap_or_else(|| panic!("missing token {lexeme}"))
            .line
    };
    assert_eq!(line_of("x").0, 1);
    assert_eq!(line_of("y").0, 2);
}

#[test]
fn unknown_character_does_not_abort_the_rest_of_the_file() {
    let (tokens, diags) = lex_all("int x @ = 1 ;");
    assert!(diags.error_count() >= 1);
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert!(kinds.contains(&TokenKind::Int));
    assert!(kinds.contains(&TokenKind::Assign));
    assert!(kinds.contains(&TokenKind::Semicolon));
}

#[test]
fn char_literal_value_is_recorded() {
    let (tokens, diags) = lex_all("'q'");
    assert!(diags.is_empty());
    assert_eq!(tokens[0].literal, Some(Literal::Char('q')));
}

#[test]
fn comment_runs_to_end_of_line_only() {
    let (tokens, _) = lex_all("int x; // int y;\nint z;");
    let idents: Vec<_> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Identifier)
        .map(|t| t.lexeme.as_str())
        .collect();
    assert_eq!(idents, vec!["x", "z"]);
}

#[test]
fn empty_source_is_just_eof() {
    let (tokens, diags) = lex_all("");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);
    assert!(diags.is_empty());
}

#[test]
fn whitespace_only_source_is_just_eof() {
    let (tokens, _) = lex_all("   \n\t\n  ");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);
}
