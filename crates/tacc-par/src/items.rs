//! Top-level declaration parsing: `var_decl` and `func_decl`.

use tacc_lex::TokenKind;

use crate::ast::{Param, Stmt};
use crate::Parser;

impl Parser {
    /// `var_decl := type IDENT ('=' expr)? ';'`
    pub(crate) fn parse_var_decl(&mut self) -> Option<Stmt> {
        let line = self.line();
        let ty = self.parse_type()?;
        let name = self.expect(TokenKind::Identifier, "a variable name")?.lexeme;
        let init = if self.matches(TokenKind::Assign) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.expect(TokenKind::Semicolon, "';'")?;
        Some(Stmt::VarDecl { ty, name, init, line })
    }

    /// `func_decl := 'func' type IDENT '(' params? ')' block`
    pub(crate) fn parse_func_decl(&mut self) -> Option<Stmt> {
        let line = self.line();
        self.advance(); // 'func'
        let ret_ty = self.parse_type()?;
        let name = self.expect(TokenKind::Identifier, "a function name")?.lexeme;
        self.expect(TokenKind::LParen, "'('")?;
        let params = self.parse_params()?;
        self.expect(TokenKind::RParen, "')'")?;
        let body = self.parse_block()?;
        Some(Stmt::FuncDecl { ret_ty, name, params, body, line })
    }

    /// `params := type IDENT (',' type IDENT)*`
    fn parse_params(&mut self) -> Option<Vec<Param>> {
        let mut params = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                let ty = self.parse_type()?;
                let name = self.expect(TokenKind::Identifier, "a parameter name")?.lexeme;
                params.push(Param { ty, name });
                if !self.matches(TokenKind::Comma) {
                    break;
                }
            }
        }
        Some(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tacc_lex::lex;

    fn parse_one(src: &str) -> Stmt {
        let (tokens, diags) = lex(src);
        assert!(diags.is_empty(), "lex errors: {diags:?}");
        let mut p = Parser::new(tokens);
        p.parse_top_decl().expect("declaration should parse")
    }

    #[test]
    fn var_decl_without_initializer() {
        let s = parse_one("int x;");
        match s {
            Stmt::VarDecl { name, init, .. } => {
                assert_eq!(name, "x");
                assert!(init.is_none());
            }
            _ => panic!("expected var decl"),
        }
    }

    #[test]
    fn var_decl_with_initializer() {
        let s = parse_one("float pi = 3.14;");
        match s {
            Stmt::VarDecl { ty, init, .. } => {
                assert_eq!(ty, crate::Type::Float);
                assert!(init.is_some());
            }
            _ => panic!("expected var decl"),
        }
    }

    #[test]
    fn func_decl_with_params() {
        let s = parse_one("func int add(int a, int b) { return a + b; }");
        match s {
            Stmt::FuncDecl { name, params, body, .. } => {
                assert_eq!(name, "add");
                assert_eq!(params.len(), 2);
                assert_eq!(body.stmts.len(), 1);
            }
            _ => panic!("expected func decl"),
        }
    }

    #[test]
    fn func_decl_with_no_params() {
        let s = parse_one("func int zero() { return 0; }");
        match s {
            Stmt::FuncDecl { params, .. } => assert!(params.is_empty()),
            _ => panic!("expected func decl"),
        }
    }
}
