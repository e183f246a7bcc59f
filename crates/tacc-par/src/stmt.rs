//! Statement parsing: `if`/`elif`/`else`, `while`, `loop from ... to ...`,
//! `return`, `print`, `input`, nested blocks, and assignment/expression
//! statements.

use tacc_lex::TokenKind;

use crate::ast::{Block, Stmt};
use crate::Parser;

impl Parser {
    /// Parses one top-level form: a variable declaration, a function
    /// declaration, or an ordinary statement.
    pub(crate) fn parse_top_decl(&mut self) -> Option<Stmt> {
        let stmt = if self.at_type_start() {
            self.parse_var_decl()
        } else if self.check(TokenKind::Func) {
            self.parse_func_decl()
        } else {
            self.parse_statement()
        };
        if stmt.is_none() {
            self.synchronize();
        }
        stmt
    }

    pub(crate) fn parse_statement(&mut self) -> Option<Stmt> {
        match self.peek_kind() {
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::Loop => self.parse_loop(),
            TokenKind::Return => self.parse_return(),
            TokenKind::Print => self.parse_print(),
            TokenKind::Input => self.parse_input(),
            TokenKind::LBrace => self.parse_block().map(Stmt::Block),
            TokenKind::Identifier => self.parse_assign_or_expr_stmt(),
            _ => {
                self.error("expected a statement");
                None
            }
        }
    }

    pub(crate) fn parse_block(&mut self) -> Option<Block> {
        self.expect(TokenKind::LBrace, "'{'")?;
        let mut stmts = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.at_end() {
            if let Some(stmt) = self.parse_top_decl() {
                stmts.push(stmt);
            }
        }
        self.expect(TokenKind::RBrace, "'}'")?;
        Some(Block { stmts })
    }

    fn parse_if(&mut self) -> Option<Stmt> {
        let line = self.line();
        self.advance(); // 'if'
        self.expect(TokenKind::LParen, "'('")?;
        let cond = self.parse_expr()?;
        self.expect(TokenKind::RParen, "')'")?;
        let then_block = self.parse_block()?;

        let mut elifs = Vec::new();
        while self.check(TokenKind::Elif) {
            self.advance();
            self.expect(TokenKind::LParen, "'('")?;
            let elif_cond = self.parse_expr()?;
            self.expect(TokenKind::RParen, "')'")?;
            let elif_block = self.parse_block()?;
            elifs.push((elif_cond, elif_block));
        }

        let else_block = if self.matches(TokenKind::Else) {
            Some(self.parse_block()?)
        } else {
            None
        };

        Some(Stmt::If { cond, then_block, elifs, else_block, line })
    }

    fn parse_while(&mut self) -> Option<Stmt> {
        let line = self.line();
        self.advance(); // 'while'
        self.expect(TokenKind::LParen, "'('")?;
        let cond = self.parse_expr()?;
        self.expect(TokenKind::RParen, "')'")?;
        let body = self.parse_block()?;
        Some(Stmt::While { cond, body, line })
    }

    /// `loop from IDENT = expr to expr [step expr] { block }` - the
    /// only counted-loop form this language accepts; a bare C-style
    /// `for(init; cond; step)` is a syntax error (`for` tokenizes but
    /// starts no production).
    fn parse_loop(&mut self) -> Option<Stmt> {
        let line = self.line();
        self.advance(); // 'loop'
        self.expect(TokenKind::From, "'from'")?;
        let var = self.expect(TokenKind::Identifier, "a loop variable name")?.lexeme;
        self.expect(TokenKind::Assign, "'='")?;
        let start = self.parse_expr()?;
        self.expect(TokenKind::To, "'to'")?;
        let end = self.parse_expr()?;
        let step = if self.matches(TokenKind::Step) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let body = self.parse_block()?;
        Some(Stmt::For { var, start, end, step, body, line })
    }

    fn parse_return(&mut self) -> Option<Stmt> {
        let line = self.line();
        self.advance(); // 'return'
        let expr = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(TokenKind::Semicolon, "';'")?;
        Some(Stmt::Return { expr, line })
    }

    fn parse_print(&mut self) -> Option<Stmt> {
        let line = self.line();
        self.advance(); // 'print'
        let expr = self.parse_expr()?;
        self.expect(TokenKind::Semicolon, "';'")?;
        Some(Stmt::Print { expr, line })
    }

    fn parse_input(&mut self) -> Option<Stmt> {
        let line = self.line();
        self.advance(); // 'input'
        let name = self.expect(TokenKind::Identifier, "a variable name")?.lexeme;
        self.expect(TokenKind::Semicolon, "';'")?;
        Some(Stmt::Input { name, line })
    }

    /// An identifier-led statement is either `IDENT = expr ;` (assign)
    /// or a bare expression statement (e.g. a discarded call result).
    fn parse_assign_or_expr_stmt(&mut self) -> Option<Stmt> {
        let line = self.line();
        let name = self.peek().lexeme.clone();
        // Two-token lookahead only here: an assignment is the single
        // construct where `IDENT =` must be distinguished from `IDENT`
        // heading into a larger expression (e.g. a call).
        if self.tokens_ahead_is_assign() {
            self.advance(); // IDENT
            self.advance(); // '='
            let expr = self.parse_expr()?;
            self.expect(TokenKind::Semicolon, "';'")?;
            return Some(Stmt::Assign { name, expr, line });
        }
        let expr = self.parse_expr()?;
        self.expect(TokenKind::Semicolon, "';'")?;
        Some(Stmt::ExprStmt { expr, line })
    }

    fn tokens_ahead_is_assign(&self) -> bool {
        self.check(TokenKind::Identifier) && self.peek_next_is(TokenKind::Assign)
    }
}
