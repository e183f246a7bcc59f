//! Expression parsing: one function per precedence tier, each a plain
//! left-associative loop over its operator set (lowest precedence first):
//! logical-or, logical-and, equality, relational, additive,
//! multiplicative, unary, primary. This mirrors the grammar in §6 line
//! for line rather than folding it into a single generic binding-power
//! table, so each level stays directly readable against its production.

use tacc_lex::{Literal, TokenKind};

use crate::ast::{BinOp, Expr, ExprKind, UnOp};
use crate::Parser;

impl Parser {
    pub(crate) fn parse_expr(&mut self) -> Option<Expr> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_and()?;
        while self.check(TokenKind::OrOr) {
            let line = self.line();
            self.advance();
            let rhs = self.parse_and()?;
            lhs = Expr::new(
                ExprKind::Binary { op: BinOp::Or, lhs: Box::new(lhs), rhs: Box::new(rhs) },
                line,
            );
        }
        Some(lhs)
    }

    fn parse_and(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_equality()?;
        while self.check(TokenKind::AndAnd) {
            let line = self.line();
            self.advance();
            let rhs = self.parse_equality()?;
            lhs = Expr::new(
                ExprKind::Binary { op: BinOp::And, lhs: Box::new(lhs), rhs: Box::new(rhs) },
                line,
            );
        }
        Some(lhs)
    }

    fn parse_equality(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_relational()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::EqEq => BinOp::Eq,
                TokenKind::NotEq => BinOp::Ne,
                _ => break,
            };
            let line = self.line();
            self.advance();
            let rhs = self.parse_relational()?;
            lhs = Expr::new(
                ExprKind::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) },
                line,
            );
        }
        Some(lhs)
    }

    fn parse_relational(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_additive()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Lt => BinOp::Lt,
                TokenKind::Gt => BinOp::Gt,
                TokenKind::LtEq => BinOp::Le,
                TokenKind::GtEq => BinOp::Ge,
                _ => break,
            };
            let line = self.line();
            self.advance();
            let rhs = self.parse_additive()?;
            lhs = Expr::new(
                ExprKind::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) },
                line,
            );
        }
        Some(lhs)
    }

    fn parse_additive(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_multiplicative()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            let line = self.line();
            self.advance();
            let rhs = self.parse_multiplicative()?;
            lhs = Expr::new(
                ExprKind::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) },
                line,
            );
        }
        Some(lhs)
    }

    fn parse_multiplicative(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Percent => BinOp::Mod,
                _ => break,
            };
            let line = self.line();
            self.advance();
            let rhs = self.parse_unary()?;
            lhs = Expr::new(
                ExprKind::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) },
                line,
            );
        }
        Some(lhs)
    }

    fn parse_unary(&mut self) -> Option<Expr> {
        let op = match self.peek_kind() {
            TokenKind::Bang => Some(UnOp::Not),
            TokenKind::Minus => Some(UnOp::Neg),
            _ => None,
        };
        if let Some(op) = op {
            let line = self.line();
            self.advance();
            let operand = self.parse_unary()?;
            return Some(Expr::new(ExprKind::Unary { op, operand: Box::new(operand) }, line));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Option<Expr> {
        let line = self.line();
        match self.peek_kind() {
            TokenKind::IntegerLiteral => {
                let tok = self.advance();
                let Some(Literal::Int(v)) = tok.literal else {
                    return Some(Expr::new(ExprKind::IntLit(0), line));
                };
                Some(Expr::new(ExprKind::IntLit(v), line))
            }
            TokenKind::FloatLiteral => {
                let tok = self.advance();
                let Some(Literal::Float(v)) = tok.literal else {
                    return Some(Expr::new(ExprKind::FloatLit(0.0), line));
                };
                Some(Expr::new(ExprKind::FloatLit(v), line))
            }
            TokenKind::CharLiteral => {
                let tok = self.advance();
                let Some(Literal::Char(v)) = tok.literal else {
                    return Some(Expr::new(ExprKind::CharLit('\0'), line));
                };
                Some(Expr::new(ExprKind::CharLit(v), line))
            }
            TokenKind::Identifier => {
                let name = self.advance().lexeme;
                if self.matches(TokenKind::LParen) {
                    let args = self.parse_call_args()?;
                    Some(Expr::new(ExprKind::Call { callee: name, args }, line))
                } else {
                    Some(Expr::new(ExprKind::VarRef(name), line))
                }
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RParen, "')'")?;
                Some(inner)
            }
            _ => {
                self.error("expected an expression");
                None
            }
        }
    }

    fn parse_call_args(&mut self) -> Option<Vec<Expr>> {
        let mut args = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                args.push(self.parse_expr()?);
                if !self.matches(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        Some(args)
    }
}
