//! AST -> TAC lowering.

use tacc_par::{BinOp, Block, Expr, ExprKind, Param, Program, Stmt};
use tacc_util::{Diagnostic, Diagnostics, Kind, Line};

use crate::builder::Builder;
use crate::tac::{Instr, Operand};

pub struct Lowerer {
    builder: Builder,
    diagnostics: Diagnostics,
}

impl Lowerer {
    pub fn new() -> Self {
        Self {
            builder: Builder::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn lower_program(mut self, program: &Program) -> (Vec<Instr>, Diagnostics) {
        for stmt in program {
            self.lower_stmt(stmt);
        }
        (self.builder.into_instrs(), self.diagnostics)
    }

    fn internal_error(&mut self, line: Line, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(Kind::Internal, line, message));
    }

    fn lower_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VarDecl { ty, name, init, .. } => {
                self.builder.emit(Instr::Alloc { name: name.clone(), ty: *ty });
                if let Some(expr) = init {
                    let value = self.lower_expr(expr);
                    self.builder.emit(Instr::Copy { dst: name.clone(), src: value });
                }
            }
            Stmt::Assign { name, expr, .. } => {
                let value = self.lower_expr(expr);
                self.builder.emit(Instr::Copy { dst: name.clone(), src: value });
            }
            Stmt::If { cond, then_block, elifs, else_block, .. } => {
                self.lower_if(cond, then_block, elifs, else_block);
            }
            Stmt::While { cond, body, .. } => self.lower_while(cond, body),
            Stmt::For { var, start, end, step, body, .. } => self.lower_for(var, start, end, step, body),
            Stmt::FuncDecl { name, params, body, line, .. } => self.lower_func_decl(name, params, body, *line),
            Stmt::Return { expr, .. } => {
                let operand = expr.as_ref().map(|e| self.lower_expr(e));
                self.builder.emit(Instr::Ret { operand });
            }
            Stmt::Print { expr, .. } => {
                let operand = self.lower_expr(expr);
                self.builder.emit(Instr::Print { operand });
            }
            Stmt::Input { name, .. } => {
                self.builder.emit(Instr::Input { name: name.clone() });
            }
            Stmt::Block(block) => {
                for stmt in &block.stmts {
                    self.lower_stmt(stmt);
                }
            }
            Stmt::ExprStmt { expr, .. } => {
                self.lower_expr_stmt(expr);
            }
        }
    }

    /// Lowers a chain of `if`/`elif`/`else` clauses: each clause tests
    /// its condition and falls through to a shared end label on
    /// success, guaranteeing exactly one body executes.
    fn lower_if(&mut self, cond: &Expr, then_block: &Block, elifs: &[(Expr, Block)], else_block: &Option<Block>) {
        let end_label = self.builder.fresh_label();
        let mut clauses: Vec<(&Expr, &Block)> = vec![(cond, then_block)];
        clauses.extend(elifs.iter().map(|(c, b)| (c, b)));

        for (clause_cond, clause_body) in clauses {
            let next_label = self.builder.fresh_label();
            let cond_operand = self.lower_expr(clause_cond);
            self.builder.emit(Instr::IfFalse { cond: cond_operand, label: next_label.clone() });
            for stmt in &clause_body.stmts {
                self.lower_stmt(stmt);
            }
            self.builder.emit(Instr::Goto { label: end_label.clone() });
            self.builder.emit(Instr::Label { name: next_label });
        }

        if let Some(else_body) = else_block {
            for stmt in &else_body.stmts {
                self.lower_stmt(stmt);
            }
        }
        self.builder.emit(Instr::Label { name: end_label });
    }

    fn lower_while(&mut self, cond: &Expr, body: &Block) {
        let start_label = self.builder.fresh_label();
        let end_label = self.builder.fresh_label();
        self.builder.emit(Instr::Label { name: start_label.clone() });
        let cond_operand = self.lower_expr(cond);
        self.builder.emit(Instr::IfFalse { cond: cond_operand, label: end_label.clone() });
        for stmt in &body.stmts {
            self.lower_stmt(stmt);
        }
        self.builder.emit(Instr::Goto { label: start_label });
        self.builder.emit(Instr::Label { name: end_label });
    }

    fn lower_for(&mut self, var: &str, start: &Expr, end: &Expr, step: &Option<Expr>, body: &Block) {
        let start_operand = self.lower_expr(start);
        self.builder.emit(Instr::Alloc { name: var.to_string(), ty: tacc_par::Type::Int });
        self.builder.emit(Instr::Copy { dst: var.to_string(), src: start_operand });

        let start_label = self.builder.fresh_label();
        let end_label = self.builder.fresh_label();
        self.builder.emit(Instr::Label { name: start_label.clone() });

        let end_operand = self.lower_expr(end);
        let test_temp = self.builder.fresh_temp();
        self.builder.emit(Instr::Binary {
            dst: test_temp.clone(),
            op: BinOp::Le,
            lhs: Operand::Name(var.to_string()),
            rhs: end_operand,
        });
        self.builder.emit(Instr::IfFalse { cond: Operand::Name(test_temp), label: end_label.clone() });

        for stmt in &body.stmts {
            self.lower_stmt(stmt);
        }

        let step_operand = match step {
            Some(step_expr) => self.lower_expr(step_expr),
            None => Operand::IntLit(1),
        };
        self.builder.emit(Instr::Binary {
            dst: var.to_string(),
            op: BinOp::Add,
            lhs: Operand::Name(var.to_string()),
            rhs: step_operand,
        });
        self.builder.emit(Instr::Goto { label: start_label });
        self.builder.emit(Instr::Label { name: end_label });
    }

    /// Semantic analysis already proved every path through `body`
    /// definitely returns, so no trailing `RET` needs to be
    /// synthesized here - the language has no void-equivalent
    /// functions, so the "control falls off the end" case this trailing
    /// instruction would cover cannot occur in an accepted program.
    fn lower_func_decl(&mut self, name: &str, _params: &[Param], body: &Block, _line: Line) {
        self.builder.emit(Instr::Label { name: name.to_string() });
        for stmt in &body.stmts {
            self.lower_stmt(stmt);
        }
    }

    /// Lowers a statement-position expression, discarding its value. A
    /// bare call statement skips allocating a result temporary since
    /// nothing reads it.
    fn lower_expr_stmt(&mut self, expr: &Expr) {
        if let ExprKind::Call { callee, args } = &expr.kind {
            self.lower_call(callee, args, false);
        } else {
            self.lower_expr(expr);
        }
    }

    /// Lowers `expr`, returning the operand naming its result.
    fn lower_expr(&mut self, expr: &Expr) -> Operand {
        if expr.resolved_type.is_none() {
            self.internal_error(
                expr.line,
                "ICG reached an expression node with no resolved_type - semantic analysis should have annotated every node",
            );
        }
        match &expr.kind {
            ExprKind::IntLit(v) => Operand::IntLit(*v),
            ExprKind::FloatLit(v) => Operand::FloatLit(*v),
            ExprKind::CharLit(v) => Operand::CharLit(*v),
            ExprKind::VarRef(name) => Operand::Name(name.clone()),
            ExprKind::Binary { op: BinOp::And, lhs, rhs } => self.lower_short_circuit_and(lhs, rhs),
            ExprKind::Binary { op: BinOp::Or, lhs, rhs } => self.lower_short_circuit_or(lhs, rhs),
            ExprKind::Binary { op, lhs, rhs } => {
                let lhs_operand = self.lower_expr(lhs);
                let rhs_operand = self.lower_expr(rhs);
                let dst = self.builder.fresh_temp();
                self.builder.emit(Instr::Binary { dst: dst.clone(), op: *op, lhs: lhs_operand, rhs: rhs_operand });
                Operand::Name(dst)
            }
            ExprKind::Unary { op, operand } => {
                let operand = self.lower_expr(operand);
                let dst = self.builder.fresh_temp();
                self.builder.emit(Instr::Unary { dst: dst.clone(), op: *op, operand });
                Operand::Name(dst)
            }
            ExprKind::Call { callee, args } => self
                .lower_call(callee, args, true)
                .unwrap_or(Operand::IntLit(0)),
        }
    }

    /// `a && b`: skip evaluating `b` entirely when `a` is already false.
    fn lower_short_circuit_and(&mut self, lhs: &Expr, rhs: &Expr) -> Operand {
        let result = self.builder.fresh_temp();
        let false_label = self.builder.fresh_label();
        let end_label = self.builder.fresh_label();

        let lhs_operand = self.lower_expr(lhs);
        self.builder.emit(Instr::IfFalse { cond: lhs_operand, label: false_label.clone() });
        let rhs_operand = self.lower_expr(rhs);
        self.builder.emit(Instr::Copy { dst: result.clone(), src: rhs_operand });
        self.builder.emit(Instr::Goto { label: end_label.clone() });
        self.builder.emit(Instr::Label { name: false_label });
        self.builder.emit(Instr::Copy { dst: result.clone(), src: Operand::IntLit(0) });
        self.builder.emit(Instr::Label { name: end_label });
        Operand::Name(result)
    }

    /// `a || b`: skip evaluating `b` entirely when `a` is already true.
    fn lower_short_circuit_or(&mut self, lhs: &Expr, rhs: &Expr) -> Operand {
        let result = self.builder.fresh_temp();
        let true_label = self.builder.fresh_label();
        let end_label = self.builder.fresh_label();

        let lhs_operand = self.lower_expr(lhs);
        self.builder.emit(Instr::IfTrue { cond: lhs_operand, label: true_label.clone() });
        let rhs_operand = self.lower_expr(rhs);
        self.builder.emit(Instr::Copy { dst: result.clone(), src: rhs_operand });
        self.builder.emit(Instr::Goto { label: end_label.clone() });
        self.builder.emit(Instr::Label { name: true_label });
        self.builder.emit(Instr::Copy { dst: result.clone(), src: Operand::IntLit(1) });
        self.builder.emit(Instr::Label { name: end_label });
        Operand::Name(result)
    }

    fn lower_call(&mut self, callee: &str, args: &[Expr], want_result: bool) -> Option<Operand> {
        let arg_operands: Vec<Operand> = args.iter().map(|arg| self.lower_expr(arg)).collect();
        for operand in &arg_operands {
            self.builder.emit(Instr::Param { operand: operand.clone() });
        }
        let result = if want_result { Some(self.builder.fresh_temp()) } else { None };
        self.builder.emit(Instr::Call {
            name: callee.to_string(),
            n_args: args.len(),
            result: result.clone(),
        });
        result.map(Operand::Name)
    }
}

impl Default for Lowerer {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowers a fully annotated AST into an ordered TAC listing.
pub fn lower(program: &Program) -> (Vec<Instr>, Diagnostics) {
    Lowerer::new().lower_program(program)
}
