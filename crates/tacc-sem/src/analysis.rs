//! Statement-level semantic analysis: scope management, declaration
//! checking, and the control-flow walk over a function body.

use tacc_par::{Block, Expr, Param, Stmt, Type};
use tacc_util::{Line, SemanticKind};

use crate::scope::{SymbolEntry, SymbolKind, SymbolTableError};
use crate::types::{is_assignable, is_integral};
use crate::{Analyzer, FunctionCtx};

impl Analyzer {
    pub(crate) fn analyze_stmt(&mut self, stmt: &mut Stmt) {
        match stmt {
            Stmt::VarDecl { ty, name, init, line } => self.analyze_var_decl(*ty, name, init, *line),
            Stmt::Assign { name, expr, line } => self.analyze_assign(name, expr, *line),
            Stmt::If { cond, then_block, elifs, else_block, line } => {
                self.analyze_if(cond, then_block, elifs, else_block, *line)
            }
            Stmt::While { cond, body, line } => self.analyze_while(cond, body, *line),
            Stmt::For { var, start, end, step, body, line } => {
                self.analyze_for(var, start, end, step, body, *line)
            }
            Stmt::FuncDecl { ret_ty, name, params, body, line } => {
                self.analyze_func_decl(*ret_ty, name, params, body, *line)
            }
            Stmt::Return { expr, line } => self.analyze_return(expr, *line),
            Stmt::Print { expr, .. } => {
                self.infer_expr(expr);
            }
            Stmt::Input { name, line } => self.analyze_input(name, *line),
            Stmt::Block(block) => self.analyze_scoped_block(block),
            Stmt::ExprStmt { expr, .. } => {
                self.infer_expr(expr);
            }
        }
    }

    fn analyze_var_decl(&mut self, ty: Type, name: &str, init: &mut Option<Expr>, line: Line) {
        let mut initialized = false;
        if let Some(expr) = init {
            let value_ty = self.infer_expr(expr);
            if !is_assignable(ty, value_ty) {
                self.push_semantic(
                    SemanticKind::Narrowing,
                    line,
                    format!("cannot initialize {ty} variable '{name}' from {value_ty}"),
                );
            }
            initialized = true;
        }
        let mut entry = SymbolEntry::variable(name, ty, line);
        entry.initialized = initialized;
        if let Err(SymbolTableError::Redeclaration) = self.table.declare(entry) {
            self.push_semantic(
                SemanticKind::Redeclaration,
                line,
                format!("'{name}' is already declared in this scope"),
            );
        }
    }

    fn analyze_assign(&mut self, name: &str, expr: &mut Expr, line: Line) {
        let value_ty = self.infer_expr(expr);
        let Some(entry) = self.table.lookup(name).cloned() else {
            self.push_semantic(SemanticKind::Undeclared, line, format!("undeclared variable '{name}'"));
            return;
        };
        if entry.kind != SymbolKind::Variable {
            self.push_semantic(SemanticKind::Undeclared, line, format!("'{name}' is not a variable"));
            return;
        }
        if !is_assignable(entry.ty, value_ty) {
            self.push_semantic(
                SemanticKind::Narrowing,
                line,
                format!("cannot assign {value_ty} into {}-declared '{name}'", entry.ty),
            );
        }
        let _ = self.table.mark_initialized(name);
    }

    fn analyze_condition(&mut self, cond: &mut Expr, line: Line) {
        let ty = self.infer_expr(cond);
        if !is_integral(ty) {
            self.push_semantic(
                SemanticKind::NonIntegralCondition,
                line,
                format!("condition must be int or char, found {ty}"),
            );
        }
    }

    fn analyze_if(
        &mut self,
        cond: &mut Expr,
        then_block: &mut Block,
        elifs: &mut [(Expr, Block)],
        else_block: &mut Option<Block>,
        line: Line,
    ) {
        self.analyze_condition(cond, line);
        self.analyze_scoped_block(then_block);
        for (elif_cond, elif_block) in elifs.iter_mut() {
            let elif_line = elif_cond.line;
            self.analyze_condition(elif_cond, elif_line);
            self.analyze_scoped_block(elif_block);
        }
        if let Some(block) = else_block {
            self.analyze_scoped_block(block);
        }
    }

    fn analyze_while(&mut self, cond: &mut Expr, body: &mut Block, line: Line) {
        self.analyze_condition(cond, line);
        self.analyze_scoped_block(body);
    }

    fn analyze_for(
        &mut self,
        var: &str,
        start: &mut Expr,
        end: &mut Expr,
        step: &mut Option<Expr>,
        body: &mut Block,
        line: Line,
    ) {
        let start_ty = self.infer_expr(start);
        let end_ty = self.infer_expr(end);
        if !is_integral(start_ty) {
            self.push_semantic(SemanticKind::TypeMismatch, line, "loop start must be int or char".to_string());
        }
        if !is_integral(end_ty) {
            self.push_semantic(SemanticKind::TypeMismatch, line, "loop end must be int or char".to_string());
        }
        if let Some(step_expr) = step {
            let step_ty = self.infer_expr(step_expr);
            if !is_integral(step_ty) {
                self.push_semantic(SemanticKind::TypeMismatch, line, "loop step must be int or char".to_string());
            }
        }
        self.table.enter_scope();
        let mut entry = SymbolEntry::variable(var, Type::Int, line);
        entry.initialized = true;
        let _ = self.table.declare(entry);
        for stmt in body.stmts.iter_mut() {
            self.analyze_stmt(stmt);
        }
        self.table.exit_scope();
    }

    fn analyze_func_decl(
        &mut self,
        ret_ty: Type,
        name: &str,
        params: &mut [Param],
        body: &mut Block,
        line: Line,
    ) {
        if !self.table.is_global_scope() {
            self.push_semantic(
                SemanticKind::TypeMismatch,
                line,
                format!("function '{name}' must be declared at global scope"),
            );
        }
        if self.current_function.is_some() {
            self.push_semantic(
                SemanticKind::TypeMismatch,
                line,
                format!("function '{name}' cannot be nested inside another function"),
            );
        }

        let param_types: Vec<Type> = params.iter().map(|p| p.ty).collect();
        let entry = SymbolEntry::function(name, ret_ty, param_types, line);
        if let Err(SymbolTableError::Redeclaration) = self.table.declare_global(entry) {
            self.push_semantic(
                SemanticKind::Redeclaration,
                line,
                format!("'{name}' is already declared"),
            );
        }

        self.table.enter_scope();
        for param in params.iter() {
            let mut param_entry = SymbolEntry::variable(&param.name, param.ty, line);
            param_entry.initialized = true;
            if let Err(SymbolTableError::Redeclaration) = self.table.declare(param_entry) {
                self.push_semantic(
                    SemanticKind::Redeclaration,
                    line,
                    format!("parameter '{}' collides with another parameter", param.name),
                );
            }
        }

        let previous = self.current_function.replace(FunctionCtx { ret_ty });
        for stmt in body.stmts.iter_mut() {
            self.analyze_stmt(stmt);
        }
        if !definitely_returns_block(body) {
            self.push_semantic(
                SemanticKind::TypeMismatch,
                line,
                format!("function '{name}' does not return on every path"),
            );
        }
        self.current_function = previous;
        self.table.exit_scope();
    }

    fn analyze_return(&mut self, expr: &mut Option<Expr>, line: Line) {
        let Some(ctx_ret_ty) = self.current_function.as_ref().map(|c| c.ret_ty) else {
            self.push_semantic(SemanticKind::ReturnOutsideFunc, line, "'return' outside a function".to_string());
            if let Some(expr) = expr {
                self.infer_expr(expr);
            }
            return;
        };
        match expr {
            Some(expr) => {
                let value_ty = self.infer_expr(expr);
                if !is_assignable(ctx_ret_ty, value_ty) {
                    self.push_semantic(
                        SemanticKind::Narrowing,
                        line,
                        format!("cannot return {value_ty} from a function declared {ctx_ret_ty}"),
                    );
                }
            }
            None => {
                self.push_semantic(
                    SemanticKind::TypeMismatch,
                    line,
                    format!("function declared {ctx_ret_ty} must return a value"),
                );
            }
        }
    }

    fn analyze_input(&mut self, name: &str, line: Line) {
        let Some(entry) = self.table.lookup(name).cloned() else {
            self.push_semantic(SemanticKind::Undeclared, line, format!("undeclared variable '{name}'"));
            return;
        };
        if entry.kind != SymbolKind::Variable {
            self.push_semantic(SemanticKind::Undeclared, line, format!("'{name}' is not a variable"));
            return;
        }
        let _ = self.table.mark_initialized(name);
    }

    fn analyze_scoped_block(&mut self, block: &mut Block) {
        self.table.enter_scope();
        for stmt in block.stmts.iter_mut() {
            self.analyze_stmt(stmt);
        }
        self.table.exit_scope();
    }
}

/// Structural "definitely returns" check: a block definitely returns
/// iff its last statement does. `If` definitely returns only when it
/// has an `else` and every arm, including that `else`, definitely
/// returns. `While`/`For` never definitely return - the analyzer
/// cannot prove the loop body runs at all.
fn definitely_returns_block(block: &Block) -> bool {
    block.stmts.last().is_some_and(definitely_returns_stmt)
}

fn definitely_returns_stmt(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::Return { .. } => true,
        Stmt::Block(block) => definitely_returns_block(block),
        Stmt::If { then_block, elifs, else_block, .. } => {
            let Some(else_block) = else_block else {
                return false;
            };
            definitely_returns_block(then_block)
                && elifs.iter().all(|(_, arm)| definitely_returns_block(arm))
                && definitely_returns_block(else_block)
        }
        _ => false,
    }
}
