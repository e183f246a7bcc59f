//! Expression type inference: walks an `Expr`, resolving its type
//! against the symbol table and the coercion rules in `types`, and
//! records a best-effort `resolved_type` on every node it visits -
//! even on a branch that also records an error - so later invariant
//! checks over a successful compilation never find an empty slot.

use tacc_par::{BinOp, Expr, ExprKind, Type, UnOp};
use tacc_util::{Diagnostic, Kind, SemanticKind};

use crate::scope::SymbolKind;
use crate::types::{arithmetic_result, is_assignable, is_integral, is_numeric};
use crate::Analyzer;

impl Analyzer {
    pub(crate) fn push_semantic(&mut self, sub: SemanticKind, line: tacc_util::Line, message: impl Into<String>) {
        self.diagnostics
            .push(Diagnostic::error(Kind::Semantic(sub), line, message));
    }

    /// Infers `expr`'s type, recording diagnostics for any violation
    /// along the way, and stores the (possibly best-effort) result in
    /// `expr.resolved_type`.
    pub(crate) fn infer_expr(&mut self, expr: &mut Expr) -> Type {
        let line = expr.line;
        let ty = match &mut expr.kind {
            ExprKind::IntLit(_) => Type::Int,
            ExprKind::FloatLit(_) => Type::Float,
            ExprKind::CharLit(_) => Type::Char,
            ExprKind::VarRef(name) => self.infer_var_ref(name, line),
            ExprKind::Binary { op, lhs, rhs } => {
                let lt = self.infer_expr(lhs);
                let rt = self.infer_expr(rhs);
                self.infer_binary(*op, lt, rt, line)
            }
            ExprKind::Unary { op, operand } => {
                let ot = self.infer_expr(operand);
                self.infer_unary(*op, ot, line)
            }
            ExprKind::Call { callee, args } => self.infer_call(callee, args, line),
        };
        expr.resolved_type = Some(ty);
        ty
    }

    fn infer_var_ref(&mut self, name: &str, line: tacc_util::Line) -> Type {
        let Some(entry) = self.table.lookup(name).cloned() else {
            self.push_semantic(SemanticKind::Undeclared, line, format!("undeclared variable '{name}'"));
            return Type::Int;
        };
        if entry.kind != SymbolKind::Variable {
            self.push_semantic(SemanticKind::Undeclared, line, format!("'{name}' is not a variable"));
            return Type::Int;
        }
        if !entry.initialized {
            self.push_semantic(
                SemanticKind::UseBeforeInit,
                line,
                format!("use of '{name}' before it is initialized"),
            );
        }
        entry.ty
    }

    fn infer_binary(&mut self, op: BinOp, lhs: Type, rhs: Type, line: tacc_util::Line) -> Type {
        match op {
            BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div => {
                match arithmetic_result(lhs, rhs) {
                    Some(ty) => ty,
                    None => {
                        self.push_semantic(
                            SemanticKind::TypeMismatch,
                            line,
                            format!("operator '{op}' requires numeric operands, found {lhs} and {rhs}"),
                        );
                        Type::Int
                    }
                }
            }
            BinOp::Mod => {
                if is_integral(lhs) && is_integral(rhs) {
                    Type::Int
                } else {
                    self.push_semantic(
                        SemanticKind::TypeMismatch,
                        line,
                        "'%' requires integral (int/char) operands".to_string(),
                    );
                    Type::Int
                }
            }
            BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Gt | BinOp::Le | BinOp::Ge => {
                if !is_numeric(lhs) || !is_numeric(rhs) {
                    self.push_semantic(
                        SemanticKind::TypeMismatch,
                        line,
                        format!("operator '{op}' requires numeric operands, found {lhs} and {rhs}"),
                    );
                }
                Type::Int
            }
            BinOp::And | BinOp::Or => {
                if !is_integral(lhs) || !is_integral(rhs) {
                    self.push_semantic(
                        SemanticKind::TypeMismatch,
                        line,
                        format!("operator '{op}' requires integral operands, found {lhs} and {rhs}"),
                    );
                }
                Type::Int
            }
        }
    }

    fn infer_unary(&mut self, op: UnOp, operand: Type, line: tacc_util::Line) -> Type {
        match op {
            UnOp::Neg => {
                if !is_numeric(operand) {
                    self.push_semantic(
                        SemanticKind::TypeMismatch,
                        line,
                        format!("unary '-' requires a numeric operand, found {operand}"),
                    );
                    Type::Int
                } else {
                    operand
                }
            }
            UnOp::Not => {
                if !is_integral(operand) {
                    self.push_semantic(
                        SemanticKind::TypeMismatch,
                        line,
                        format!("unary '!' requires an integral operand, found {operand}"),
                    );
                }
                Type::Int
            }
        }
    }

    fn infer_call(&mut self, callee: &str, args: &mut [Expr], line: tacc_util::Line) -> Type {
        let arg_types: Vec<Type> = args.iter_mut().map(|a| self.infer_expr(a)).collect();
        let Some(entry) = self.table.lookup(callee).cloned() else {
            self.push_semantic(SemanticKind::Undeclared, line, format!("undeclared function '{callee}'"));
            return Type::Int;
        };
        if entry.kind != SymbolKind::Function {
            self.push_semantic(SemanticKind::Undeclared, line, format!("'{callee}' is not a function"));
            return Type::Int;
        }
        if entry.param_types.len() != arg_types.len() {
            self.push_semantic(
                SemanticKind::Arity,
                line,
                format!(
                    "'{callee}' expects {} argument(s), found {}",
                    entry.param_types.len(),
                    arg_types.len()
                ),
            );
        } else {
            for (i, (&param_ty, &arg_ty)) in entry.param_types.iter().zip(arg_types.iter()).enumerate() {
                if !is_assignable(param_ty, arg_ty) {
                    self.push_semantic(
                        SemanticKind::Narrowing,
                        line,
                        format!(
                            "argument {} to '{callee}' expects {param_ty}, found {arg_ty}",
                            i + 1
                        ),
                    );
                }
            }
        }
        entry.ty
    }
}
