//! The three-address code instruction set produced by this crate and
//! consumed by the optimizer and code generator: a flat, linear listing
//! where every instruction names at most one destination and two
//! source operands.

use std::fmt;

use tacc_par::{BinOp, Type, UnOp};

/// A TAC operand: a literal, a named variable, or a compiler-generated
/// temporary. Temporaries and variables share the same textual
/// representation (a name); the `t<n>` naming convention is what
/// distinguishes a temporary from a source-level variable, not a
/// separate variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    IntLit(i64),
    FloatLit(f64),
    CharLit(char),
    Name(String),
}

impl Operand {
    pub fn name(&self) -> Option<&str> {
        match self {
            Operand::Name(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_literal(&self) -> bool {
        !matches!(self, Operand::Name(_))
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::IntLit(v) => write!(f, "{v}"),
            Operand::FloatLit(v) => write!(f, "{v}"),
            Operand::CharLit(v) => write!(f, "'{v}'"),
            Operand::Name(name) => write!(f, "{name}"),
        }
    }
}

/// One TAC instruction, per the shapes enumerated in the data model.
#[derive(Debug, Clone, PartialEq)]
pub enum Instr {
    Alloc { name: String, ty: Type },
    Copy { dst: String, src: Operand },
    Unary { dst: String, op: UnOp, operand: Operand },
    Binary { dst: String, op: BinOp, lhs: Operand, rhs: Operand },
    Label { name: String },
    Goto { label: String },
    IfFalse { cond: Operand, label: String },
    IfTrue { cond: Operand, label: String },
    Param { operand: Operand },
    Call { name: String, n_args: usize, result: Option<String> },
    Ret { operand: Option<Operand> },
    Print { operand: Operand },
    Input { name: String },
}

impl Instr {
    /// Whether this instruction is "live" purely by virtue of its side
    /// effect - safe for dead code elimination to never remove it
    /// regardless of whether its result is read. `Alloc` is excluded:
    /// its effect is giving a name storage, which DCE should still
    /// respect, but the optimizer treats it separately since it has no
    /// operand to read.
    pub fn has_side_effect(&self) -> bool {
        matches!(
            self,
            Instr::Call { .. } | Instr::Print { .. } | Instr::Input { .. } | Instr::Ret { .. }
        )
    }

    /// The name this instruction writes to, if any.
    pub fn defines(&self) -> Option<&str> {
        match self {
            Instr::Copy { dst, .. } | Instr::Unary { dst, .. } | Instr::Binary { dst, .. } => Some(dst),
            Instr::Call { result: Some(result), .. } => Some(result),
            _ => None,
        }
    }

    /// Every operand this instruction reads from.
    pub fn uses(&self) -> Vec<&Operand> {
        match self {
            Instr::Copy { src, .. } => vec![src],
            Instr::Unary { operand, .. } => vec![operand],
            Instr::Binary { lhs, rhs, .. } => vec![lhs, rhs],
            Instr::IfFalse { cond, .. } | Instr::IfTrue { cond, .. } => vec![cond],
            Instr::Param { operand } => vec![operand],
            Instr::Ret { operand: Some(operand) } => vec![operand],
            Instr::Print { operand } => vec![operand],
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instr::Alloc { name, ty } => write!(f, "ALLOC {name} {ty}"),
            Instr::Copy { dst, src } => write!(f, "{dst} = {src}"),
            Instr::Unary { dst, op, operand } => write!(f, "{dst} = {op}{operand}"),
            Instr::Binary { dst, op, lhs, rhs } => write!(f, "{dst} = {lhs} {op} {rhs}"),
            Instr::Label { name } => write!(f, "LABEL {name}"),
            Instr::Goto { label } => write!(f, "GOTO {label}"),
            Instr::IfFalse { cond, label } => write!(f, "IF_FALSE {cond} GOTO {label}"),
            Instr::IfTrue { cond, label } => write!(f, "IF_TRUE {cond} GOTO {label}"),
            Instr::Param { operand } => write!(f, "PARAM {operand}"),
            Instr::Call { name, n_args, result } => match result {
                Some(result) => write!(f, "CALL {name} {n_args} {result}"),
                None => write!(f, "CALL {name} {n_args}"),
            },
            Instr::Ret { operand: Some(operand) } => write!(f, "RET {operand}"),
            Instr::Ret { operand: None } => write!(f, "RET"),
            Instr::Print { operand } => write!(f, "PRINT {operand}"),
            Instr::Input { name } => write!(f, "INPUT {name}"),
        }
    }
}

/// Renders a full listing, one instruction per line.
pub fn render(instrs: &[Instr]) -> String {
    instrs.iter().map(|i| i.to_string()).collect::<Vec<_>>().join("\n")
}
