//! AST node definitions shared by the parser, semantic analyzer, and ICG.
//!
//! The tree is a tagged sum over statement kinds and a tagged sum over
//! expression kinds, matched on by each later phase - there is no
//! virtual dispatch or visitor trait here, only plain `match`.

use tacc_util::Line;

/// A complete source file: an ordered list of top-level statements.
///
/// Top-level `VarDecl`/`FuncDecl` statements are ordinary `Stmt` values;
/// there is no separate "item" tier above statements.
pub type Program = Vec<Stmt>;

/// The three scalar types this language knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Int,
    Float,
    Char,
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Float => write!(f, "float"),
            Type::Char => write!(f, "char"),
        }
    }
}

/// A function parameter: declared type plus name.
#[derive(Debug, Clone)]
pub struct Param {
    pub ty: Type,
    pub name: String,
}

/// A brace-delimited sequence of statements.
#[derive(Debug, Clone, Default)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

/// A statement (including the top-level declaration forms).
#[derive(Debug, Clone)]
pub enum Stmt {
    VarDecl {
        ty: Type,
        name: String,
        init: Option<Expr>,
        line: Line,
    },
    Assign {
        name: String,
        expr: Expr,
        line: Line,
    },
    If {
        cond: Expr,
        then_block: Block,
        elifs: Vec<(Expr, Block)>,
        else_block: Option<Block>,
        line: Line,
    },
    While {
        cond: Expr,
        body: Block,
        line: Line,
    },
    For {
        var: String,
        start: Expr,
        end: Expr,
        step: Option<Expr>,
        body: Block,
        line: Line,
    },
    FuncDecl {
        ret_ty: Type,
        name: String,
        params: Vec<Param>,
        body: Block,
        line: Line,
    },
    Return {
        expr: Option<Expr>,
        line: Line,
    },
    Print {
        expr: Expr,
        line: Line,
    },
    Input {
        name: String,
        line: Line,
    },
    Block(Block),
    ExprStmt {
        expr: Expr,
        line: Line,
    },
}

impl Stmt {
    pub fn line(&self) -> Line {
        match self {
            Stmt::VarDecl { line, .. }
            | Stmt::Assign { line, .. }
            | Stmt::If { line, .. }
            | Stmt::While { line, .. }
            | Stmt::For { line, .. }
            | Stmt::FuncDecl { line, .. }
            | Stmt::Return { line, .. }
            | Stmt::Print { line, .. }
            | Stmt::Input { line, .. }
            | Stmt::ExprStmt { line, .. } => *line,
            Stmt::Block(block) => block.stmts.first().map(Stmt::line).unwrap_or(Line::UNKNOWN),
        }
    }
}

/// Binary operators, in the precedence tiers defined by §6 of the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    And,
    Or,
}

impl std::fmt::Display for BinOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
            BinOp::Le => "<=",
            BinOp::Ge => ">=",
            BinOp::And => "&&",
            BinOp::Or => "||",
        };
        write!(f, "{s}")
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg,
    Not,
}

impl std::fmt::Display for UnOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnOp::Neg => write!(f, "-"),
            UnOp::Not => write!(f, "!"),
        }
    }
}

/// An expression node.
///
/// `resolved_type` starts `None` and is filled in by the semantic
/// analyzer; every later phase (ICG) requires it to be `Some`.
#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub line: Line,
    pub resolved_type: Option<Type>,
}

impl Expr {
    pub fn new(kind: ExprKind, line: Line) -> Self {
        Self {
            kind,
            line,
            resolved_type: None,
        }
    }
}

/// The tagged variants of an expression node.
#[derive(Debug, Clone)]
pub enum ExprKind {
    IntLit(i64),
    FloatLit(f64),
    CharLit(char),
    VarRef(String),
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Unary {
        op: UnOp,
        operand: Box<Expr>,
    },
    Call {
        callee: String,
        args: Vec<Expr>,
    },
}
