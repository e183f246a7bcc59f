//! Semantic diagnostic subkinds.
//!
//! `SEMANTIC` errors are further categorized so callers (and tests) can
//! match on a stable subkind rather than parsing a message string.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SemanticKind {
    Undeclared,
    Redeclaration,
    TypeMismatch,
    Narrowing,
    UseBeforeInit,
    Arity,
    NonIntegralCondition,
    ReturnOutsideFunc,
}

impl fmt::Display for SemanticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SemanticKind::Undeclared => "UNDECLARED",
            SemanticKind::Redeclaration => "REDECLARATION",
            SemanticKind::TypeMismatch => "TYPE_MISMATCH",
            SemanticKind::Narrowing => "NARROWING",
            SemanticKind::UseBeforeInit => "USE_BEFORE_INIT",
            SemanticKind::Arity => "ARITY",
            SemanticKind::NonIntegralCondition => "NON_INTEGRAL_CONDITION",
            SemanticKind::ReturnOutsideFunc => "RETURN_OUTSIDE_FUNC",
        };
        write!(f, "{s}")
    }
}
