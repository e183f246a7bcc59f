//! tacc-sem - symbol table and semantic analyzer for the tacc pipeline.
//!
//! This phase walks the parser's AST in source order, maintaining a
//! stack of lexical scopes (`scope::SymbolTable`), type-checking every
//! expression and statement against the coercion rules in `types`, and
//! annotating each expression node with its `resolved_type`. Its
//! output, alongside the `Diagnostics` it accumulates, is an annotated
//! AST ready for `tacc-icg` and the populated symbol table (retained
//! for read-only inspection, never mutated again).

mod analysis;
mod infer;
pub mod scope;
pub mod types;

pub use scope::{ScopeFrame, SymbolEntry, SymbolKind, SymbolTable, SymbolTableError};

use tacc_par::{Program, Type};
use tacc_util::Diagnostics;

/// Tracks the enclosing function while analyzing its body, so `return`
/// can be checked against the right declared return type and rejected
/// outside any function.
struct FunctionCtx {
    ret_ty: Type,
}

/// Semantic analyzer state: the symbol table being built and the
/// diagnostics accumulated along the way.
pub struct Analyzer {
    table: SymbolTable,
    diagnostics: Diagnostics,
    current_function: Option<FunctionCtx>,
}

impl Analyzer {
    pub fn new() -> Self {
        Self {
            table: SymbolTable::new(),
            diagnostics: Diagnostics::new(),
            current_function: None,
        }
    }

    pub fn analyze(mut self, program: &mut Program) -> (SymbolTable, Diagnostics) {
        for stmt in program.iter_mut() {
            self.analyze_stmt(stmt);
        }
        (self.table, self.diagnostics)
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs semantic analysis over `program`, annotating every expression
/// node's `resolved_type` in place and returning the populated symbol
/// table alongside any diagnostics recorded.
pub fn analyze(program: &mut Program) -> (SymbolTable, Diagnostics) {
    Analyzer::new().analyze(program)
}

#[cfg(test)]
mod edge_cases;
