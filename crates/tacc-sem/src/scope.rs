//! The symbol table: a stack of ordered scope frames.
//!
//! Frame 0 is the global frame and is always present; `exit_scope`
//! refuses to pop it, guarding the invariant defensively even though
//! the analyzer always pairs `enter_scope`/`exit_scope` calls.

use indexmap::IndexMap;
use tacc_par::Type;
use tacc_util::Line;

/// What a symbol table entry names.
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolKind {
    Variable,
    Function,
}

/// One entry in a scope frame.
#[derive(Debug, Clone)]
pub struct SymbolEntry {
    pub name: String,
    pub kind: SymbolKind,
    /// For a variable: its declared type. For a function: its declared
    /// return type (the parameter types live in `param_types`).
    pub ty: Type,
    pub param_types: Vec<Type>,
    pub initialized: bool,
    pub declared_line: Line,
}

impl SymbolEntry {
    pub fn variable(name: impl Into<String>, ty: Type, declared_line: Line) -> Self {
        Self {
            name: name.into(),
            kind: SymbolKind::Variable,
            ty,
            param_types: Vec::new(),
            initialized: false,
            declared_line,
        }
    }

    pub fn function(
        name: impl Into<String>,
        ret_ty: Type,
        param_types: Vec<Type>,
        declared_line: Line,
    ) -> Self {
        Self {
            name: name.into(),
            kind: SymbolKind::Function,
            ty: ret_ty,
            param_types,
            initialized: true,
            declared_line,
        }
    }
}

/// An ordered name -> entry mapping, one per lexical block.
pub type ScopeFrame = IndexMap<String, SymbolEntry>;

/// The failure modes `SymbolTable` operations report. These map
/// directly onto `tacc_util::SemanticKind` at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolTableError {
    Redeclaration,
    Undeclared,
}

/// A stack of scope frames, index 0 being the always-present global
/// frame.
#[derive(Debug, Default)]
pub struct SymbolTable {
    frames: Vec<ScopeFrame>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self { frames: vec![ScopeFrame::new()] }
    }

    pub fn enter_scope(&mut self) {
        self.frames.push(ScopeFrame::new());
    }

    /// Pops the top frame. A no-op on the global frame (index 0) -
    /// popping it would violate the "global frame always present"
    /// invariant, which the caller should never trigger.
    pub fn exit_scope(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    pub fn is_global_scope(&self) -> bool {
        self.frames.len() == 1
    }

    /// Declares `entry` in the current (top) frame. Fails with
    /// `Redeclaration` if the name already exists in that frame;
    /// shadowing a name from an outer frame is fine.
    pub fn declare(&mut self, entry: SymbolEntry) -> Result<(), SymbolTableError> {
        let top = self.frames.last_mut().expect("global frame always present");
        if top.contains_key(&entry.name) {
            return Err(SymbolTableError::Redeclaration);
        }
        top.insert(entry.name.clone(), entry);
        Ok(())
    }

    /// Declares `entry` directly in the global frame (frame 0),
    /// regardless of the current scope depth - used for function
    /// declarations, which are global-only (§4.4.2).
    pub fn declare_global(&mut self, entry: SymbolEntry) -> Result<(), SymbolTableError> {
        let global = &mut self.frames[0];
        if global.contains_key(&entry.name) {
            return Err(SymbolTableError::Redeclaration);
        }
        global.insert(entry.name.clone(), entry);
        Ok(())
    }

    /// Searches frames top-down for `name`.
    pub fn lookup(&self, name: &str) -> Option<&SymbolEntry> {
        self.frames.iter().rev().find_map(|frame| frame.get(name))
    }

    /// Marks `name`'s entry initialized, searching top-down. Fails
    /// with `Undeclared` if no such entry is visible.
    pub fn mark_initialized(&mut self, name: &str) -> Result<(), SymbolTableError> {
        for frame in self.frames.iter_mut().rev() {
            if let Some(entry) = frame.get_mut(name) {
                entry.initialized = true;
                return Ok(());
            }
        }
        Err(SymbolTableError::Undeclared)
    }
}
