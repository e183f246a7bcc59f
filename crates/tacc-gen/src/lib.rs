//! tacc-gen - pseudo-assembly code generator for the tacc pipeline.
//!
//! The final phase: walks an optimized TAC listing and emits a
//! two-section pseudo-assembly listing (`.data`, `.text`) for a
//! stack-machine target that exists only on paper - there is no real
//! ISA, linker, or object format behind it (linking and machine-code
//! emission are both explicit Non-goals).

pub mod asm;
pub mod codegen;
pub mod error;

pub use asm::Assembly;
pub use codegen::generate;
pub use error::{CodeGenError, Result};

#[cfg(test)]
mod edge_cases;
