//! Error types for pseudo-assembly code generation.

use thiserror::Error;

/// Invariant violations the code generator can detect while walking an
/// optimized TAC listing. Surfacing one means an earlier phase emitted
/// TAC the generator cannot trust, not that the input program is
/// malformed - callers should treat this the same as an `INTERNAL`
/// diagnostic.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodeGenError {
    #[error("CALL to '{function}' declares {expected} argument(s) but {found} PARAM instruction(s) preceded it")]
    ParamArityMismatch {
        function: String,
        expected: usize,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, CodeGenError>;
