//! tacc-util - shared diagnostics infrastructure for the tacc pipeline.
//!
//! Every phase crate (`tacc-lex`, `tacc-par`, `tacc-sem`, `tacc-icg`,
//! `tacc-opt`, `tacc-gen`) depends on this crate for one thing: a common
//! vocabulary for reporting problems with the user's program without
//! panicking. Diagnostics are data, not exceptions - a phase that hits a
//! malformed construct records a [`Diagnostic`] and keeps going so the
//! rest of the program can still be checked.
//!
//! This compiler does not track byte-offset source spans; it tracks a
//! single 1-based [`Line`] number per diagnostic, which is all the
//! location precision the language's diagnostics need.

pub mod diagnostic;

pub use diagnostic::{Diagnostic, Diagnostics, Kind, Level, SemanticKind};

/// A 1-based source line number.
///
/// This is the only location information carried through the pipeline;
/// there is no byte-offset span type here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Line(pub u32);

impl Line {
    pub const UNKNOWN: Line = Line(0);
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Line {
    fn from(n: u32) -> Self {
        Line(n)
    }
}
