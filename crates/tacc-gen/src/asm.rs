//! The pseudo-assembly output model: two ordered line lists, one per
//! section, rendered with the section markers the driver writes to
//! disk.

use std::fmt;

/// A complete pseudo-assembly listing: a `.data` section built from
/// `ALLOC` instructions, and a `.text` section holding one
/// pseudo-instruction sequence per TAC instruction.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Assembly {
    pub data: Vec<String>,
    pub text: Vec<String>,
}

impl Assembly {
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Display for Assembly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, ".data")?;
        for line in &self.data {
            writeln!(f, "{line}")?;
        }
        writeln!(f, ".text")?;
        for (i, line) in self.text.iter().enumerate() {
            if i + 1 == self.text.len() {
                write!(f, "{line}")?;
            } else {
                writeln!(f, "{line}")?;
            }
        }
        Ok(())
    }
}
