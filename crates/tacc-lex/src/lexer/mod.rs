//! Lexer implementation, split into focused components:
//! - `core` - main `Lexer` struct and dispatch loop
//! - `identifier` - identifier and keyword scanning
//! - `number` - integer/float literal scanning
//! - `char_lit` - character literal scanning
//! - `operator` - operator and punctuation scanning
//! - `comment` - `//` comment skipping

mod char_lit;
mod comment;
mod core;
mod identifier;
mod number;
mod operator;

pub use core::Lexer;
