//! Lexical analysis for stackc
//!
//! Splits source lines into raw words and classifies each word as an integer
//! literal, string literal or identifier.

mod classifier;
mod scanner;
mod token;

pub use classifier::classify;
pub use scanner::{ScannedLine, Scanner, COMMENT_MARKER};
pub use token::{SourceLocation, Token, Word};
