//! # stackc - Front End for a Forth-like Stack Language
//!
//! Turns source text into a flat, jump-addressed intermediate representation
//! (IR). The IR is consumed by a static type checker and a native code
//! generator, which live outside this crate.
//!
//! ## Quick Start
//!
//! ```rust
//! use stackc::{Compiler, CompileOptions, Opcode};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = r#"
//!     // count down from 3
//!     3 while dup 0 > do
//!         dup . 1 -
//!     end
//! "#;
//!
//! let compiler = Compiler::new(CompileOptions::default());
//! let program = compiler.compile_source("countdown.forth", source)?;
//!
//! // `do` jumps past the loop when the condition is false,
//! // the closing `end` jumps back to the `while`
//! assert_eq!(program[5].opcode, Opcode::Do);
//! assert_eq!(program[5].jump, Some(11));
//! assert_eq!(program[10].opcode, Opcode::End);
//! assert_eq!(program[10].jump, Some(1));
//! # Ok(())
//! # }
//! ```
//!
//! ## Language Overview
//!
//! - **Literals**: integers (`42`, `-7`) and strings (`"hello world"`)
//! - **Arithmetic**: `+ - * divmod`
//! - **Comparison**: `= != > < >= <=`
//! - **Stack**: `dup 2dup drop swap over`
//! - **Memory**: `mem @ !`
//! - **I/O**: `.` (print top of stack), `syscall3`
//! - **Control flow**: `if … end`, `if … else … end`, `while … do … end`
//! - **Macros**: `macro name body… end`
//! - **Comments**: `//` to end of line
//!
//! ## Macro Expansion Order
//!
//! By default an invoked macro's body is appended to the *end* of the token
//! stream, so it runs after everything already queued:
//!
//! ```rust
//! use stackc::{Compiler, Opcode};
//!
//! let program = Compiler::default()
//!     .compile_source("<string>", "macro double dup + end 3 double .")
//!     .unwrap();
//! let order: Vec<Opcode> = program.iter().map(|op| op.opcode).collect();
//! assert_eq!(order, vec![Opcode::PushInt, Opcode::Dump, Opcode::Dup, Opcode::Plus]);
//! ```
//!
//! [`MacroExpansion::Inline`](compiler::MacroExpansion::Inline) splices the
//! body right after the invocation instead.
//!
//! ## Architecture
//!
//! ```text
//! Source Code → Scanner → Tokens → IrGenerator → Program
//! ```
//!
//! - [`Scanner`] - Splits lines into words and classifies them
//! - [`IrGenerator`] - Expands macros and resolves jump targets
//! - [`Program`] - Address-indexed list of [`Operation`]s
//! - [`Compiler`] - Drives the pipeline and verifies the result
//!
//! ## Error Handling
//!
//! Every failure is returned as an [`Error`] carrying the file and row of the
//! offending token:
//!
//! ```rust
//! use stackc::{Compiler, Error};
//!
//! let err = Compiler::default()
//!     .compile_source("prog.forth", "1 bogus")
//!     .unwrap_err();
//! assert!(matches!(err, Error::UndefinedWord { .. }));
//! assert_eq!(err.to_string(), "prog.forth:0: undefined word `bogus`");
//! ```

/// Version of the stackc front end
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod compiler;
pub mod error;
pub mod lexer;

// Re-export main types
pub use compiler::{
    CompileOptions, Compiler, Immediate, IrGenerator, MacroExpansion, Opcode, Operation, Program,
};
pub use error::{Diagnostic, Error, ErrorCategory, Result};
pub use lexer::{Scanner, SourceLocation, Token, Word};
