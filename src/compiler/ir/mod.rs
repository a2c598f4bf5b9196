//! # Intermediate Representation (IR)
//!
//! The front end lowers source tokens to a flat, jump-addressed sequence of
//! operations consumed by the type checker and code generator.
//!
//! ## Module Structure
//!
//! ```text
//! ir/
//! ├── mod.rs          # This file - module definition and re-exports
//! ├── instruction.rs  # Opcode, Immediate, Operation, builtin word table
//! ├── program.rs      # Program (address-indexed operation list)
//! └── generator.rs    # IrGenerator: macro expansion and cross-referencing
//! ```
//!
//! ## Jump Targets
//!
//! | Opcode | Target |
//! |--------|--------|
//! | `if` | first address of the `else` body, or the closing `end` |
//! | `else` | the closing `end` |
//! | `do` | loop exit (one past the closing `end`) |
//! | `end` after `if`/`else` | the next address |
//! | `end` after `do` | the `while` that opened the loop |

mod generator;
mod instruction;
mod program;

pub use generator::{resolve, IrGenerator};
pub use instruction::{Immediate, Opcode, Operation, BUILTIN_WORDS};
pub use program::Program;
