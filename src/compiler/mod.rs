//! # stackc Compiler Front End
//!
//! Turns source text into a cross-referenced IR [`Program`] ready for the type
//! checker and code generator.
//!
//! ## Architecture
//!
//! ```text
//! Source → Scanner → Tokens → IrGenerator (macros + cross-referencing) → Program → Verify
//! ```
//!
//! ## Usage
//!
//! ```
//! use stackc::compiler::{Compiler, CompileOptions};
//!
//! let compiler = Compiler::new(CompileOptions::default());
//! let program = compiler.compile_source("<string>", "34 35 + .")?;
//! assert_eq!(program.len(), 4);
//! # Ok::<(), stackc::Error>(())
//! ```

pub mod debug;
pub mod ir;
pub mod macro_table;
pub mod verifier;

pub use debug::{dump_ir, format_operation, format_program, ir_to_json};
pub use ir::{Immediate, IrGenerator, Opcode, Operation, Program};
pub use macro_table::MacroTable;
pub use verifier::{verify, VerifyError, VerifyResult};

use crate::error::{Error, Result};
use crate::lexer::{Scanner, Token};
use std::fs;
use std::path::Path;

/// Where a macro body is placed when the macro is invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MacroExpansion {
    /// Append the body to the end of the token stream; it runs after every
    /// token already queued, including those after the invocation
    #[default]
    TailAppend,
    /// Splice the body immediately after the invocation
    Inline,
}

/// Compilation options
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Macro body placement
    pub macro_expansion: MacroExpansion,
    /// Maximum number of macro expansions in one pass, unbounded when `None`
    ///
    /// Recursive macros are rejected regardless of this setting.
    pub max_macro_expansions: Option<usize>,
    /// Verify the generated IR before returning it
    pub verify: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            macro_expansion: MacroExpansion::TailAppend,
            max_macro_expansions: None,
            verify: true,
        }
    }
}

/// Source-to-IR compiler
pub struct Compiler {
    options: CompileOptions,
}

impl Compiler {
    /// Create a new compiler with options
    pub fn new(options: CompileOptions) -> Self {
        Self { options }
    }

    /// Read and compile a source file
    pub fn compile_file(&self, path: impl AsRef<Path>) -> Result<Program> {
        let path = path.as_ref();
        let file = path.display().to_string();

        let source = fs::read_to_string(path).map_err(|e| Error::Io {
            path: file.clone(),
            message: e.to_string(),
        })?;
        tracing::debug!("read {} ({} bytes)", file, source.len());

        self.compile_source(&file, &source)
    }

    /// Compile source text; `file` is used in locations and diagnostics
    pub fn compile_source(&self, file: &str, source: &str) -> Result<Program> {
        let tokens = self.tokenize(file, source);
        let program = IrGenerator::new(tokens, &self.options).generate()?;

        if self.options.verify {
            let result = verify(&program);
            if let Some(first) = result.errors.first() {
                return Err(Error::internal(format!(
                    "{}: {} IR verification error(s), first: {}",
                    file,
                    result.errors.len(),
                    first
                )));
            }
        } else {
            tracing::warn!("{}: IR verification skipped", file);
        }

        Ok(program)
    }

    /// Scan and classify source text with a fresh scanner session
    pub fn tokenize(&self, file: &str, source: &str) -> Vec<Token> {
        let tokens = Scanner::new(file).scan_tokens(source);
        tracing::debug!("{}: scanned {} tokens", file, tokens.len());
        tokens
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(CompileOptions::default())
    }
}
