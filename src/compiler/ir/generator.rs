//! Token-to-IR generation with control-flow cross-referencing
//!
//! A single forward pass over the token stream. Each token is resolved to an
//! operation and appended to the program; a block stack of pending addresses
//! resolves `if`/`else`/`while`/`do`/`end` jump targets as soon as the closing
//! word is seen. Macro definitions are consumed here and invocations are
//! expanded into the token stream being walked.
//!
//! Every expanded token remembers the expansion that produced it. An
//! invocation whose chain of enclosing expansions already contains the same
//! macro can never terminate and is rejected as [`Error::RecursiveMacro`].

use super::instruction::{Opcode, Operation};
use super::program::Program;
use crate::compiler::macro_table::MacroTable;
use crate::compiler::{CompileOptions, MacroExpansion};
use crate::error::{Error, Result};
use crate::lexer::{Token, Word};

/// IR generator
///
/// The token buffer grows while it is walked: in
/// [`MacroExpansion::TailAppend`] mode a macro body is appended to the end of
/// the buffer, so it runs after every token already queued, including those
/// that follow the invocation in the source.
pub struct IrGenerator {
    /// Tokens still to walk, growing on expansion
    tokens: Vec<Token>,
    /// Expansion frame each token came from, parallel to `tokens`
    origins: Vec<Option<usize>>,
    /// Every expansion performed, indexed by `origins`
    frames: Vec<Frame>,
    /// Index of the token being processed
    cursor: usize,
    /// Output
    program: Program,
    /// Addresses of open `if`/`else`/`while`/`do` operations
    blocks: Vec<usize>,
    /// Macros defined so far
    macros: MacroTable,
    /// Where expanded bodies go
    expansion: MacroExpansion,
    /// Expansions performed so far
    expansions: usize,
    /// Optional upper bound on `expansions`
    max_expansions: Option<usize>,
}

/// One macro expansion and the expansion its invocation came from
#[derive(Debug)]
struct Frame {
    name: String,
    parent: Option<usize>,
}

impl IrGenerator {
    /// Create a generator over `tokens`
    pub fn new(tokens: Vec<Token>, options: &CompileOptions) -> Self {
        let origins = vec![None; tokens.len()];
        Self {
            tokens,
            origins,
            frames: Vec::new(),
            cursor: 0,
            program: Program::new(),
            blocks: Vec::new(),
            macros: MacroTable::new(),
            expansion: options.macro_expansion,
            expansions: 0,
            max_expansions: options.max_macro_expansions,
        }
    }

    /// Runs the pass and returns the cross-referenced program
    pub fn generate(mut self) -> Result<Program> {
        while self.cursor < self.tokens.len() {
            let token = self.tokens[self.cursor].clone();

            if self.macros.contains(&token.word) {
                self.expand(&token)?;
                self.cursor += 1;
                continue;
            }

            let op = resolve(&token)?;
            if op.opcode == Opcode::Macro {
                self.define_macro(&token)?;
                continue;
            }

            let addr = self.program.push(op);
            self.cross_reference(addr)?;
            self.cursor += 1;
        }

        if let Some(&open) = self.blocks.last() {
            let op = &self.program[open];
            return Err(Error::unbalanced(
                &op.location,
                format!("`{}` block is never closed with `end`", op.opcode),
            ));
        }

        tracing::debug!(
            "generated {} operations, {} macros, {} expansions",
            self.program.len(),
            self.macros.len(),
            self.expansions
        );
        Ok(self.program)
    }

    /// Queues the body of the macro invoked by `token`
    fn expand(&mut self, token: &Token) -> Result<()> {
        let name = token.word.to_string();

        let parent = self.origins[self.cursor];
        if self.is_expanding(parent, &name) {
            return Err(Error::RecursiveMacro {
                location: token.location.clone(),
                name,
            });
        }

        self.expansions += 1;
        if let Some(limit) = self.max_expansions {
            if self.expansions > limit {
                return Err(Error::MacroExpansionLimit {
                    location: token.location.clone(),
                    name,
                    limit,
                });
            }
        }

        let Some(body) = self.macros.get(&token.word) else {
            return Err(Error::internal(format!("expanding unknown macro `{}`", name)));
        };

        tracing::trace!(
            "{}: expanding `{}` ({} tokens, {:?})",
            token.location,
            name,
            body.len(),
            self.expansion
        );

        let frame = self.frames.len();
        let origins = std::iter::repeat(Some(frame)).take(body.len());
        match self.expansion {
            MacroExpansion::TailAppend => {
                self.tokens.extend_from_slice(body);
                self.origins.extend(origins);
            }
            MacroExpansion::Inline => {
                let at = self.cursor + 1;
                self.tokens.splice(at..at, body.iter().cloned());
                self.origins.splice(at..at, origins);
            }
        }
        self.frames.push(Frame { name, parent });
        Ok(())
    }

    /// True if `name` is being expanded somewhere in the chain ending at `frame`
    fn is_expanding(&self, mut frame: Option<usize>, name: &str) -> bool {
        while let Some(index) = frame {
            let Some(current) = self.frames.get(index) else {
                return false;
            };
            if current.name == name {
                return true;
            }
            frame = current.parent;
        }
        false
    }

    /// Consumes `macro <name> <body...> end` starting at the `macro` keyword
    ///
    /// The body ends at the first identifier literally equal to `end`; nested
    /// blocks are not balanced. The terminating `end` is discarded.
    fn define_macro(&mut self, keyword: &Token) -> Result<()> {
        self.cursor += 1;
        let name_token = match self.tokens.get(self.cursor) {
            Some(token) => token.clone(),
            None => {
                return Err(Error::MalformedMacro {
                    location: keyword.location.clone(),
                    found: "end of input".to_string(),
                })
            }
        };

        let name = self.macros.check_name(&name_token)?.to_string();

        let start = self.cursor + 1;
        let Some(len) = self.tokens[start..]
            .iter()
            .position(|token| token.word.is_identifier("end"))
        else {
            return Err(Error::IncompleteMacro {
                location: name_token.location.clone(),
                name,
            });
        };

        let body = self.tokens[start..start + len].to_vec();
        self.macros.define(&name_token, body)?;
        self.cursor = start + len + 1;
        Ok(())
    }

    /// Applies the block-stack rule for the operation just appended at `addr`
    fn cross_reference(&mut self, addr: usize) -> Result<()> {
        match self.program[addr].opcode {
            Opcode::If | Opcode::While => self.blocks.push(addr),

            Opcode::Else => {
                let if_addr = self.pop_block(addr)?;
                if self.program[if_addr].opcode != Opcode::If {
                    return Err(Error::ElseWithoutIf {
                        location: self.program[addr].location.clone(),
                    });
                }
                // skip the `else` itself when the condition is false
                self.program[if_addr].jump = Some(addr + 1);
                self.blocks.push(addr);
            }

            Opcode::End => {
                let block_addr = self.pop_block(addr)?;
                match self.program[block_addr].opcode {
                    Opcode::If | Opcode::Else => {
                        self.program[block_addr].jump = Some(addr);
                        self.program[addr].jump = Some(addr + 1);
                    }
                    Opcode::Do => {
                        // `do` holds its `while` address until now
                        self.program[addr].jump = self.program[block_addr].jump;
                        self.program[block_addr].jump = Some(addr + 1);
                    }
                    other => {
                        return Err(Error::unbalanced(
                            &self.program[addr].location,
                            format!("`end` cannot close a `{}` block", other),
                        ))
                    }
                }
            }

            Opcode::Do => {
                let while_addr = self.pop_block(addr)?;
                if self.program[while_addr].opcode != Opcode::While {
                    return Err(Error::DoWithoutWhile {
                        location: self.program[addr].location.clone(),
                    });
                }
                self.program[addr].jump = Some(while_addr);
                self.blocks.push(addr);
            }

            _ => {}
        }

        Ok(())
    }

    fn pop_block(&mut self, addr: usize) -> Result<usize> {
        self.blocks.pop().ok_or_else(|| {
            let op = &self.program[addr];
            Error::unbalanced(
                &op.location,
                format!("`{}` without an open block", op.opcode),
            )
        })
    }
}

/// Resolves a non-macro token to its operation
pub fn resolve(token: &Token) -> Result<Operation> {
    let location = token.location.clone();
    match &token.word {
        Word::IntLiteral(value) => Ok(Operation::push_int(*value, location)),
        Word::StringLiteral(text) => Ok(Operation::push_str(text.as_str(), location)),
        Word::Identifier(name) => match Opcode::from_word(name) {
            Some(opcode) => Ok(Operation::new(opcode, location)),
            None => Err(Error::UndefinedWord {
                location,
                word: name.clone(),
            }),
        },
    }
}
