//! IR verification
//!
//! Re-checks a finished program before it is handed to later stages:
//! - control operations (`if`, `else`, `do`, `end`) carry a jump target
//! - every jump target lies within `0..=len`
//! - no other operation, `while` included, carries a jump target
//! - only literal pushes carry an immediate, and of the matching kind

use super::ir::{Immediate, Opcode, Program};
use std::fmt;

/// A single invariant violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    /// Control operation left without a jump target
    UnresolvedJump {
        /// Address of the operation
        addr: usize,
        /// Its opcode
        opcode: Opcode,
    },
    /// Jump target past the end of the program
    JumpOutOfRange {
        /// Address of the operation
        addr: usize,
        /// The target
        target: usize,
        /// Program length
        len: usize,
    },
    /// Non-control operation with a jump target
    UnexpectedJump {
        /// Address of the operation
        addr: usize,
        /// Its opcode
        opcode: Opcode,
    },
    /// Immediate missing, present where it should not be, or of the wrong kind
    BadImmediate {
        /// Address of the operation
        addr: usize,
        /// Its opcode
        opcode: Opcode,
    },
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerifyError::UnresolvedJump { addr, opcode } => {
                write!(f, "{:04}: `{}` has no jump target", addr, opcode)
            }
            VerifyError::JumpOutOfRange { addr, target, len } => write!(
                f,
                "{:04}: jump target {} outside program of {} operations",
                addr, target, len
            ),
            VerifyError::UnexpectedJump { addr, opcode } => {
                write!(f, "{:04}: `{}` must not have a jump target", addr, opcode)
            }
            VerifyError::BadImmediate { addr, opcode } => {
                write!(f, "{:04}: bad immediate for `{}`", addr, opcode)
            }
        }
    }
}

/// Outcome of verifying a program
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyResult {
    /// All violations found, in address order
    pub errors: Vec<VerifyError>,
}

impl VerifyResult {
    /// True if no violations were found
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Checks `program` against the IR invariants
pub fn verify(program: &Program) -> VerifyResult {
    let len = program.len();
    let mut errors = Vec::new();

    for (addr, op) in program.iter().enumerate() {
        match (op.opcode.has_jump(), op.jump) {
            (true, None) => errors.push(VerifyError::UnresolvedJump {
                addr,
                opcode: op.opcode,
            }),
            (true, Some(target)) if target > len => {
                errors.push(VerifyError::JumpOutOfRange { addr, target, len })
            }
            (false, Some(_)) => errors.push(VerifyError::UnexpectedJump {
                addr,
                opcode: op.opcode,
            }),
            _ => {}
        }

        let immediate_ok = matches!(
            (op.opcode, &op.immediate),
            (Opcode::PushInt, Some(Immediate::Int(_)))
                | (Opcode::PushStr, Some(Immediate::Str(_)))
        ) || (!matches!(op.opcode, Opcode::PushInt | Opcode::PushStr)
            && op.immediate.is_none());

        if !immediate_ok {
            errors.push(VerifyError::BadImmediate {
                addr,
                opcode: op.opcode,
            });
        }
    }

    VerifyResult { errors }
}
