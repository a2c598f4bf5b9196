//! IR program definition

use super::instruction::Operation;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Complete IR program
///
/// An operation's index is its instruction address. Operations are only ever
/// appended; cross-referencing rewrites jump targets in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// All operations in address order
    pub operations: Vec<Operation>,
}

impl Program {
    /// Create a new empty program
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an operation and returns its address
    pub fn push(&mut self, op: Operation) -> usize {
        self.operations.push(op);
        self.operations.len() - 1
    }

    /// Number of operations
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// True if no operations were emitted
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Iterates operations in address order
    pub fn iter(&self) -> std::slice::Iter<'_, Operation> {
        self.operations.iter()
    }
}

impl Index<usize> for Program {
    type Output = Operation;

    fn index(&self, addr: usize) -> &Operation {
        &self.operations[addr]
    }
}

impl IndexMut<usize> for Program {
    fn index_mut(&mut self, addr: usize) -> &mut Operation {
        &mut self.operations[addr]
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Operation;
    type IntoIter = std::slice::Iter<'a, Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.iter()
    }
}
