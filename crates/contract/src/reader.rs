//! Decoding the result stack of a read-only getter call.
//!
//! Values are consumed positionally: the first value read is the first
//! value the getter pushed. The order is part of the contract's interface.

use core::fmt;
use num_bigint::BigInt;
use offering_types::{
    cell::CellError,
    stack::{StackEntry, StackTag},
    Address, Cell,
};
use thiserror::Error;


/// The kind of value expected at a stack position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExpectedKind {
    /// A standard address, held in a slice or cell.
    Address,
    /// An integer.
    Int,
    /// A cell.
    Cell,
}

/// A decoded stack value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    /// See [`ExpectedKind::Address`].
    Address(Address),
    /// See [`ExpectedKind::Int`].
    Int(BigInt),
    /// See [`ExpectedKind::Cell`].
    Cell(Cell),
}

/// Shorthand for a `Result` where the error type is a `ReadError`.
pub type ReadResult<T> = Result<T, ReadError>;

/// Failure to decode a getter result.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReadError {
    /// Fewer values than requested.
    #[error("stack underflow: {requested} values requested, {available} available")]
    StackUnderflow {
        /// Values requested.
        requested: usize,
        /// Values on the stack.
        available: usize,
    },
    /// A value's tag disagrees with the expected kind.
    #[error("type mismatch at index {index}: expected {expected}, found {found}")]
    TypeMismatch {
        /// Stack position of the value.
        index: usize,
        /// The kind requested.
        expected: ExpectedKind,
        /// The tag found.
        found: StackTag,
    },
    /// A slice expected to hold an address does not.
    #[error("invalid address at index {index}: {source}")]
    InvalidAddress {
        /// Stack position of the value.
        index: usize,
        /// The parse failure.
        source: CellError,
    },
}

/// Reads typed values off a getter result stack, front to back.
#[derive(Clone, Debug)]
pub struct StackReader<'a> {
    stack: &'a [StackEntry],
    pos: usize,
}

/// Decode `stack` positionally into one value per entry of `kinds`.
///
/// Fails with [`ReadError::StackUnderflow`] before reading anything if the
/// stack holds fewer values than requested.
pub fn read(stack: &[StackEntry], kinds: &[ExpectedKind]) -> ReadResult<Vec<Value>> {
    if kinds.len() > stack.len() {
        return Err(ReadError::StackUnderflow {
            requested: kinds.len(),
            available: stack.len(),
        });
    }
    let mut reader = StackReader::new(stack);
    kinds.iter().map(|&kind| reader.read(kind)).collect()
}

impl<'a> StackReader<'a> {
    /// Start reading at the first pushed value.
    pub fn new(stack: &'a [StackEntry]) -> Self {
        Self { stack, pos: 0 }
    }

    /// Values not yet read.
    pub fn remaining(&self) -> usize {
        self.stack.len() - self.pos
    }

    fn next(&mut self) -> ReadResult<(usize, &'a StackEntry)> {
        let index = self.pos;
        let entry = self.stack.get(index).ok_or(ReadError::StackUnderflow {
            requested: index + 1,
            available: self.stack.len(),
        })?;
        self.pos += 1;
        Ok((index, entry))
    }

    /// Read the next value as `kind`.
    pub fn read(&mut self, kind: ExpectedKind) -> ReadResult<Value> {
        match kind {
            ExpectedKind::Address => self.read_address().map(Value::Address),
            ExpectedKind::Int => self.read_int().map(Value::Int),
            ExpectedKind::Cell => self.read_cell().map(Value::Cell),
        }
    }

    /// Read the next value as an address.
    pub fn read_address(&mut self) -> ReadResult<Address> {
        let (index, entry) = self.next()?;
        let cell = match entry {
            StackEntry::Slice(cell) | StackEntry::Cell(cell) => cell,
            other => return Err(mismatch(index, ExpectedKind::Address, other)),
        };
        let mut p = cell.parser();
        p.load_address()
            .and_then(|address| p.ensure_empty().map(|()| address))
            .map_err(|source| ReadError::InvalidAddress { index, source })
    }

    /// Read the next value as an integer.
    pub fn read_int(&mut self) -> ReadResult<BigInt> {
        match self.next()? {
            (_, StackEntry::Int(value)) => Ok(value.clone()),
            (index, other) => Err(mismatch(index, ExpectedKind::Int, other)),
        }
    }

    /// Read the next value as a cell.
    pub fn read_cell(&mut self) -> ReadResult<Cell> {
        match self.next()? {
            (_, StackEntry::Cell(cell)) => Ok(cell.clone()),
            (index, other) => Err(mismatch(index, ExpectedKind::Cell, other)),
        }
    }
}

fn mismatch(index: usize, expected: ExpectedKind, found: &StackEntry) -> ReadError {
    ReadError::TypeMismatch {
        index,
        expected,
        found: found.tag(),
    }
}

impl Value {
    /// The address, if this is one.
    pub fn as_address(&self) -> Option<&Address> {
        match self {
            Value::Address(address) => Some(address),
            _ => None,
        }
    }

    /// The integer, if this is one.
    pub fn as_int(&self) -> Option<&BigInt> {
        match self {
            Value::Int(value) => Some(value),
            _ => None,
        }
    }

    /// The cell, if this is one.
    pub fn as_cell(&self) -> Option<&Cell> {
        match self {
            Value::Cell(cell) => Some(cell),
            _ => None,
        }
    }
}

impl fmt::Display for ExpectedKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ExpectedKind::Address => "address",
            ExpectedKind::Int => "int",
            ExpectedKind::Cell => "cell",
        };
        f.write_str(name)
    }
}
