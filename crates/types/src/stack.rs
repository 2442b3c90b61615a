//! # Stack
//! Values returned from a read-only contract call.

use crate::Cell;
use core::fmt;
use num_bigint::BigInt;

/// A single typed value on the TVM stack.
///
/// Integers are 257-bit signed values on the ledger, so they are carried as
/// a [`BigInt`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StackEntry {
    /// The null value.
    Null,
    /// An integer.
    Int(BigInt),
    /// A cell.
    Cell(Cell),
    /// A cell being read, e.g. an address returned by a getter.
    Slice(Cell),
    /// A cell being written.
    Builder(Cell),
    /// A tuple of entries.
    Tuple(Vec<StackEntry>),
}

/// The tag of a [`StackEntry`], without its value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StackTag {
    /// [`StackEntry::Null`].
    Null,
    /// [`StackEntry::Int`].
    Int,
    /// [`StackEntry::Cell`].
    Cell,
    /// [`StackEntry::Slice`].
    Slice,
    /// [`StackEntry::Builder`].
    Builder,
    /// [`StackEntry::Tuple`].
    Tuple,
}

impl StackEntry {
    /// The entry's tag.
    pub fn tag(&self) -> StackTag {
        match self {
            StackEntry::Null => StackTag::Null,
            StackEntry::Int(_) => StackTag::Int,
            StackEntry::Cell(_) => StackTag::Cell,
            StackEntry::Slice(_) => StackTag::Slice,
            StackEntry::Builder(_) => StackTag::Builder,
            StackEntry::Tuple(_) => StackTag::Tuple,
        }
    }
}

impl From<BigInt> for StackEntry {
    fn from(value: BigInt) -> Self {
        StackEntry::Int(value)
    }
}

impl From<i64> for StackEntry {
    fn from(value: i64) -> Self {
        StackEntry::Int(value.into())
    }
}

impl From<Cell> for StackEntry {
    fn from(cell: Cell) -> Self {
        StackEntry::Cell(cell)
    }
}

impl fmt::Display for StackTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            StackTag::Null => "null",
            StackTag::Int => "int",
            StackTag::Cell => "cell",
            StackTag::Slice => "slice",
            StackTag::Builder => "builder",
            StackTag::Tuple => "tuple",
        };
        f.write_str(name)
    }
}
