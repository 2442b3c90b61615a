//! # Cells
//!
//! The ledger's canonical binary container. A cell holds up to
//! [`Cell::MAX_BITS`] data bits and up to [`Cell::MAX_REFS`] references to
//! other cells, forming a DAG whose depth may not exceed [`Cell::MAX_DEPTH`].
//!
//! Cells are produced by a [`CellBuilder`] and are immutable afterwards. Their
//! contents are read back with a [`CellParser`].
//!
//! ## Field encodings
//! | Field | Bits | Description |
//! | --- | --- | --- |
//! | uint(n) | n | Big-endian unsigned integer. |
//! | int(n) | n | Big-endian two's complement integer. |
//! | coins | 4 + 8 * len | `VarUInteger 16`: byte length, then the minimal big-endian bytes. |
//! | address | 267 | `addr_std$10 anycast:0 workchain:int8 hash:bits256`. |
//! | no address | 2 | `addr_none$00`. |

use std::sync::Arc;
use thiserror::Error;

pub use builder::CellBuilder;
pub use parser::CellParser;

mod builder;
mod parser;

/// Shorthand for a `Result` where the error type is a `CellError`.
pub type CellResult<T> = Result<T, CellError>;

/// An immutable sequence of bits with references to child cells.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    /// Bits packed most significant first. Unused trailing bits are zero.
    data: Vec<u8>,
    bit_len: usize,
    refs: Vec<Arc<Cell>>,
    depth: u16,
}

/// Types that can be written into a [`CellBuilder`].
pub trait Store {
    /// Append the encoding of `self` to the builder.
    fn store(&self, builder: &mut CellBuilder) -> CellResult<()>;

    /// Encode `self` into a cell of its own.
    fn to_cell(&self) -> CellResult<Cell> {
        let mut builder = CellBuilder::new();
        self.store(&mut builder)?;
        builder.build()
    }
}

/// Any failure to write or read cell contents.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CellError {
    /// A value violates the constraints of its field encoding.
    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),
    /// A write would exceed the cell format's limits.
    #[error("cell capacity exceeded: {0}")]
    CapacityExceeded(#[from] CapacityExceeded),
    /// A read requested more bits than remain.
    #[error("cell underflow: requested {requested} bits, {remaining} remaining")]
    BitUnderflow {
        /// Bits requested.
        requested: usize,
        /// Bits left to read.
        remaining: usize,
    },
    /// A read requested a reference but none remain.
    #[error("cell underflow: no references remaining")]
    RefUnderflow,
    /// An address field carries an unsupported tag.
    #[error("unsupported address tag {0:#04b}")]
    InvalidAddressTag(u8),
    /// A fixed prefix did not match.
    #[error("unexpected prefix {found:#x}, expected {expected:#x}")]
    UnexpectedPrefix {
        /// The prefix the layout requires.
        expected: u128,
        /// The prefix read.
        found: u128,
    },
    /// A parser finished with data left over.
    #[error("unexpected trailing data: {bits} bits and {refs} references")]
    TrailingData {
        /// Unread bits.
        bits: usize,
        /// Unread references.
        refs: usize,
    },
}

/// A value does not fit the field it is written to.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    /// An unsigned value is not below `2^bits`.
    #[error("value {value} does not fit in {bits} unsigned bits")]
    UintOutOfRange {
        /// The rejected value.
        value: u128,
        /// The field width.
        bits: usize,
    },
    /// A signed value is outside `-2^(bits-1)..2^(bits-1)`.
    #[error("value {value} does not fit in {bits} signed bits")]
    IntOutOfRange {
        /// The rejected value.
        value: i128,
        /// The field width.
        bits: usize,
    },
    /// Integer fields are limited to 128 bits.
    #[error("integer width {0} exceeds 128 bits")]
    WidthTooLarge(usize),
    /// Coin amounts must be below `2^120`.
    #[error("coin amount {0} does not fit in a VarUInteger 16")]
    CoinsOutOfRange(u128),
}

/// A cell format limit was exceeded.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CapacityExceeded {
    /// Too many data bits.
    #[error("{requested} bits requested, {available} available")]
    Bits {
        /// Bits the write needed.
        requested: usize,
        /// Bits left in the cell.
        available: usize,
    },
    /// Too many references.
    #[error("a cell holds at most {max} references", max = Cell::MAX_REFS)]
    Refs,
    /// The cell tree is too deep.
    #[error("cell depth {0} exceeds {max}", max = Cell::MAX_DEPTH)]
    Depth(usize),
}

impl Cell {
    /// The maximum number of data bits in a cell.
    pub const MAX_BITS: usize = 1023;
    /// The maximum number of references in a cell.
    pub const MAX_REFS: usize = 4;
    /// The maximum depth of a cell tree.
    pub const MAX_DEPTH: usize = 1024;

    /// The empty cell: no bits and no references.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Construct a cell from already packed parts, checking the format limits.
    ///
    /// Bits of `data` past `bit_len` are cleared.
    pub fn new(mut data: Vec<u8>, bit_len: usize, refs: Vec<Arc<Cell>>) -> CellResult<Self> {
        if bit_len > Self::MAX_BITS || data.len() * 8 < bit_len {
            return Err(CapacityExceeded::Bits {
                requested: bit_len,
                available: Self::MAX_BITS.min(data.len() * 8),
            }
            .into());
        }
        if refs.len() > Self::MAX_REFS {
            return Err(CapacityExceeded::Refs.into());
        }
        let depth = refs
            .iter()
            .map(|r| usize::from(r.depth) + 1)
            .max()
            .unwrap_or(0);
        if depth > Self::MAX_DEPTH {
            return Err(CapacityExceeded::Depth(depth).into());
        }
        data.truncate(bit_len.div_ceil(8));
        if bit_len % 8 != 0 {
            if let Some(last) = data.last_mut() {
                *last &= 0xFF << (8 - bit_len % 8);
            }
        }
        Ok(Self {
            data,
            bit_len,
            refs,
            depth: depth as u16,
        })
    }

    /// The packed data bytes. The final byte may be partially used.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The number of data bits.
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// The child cells.
    pub fn refs(&self) -> &[Arc<Cell>] {
        &self.refs
    }

    /// The length of the longest path to a leaf; zero for a leaf.
    pub fn depth(&self) -> u16 {
        self.depth
    }

    /// Whether the cell holds no bits and no references.
    pub fn is_empty(&self) -> bool {
        self.bit_len == 0 && self.refs.is_empty()
    }

    /// The bit at `index`, if in range.
    pub fn bit(&self, index: usize) -> Option<bool> {
        (index < self.bit_len).then(|| self.data[index / 8] & (0x80 >> (index % 8)) != 0)
    }

    /// Begin reading this cell from the start.
    pub fn parser(&self) -> CellParser<'_> {
        CellParser::new(self)
    }

    /// The first descriptor byte: the reference count of an ordinary level 0 cell.
    pub fn refs_descriptor(&self) -> u8 {
        self.refs.len() as u8
    }

    /// The second descriptor byte: `ceil(bits / 8) + floor(bits / 8)`.
    pub fn bits_descriptor(&self) -> u8 {
        (self.bit_len.div_ceil(8) + self.bit_len / 8) as u8
    }

    /// The data bytes with the completion tag applied when the length is not
    /// a whole number of bytes.
    pub fn padded_data(&self) -> Vec<u8> {
        let mut data = self.data.clone();
        if self.bit_len % 8 != 0 {
            if let Some(last) = data.last_mut() {
                *last |= 0x80 >> (self.bit_len % 8);
            }
        }
        data
    }
}
