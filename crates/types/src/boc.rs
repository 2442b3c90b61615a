//! # Bag of cells
//!
//! The serialized form of a cell DAG, used for compiled contract code on disk
//! and for messages on the wire. Only the generic `b5ee9c72` layout is
//! supported, with ordinary level 0 cells.
//!
//! ## Header
//! | Field | Size (bytes) | Description |
//! | --- | --- | --- |
//! | magic | 4 | `b5ee9c72`. |
//! | flags | 1 | `has_idx:1 has_crc32c:1 has_cache_bits:1 flags:2 size:3`. |
//! | off_bytes | 1 | Width of offset fields. |
//! | cells | size | Number of cells. |
//! | roots | size | Number of roots. |
//! | absent | size | Always zero. |
//! | tot_cells_size | off_bytes | Length of the cell data section. |
//! | root_list | roots * size | Indices of the root cells. |
//! | index | cells * off_bytes | Only if `has_idx`. Skipped when reading. |
//! | cell_data | tot_cells_size | The serialized cells. |
//! | crc32c | 4 | Only if `has_crc32c`. Little-endian. |
//!
//! ## Cell
//! | Field | Size (bytes) | Description |
//! | --- | --- | --- |
//! | d1 | 1 | Reference count. |
//! | d2 | 1 | `ceil(bits / 8) + floor(bits / 8)`. |
//! | data | ceil(bits / 8) | Data padded with the completion tag. |
//! | refs | refs * size | Indices of child cells, always greater than the cell's own. |

use crate::{cell::CellError, crc::crc32c, Cell};
use std::{collections::HashMap, sync::Arc};
use thiserror::Error;

#[cfg(test)]
mod tests;

/// The generic bag of cells magic prefix.
pub const MAGIC: [u8; 4] = [0xb5, 0xee, 0x9c, 0x72];

const FLAG_HAS_IDX: u8 = 0x80;
const FLAG_HAS_CRC32C: u8 = 0x40;
const SIZE_MASK: u8 = 0x07;
const D1_REFS_MASK: u8 = 0x07;
const D1_EXOTIC: u8 = 0x08;
const D1_WITH_HASHES: u8 = 0x10;
const D1_LEVEL_SHIFT: u8 = 5;

/// Failure to deserialize a bag of cells.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BocError {
    /// The input does not start with the generic magic.
    #[error("unsupported bag of cells magic {0:02x?}")]
    InvalidMagic([u8; 4]),
    /// The input ended early.
    #[error("unexpected end of input at byte {0}")]
    Truncated(usize),
    /// Extra bytes follow the bag of cells.
    #[error("{0} trailing bytes after bag of cells")]
    TrailingBytes(usize),
    /// Reference index width outside `1..=4`.
    #[error("invalid reference size {0}")]
    InvalidRefSize(u8),
    /// Offset width outside `1..=8`.
    #[error("invalid offset size {0}")]
    InvalidOffsetSize(u8),
    /// A bag must have at least one root.
    #[error("bag of cells has no roots")]
    NoRoots,
    /// Absent cells are not supported.
    #[error("bag of cells with {0} absent cells is not supported")]
    AbsentCells(u64),
    /// A root index does not name a cell.
    #[error("root index {0} out of range")]
    RootOutOfRange(u64),
    /// Exotic, higher level or hash-carrying cells are not supported.
    #[error("cell {0} is not an ordinary level 0 cell")]
    UnsupportedCell(usize),
    /// A reference must point to a later cell.
    #[error("cell {cell} references invalid index {index}")]
    InvalidRefIndex {
        /// The referencing cell.
        cell: usize,
        /// The referenced index.
        index: u64,
    },
    /// A partial final byte without its completion tag.
    #[error("cell {0} is missing its completion tag")]
    MissingCompletionTag(usize),
    /// The cell data section length disagrees with its contents.
    #[error("cell data section is {declared} bytes, {actual} used")]
    DataSize {
        /// Declared in the header.
        declared: u64,
        /// Consumed by the cells.
        actual: usize,
    },
    /// The trailing checksum does not match.
    #[error("crc32c mismatch: stored {stored:08x}, computed {computed:08x}")]
    Checksum {
        /// Checksum found in the input.
        stored: u32,
        /// Checksum of the input.
        computed: u32,
    },
    /// A decoded cell violates the cell format's limits.
    #[error("invalid cell: {0}")]
    Cell(#[from] CellError),
}

struct RawCell {
    data: Vec<u8>,
    bit_len: usize,
    refs: Vec<usize>,
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, len: usize) -> Result<&'a [u8], BocError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.bytes.len())
            .ok_or(BocError::Truncated(self.bytes.len()))?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn u8(&mut self) -> Result<u8, BocError> {
        Ok(self.take(1)?[0])
    }

    fn uint(&mut self, len: usize) -> Result<u64, BocError> {
        Ok(self
            .take(len)?
            .iter()
            .fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
    }
}

fn byte_len(value: u64) -> usize {
    ((64 - value.leading_zeros()) as usize).div_ceil(8).max(1)
}

fn write_uint(out: &mut Vec<u8>, value: u64, len: usize) {
    out.extend_from_slice(&value.to_be_bytes()[8 - len..]);
}

/// The unique cells reachable from a root, each stored after its children
/// together with the positions of those children.
///
/// Cells are first looked up by address, so a subtree shared through the
/// same `Arc` is visited once. Separately allocated but identical subtrees
/// are then merged by content.
#[derive(Default)]
struct Interner<'a> {
    by_ptr: HashMap<*const Cell, usize>,
    by_content: HashMap<(&'a [u8], usize, Vec<usize>), usize>,
    cells: Vec<(&'a Cell, Vec<usize>)>,
}

impl<'a> Interner<'a> {
    fn visit(&mut self, cell: &'a Cell) -> usize {
        let ptr: *const Cell = cell;
        if let Some(&id) = self.by_ptr.get(&ptr) {
            return id;
        }
        let children: Vec<usize> = cell.refs().iter().map(|child| self.visit(child)).collect();
        let key = (cell.data(), cell.bit_len(), children.clone());
        let id = match self.by_content.get(&key) {
            Some(&id) => id,
            None => {
                let id = self.cells.len();
                self.cells.push((cell, children));
                self.by_content.insert(key, id);
                id
            }
        };
        self.by_ptr.insert(ptr, id);
        id
    }
}

/// Serialize the DAG below `root` as a single root bag of cells.
///
/// Identical subtrees are stored once. Every cell precedes its children,
/// with the root first.
pub fn serialize(root: &Cell, with_crc: bool) -> Vec<u8> {
    let mut interner = Interner::default();
    interner.visit(root);
    let count = interner.cells.len();
    let size = byte_len(count as u64);

    let mut cells = Vec::new();
    for (cell, children) in interner.cells.iter().rev() {
        cells.push(cell.refs_descriptor());
        cells.push(cell.bits_descriptor());
        cells.extend(cell.padded_data());
        for child in children {
            write_uint(&mut cells, (count - 1 - child) as u64, size);
        }
    }
    let off = byte_len(cells.len() as u64);

    let mut out = Vec::with_capacity(cells.len() + 32);
    out.extend_from_slice(&MAGIC);
    let flags = if with_crc { FLAG_HAS_CRC32C } else { 0 };
    out.push(flags | size as u8);
    out.push(off as u8);
    write_uint(&mut out, count as u64, size);
    write_uint(&mut out, 1, size);
    write_uint(&mut out, 0, size);
    write_uint(&mut out, cells.len() as u64, off);
    write_uint(&mut out, 0, size);
    out.extend(cells);
    if with_crc {
        let crc = crc32c(&out);
        out.extend_from_slice(&crc.to_le_bytes());
    }
    out
}

fn read_cell(r: &mut Reader, ix: usize, cells: u64, size: usize) -> Result<RawCell, BocError> {
    let d1 = r.u8()?;
    let d2 = r.u8()?;
    if d1 & (D1_EXOTIC | D1_WITH_HASHES) != 0 || d1 >> D1_LEVEL_SHIFT != 0 {
        return Err(BocError::UnsupportedCell(ix));
    }
    let data = r.take(usize::from(d2).div_ceil(2))?.to_vec();
    let bit_len = if d2 % 2 == 0 {
        data.len() * 8
    } else {
        let last = data.last().copied().unwrap_or(0);
        if last == 0 {
            return Err(BocError::MissingCompletionTag(ix));
        }
        data.len() * 8 - last.trailing_zeros() as usize - 1
    };
    let refs = (0..d1 & D1_REFS_MASK)
        .map(|_| {
            let index = r.uint(size)?;
            if index <= ix as u64 || index >= cells {
                return Err(BocError::InvalidRefIndex { cell: ix, index });
            }
            Ok(index as usize)
        })
        .collect::<Result<_, _>>()?;
    Ok(RawCell {
        data,
        bit_len,
        refs,
    })
}

/// Deserialize a bag of cells, returning its roots in order.
pub fn deserialize(bytes: &[u8]) -> Result<Vec<Cell>, BocError> {
    let mut r = Reader { bytes, pos: 0 };
    let magic: [u8; 4] = r.take(4)?.try_into().unwrap_or_default();
    if magic != MAGIC {
        return Err(BocError::InvalidMagic(magic));
    }
    let flags = r.u8()?;
    let size = flags & SIZE_MASK;
    if !(1..=4).contains(&size) {
        return Err(BocError::InvalidRefSize(size));
    }
    let size = usize::from(size);
    let off = r.u8()?;
    if !(1..=8).contains(&off) {
        return Err(BocError::InvalidOffsetSize(off));
    }
    let off = usize::from(off);

    let num_cells = r.uint(size)?;
    let num_roots = r.uint(size)?;
    let absent = r.uint(size)?;
    let tot_cells_size = r.uint(off)?;
    if num_roots == 0 {
        return Err(BocError::NoRoots);
    }
    if absent != 0 {
        return Err(BocError::AbsentCells(absent));
    }
    let roots = (0..num_roots)
        .map(|_| {
            let root = r.uint(size)?;
            if root >= num_cells {
                return Err(BocError::RootOutOfRange(root));
            }
            Ok(root as usize)
        })
        .collect::<Result<Vec<_>, _>>()?;
    if flags & FLAG_HAS_IDX != 0 {
        r.take(num_cells as usize * off)?;
    }

    let data_start = r.pos;
    let raw = (0..num_cells as usize)
        .map(|ix| read_cell(&mut r, ix, num_cells, size))
        .collect::<Result<Vec<_>, _>>()?;
    let actual = r.pos - data_start;
    if actual as u64 != tot_cells_size {
        return Err(BocError::DataSize {
            declared: tot_cells_size,
            actual,
        });
    }

    if flags & FLAG_HAS_CRC32C != 0 {
        let computed = crc32c(&bytes[..r.pos]);
        let stored = u32::from_le_bytes(r.take(4)?.try_into().unwrap_or_default());
        if stored != computed {
            return Err(BocError::Checksum { stored, computed });
        }
    }
    if r.pos != bytes.len() {
        return Err(BocError::TrailingBytes(bytes.len() - r.pos));
    }

    let mut built: Vec<Option<Arc<Cell>>> = vec![None; raw.len()];
    for (ix, cell) in raw.into_iter().enumerate().rev() {
        let refs = cell
            .refs
            .iter()
            .map(|&child| built[child].clone().ok_or(BocError::InvalidRefIndex {
                cell: ix,
                index: child as u64,
            }))
            .collect::<Result<Vec<_>, _>>()?;
        built[ix] = Some(Arc::new(Cell::new(cell.data, cell.bit_len, refs)?));
    }
    roots
        .into_iter()
        .map(|ix| {
            built[ix]
                .as_deref()
                .cloned()
                .ok_or(BocError::RootOutOfRange(ix as u64))
        })
        .collect()
}

/// Deserialize a bag of cells and return its first root.
pub fn deserialize_root(bytes: &[u8]) -> Result<Cell, BocError> {
    deserialize(bytes)?
        .into_iter()
        .next()
        .ok_or(BocError::NoRoots)
}
