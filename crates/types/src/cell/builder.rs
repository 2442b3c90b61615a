//! Append-only typed writer producing a [`Cell`].

use super::{CapacityExceeded, Cell, CellResult, EncodingError};
use crate::{Address, Coins};
use std::sync::Arc;

/// Accumulates bits and references, then produces an immutable [`Cell`].
///
/// Every write checks the cell format limits before touching the buffer, so
/// a failed write leaves the builder unchanged.
#[derive(Clone, Debug, Default)]
pub struct CellBuilder {
    data: Vec<u8>,
    bit_len: usize,
    refs: Vec<Arc<Cell>>,
}

const ADDR_STD_TAG: u128 = 0b10;
const ADDR_NONE_TAG: u128 = 0b00;
const COINS_LEN_BITS: usize = 4;

impl CellBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Data bits written so far.
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Data bits that may still be written.
    pub fn available_bits(&self) -> usize {
        Cell::MAX_BITS - self.bit_len
    }

    /// References that may still be added.
    pub fn available_refs(&self) -> usize {
        Cell::MAX_REFS - self.refs.len()
    }

    fn ensure_bits(&self, requested: usize) -> CellResult<()> {
        let available = self.available_bits();
        if requested > available {
            return Err(CapacityExceeded::Bits {
                requested,
                available,
            }
            .into());
        }
        Ok(())
    }

    fn push_bit(&mut self, bit: bool) {
        let offset = self.bit_len % 8;
        if offset == 0 {
            self.data.push(0);
        }
        if bit {
            if let Some(last) = self.data.last_mut() {
                *last |= 0x80 >> offset;
            }
        }
        self.bit_len += 1;
    }

    /// Write a single bit.
    pub fn store_bit(&mut self, bit: bool) -> CellResult<&mut Self> {
        self.ensure_bits(1)?;
        self.push_bit(bit);
        Ok(self)
    }

    /// Write `value` as a `bits` wide big-endian unsigned integer.
    ///
    /// Fails unless `value < 2^bits`.
    pub fn store_uint(&mut self, value: u128, bits: usize) -> CellResult<&mut Self> {
        if bits > 128 {
            return Err(EncodingError::WidthTooLarge(bits).into());
        }
        if bits < 128 && value >> bits != 0 {
            return Err(EncodingError::UintOutOfRange { value, bits }.into());
        }
        self.ensure_bits(bits)?;
        for i in (0..bits).rev() {
            self.push_bit((value >> i) & 1 == 1);
        }
        Ok(self)
    }

    /// Write `value` as a `bits` wide big-endian two's complement integer.
    pub fn store_int(&mut self, value: i128, bits: usize) -> CellResult<&mut Self> {
        if bits > 128 {
            return Err(EncodingError::WidthTooLarge(bits).into());
        }
        let fits = match bits {
            0 => value == 0,
            128 => true,
            _ => {
                let bound = 1i128 << (bits - 1);
                (-bound..bound).contains(&value)
            }
        };
        if !fits {
            return Err(EncodingError::IntOutOfRange { value, bits }.into());
        }
        let mask = if bits == 128 {
            u128::MAX
        } else {
            (1u128 << bits) - 1
        };
        self.store_uint(value as u128 & mask, bits)
    }

    /// Write whole bytes.
    pub fn store_bytes(&mut self, bytes: &[u8]) -> CellResult<&mut Self> {
        self.ensure_bits(bytes.len() * 8)?;
        for byte in bytes {
            for i in (0..8).rev() {
                self.push_bit((byte >> i) & 1 == 1);
            }
        }
        Ok(self)
    }

    /// Write a coin amount as a `VarUInteger 16`.
    pub fn store_coins(&mut self, amount: Coins) -> CellResult<&mut Self> {
        let value = amount.as_nano();
        if value > Coins::MAX.as_nano() {
            return Err(EncodingError::CoinsOutOfRange(value).into());
        }
        let len = (128 - value.leading_zeros() as usize).div_ceil(8);
        self.ensure_bits(COINS_LEN_BITS + len * 8)?;
        self.store_uint(len as u128, COINS_LEN_BITS)?;
        self.store_uint(value, len * 8)
    }

    /// Write a standard internal address.
    pub fn store_address(&mut self, address: &Address) -> CellResult<&mut Self> {
        self.ensure_bits(2 + 1 + 8 + 256)?;
        self.store_uint(ADDR_STD_TAG, 2)?;
        self.store_bit(false)?;
        self.store_int(address.workchain.into(), 8)?;
        self.store_bytes(&address.hash)
    }

    /// Write an address, or `addr_none` when absent.
    pub fn store_maybe_address(&mut self, address: Option<&Address>) -> CellResult<&mut Self> {
        match address {
            Some(address) => self.store_address(address),
            None => self.store_uint(ADDR_NONE_TAG, 2),
        }
    }

    /// Add a reference to a child cell.
    pub fn store_ref(&mut self, cell: impl Into<Arc<Cell>>) -> CellResult<&mut Self> {
        if self.available_refs() == 0 {
            return Err(CapacityExceeded::Refs.into());
        }
        self.refs.push(cell.into());
        Ok(self)
    }

    /// Append the bits and references of `cell` inline.
    pub fn store_cell_contents(&mut self, cell: &Cell) -> CellResult<&mut Self> {
        self.ensure_bits(cell.bit_len())?;
        if cell.refs().len() > self.available_refs() {
            return Err(CapacityExceeded::Refs.into());
        }
        for i in 0..cell.bit_len() {
            self.push_bit(cell.bit(i).unwrap_or(false));
        }
        self.refs.extend(cell.refs().iter().cloned());
        Ok(self)
    }

    /// Write anything implementing [`Store`][super::Store].
    pub fn store<T: super::Store + ?Sized>(&mut self, value: &T) -> CellResult<&mut Self> {
        value.store(self)?;
        Ok(self)
    }

    /// Finish the cell. Fails if the resulting tree would be too deep.
    pub fn build(self) -> CellResult<Cell> {
        Cell::new(self.data, self.bit_len, self.refs)
    }
}
