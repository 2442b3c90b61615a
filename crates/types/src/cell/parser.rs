//! Sequential reader over a [`Cell`], the inverse of the [`CellBuilder`][super::CellBuilder].

use super::{Cell, CellError, CellResult, EncodingError};
use crate::{Address, Coins, Hash};
use std::sync::Arc;

/// Reads a cell's bits and references front to back.
#[derive(Clone, Debug)]
pub struct CellParser<'a> {
    cell: &'a Cell,
    bit_pos: usize,
    ref_pos: usize,
}

impl<'a> CellParser<'a> {
    /// Start reading `cell` from its first bit and first reference.
    pub fn new(cell: &'a Cell) -> Self {
        Self {
            cell,
            bit_pos: 0,
            ref_pos: 0,
        }
    }

    /// Bits not yet read.
    pub fn remaining_bits(&self) -> usize {
        self.cell.bit_len() - self.bit_pos
    }

    /// References not yet read.
    pub fn remaining_refs(&self) -> usize {
        self.cell.refs().len() - self.ref_pos
    }

    fn ensure_bits(&self, requested: usize) -> CellResult<()> {
        let remaining = self.remaining_bits();
        if requested > remaining {
            return Err(CellError::BitUnderflow {
                requested,
                remaining,
            });
        }
        Ok(())
    }

    fn next_bit(&mut self) -> bool {
        let bit = self.cell.bit(self.bit_pos).unwrap_or(false);
        self.bit_pos += 1;
        bit
    }

    /// Read a single bit.
    pub fn load_bit(&mut self) -> CellResult<bool> {
        self.ensure_bits(1)?;
        Ok(self.next_bit())
    }

    /// Read a `bits` wide big-endian unsigned integer.
    pub fn load_uint(&mut self, bits: usize) -> CellResult<u128> {
        if bits > 128 {
            return Err(EncodingError::WidthTooLarge(bits).into());
        }
        self.ensure_bits(bits)?;
        Ok((0..bits).fold(0u128, |acc, _| (acc << 1) | u128::from(self.next_bit())))
    }

    /// Read a `bits` wide big-endian two's complement integer.
    pub fn load_int(&mut self, bits: usize) -> CellResult<i128> {
        let value = self.load_uint(bits)?;
        if bits == 0 || bits == 128 {
            return Ok(value as i128);
        }
        let sign = 1u128 << (bits - 1);
        Ok(if value & sign != 0 {
            (value as i128) - (1i128 << bits)
        } else {
            value as i128
        })
    }

    /// Read `len` whole bytes.
    pub fn load_bytes(&mut self, len: usize) -> CellResult<Vec<u8>> {
        self.ensure_bits(len * 8)?;
        Ok((0..len)
            .map(|_| (0..8).fold(0u8, |acc, _| (acc << 1) | u8::from(self.next_bit())))
            .collect())
    }

    /// Read a coin amount encoded as a `VarUInteger 16`.
    pub fn load_coins(&mut self) -> CellResult<Coins> {
        let len = self.load_uint(4)? as usize;
        self.load_uint(len * 8).map(Coins)
    }

    /// Read a standard internal address.
    pub fn load_address(&mut self) -> CellResult<Address> {
        self.load_maybe_address()?
            .ok_or(CellError::InvalidAddressTag(0b00))
    }

    /// Read a standard internal address or `addr_none`.
    pub fn load_maybe_address(&mut self) -> CellResult<Option<Address>> {
        let tag = self.load_uint(2)? as u8;
        match tag {
            0b00 => Ok(None),
            0b10 => {
                if self.load_bit()? {
                    // Anycast addresses are not used by standard accounts.
                    return Err(CellError::InvalidAddressTag(tag));
                }
                let workchain = self.load_int(8)? as i8;
                let mut hash: Hash = [0; 32];
                hash.copy_from_slice(&self.load_bytes(32)?);
                Ok(Some(Address::new(workchain, hash)))
            }
            _ => Err(CellError::InvalidAddressTag(tag)),
        }
    }

    /// Read the next reference.
    pub fn load_ref(&mut self) -> CellResult<Arc<Cell>> {
        let cell = self
            .cell
            .refs()
            .get(self.ref_pos)
            .ok_or(CellError::RefUnderflow)?;
        self.ref_pos += 1;
        Ok(cell.clone())
    }

    /// Ensure everything has been read.
    pub fn ensure_empty(&self) -> CellResult<()> {
        let bits = self.remaining_bits();
        let refs = self.remaining_refs();
        if bits != 0 || refs != 0 {
            return Err(CellError::TrailingData { bits, refs });
        }
        Ok(())
    }
}
