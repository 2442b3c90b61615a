//! # Contract descriptor
//!
//! The contract's initial storage and the address derived from it.
//!
//! ## Storage layout
//! | Field | Bits | Description |
//! | --- | --- | --- |
//! | owner | 267 | May withdraw and change the rate. |
//! | counterparty_asset | 267 | Jetton master of the asset buyers pay with. |
//! | priced_asset | 267 | Jetton master of the asset on offer. |
//! | rate | 32 | Priced asset units per counterparty unit. |
//! | seqno | 32 | Sequence number. |
//!
//! The field order and widths are part of the on-chain contract. Changing
//! either changes the derived address.

use offering_hash::contract_addr;
use offering_types::{
    cell::{CellResult, Store},
    message::StateInit,
    Address, Cell, CellBuilder, BASECHAIN,
};


/// The contract's persistent storage, in field order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StorageLayout {
    /// The contract owner.
    pub owner: Address,
    /// The asset buyers pay with.
    pub counterparty_asset: Address,
    /// The asset on offer.
    pub priced_asset: Address,
    /// The offering rate.
    pub rate: u32,
    /// The sequence number.
    pub seqno: u32,
}

/// The immutable `{code, data}` pair of a contract and its derived address.
///
/// The descriptor does not track on-chain state. A rate change is a message
/// to the contract, never a change to the descriptor's `data`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractDescriptor {
    code: Cell,
    data: Cell,
    address: Address,
}

impl Store for StorageLayout {
    fn store(&self, builder: &mut CellBuilder) -> CellResult<()> {
        builder
            .store_address(&self.owner)?
            .store_address(&self.counterparty_asset)?
            .store_address(&self.priced_asset)?
            .store_uint(self.rate.into(), 32)?
            .store_uint(self.seqno.into(), 32)?;
        Ok(())
    }
}

impl StorageLayout {
    /// Read a storage cell written by the [`Store`] implementation.
    pub fn decode(data: &Cell) -> CellResult<Self> {
        let mut p = data.parser();
        let layout = Self {
            owner: p.load_address()?,
            counterparty_asset: p.load_address()?,
            priced_asset: p.load_address()?,
            rate: p.load_uint(32)? as u32,
            seqno: p.load_uint(32)? as u32,
        };
        p.ensure_empty()?;
        Ok(layout)
    }
}

impl ContractDescriptor {
    /// Lay out the initial storage and derive the basechain address.
    ///
    /// Identical arguments always produce identical `data` and `address`.
    pub fn create_from_config(
        owner: Address,
        counterparty_asset: Address,
        priced_asset: Address,
        rate: u32,
        seqno: u32,
        code: Cell,
    ) -> CellResult<Self> {
        let layout = StorageLayout {
            owner,
            counterparty_asset,
            priced_asset,
            rate,
            seqno,
        };
        Self::from_layout(&layout, code)
    }

    /// As [`ContractDescriptor::create_from_config`], from a prepared layout.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, err))]
    pub fn from_layout(layout: &StorageLayout, code: Cell) -> CellResult<Self> {
        let data = layout.to_cell()?;
        let address = contract_addr::from_code_and_data(BASECHAIN, &code, &data)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(%address, data_bits = data.bit_len(), "derived contract address");
        Ok(Self {
            code,
            data,
            address,
        })
    }

    /// The contract code.
    pub fn code(&self) -> &Cell {
        &self.code
    }

    /// The initial storage.
    pub fn data(&self) -> &Cell {
        &self.data
    }

    /// The derived address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// The initial state to deploy with.
    pub fn state_init(&self) -> StateInit {
        StateInit {
            code: self.code.clone(),
            data: self.data.clone(),
        }
    }

    /// Decode the initial storage.
    pub fn layout(&self) -> CellResult<StorageLayout> {
        StorageLayout::decode(&self.data)
    }
}
