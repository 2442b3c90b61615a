//! # Message bodies
//!
//! Each operation body starts with the same header, followed by its payload.
//!
//! | Field | Bits | Description |
//! | --- | --- | --- |
//! | op | 32 | The [`OpCode`]. |
//! | query_id | 64 | Correlation id, `0` unless the caller supplies one. |
//! | payload | - | Depends on the operation, see below. |
//!
//! | Operation | Payload |
//! | --- | --- |
//! | withdraw | `amount:coins` |
//! | change rate | `new_rate:uint32` |
//!
//! The deploy body is the empty cell. It carries no header at all, which is
//! what distinguishes the message constructing the account from a call the
//! account executes.
//!
//! The codec enforces the layout only. Uniqueness of query ids is up to the
//! caller.

use crate::op::{Asset, OpCode, Operation, CHANGE_RATE};
use offering_types::{
    cell::{CellError, CellResult},
    Cell, CellBuilder, CellParser, Coins,
};
use thiserror::Error;


/// The query id used when the caller does not supply one.
pub const DEFAULT_QUERY_ID: u64 = 0;

const OP_BITS: usize = 32;
const QUERY_ID_BITS: usize = 64;
const RATE_BITS: usize = 32;

/// A decoded message body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationBody {
    /// The empty deploy body.
    Deploy,
    /// Withdraw `amount` of `asset`.
    Withdraw {
        /// The asset to withdraw.
        asset: Asset,
        /// Correlation id.
        query_id: u64,
        /// Amount in the asset's smallest unit.
        amount: Coins,
    },
    /// Change the rate.
    ChangeRate {
        /// Correlation id.
        query_id: u64,
        /// The new rate.
        new_rate: u32,
    },
}

/// [`OperationBody::decode`] error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The body is shorter than its layout or has trailing data.
    #[error("malformed body: {0}")]
    Cell(#[from] CellError),
    /// The op-code does not name a known operation.
    #[error("unknown op-code {0:#x}")]
    UnknownOp(OpCode),
}

/// The deploy body: always the empty cell.
pub fn encode_deploy() -> Cell {
    Cell::empty()
}

/// A withdraw body. `query_id` defaults to [`DEFAULT_QUERY_ID`].
pub fn encode_withdraw(op: OpCode, amount: Coins, query_id: Option<u64>) -> CellResult<Cell> {
    let mut b = header(op, query_id)?;
    b.store_coins(amount)?;
    b.build()
}

/// A change-rate body. `query_id` defaults to [`DEFAULT_QUERY_ID`].
pub fn encode_change_rate(op: OpCode, new_rate: u32, query_id: Option<u64>) -> CellResult<Cell> {
    let mut b = header(op, query_id)?;
    b.store_uint(new_rate.into(), RATE_BITS)?;
    b.build()
}

fn header(op: OpCode, query_id: Option<u64>) -> CellResult<CellBuilder> {
    let mut b = CellBuilder::new();
    b.store_uint(op.into(), OP_BITS)?.store_uint(
        query_id.unwrap_or(DEFAULT_QUERY_ID).into(),
        QUERY_ID_BITS,
    )?;
    Ok(b)
}

impl OperationBody {
    /// The body's op-code, `None` for the deploy body.
    pub fn op_code(&self) -> Option<OpCode> {
        self.operation().map(Operation::op_code)
    }

    /// The operation the body dispatches to, `None` for the deploy body.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            OperationBody::Deploy => None,
            OperationBody::Withdraw { asset, .. } => Some(Operation::Withdraw(*asset)),
            OperationBody::ChangeRate { .. } => Some(Operation::ChangeRate),
        }
    }

    /// Encode the body.
    pub fn encode(&self) -> CellResult<Cell> {
        match *self {
            OperationBody::Deploy => Ok(encode_deploy()),
            OperationBody::Withdraw {
                asset,
                query_id,
                amount,
            } => encode_withdraw(asset.withdraw_op(), amount, Some(query_id)),
            OperationBody::ChangeRate { query_id, new_rate } => {
                encode_change_rate(CHANGE_RATE, new_rate, Some(query_id))
            }
        }
    }

    /// Decode a body produced by any of the encoders.
    ///
    /// Rejects unknown op-codes and bodies with trailing data.
    pub fn decode(body: &Cell) -> Result<Self, DecodeError> {
        if body.is_empty() {
            return Ok(OperationBody::Deploy);
        }
        let mut p = body.parser();
        let op = p.load_uint(OP_BITS)? as OpCode;
        let query_id = p.load_uint(QUERY_ID_BITS)? as u64;
        let decoded = match Operation::from_op_code(op).ok_or(DecodeError::UnknownOp(op))? {
            Operation::Withdraw(asset) => OperationBody::Withdraw {
                asset,
                query_id,
                amount: p.load_coins()?,
            },
            Operation::ChangeRate => OperationBody::ChangeRate {
                query_id,
                new_rate: load_u32(&mut p)?,
            },
        };
        p.ensure_empty()?;
        Ok(decoded)
    }
}

fn load_u32(p: &mut CellParser) -> CellResult<u32> {
    Ok(p.load_uint(RATE_BITS)? as u32)
}
