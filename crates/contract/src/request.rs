//! Per-operation parameters with their defaults applied at construction.
//!
//! Each request knows how to build its message body and how much native
//! coin to attach to the message carrying it.

use crate::{
    codec::{self, OperationBody, DEFAULT_QUERY_ID},
    op::Asset,
};
use offering_types::{cell::CellResult, Cell, Coins};

/// Attached to a withdraw message: 0.2 coins.
pub const DEFAULT_WITHDRAW_VALUE: Coins = Coins(200_000_000);

/// Attached to a change-rate message: 0.1 coins.
pub const DEFAULT_CHANGE_RATE_VALUE: Coins = Coins(100_000_000);

/// Attached to the deploy message: 0.5 coins.
pub const DEFAULT_DEPLOY_VALUE: Coins = Coins(500_000_000);

/// Withdraw an amount of one of the contract's assets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Withdraw {
    /// Which asset to withdraw.
    pub asset: Asset,
    /// Amount in the asset's smallest unit.
    pub amount: Coins,
    /// Correlation id. Defaults to `0`.
    pub query_id: u64,
    /// Native coins attached. Defaults to [`DEFAULT_WITHDRAW_VALUE`].
    pub value: Coins,
}

/// Set a new offering rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChangeRate {
    /// The new rate.
    pub new_rate: u32,
    /// Correlation id. Defaults to `0`.
    pub query_id: u64,
    /// Native coins attached. Defaults to [`DEFAULT_CHANGE_RATE_VALUE`].
    pub value: Coins,
}

/// Deploy the contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deploy {
    /// Native coins attached. Defaults to [`DEFAULT_DEPLOY_VALUE`].
    pub value: Coins,
}

impl Withdraw {
    /// Withdraw `amount` of `asset` with the default query id and value.
    pub fn new(asset: Asset, amount: Coins) -> Self {
        Self {
            asset,
            amount,
            query_id: DEFAULT_QUERY_ID,
            value: DEFAULT_WITHDRAW_VALUE,
        }
    }

    /// Use `query_id` instead of the default.
    pub fn with_query_id(mut self, query_id: u64) -> Self {
        self.query_id = query_id;
        self
    }

    /// Attach `value` instead of the default.
    pub fn with_value(mut self, value: Coins) -> Self {
        self.value = value;
        self
    }

    /// The message body.
    pub fn body(&self) -> CellResult<Cell> {
        codec::encode_withdraw(self.asset.withdraw_op(), self.amount, Some(self.query_id))
    }
}

impl ChangeRate {
    /// Change the rate to `new_rate` with the default query id and value.
    pub fn new(new_rate: u32) -> Self {
        Self {
            new_rate,
            query_id: DEFAULT_QUERY_ID,
            value: DEFAULT_CHANGE_RATE_VALUE,
        }
    }

    /// Use `query_id` instead of the default.
    pub fn with_query_id(mut self, query_id: u64) -> Self {
        self.query_id = query_id;
        self
    }

    /// Attach `value` instead of the default.
    pub fn with_value(mut self, value: Coins) -> Self {
        self.value = value;
        self
    }

    /// The message body.
    pub fn body(&self) -> CellResult<Cell> {
        OperationBody::ChangeRate {
            query_id: self.query_id,
            new_rate: self.new_rate,
        }
        .encode()
    }
}

impl Deploy {
    /// The message body: always empty.
    pub fn body(&self) -> Cell {
        codec::encode_deploy()
    }
}

impl Default for Deploy {
    fn default() -> Self {
        Self {
            value: DEFAULT_DEPLOY_VALUE,
        }
    }
}

impl From<Withdraw> for OperationBody {
    fn from(w: Withdraw) -> Self {
        OperationBody::Withdraw {
            asset: w.asset,
            query_id: w.query_id,
            amount: w.amount,
        }
    }
}

impl From<ChangeRate> for OperationBody {
    fn from(c: ChangeRate) -> Self {
        OperationBody::ChangeRate {
            query_id: c.query_id,
            new_rate: c.new_rate,
        }
    }
}
