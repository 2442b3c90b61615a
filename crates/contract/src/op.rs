//! Op-codes the contract dispatches on.
//!
//! Every operation owns a distinct 32-bit code. The contract reads nothing
//! but this header to decide what to do with a message.

/// The 32-bit header identifying an operation.
pub type OpCode = u32;

/// Withdraw the counterparty asset (USDT) held by the contract.
pub const WITHDRAW_COUNTERPARTY: OpCode = 0x1234;

/// Withdraw the priced asset (the project token) held by the contract.
pub const WITHDRAW_PRICED: OpCode = 0x5678;

/// Change the price of the priced asset in counterparty units.
pub const CHANGE_RATE: OpCode = 0x9abc;

const _: () = assert!(
    WITHDRAW_COUNTERPARTY != WITHDRAW_PRICED
        && WITHDRAW_COUNTERPARTY != CHANGE_RATE
        && WITHDRAW_PRICED != CHANGE_RATE
);

/// One of the two assets the contract holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Asset {
    /// The asset buyers pay with.
    Counterparty,
    /// The asset being offered.
    Priced,
}

/// An operation the contract executes on receiving a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Withdraw an amount of an asset to the owner.
    Withdraw(Asset),
    /// Set a new rate.
    ChangeRate,
}

impl Asset {
    /// The op-code that withdraws this asset.
    pub const fn withdraw_op(self) -> OpCode {
        match self {
            Asset::Counterparty => WITHDRAW_COUNTERPARTY,
            Asset::Priced => WITHDRAW_PRICED,
        }
    }
}

impl Operation {
    /// All operations, in op-code order.
    pub const ALL: [Operation; 3] = [
        Operation::Withdraw(Asset::Counterparty),
        Operation::Withdraw(Asset::Priced),
        Operation::ChangeRate,
    ];

    /// The op-code header of this operation.
    pub const fn op_code(self) -> OpCode {
        match self {
            Operation::Withdraw(asset) => asset.withdraw_op(),
            Operation::ChangeRate => CHANGE_RATE,
        }
    }

    /// The operation an op-code dispatches to, if any.
    pub const fn from_op_code(op: OpCode) -> Option<Self> {
        match op {
            WITHDRAW_COUNTERPARTY => Some(Operation::Withdraw(Asset::Counterparty)),
            WITHDRAW_PRICED => Some(Operation::Withdraw(Asset::Priced)),
            CHANGE_RATE => Some(Operation::ChangeRate),
            _ => None,
        }
    }
}
