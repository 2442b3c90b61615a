//! # Messages
//!
//! Outbound internal messages and the initial state used to deploy a
//! contract.
//!
//! ## State init
//! | Field | Bits | Description |
//! | --- | --- | --- |
//! | split_depth | 1 | Always `0` (absent). |
//! | special | 1 | Always `0` (absent). |
//! | code | 1 + ref | `1`, then the code cell as a reference. |
//! | data | 1 + ref | `1`, then the data cell as a reference. |
//! | library | 1 | Always `0` (empty). |
//!
//! ## Internal message
//! | Field | Bits | Description |
//! | --- | --- | --- |
//! | tag | 1 | `int_msg_info$0`. |
//! | ihr_disabled | 1 | Always `1`. |
//! | bounce | 1 | Return the value to the sender if processing fails. |
//! | bounced | 1 | Always `0`. |
//! | src | 2 | `addr_none`, filled in by the sending wallet. |
//! | dest | 267 | The recipient. |
//! | value | coins + 1 | The attached amount, no extra currencies. |
//! | ihr_fee | coins | Zero. |
//! | fwd_fee | coins | Zero. |
//! | created_lt | 64 | Zero. |
//! | created_at | 32 | Zero. |
//! | init | 1 or 2 | `0` if absent. Otherwise `1`, then `0` for inline or `1` for a reference. |
//! | body | 1 | `0` for inline or `1` for a reference. |
//!
//! The init and body are placed inline when they fit in the remaining space,
//! otherwise they are stored as references.

use crate::{
    cell::{CellError, CellResult, Store},
    Address, Cell, CellBuilder, Coins,
};


// No split depth, not special, code and data present, no libraries.
const STATE_INIT_PREFIX: u128 = 0b00110;

bitflags::bitflags! {
    /// How the sending wallet treats fees and errors for an outbound message.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SendMode: u8 {
        /// Pay forwarding fees separately from the message value.
        const PAY_GAS_SEPARATELY = 1;
        /// Ignore errors during the action phase.
        const IGNORE_ERRORS = 2;
        /// Destroy the sending account if its balance reaches zero.
        const DESTROY_IF_ZERO = 32;
        /// Carry the remaining value of the inbound message.
        const CARRY_REMAINING_VALUE = 64;
        /// Carry the whole balance of the sending account.
        const CARRY_ALL_BALANCE = 128;
    }
}

/// Code and data a contract account is initialized with.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StateInit {
    /// The contract code.
    pub code: Cell,
    /// The contract's initial persistent storage.
    pub data: Cell,
}

/// An outbound internal message, prior to being signed and sent by a wallet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InternalMessage {
    /// The recipient.
    pub to: Address,
    /// Native coins attached to the message.
    pub value: Coins,
    /// Whether the value bounces back on failure.
    pub bounce: bool,
    /// Fee and error handling applied by the sending wallet.
    pub send_mode: SendMode,
    /// Present only when the message deploys the recipient.
    pub init: Option<StateInit>,
    /// The message payload.
    pub body: Cell,
}

impl StateInit {
    /// Read a state init written by its [`Store`] implementation.
    pub fn from_cell(cell: &Cell) -> CellResult<Self> {
        let mut p = cell.parser();
        let found = p.load_uint(5)?;
        if found != STATE_INIT_PREFIX {
            return Err(CellError::UnexpectedPrefix {
                expected: STATE_INIT_PREFIX,
                found,
            });
        }
        let code = p.load_ref()?.as_ref().clone();
        let data = p.load_ref()?.as_ref().clone();
        p.ensure_empty()?;
        Ok(Self { code, data })
    }
}

impl Store for StateInit {
    fn store(&self, builder: &mut CellBuilder) -> CellResult<()> {
        builder
            .store_bit(false)?
            .store_bit(false)?
            .store_bit(true)?
            .store_ref(self.code.clone())?
            .store_bit(true)?
            .store_ref(self.data.clone())?
            .store_bit(false)?;
        Ok(())
    }
}

impl InternalMessage {
    /// A message carrying `body` to `to` with bounce enabled and fees paid
    /// separately.
    pub fn new(to: Address, value: Coins, body: Cell) -> Self {
        Self {
            to,
            value,
            bounce: true,
            send_mode: SendMode::PAY_GAS_SEPARATELY,
            init: None,
            body,
        }
    }

    /// Attach a state init, deploying the recipient.
    pub fn with_init(mut self, init: StateInit) -> Self {
        self.init = Some(init);
        self
    }

    /// Set whether the message bounces.
    pub fn with_bounce(mut self, bounce: bool) -> Self {
        self.bounce = bounce;
        self
    }
}

impl Store for InternalMessage {
    fn store(&self, builder: &mut CellBuilder) -> CellResult<()> {
        builder
            .store_bit(false)?
            .store_bit(true)?
            .store_bit(self.bounce)?
            .store_bit(false)?
            .store_maybe_address(None)?
            .store_address(&self.to)?
            .store_coins(self.value)?
            .store_bit(false)?
            .store_coins(Coins::ZERO)?
            .store_coins(Coins::ZERO)?
            .store_uint(0, 64)?
            .store_uint(0, 32)?;

        match &self.init {
            None => {
                builder.store_bit(false)?;
            }
            Some(init) => {
                let init = init.to_cell()?;
                builder.store_bit(true)?;
                let needed = init.bit_len() + self.body.bit_len();
                if builder.available_bits().saturating_sub(2) >= needed {
                    builder.store_bit(false)?.store_cell_contents(&init)?;
                } else {
                    builder.store_bit(true)?.store_ref(init)?;
                }
            }
        }

        let body_fits = builder.available_bits().saturating_sub(1) >= self.body.bit_len()
            && builder.available_refs() >= self.body.refs().len();
        if body_fits {
            builder.store_bit(false)?.store_cell_contents(&self.body)?;
        } else {
            builder.store_bit(true)?.store_ref(self.body.clone())?;
        }
        Ok(())
    }
}
