//! Base types shared by the offering crates.
//!
//! Includes the ledger [`Address`], native [`Coins`] amounts, the binary
//! [`Cell`][cell::Cell] container along with its builder and parser, the
//! bag-of-cells wire codec, TVM stack entries and outbound messages.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod boc;
pub mod cell;
pub mod crc;
mod fmt;
pub mod message;
#[cfg(feature = "serde")]
mod serde;
pub mod stack;

#[doc(inline)]
pub use cell::{Cell, CellBuilder, CellParser};
pub use fmt::{AddressParseError, CoinsParseError, FriendlyFlags};

/// A 256-bit hash, e.g. a cell representation hash or an account id.
pub type Hash = [u8; 32];

/// Identifies the ledger partition an account lives in.
pub type Workchain = i8;

/// The basechain, where user contracts are deployed.
pub const BASECHAIN: Workchain = 0;

/// The masterchain.
pub const MASTERCHAIN: Workchain = -1;

/// A standard account address: a workchain and a 256-bit account id.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address {
    /// The workchain the account belongs to.
    pub workchain: Workchain,
    /// The account id within the workchain.
    pub hash: Hash,
}

/// An amount of the native coin in its smallest unit (nano).
///
/// On the wire this is a `VarUInteger 16`, so only values below `2^120` are
/// encodable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coins(pub u128);

impl Address {
    /// Construct an address from its parts.
    pub const fn new(workchain: Workchain, hash: Hash) -> Self {
        Self { workchain, hash }
    }
}

impl Coins {
    /// Nano units per whole coin.
    pub const NANO_PER_COIN: u128 = 1_000_000_000;

    /// The zero amount.
    pub const ZERO: Self = Self(0);

    /// The largest amount representable as a `VarUInteger 16`.
    pub const MAX: Self = Self((1 << 120) - 1);

    /// An amount given in nano units.
    pub const fn from_nano(nano: u128) -> Self {
        Self(nano)
    }

    /// The amount in nano units.
    pub const fn as_nano(self) -> u128 {
        self.0
    }

    /// Whether the amount is zero.
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl From<u128> for Coins {
    fn from(nano: u128) -> Self {
        Self(nano)
    }
}

impl From<u64> for Coins {
    fn from(nano: u64) -> Self {
        Self(nano.into())
    }
}

impl From<Coins> for u128 {
    fn from(coins: Coins) -> Self {
        coins.0
    }
}
