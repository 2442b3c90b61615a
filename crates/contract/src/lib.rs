//! The direct token offering contract as seen from off-chain.
//!
//! - [`descriptor`] lays out the contract's initial storage and derives its
//!   address.
//! - [`codec`] encodes the bodies of the messages the contract accepts, and
//!   decodes them back.
//! - [`request`] carries per-operation parameters with their defaults.
//! - [`reader`] decodes the results of read-only getter calls.

#![deny(missing_docs)]
#![deny(unsafe_code)]

#[doc(inline)]
pub use offering_hash as hash;
#[doc(inline)]
pub use offering_types as types;

pub mod codec;
pub mod descriptor;
pub mod op;
pub mod reader;
pub mod request;

#[doc(inline)]
pub use descriptor::{ContractDescriptor, StorageLayout};
#[doc(inline)]
pub use op::{Asset, OpCode, Operation};
