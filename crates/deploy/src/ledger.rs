//! Collaborators through which the ledger is reached.
//!
//! Implementations own transport, retries and wallet cryptography. Every
//! method is a single round-trip with no timeout of its own. Callers that
//! need one wrap the returned future.

use crate::{config::Mnemonic, endpoint::Endpoint};
use core::future::Future;
use offering_hash::repr_hash;
use offering_types::{
    cell::{CellResult, Store},
    message::InternalMessage,
    stack::StackEntry,
    Address, Coins, Hash,
};

/// Read access to ledger state.
pub trait LedgerClient {
    /// An error type describing any failure to reach or query the ledger.
    type Error: core::fmt::Debug + core::fmt::Display;
    /// The future type returned from [`LedgerClient::get_balance`].
    type BalanceFuture: Future<Output = Result<Coins, Self::Error>>;
    /// The future type returned from [`LedgerClient::call`].
    type CallFuture: Future<Output = Result<Vec<StackEntry>, Self::Error>>;

    /// The native coin balance of the account at `address`.
    fn get_balance(&self, address: Address) -> Self::BalanceFuture;

    /// Run the read-only getter `method` of the contract at `address`.
    fn call(&self, address: Address, method: &str, args: Vec<StackEntry>) -> Self::CallFuture;
}

/// Authorizes and submits outbound messages on behalf of a wallet.
pub trait Sender {
    /// An error type describing a failed submission.
    type Error: core::fmt::Debug + core::fmt::Display;
    /// The future type returned from [`Sender::send`].
    type Future: Future<Output = Result<SubmissionHandle, Self::Error>>;

    /// Sign and submit `message`.
    ///
    /// Resolves once the ledger acknowledges the submission, not once the
    /// message is included.
    fn send(&self, message: InternalMessage) -> Self::Future;
}

/// Opens a [`LedgerClient`] on a resolved endpoint.
pub trait Connect {
    /// The client type.
    type Client: LedgerClient;
    /// An error type describing an unusable endpoint.
    type Error: core::fmt::Debug + core::fmt::Display;

    /// Open a client for `endpoint`, passing along its API key if any.
    fn connect(&self, endpoint: &Endpoint) -> Result<Self::Client, Self::Error>;
}

/// Produces a [`Sender`] from a mnemonic.
pub trait Wallet {
    /// The sender type.
    type Sender: Sender;
    /// An error type describing an invalid mnemonic or key derivation failure.
    type Error: core::fmt::Debug + core::fmt::Display;

    /// Derive the signing identity and open a sender for it.
    fn open(&self, mnemonic: &Mnemonic) -> Result<Self::Sender, Self::Error>;
}

/// Discovers a ledger endpoint without any credentials.
pub trait EndpointSource {
    /// An error type describing a failed discovery.
    type Error: core::fmt::Debug + core::fmt::Display;
    /// The future type returned from [`EndpointSource::endpoint`].
    type Future: Future<Output = Result<String, Self::Error>>;

    /// The URL of an available endpoint.
    fn endpoint(&self) -> Self::Future;
}

/// Acknowledgment of a submitted message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubmissionHandle {
    /// Representation hash of the submitted message.
    pub message_hash: Hash,
}

impl SubmissionHandle {
    /// The handle of `message`, identified by the hash of its encoding.
    pub fn for_message(message: &InternalMessage) -> CellResult<Self> {
        let cell = message.to_cell()?;
        Ok(Self {
            message_hash: repr_hash(&cell),
        })
    }
}
