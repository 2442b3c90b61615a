//! The idempotent deployment workflow.
//!
//! ```text
//! Unchecked -> AlreadyDeployed
//!           -> Deploying -> Deployed
//! ```
//!
//! The account balance is checked first. A positive balance is taken as
//! proof of an earlier deployment and nothing is sent. Otherwise exactly one
//! deploy message is submitted. There are no retries: a failed balance query
//! or submission aborts the run and is returned to the caller.
//!
//! A funded but uninitialized account also has a positive balance and is
//! reported as [`DeployState::AlreadyDeployed`].
//!
//! [`run`] performs the whole deployment from raw configuration. Everything
//! that can fail locally is checked before the first network round-trip.

use crate::{
    artifact::{self, ArtifactError},
    config::{Config, ConfigError},
    endpoint::{self, NetworkError},
    ledger::{Connect, EndpointSource, LedgerClient, Sender, SubmissionHandle, Wallet},
};
use offering_contract::{request::Deploy, ContractDescriptor};
use offering_types::{
    cell::{CellError, Store},
    message::InternalMessage,
    Address, Coins,
};
use std::path::Path;
use thiserror::Error;

/// Progress of a deployment run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeployState {
    /// The account has not been queried yet.
    Unchecked,
    /// The account already holds a balance. Terminal.
    AlreadyDeployed,
    /// The deploy message is being submitted.
    Deploying,
    /// The ledger acknowledged the deploy message. Terminal.
    Deployed,
}

/// The result of a successful run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeployOutcome {
    /// Nothing was sent.
    AlreadyDeployed {
        /// The contract address.
        address: Address,
        /// The balance found there.
        balance: Coins,
    },
    /// The deploy message was submitted.
    Deployed {
        /// The contract address.
        address: Address,
        /// The ledger's acknowledgment.
        handle: SubmissionHandle,
    },
}

/// [`deploy`] error.
#[derive(Debug, Error)]
pub enum DeployError<L, S> {
    /// The balance query failed. Nothing was sent.
    #[error("failed to query the contract balance: {0}")]
    Balance(L),
    /// The deploy message cannot be encoded. Nothing was sent.
    #[error("failed to encode the deploy message: {0}")]
    Encoding(#[from] CellError),
    /// Submitting the deploy message failed.
    #[error("failed to send the deploy message: {0}")]
    Send(S),
}

/// [`run`] error.
#[derive(Debug, Error)]
pub enum RunError<C, W, L, S> {
    /// The configuration is incomplete or invalid.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// The compiled contract cannot be loaded.
    #[error("{0}")]
    Artifact(#[from] ArtifactError),
    /// The wallet cannot be opened from the mnemonic.
    #[error("failed to open the wallet: {0}")]
    Wallet(W),
    /// The contract's initial state cannot be encoded.
    #[error("failed to encode the contract: {0}")]
    Encoding(#[from] CellError),
    /// No endpoint is available.
    #[error("{0}")]
    Network(#[from] NetworkError),
    /// The resolved endpoint cannot be connected to.
    #[error("failed to connect: {0}")]
    Connect(C),
    /// The deployment itself failed.
    #[error("deployment failed: {0}")]
    Deploy(#[from] DeployError<L, S>),
}

/// The [`RunError`] of a [`run`] with the given collaborators.
pub type RunErrorOf<C, W> = RunError<
    <C as Connect>::Error,
    <W as Wallet>::Error,
    <<C as Connect>::Client as LedgerClient>::Error,
    <<W as Wallet>::Sender as Sender>::Error,
>;

impl DeployOutcome {
    /// The terminal state the run ended in.
    pub fn state(&self) -> DeployState {
        match self {
            DeployOutcome::AlreadyDeployed { .. } => DeployState::AlreadyDeployed,
            DeployOutcome::Deployed { .. } => DeployState::Deployed,
        }
    }

    /// The contract address.
    pub fn address(&self) -> Address {
        match *self {
            DeployOutcome::AlreadyDeployed { address, .. } => address,
            DeployOutcome::Deployed { address, .. } => address,
        }
    }
}

/// The message that deploys `descriptor`: its state init with the empty
/// body, bounceable, fees paid separately.
pub fn deploy_message(descriptor: &ContractDescriptor, request: &Deploy) -> InternalMessage {
    InternalMessage::new(descriptor.address(), request.value, request.body())
        .with_init(descriptor.state_init())
}

/// Deploy `descriptor` unless its address already holds a balance.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, fields(address = %descriptor.address())))]
pub async fn deploy<L, S>(
    descriptor: &ContractDescriptor,
    client: &L,
    sender: &S,
    request: Deploy,
) -> Result<DeployOutcome, DeployError<L::Error, S::Error>>
where
    L: LedgerClient,
    S: Sender,
{
    let address = descriptor.address();
    #[cfg(feature = "tracing")]
    tracing::info!(state = ?DeployState::Unchecked, %address, raw = ?address, "checking contract balance");

    let balance = client
        .get_balance(address)
        .await
        .map_err(DeployError::Balance)?;
    #[cfg(feature = "tracing")]
    tracing::info!(%balance, "contract balance");

    if !balance.is_zero() {
        #[cfg(feature = "tracing")]
        tracing::info!(state = ?DeployState::AlreadyDeployed, "contract is already deployed");
        return Ok(DeployOutcome::AlreadyDeployed { address, balance });
    }

    let message = deploy_message(descriptor, &request);
    // Fail on an unencodable message before anything reaches the sender.
    message.to_cell()?;
    #[cfg(feature = "tracing")]
    tracing::debug!(state = ?DeployState::Deploying, value = %message.value, send_mode = ?message.send_mode, "sending deploy message");

    let handle = sender.send(message).await.map_err(DeployError::Send)?;
    #[cfg(feature = "tracing")]
    tracing::info!(state = ?DeployState::Deployed, message_hash = %hex::encode(handle.message_hash), "contract deployed");

    Ok(DeployOutcome::Deployed { address, handle })
}

/// Deploy the contract described by `vars` and the code at `code_path`.
///
/// In order:
///
/// 1. Validate the configuration.
/// 2. Load the compiled code.
/// 3. Open the wallet sender.
/// 4. Derive the contract descriptor.
/// 5. Resolve an endpoint and connect to it.
/// 6. [`deploy`].
///
/// Steps 1 to 4 are local, so a configuration or artifact problem aborts
/// the run before any endpoint is queried.
pub async fn run<I, K, V, E, C, W>(
    vars: I,
    code_path: &Path,
    endpoints: &E,
    connect: &C,
    wallet: &W,
    request: Deploy,
) -> Result<DeployOutcome, RunErrorOf<C, W>>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
    E: EndpointSource,
    C: Connect,
    W: Wallet,
{
    let config = Config::from_vars(vars)?;
    let code = artifact::load_code(code_path)?;
    let sender = wallet.open(&config.mnemonic).map_err(RunError::Wallet)?;
    let descriptor = config.descriptor(code)?;
    #[cfg(feature = "tracing")]
    tracing::info!(address = %descriptor.address(), "contract address");

    let endpoint = endpoint::resolve(endpoints, config.api_key.as_ref()).await?;
    let client = connect.connect(&endpoint).map_err(RunError::Connect)?;
    Ok(deploy(&descriptor, &client, &sender, request).await?)
}
