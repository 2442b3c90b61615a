//! Operations on a deployed contract.
//!
//! Each call builds a fresh message and sends it. Nothing about on-chain
//! state is cached between calls.

use crate::ledger::{LedgerClient, Sender, SubmissionHandle};
use offering_contract::{
    reader::{self, ExpectedKind, ReadError, Value},
    request::{ChangeRate, Withdraw},
};
use offering_types::{
    cell::{CellError, CellResult, Store},
    message::InternalMessage,
    stack::StackEntry,
    Address,
};
use thiserror::Error;

/// [`send_withdraw`] and [`send_change_rate`] error.
#[derive(Debug, Error)]
pub enum SendError<E> {
    /// The message cannot be encoded. Nothing was sent.
    #[error("failed to encode the message: {0}")]
    Encoding(#[from] CellError),
    /// Submitting the message failed.
    #[error("failed to send the message: {0}")]
    Send(E),
}

/// [`get_method`] error.
#[derive(Debug, Error)]
pub enum GetMethodError<E> {
    /// The call itself failed.
    #[error("getter call failed: {0}")]
    Call(E),
    /// The result stack does not have the expected shape.
    #[error("unexpected getter result: {0}")]
    Read(#[from] ReadError),
}

/// The message carrying a withdraw request to `contract`.
pub fn withdraw_message(contract: Address, request: &Withdraw) -> CellResult<InternalMessage> {
    Ok(InternalMessage::new(contract, request.value, request.body()?))
}

/// The message carrying a change-rate request to `contract`.
pub fn change_rate_message(contract: Address, request: &ChangeRate) -> CellResult<InternalMessage> {
    Ok(InternalMessage::new(contract, request.value, request.body()?))
}

/// Withdraw an asset from `contract`.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, fields(%contract, ?request)))]
pub async fn send_withdraw<S: Sender>(
    sender: &S,
    contract: Address,
    request: Withdraw,
) -> Result<SubmissionHandle, SendError<S::Error>> {
    let message = withdraw_message(contract, &request)?;
    submit(sender, message).await
}

/// Change the rate of `contract`.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, fields(%contract, ?request)))]
pub async fn send_change_rate<S: Sender>(
    sender: &S,
    contract: Address,
    request: ChangeRate,
) -> Result<SubmissionHandle, SendError<S::Error>> {
    let message = change_rate_message(contract, &request)?;
    submit(sender, message).await
}

async fn submit<S: Sender>(
    sender: &S,
    message: InternalMessage,
) -> Result<SubmissionHandle, SendError<S::Error>> {
    message.to_cell()?;
    #[cfg(feature = "tracing")]
    tracing::debug!(value = %message.value, body_bits = message.body.bit_len(), "sending message");
    sender.send(message).await.map_err(SendError::Send)
}

/// Call the getter `method` of `contract` and decode its result as `kinds`.
pub async fn get_method<L: LedgerClient>(
    client: &L,
    contract: Address,
    method: &str,
    args: Vec<StackEntry>,
    kinds: &[ExpectedKind],
) -> Result<Vec<Value>, GetMethodError<L::Error>> {
    let stack = client
        .call(contract, method, args)
        .await
        .map_err(GetMethodError::Call)?;
    Ok(reader::read(&stack, kinds)?)
}
