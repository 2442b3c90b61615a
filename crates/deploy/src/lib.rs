//! Deploying and operating the direct token offering contract.
//!
//! The ledger itself is reached through collaborator traits in [`ledger`],
//! so the workflow here is independent of any particular RPC client or
//! wallet implementation.
//!
//! ## Deployment
//!
//! [`deploy::run`] goes through these steps given the raw variables and
//! the host's collaborators:
//!
//! 1. Build a [`Config`][config::Config] once, from the environment, a
//!    `.env` file or an explicit map.
//! 2. Load the compiled code with [`artifact::load_code`].
//! 3. Open a sender through a [`Wallet`][ledger::Wallet].
//! 4. Resolve an endpoint with [`endpoint::resolve`] and
//!    [`Connect`][ledger::Connect] to it.
//! 5. Run [`deploy::deploy`], which sends the deploy message only if the
//!    contract address holds no balance yet.
//!
//! Subsequent operations go through [`ops`].

#![deny(missing_docs)]
#![deny(unsafe_code)]

#[doc(inline)]
pub use offering_contract as contract;
#[doc(inline)]
pub use offering_types as types;

pub mod artifact;
pub mod config;
pub mod deploy;
pub mod endpoint;
pub mod ledger;
pub mod ops;
