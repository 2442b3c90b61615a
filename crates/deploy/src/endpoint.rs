//! Endpoint resolution with a single fallback.
//!
//! The decentralized [`EndpointSource`] is tried first. If it fails and an
//! API key is configured, the keyed [`FALLBACK_ENDPOINT`] is used instead.
//! Without a key the failure is fatal.

use crate::{config::ApiKey, ledger::EndpointSource};
use thiserror::Error;

/// The keyed JSON-RPC endpoint used when discovery fails.
pub const FALLBACK_ENDPOINT: &str = "https://toncenter.com/api/v2/jsonRPC";

/// A resolved endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    /// The endpoint URL.
    pub url: String,
    /// Passed to the client whenever configured, for either kind.
    pub api_key: Option<ApiKey>,
    /// How the endpoint was found.
    pub kind: EndpointKind,
}

/// How an [`Endpoint`] was found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndpointKind {
    /// Through the decentralized source.
    Discovered,
    /// The keyed fallback.
    Fallback,
}

/// Failure to reach the ledger.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NetworkError {
    /// Discovery failed and there is no API key for the fallback.
    #[error("failed to discover an endpoint ({reason}) and no API key is configured")]
    NoEndpoint {
        /// The discovery failure.
        reason: String,
    },
}

/// Resolve the endpoint to connect to.
pub async fn resolve<S: EndpointSource>(
    source: &S,
    api_key: Option<&ApiKey>,
) -> Result<Endpoint, NetworkError> {
    match source.endpoint().await {
        Ok(url) => {
            #[cfg(feature = "tracing")]
            tracing::info!(%url, "using discovered endpoint");
            Ok(Endpoint {
                url,
                api_key: api_key.cloned(),
                kind: EndpointKind::Discovered,
            })
        }
        Err(err) => {
            let Some(api_key) = api_key else {
                return Err(NetworkError::NoEndpoint {
                    reason: err.to_string(),
                });
            };
            #[cfg(feature = "tracing")]
            tracing::info!(%err, url = FALLBACK_ENDPOINT, "discovery failed, using keyed endpoint");
            Ok(Endpoint {
                url: FALLBACK_ENDPOINT.to_string(),
                api_key: Some(api_key.clone()),
                kind: EndpointKind::Fallback,
            })
        }
    }
}
