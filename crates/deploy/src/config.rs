//! Configuration, validated once at startup and passed down explicitly.
//!
//! | Variable | Required | Description |
//! | --- | --- | --- |
//! | `OWNER_ADDRESS` | yes | Contract owner. |
//! | `USDT_ADDRESS` | yes | The counterparty asset. |
//! | `PROJECT_TOKEN_ADDRESS` | yes | The priced asset. |
//! | `PROJECT_TOKEN_TO_USDT_RATE` | no | Offering rate, defaults to `2`. |
//! | `MNEMONIC` | yes | Wallet mnemonic phrase. |
//! | `TON_API_KEY` | no | Enables the fallback endpoint. |
//!
//! Addresses may be given in raw or user-friendly form. Empty values are
//! treated as missing.
//!
//! Variables may also come from an [`ENV_FILE`] in the working directory.
//! A variable set in the process environment overrides the file.

use core::fmt;
use offering_contract::{ContractDescriptor, StorageLayout};
use offering_types::{cell::CellResult, Address, AddressParseError, Cell};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};
use thiserror::Error;


/// Names of the recognized variables.
pub mod var {
    /// The contract owner.
    pub const OWNER_ADDRESS: &str = "OWNER_ADDRESS";
    /// The counterparty asset.
    pub const USDT_ADDRESS: &str = "USDT_ADDRESS";
    /// The priced asset.
    pub const PROJECT_TOKEN_ADDRESS: &str = "PROJECT_TOKEN_ADDRESS";
    /// The offering rate.
    pub const PROJECT_TOKEN_TO_USDT_RATE: &str = "PROJECT_TOKEN_TO_USDT_RATE";
    /// The wallet mnemonic.
    pub const MNEMONIC: &str = "MNEMONIC";
    /// The fallback endpoint API key.
    pub const TON_API_KEY: &str = "TON_API_KEY";
}

/// The dotenv file read by [`Config::from_env_file`] by default.
pub const ENV_FILE: &str = ".env";

/// The rate used when none is configured.
pub const DEFAULT_RATE: u32 = 2;

/// The sequence number a new contract starts at.
pub const INITIAL_SEQNO: u32 = 0;

/// Validated configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// The contract owner.
    pub owner: Address,
    /// The asset buyers pay with.
    pub counterparty_asset: Address,
    /// The asset on offer.
    pub priced_asset: Address,
    /// The offering rate.
    pub rate: u32,
    /// The deploying wallet's mnemonic.
    pub mnemonic: Mnemonic,
    /// Key for the fallback endpoint.
    pub api_key: Option<ApiKey>,
}

/// A wallet mnemonic phrase. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Mnemonic(String);

/// An endpoint API key. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

/// [`Config`] construction error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("{0} is not defined in the environment or the .env file")]
    Missing(&'static str),
    /// A variable does not hold a valid address.
    #[error("{var} is not a valid address: {source}")]
    InvalidAddress {
        /// The variable.
        var: &'static str,
        /// The parse failure.
        source: AddressParseError,
    },
    /// The rate is not a 32-bit unsigned integer.
    #[error("{var} is not a valid rate: {value:?}")]
    InvalidRate {
        /// The variable.
        var: &'static str,
        /// The rejected value.
        value: String,
    },
    /// The dotenv file exists but cannot be read or parsed.
    #[error("failed to load {}: {reason}", path.display())]
    EnvFile {
        /// The file.
        path: PathBuf,
        /// The read or parse failure.
        reason: String,
    },
}

impl Config {
    /// Build from explicit `(name, value)` pairs.
    ///
    /// Unrecognized names are ignored.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(_, v)| !v.trim().is_empty())
            .collect();
        let get = |var: &'static str| vars.get(var).map(|v| v.trim());
        let required = |var: &'static str| get(var).ok_or(ConfigError::Missing(var));
        let address = |var: &'static str| {
            required(var)?
                .parse::<Address>()
                .map_err(|source| ConfigError::InvalidAddress { var, source })
        };

        let owner = address(var::OWNER_ADDRESS)?;
        let counterparty_asset = address(var::USDT_ADDRESS)?;
        let priced_asset = address(var::PROJECT_TOKEN_ADDRESS)?;
        let rate = match get(var::PROJECT_TOKEN_TO_USDT_RATE) {
            None => DEFAULT_RATE,
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidRate {
                var: var::PROJECT_TOKEN_TO_USDT_RATE,
                value: value.to_string(),
            })?,
        };
        let mnemonic = Mnemonic::new(required(var::MNEMONIC)?);
        let api_key = get(var::TON_API_KEY).map(ApiKey::new);

        Ok(Self {
            owner,
            counterparty_asset,
            priced_asset,
            rate,
            mnemonic,
            api_key,
        })
    }

    /// Build from the process environment.
    ///
    /// Variables whose name or value is not valid unicode are ignored.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(process_vars())
    }

    /// Build from the dotenv file at `path` and the process environment.
    ///
    /// Process variables take precedence over the file. A missing file is
    /// the same as an empty one.
    pub fn from_env_file(path: &Path) -> Result<Self, ConfigError> {
        Self::from_vars(env_vars(path)?)
    }

    /// The initial storage of a new contract.
    pub fn layout(&self) -> StorageLayout {
        StorageLayout {
            owner: self.owner,
            counterparty_asset: self.counterparty_asset,
            priced_asset: self.priced_asset,
            rate: self.rate,
            seqno: INITIAL_SEQNO,
        }
    }

    /// Describe the contract this configuration deploys with `code`.
    pub fn descriptor(&self, code: Cell) -> CellResult<ContractDescriptor> {
        ContractDescriptor::from_layout(&self.layout(), code)
    }
}

/// The variables of the dotenv file at `path` overlaid by the process
/// environment, as accepted by [`Config::from_vars`].
///
/// Empty process variables do not hide a value from the file.
pub fn env_vars(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    layered(path, process_vars())
}

fn layered<I>(path: &Path, overrides: I) -> Result<HashMap<String, String>, ConfigError>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut vars = env_file_vars(path)?;
    vars.extend(overrides.into_iter().filter(|(_, v)| !v.trim().is_empty()));
    Ok(vars)
}

fn process_vars() -> impl Iterator<Item = (String, String)> {
    std::env::vars_os().filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
}

/// The variables of the dotenv file at `path`. A later line overrides an
/// earlier one.
fn env_file_vars(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    let error = |err: dotenvy::Error| ConfigError::EnvFile {
        path: path.to_path_buf(),
        reason: err.to_string(),
    };
    match dotenvy::from_path_iter(path) {
        Ok(iter) => iter.collect::<Result<_, _>>().map_err(error),
        Err(err) if err.not_found() => Ok(HashMap::new()),
        Err(err) => Err(error(err)),
    }
}

impl Mnemonic {
    /// Normalize whitespace between words.
    pub fn new(phrase: &str) -> Self {
        Self(phrase.split_whitespace().collect::<Vec<_>>().join(" "))
    }

    /// The words of the phrase.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ')
    }

    /// The phrase itself.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl ApiKey {
    /// Wrap a key.
    pub fn new(key: &str) -> Self {
        Self(key.to_string())
    }

    /// The key itself.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Mnemonic(<{} words>)", self.words().count())
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}
