//! `core::fmt` implementations, textual address forms and related items.

use crate::{crc::crc16, Address, Coins, Hash, Workchain};
use base64::{
    engine::general_purpose::{STANDARD, URL_SAFE},
    Engine as _,
};
use core::{fmt, str};
use thiserror::Error;

const TAG_BOUNCEABLE: u8 = 0x11;
const TAG_NON_BOUNCEABLE: u8 = 0x51;
const TAG_TEST_ONLY: u8 = 0x80;
const FRIENDLY_LEN: usize = 48;
const FRIENDLY_BYTES: usize = 36;
const NANO_DIGITS: usize = 9;

/// Flags carried by the user-friendly (base64) address form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FriendlyFlags {
    /// Whether messages to this address should bounce on failure.
    pub bounceable: bool,
    /// Whether the address is only meant for the test network.
    pub test_only: bool,
    /// Whether to use the URL-safe base64 alphabet when formatting.
    pub url_safe: bool,
}

/// Failure to parse an [`Address`] from a string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressParseError {
    /// The raw form must be `<workchain>:<64 hex digits>`.
    #[error("invalid raw address: {0}")]
    InvalidRaw(String),
    /// The user-friendly form must be 48 base64 characters.
    #[error("invalid user-friendly address length {0}, expected 48")]
    InvalidLength(usize),
    /// The user-friendly form is not valid base64.
    #[error("invalid base64 in user-friendly address: {0}")]
    Base64(#[from] base64::DecodeError),
    /// The user-friendly form carries an unknown tag byte.
    #[error("invalid user-friendly address tag {0:#04x}")]
    InvalidTag(u8),
    /// The user-friendly form's checksum does not match its contents.
    #[error("user-friendly address checksum mismatch")]
    Checksum,
}

/// Failure to parse [`Coins`] from a decimal string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoinsParseError {
    /// The string is empty or contains something other than digits and a single `.`.
    #[error("invalid coin amount {0:?}")]
    Invalid(String),
    /// More than nine fractional digits were given.
    #[error("coin amount {0:?} is more precise than one nano")]
    TooPrecise(String),
    /// The amount does not fit in 128 bits of nano units.
    #[error("coin amount {0:?} overflows")]
    Overflow(String),
}

impl Default for FriendlyFlags {
    fn default() -> Self {
        Self {
            bounceable: true,
            test_only: false,
            url_safe: true,
        }
    }
}

impl Address {
    /// Format as `<workchain>:<hex account id>`.
    pub fn to_raw_string(&self) -> String {
        format!("{}:{}", self.workchain, hex::encode(self.hash))
    }

    /// Format as a 48 character user-friendly string.
    pub fn to_friendly(&self, flags: FriendlyFlags) -> String {
        let mut tag = if flags.bounceable {
            TAG_BOUNCEABLE
        } else {
            TAG_NON_BOUNCEABLE
        };
        if flags.test_only {
            tag |= TAG_TEST_ONLY;
        }
        let mut bytes = [0u8; FRIENDLY_BYTES];
        bytes[0] = tag;
        bytes[1] = self.workchain as u8;
        bytes[2..34].copy_from_slice(&self.hash);
        let crc = crc16(&bytes[..34]);
        bytes[34..].copy_from_slice(&crc.to_be_bytes());
        if flags.url_safe {
            URL_SAFE.encode(bytes)
        } else {
            STANDARD.encode(bytes)
        }
    }

    /// Parse the raw `<workchain>:<hex account id>` form.
    pub fn parse_raw(s: &str) -> Result<Self, AddressParseError> {
        let invalid = || AddressParseError::InvalidRaw(s.to_string());
        let (workchain, hash) = s.split_once(':').ok_or_else(invalid)?;
        let workchain: Workchain = workchain.parse().map_err(|_| invalid())?;
        let hash: Hash = hex::decode(hash)
            .ok()
            .and_then(|bytes| bytes.try_into().ok())
            .ok_or_else(invalid)?;
        Ok(Self::new(workchain, hash))
    }

    /// Parse the user-friendly form, in either base64 alphabet.
    pub fn parse_friendly(s: &str) -> Result<(Self, FriendlyFlags), AddressParseError> {
        if s.len() != FRIENDLY_LEN {
            return Err(AddressParseError::InvalidLength(s.len()));
        }
        let url_safe = s.contains(|c: char| c == '-' || c == '_');
        let bytes = if url_safe {
            URL_SAFE.decode(s)?
        } else {
            STANDARD.decode(s)?
        };
        let bytes: [u8; FRIENDLY_BYTES] = bytes
            .try_into()
            .map_err(|_| AddressParseError::InvalidLength(s.len()))?;
        let crc = u16::from_be_bytes([bytes[34], bytes[35]]);
        if crc16(&bytes[..34]) != crc {
            return Err(AddressParseError::Checksum);
        }
        let test_only = bytes[0] & TAG_TEST_ONLY != 0;
        let bounceable = match bytes[0] & !TAG_TEST_ONLY {
            TAG_BOUNCEABLE => true,
            TAG_NON_BOUNCEABLE => false,
            _ => return Err(AddressParseError::InvalidTag(bytes[0])),
        };
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&bytes[2..34]);
        let addr = Self::new(bytes[1] as Workchain, hash);
        let flags = FriendlyFlags {
            bounceable,
            test_only,
            url_safe,
        };
        Ok((addr, flags))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.to_friendly(FriendlyFlags::default()), f)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_raw_string())
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for byte in self.hash {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl str::FromStr for Address {
    type Err = AddressParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.contains(':') {
            Self::parse_raw(s)
        } else {
            Self::parse_friendly(s).map(|(addr, _)| addr)
        }
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let whole = self.0 / Self::NANO_PER_COIN;
        let frac = self.0 % Self::NANO_PER_COIN;
        if frac == 0 {
            return write!(f, "{whole}");
        }
        let frac = format!("{frac:09}");
        write!(f, "{whole}.{}", frac.trim_end_matches('0'))
    }
}

impl str::FromStr for Coins {
    type Err = CoinsParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (whole, frac) = match s.split_once('.') {
            Some((_, "")) => return Err(CoinsParseError::Invalid(s.to_string())),
            Some(parts) => parts,
            None => (s, ""),
        };
        let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !is_digits(whole) || !is_digits(frac) {
            return Err(CoinsParseError::Invalid(s.to_string()));
        }
        if frac.len() > NANO_DIGITS {
            return Err(CoinsParseError::TooPrecise(s.to_string()));
        }
        let overflow = || CoinsParseError::Overflow(s.to_string());
        let whole: u128 = whole.parse().map_err(|_| overflow())?;
        let frac: u128 = if frac.is_empty() {
            0
        } else {
            let scale = 10u128.pow((NANO_DIGITS - frac.len()) as u32);
            frac.parse::<u128>().map_err(|_| overflow())? * scale
        };
        whole
            .checked_mul(Self::NANO_PER_COIN)
            .and_then(|nano| nano.checked_add(frac))
            .map(Self)
            .ok_or_else(overflow)
    }
}
