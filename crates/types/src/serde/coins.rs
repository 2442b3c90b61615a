//! [`Coins`] serialize as a string of nano units in human-readable formats,
//! since many of those cannot carry a full `u128`.

use crate::Coins;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

impl Serialize for Coins {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if s.is_human_readable() {
            self.0.to_string().serialize(s)
        } else {
            self.0.serialize(s)
        }
    }
}

impl<'de> Deserialize<'de> for Coins {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if d.is_human_readable() {
            let string = String::deserialize(d)?;
            string
                .parse::<u128>()
                .map(Coins)
                .map_err(serde::de::Error::custom)
        } else {
            u128::deserialize(d).map(Coins)
        }
    }
}
