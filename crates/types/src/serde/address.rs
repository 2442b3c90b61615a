//! [`Address`] serializes as its raw `workchain:hex` form in human-readable
//! formats and as a `(workchain, hash)` tuple otherwise.

use crate::Address;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

impl Serialize for Address {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if s.is_human_readable() {
            self.to_raw_string().serialize(s)
        } else {
            (self.workchain, self.hash).serialize(s)
        }
    }
}

impl<'de> Deserialize<'de> for Address {
    /// Human-readable input may be in raw or friendly form.
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if d.is_human_readable() {
            let string = String::deserialize(d)?;
            string.parse().map_err(serde::de::Error::custom)
        } else {
            let (workchain, hash) = Deserialize::deserialize(d)?;
            Ok(Address::new(workchain, hash))
        }
    }
}
