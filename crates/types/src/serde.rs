//! Custom serde implementations that keep human-readable formats readable.

mod address;
mod coins;
