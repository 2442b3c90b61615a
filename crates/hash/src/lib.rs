//! A minimal crate containing the cell [`repr_hash`] function and contract
//! address derivation built on top of it.
//!
//! The representation hash of a cell commits to its data and, through the
//! hashes and depths of its children, to the whole tree below it.

#![deny(missing_docs)]
#![deny(unsafe_code)]

use offering_types::{Cell, Hash};
use sha2::Digest;
use std::collections::HashMap;

pub mod contract_addr;

/// Standardized trait for types identified by a representation hash.
pub trait ReprHash {
    /// Produce the representation hash of self.
    fn repr_hash(&self) -> Hash;
}

impl ReprHash for Cell {
    fn repr_hash(&self) -> Hash {
        repr_hash(self)
    }
}

/// Hash bytes using SHA-256.
pub fn hash_bytes(bytes: &[u8]) -> Hash {
    let mut hasher = <sha2::Sha256 as sha2::Digest>::new();
    hasher.update(bytes);
    hasher.finalize().into()
}

/// The representation hash of an ordinary cell.
///
/// `sha256(d1 ++ d2 ++ padded data ++ child depths ++ child hashes)`, with each
/// child depth as a big-endian `u16`. A subtree shared through the same `Arc`
/// is hashed once.
pub fn repr_hash(cell: &Cell) -> Hash {
    let mut cache = HashMap::new();
    repr_hash_cached(cell, &mut cache)
}

fn repr_hash_cached(cell: &Cell, cache: &mut HashMap<*const Cell, Hash>) -> Hash {
    let ptr: *const Cell = cell;
    if let Some(hash) = cache.get(&ptr) {
        return *hash;
    }
    let child_hashes: Vec<Hash> = cell
        .refs()
        .iter()
        .map(|child| repr_hash_cached(child, cache))
        .collect();

    let mut hasher = <sha2::Sha256 as sha2::Digest>::new();
    hasher.update([cell.refs_descriptor(), cell.bits_descriptor()]);
    hasher.update(cell.padded_data());
    for child in cell.refs() {
        hasher.update(child.depth().to_be_bytes());
    }
    for hash in &child_hashes {
        hasher.update(hash);
    }
    let hash: Hash = hasher.finalize().into();
    cache.insert(ptr, hash);
    hash
}
