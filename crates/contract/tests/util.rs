#![allow(dead_code)]

use offering_contract::{
    types::{Address, Cell, CellBuilder},
    ContractDescriptor,
};

pub const OWNER: &str = "0:1111111111111111111111111111111111111111111111111111111111111111";
pub const COUNTERPARTY: &str = "0:2222222222222222222222222222222222222222222222222222222222222222";
pub const PRICED: &str = "0:3333333333333333333333333333333333333333333333333333333333333333";

/// Address of the scenario contract: rate 2, seqno 0, [`code`].
pub const CONTRACT_RAW: &str =
    "0:7f4df4500183c056d83b046fd6db0ab486f663ab96e34ff4b81ab2d6dd5c5b4f";
pub const CONTRACT_FRIENDLY: &str = "EQB_TfRQAYPAVtg7BG_W2wq0hvZjq5bjT_S4GrLW3VxbTwT7";

pub fn addr(s: &str) -> Address {
    s.parse().unwrap()
}

/// Stand-in for compiled contract code.
pub fn code() -> Cell {
    let mut b = CellBuilder::new();
    b.store_uint(0xDEAD_BEEF, 32).unwrap();
    b.build().unwrap()
}

pub fn descriptor(rate: u32, seqno: u32) -> ContractDescriptor {
    ContractDescriptor::create_from_config(
        addr(OWNER),
        addr(COUNTERPARTY),
        addr(PRICED),
        rate,
        seqno,
        code(),
    )
    .unwrap()
}
