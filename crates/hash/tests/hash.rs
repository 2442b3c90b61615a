use offering_hash::{contract_addr, repr_hash, ReprHash};
use offering_types::{message::StateInit, Address, Cell, CellBuilder, BASECHAIN, MASTERCHAIN};
use std::sync::Arc;

const EMPTY_HASH: &str = "96a296d224f285c67bee93c30f8a309157f0daa35dc5b87e410b78630a09cfc7";
const CODE_HASH: &str = "270906fd171b9c43f37a353059a73fbc02e0568188ec30186af846caefd09b8c";
const DATA_HASH: &str = "554d96abc42c788940e17cec2d280395de2d116200edf707b90d41fb4e05f42f";
const STATE_INIT_HASH: &str = "7f4df4500183c056d83b046fd6db0ab486f663ab96e34ff4b81ab2d6dd5c5b4f";
const DATA_PADDED: &str = "8002222222222222222222222222222222222222222222222222222222222222223000888888888888888888888888888888888888888888888888888888888888888a001999999999999999999999999999999999999999999999999999999999999999800000010000000040";

fn code() -> Cell {
    let mut b = CellBuilder::new();
    b.store_uint(0xDEAD_BEEF, 32).unwrap();
    b.build().unwrap()
}

fn data() -> Cell {
    Cell::new(hex::decode(DATA_PADDED).unwrap(), 865, vec![]).unwrap()
}

#[test]
fn empty_cell() {
    assert_eq!(hex::encode(repr_hash(&Cell::empty())), EMPTY_HASH);
}

#[test]
fn leaf_cells() {
    assert_eq!(hex::encode(code().repr_hash()), CODE_HASH);
    assert_eq!(hex::encode(data().repr_hash()), DATA_HASH);
}

#[test]
fn state_init_address() {
    let addr = contract_addr::from_code_and_data(BASECHAIN, &code(), &data()).unwrap();
    assert_eq!(addr.workchain, 0);
    assert_eq!(hex::encode(addr.hash), STATE_INIT_HASH);
    assert_eq!(
        addr.to_string(),
        "EQB_TfRQAYPAVtg7BG_W2wq0hvZjq5bjT_S4GrLW3VxbTwT7"
    );
}

#[test]
fn workchain_does_not_change_the_hash() {
    let init = StateInit {
        code: code(),
        data: data(),
    };
    let base = contract_addr::from_state_init(BASECHAIN, &init).unwrap();
    let master = contract_addr::from_state_init(MASTERCHAIN, &init).unwrap();
    assert_eq!(base.hash, master.hash);
    assert_eq!(master, Address::new(-1, base.hash));
}

#[test]
fn any_data_change_moves_the_address() {
    let before = contract_addr::from_code_and_data(BASECHAIN, &code(), &data()).unwrap();
    let mut bytes = hex::decode(DATA_PADDED).unwrap();
    bytes[100] ^= 0x01;
    let changed = Cell::new(bytes, 865, vec![]).unwrap();
    let moved = contract_addr::from_code_and_data(BASECHAIN, &code(), &changed).unwrap();
    assert_ne!(before, moved);
}

#[test]
fn children_contribute_depth_and_hash() {
    let mut parent = CellBuilder::new();
    parent.store_ref(Cell::empty()).unwrap();
    let parent = parent.build().unwrap();

    let mut expected = vec![0x01, 0x00];
    expected.extend_from_slice(&[0x00, 0x00]);
    expected.extend_from_slice(&hex::decode(EMPTY_HASH).unwrap());
    assert_eq!(repr_hash(&parent), offering_hash::hash_bytes(&expected));
}

#[test]
fn deep_shared_chain_is_hashed_once_per_level() {
    let mut cell = Arc::new(Cell::empty());
    let mut expected = hex::decode(EMPTY_HASH).unwrap();
    for depth in 0u16..256 {
        cell = Arc::new(Cell::new(vec![], 0, vec![cell.clone(), cell]).unwrap());

        let mut preimage = vec![0x02, 0x00];
        preimage.extend_from_slice(&depth.to_be_bytes());
        preimage.extend_from_slice(&depth.to_be_bytes());
        preimage.extend_from_slice(&expected);
        preimage.extend_from_slice(&expected);
        expected = offering_hash::hash_bytes(&preimage).to_vec();
    }
    assert_eq!(cell.depth(), 256);
    assert_eq!(repr_hash(&cell).to_vec(), expected);
}
