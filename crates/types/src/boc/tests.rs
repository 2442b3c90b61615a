use super::*;
use crate::CellBuilder;

const EMPTY_WITH_CRC: &str = "b5ee9c724101010100020000004cacb9cd";
const EMPTY_WITHOUT_CRC: &str = "b5ee9c72010101010002000000";
const SHARED_CHILD: &str = "b5ee9c7241010301000e000201c002010100020008deadbeef3a504596";

fn deadbeef() -> Cell {
    let mut b = CellBuilder::new();
    b.store_uint(0xDEAD_BEEF, 32).unwrap();
    b.build().unwrap()
}

// A root with one data bit referencing `code` directly and through a second cell.
fn shared_child_tree() -> Cell {
    let code = deadbeef();
    let mut middle = CellBuilder::new();
    middle.store_ref(code.clone()).unwrap();
    let mut root = CellBuilder::new();
    root.store_bit(true).unwrap();
    root.store_ref(code).unwrap();
    root.store_ref(middle.build().unwrap()).unwrap();
    root.build().unwrap()
}

#[test]
fn empty_cell() {
    assert_eq!(hex::encode(serialize(&Cell::empty(), true)), EMPTY_WITH_CRC);
    assert_eq!(
        hex::encode(serialize(&Cell::empty(), false)),
        EMPTY_WITHOUT_CRC
    );
    for encoded in [EMPTY_WITH_CRC, EMPTY_WITHOUT_CRC] {
        let bytes = hex::decode(encoded).unwrap();
        assert_eq!(deserialize_root(&bytes).unwrap(), Cell::empty());
    }
}

#[test]
fn shared_child_is_stored_once() {
    let tree = shared_child_tree();
    let bytes = serialize(&tree, true);
    assert_eq!(hex::encode(&bytes), SHARED_CHILD);
    let roots = deserialize(&bytes).unwrap();
    assert_eq!(roots, vec![tree]);
}

#[test]
fn checksum_mismatch() {
    let mut bytes = hex::decode(SHARED_CHILD).unwrap();
    // Flip a bit inside the `deadbeef` payload.
    let ix = bytes.len() - 6;
    bytes[ix] ^= 0x01;
    assert!(matches!(
        deserialize(&bytes).unwrap_err(),
        BocError::Checksum { .. }
    ));
}

#[test]
fn truncated_and_trailing() {
    let bytes = hex::decode(EMPTY_WITHOUT_CRC).unwrap();
    assert!(matches!(
        deserialize(&bytes[..bytes.len() - 1]).unwrap_err(),
        BocError::Truncated(_)
    ));
    let mut extended = bytes.clone();
    extended.push(0);
    assert_eq!(
        deserialize(&extended).unwrap_err(),
        BocError::TrailingBytes(1)
    );
}

#[test]
fn invalid_magic() {
    let mut bytes = hex::decode(EMPTY_WITHOUT_CRC).unwrap();
    bytes[0] = 0x68;
    assert_eq!(
        deserialize(&bytes).unwrap_err(),
        BocError::InvalidMagic([0x68, 0xee, 0x9c, 0x72])
    );
}

#[test]
fn backward_reference_is_rejected() {
    // Two cells where the second references the first.
    let bytes = [
        0xb5, 0xee, 0x9c, 0x72, 0x01, 0x01, 0x02, 0x01, 0x00, 0x05, 0x00, // header
        0x00, 0x00, // cell 0: empty
        0x01, 0x00, 0x00, // cell 1: one ref to index 0
    ];
    assert_eq!(
        deserialize(&bytes).unwrap_err(),
        BocError::InvalidRefIndex { cell: 1, index: 0 }
    );
}

#[test]
fn exotic_cells_are_rejected() {
    let bytes = [
        0xb5, 0xee, 0x9c, 0x72, 0x01, 0x01, 0x01, 0x01, 0x00, 0x02, 0x00, // header
        0x08, 0x00, // exotic cell
    ];
    assert_eq!(
        deserialize(&bytes).unwrap_err(),
        BocError::UnsupportedCell(0)
    );
}

#[test]
fn partial_byte_round_trip() {
    let mut b = CellBuilder::new();
    b.store_uint(0b10110, 5).unwrap();
    let cell = b.build().unwrap();
    let bytes = serialize(&cell, false);
    // d1, d2 and the tagged data byte `10110100`.
    assert_eq!(&bytes[bytes.len() - 3..], &[0x00u8, 0x01, 0xB4]);
    assert_eq!(deserialize_root(&bytes).unwrap(), cell);
}

// Each level references the level below twice through the same `Arc`.
fn shared_chain(depth: usize) -> Cell {
    let mut cell = Arc::new(Cell::empty());
    for _ in 0..depth {
        cell = Arc::new(Cell::new(vec![], 0, vec![cell.clone(), cell]).unwrap());
    }
    (*cell).clone()
}

#[test]
fn deep_shared_chain_is_linear() {
    let root = shared_chain(256);
    let bytes = serialize(&root, false);
    // 16 header bytes, 256 cells of d1, d2 and two 2-byte refs, then the leaf.
    assert_eq!(bytes.len(), 16 + 256 * 6 + 2);

    let decoded = deserialize_root(&bytes).unwrap();
    assert_eq!(decoded.depth(), 256);
    assert_eq!(serialize(&decoded, false), bytes);
}
