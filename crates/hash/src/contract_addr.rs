//! A small collection of helper functions to assist in the calculation of a
//! contract's address.
//!
//! A contract's address is the representation hash of the
//! [`StateInit`] cell it is deployed with, so it is known before deployment
//! and changes whenever the code or any initial storage field changes.

use offering_types::{
    cell::{CellResult, Store},
    message::StateInit,
    Address, Cell, Workchain,
};

/// Produce the address of a contract deployed to `workchain` with `init`.
///
/// Fails only if the state init cell would exceed the cell depth limit.
pub fn from_state_init(workchain: Workchain, init: &StateInit) -> CellResult<Address> {
    let cell = init.to_cell()?;
    Ok(Address::new(workchain, crate::repr_hash(&cell)))
}

/// Shorthand for [`from_state_init`] when the code and data cells are at hand.
pub fn from_code_and_data(workchain: Workchain, code: &Cell, data: &Cell) -> CellResult<Address> {
    let init = StateInit {
        code: code.clone(),
        data: data.clone(),
    };
    from_state_init(workchain, &init)
}
