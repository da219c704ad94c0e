//! Single-owner storage with a two-step ownership transfer.
//!
//! The owner is the address allowed to mutate a contract's configuration.
//! Transfers are two-step (propose, then accept) so that ownership can never
//! be handed to an address that cannot sign for itself. Authentication is
//! the caller contract's responsibility; this module only manages storage.

use soroban_sdk::{symbol_short, Address, Env, Symbol};

const OWNER: Symbol = symbol_short!("OWNER");
const PENDING_OWNER: Symbol = symbol_short!("PEND_OWN");

/// Store the initial owner. Called once from `initialize`.
pub fn put_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&OWNER, owner);
}

/// Current owner, if the contract has been initialised.
pub fn owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&OWNER)
}

/// True when `who` is the stored owner.
pub fn is_owner(env: &Env, who: &Address) -> bool {
    owner(env).is_some_and(|o| o == *who)
}

/// Record `new_owner` as the pending transfer target.
pub fn propose_owner(env: &Env, new_owner: &Address) {
    env.storage().instance().set(&PENDING_OWNER, new_owner);
}

/// Pending transfer target, if a transfer is in flight.
pub fn pending_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&PENDING_OWNER)
}

/// Complete a transfer: `new_owner` becomes the owner and the pending
/// slot is cleared. Returns the previous owner. The caller must already
/// have verified that `new_owner` matches the pending target.
pub fn accept_owner(env: &Env, new_owner: &Address) -> Option<Address> {
    let old = owner(env);
    env.storage().instance().set(&OWNER, new_owner);
    env.storage().instance().remove(&PENDING_OWNER);
    old
}

/// Abort an in-flight transfer. Returns the cancelled target, if any.
pub fn cancel_transfer(env: &Env) -> Option<Address> {
    let pending = pending_owner(env);
    env.storage().instance().remove(&PENDING_OWNER);
    pending
}
