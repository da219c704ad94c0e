//! Optional native-payout adapter for wrapped reward tokens.
//!
//! When the rewards token wraps an underlying asset, the ledger can be
//! configured with an unwrapper contract. During redemption with the
//! native-payout flag set, the ledger first transfers the wrapped tokens to
//! the unwrapper and then asks it to pay the underlying asset out, so each
//! transfer is authorised by its direct invoker.

use soroban_sdk::{contractclient, Address, Env};

#[contractclient(name = "RewardUnwrapperClient")]
pub trait RewardUnwrapper {
    /// Pay `amount` of the underlying asset to `to`, consuming wrapped
    /// reward tokens already transferred to the unwrapper by the caller.
    fn unwrap_to(env: Env, to: Address, amount: i128);
}
