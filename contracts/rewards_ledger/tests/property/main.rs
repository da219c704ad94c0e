#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based test suite entry point.
//!
//! This file loads all property test sub-modules and hosts the shared
//! environment builders. Run with:
//!
//! ```bash
//! cargo test --test property
//! ```
//!
//! To increase the number of generated cases:
//!
//! ```bash
//! PROPTEST_CASES=512 cargo test --test property
//! ```

use soroban_sdk::{
    testutils::Address as _,
    token::StellarAssetClient,
    Address, Env,
};

use fixed_rate_oracle::{FixedRateOracle, FixedRateOracleClient};
use rewards_ledger::{RewardsLedger, RewardsLedgerClient};


/// Deploy a rewards SAC and an initialised ledger.
pub fn setup_ledger() -> (Env, RewardsLedgerClient<'static>, Address, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(RewardsLedger, ());
    let client = RewardsLedgerClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    client.initialize(&owner, &reward_token, &None);

    (env, client, owner, reward_token)
}

/// Register a fresh SAC staking token quoted at `numerator / denominator`.
pub fn add_staking_token(
    env: &Env,
    client: &RewardsLedgerClient,
    owner: &Address,
    numerator: i128,
    denominator: i128,
) -> Address {
    let token = env
        .register_stellar_asset_contract_v2(Address::generate(env))
        .address();
    let oracle_id = env.register(FixedRateOracle, ());
    FixedRateOracleClient::new(env, &oracle_id).initialize(
        &Address::generate(env),
        &numerator,
        &denominator,
    );
    client.add_token(owner, &token, &oracle_id);
    token
}

pub fn mint(env: &Env, token: &Address, to: &Address, amount: i128) {
    StellarAssetClient::new(env, token).mint(to, &amount);
}

/// Narrow a queried counter to u128; all generated magnitudes fit.
pub fn as_u128(value: &soroban_sdk::U256) -> u128 {
    value.to_u128().expect("counter exceeds generated magnitude")
}
