#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::Address as _, token::StellarAssetClient, Address, Env,
};

use fixed_rate_oracle::{FixedRateOracle, FixedRateOracleClient};
use rewards_ledger::{RewardsLedger, RewardsLedgerClient};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { amount: u64 },
    Unstake { amount: u64 },
    UnstakeAll,
    Redeem { amount: u64 },
    RedeemAll,
    Exit,
    AccrueReward { amount: u32 },
    UpdateRewards,
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let owner = Address::generate(&env);
    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let stake_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let oracle = env.register(FixedRateOracle, ());
    let _ = FixedRateOracleClient::new(&env, &oracle).try_initialize(&owner, &1, &1);

    let contract_id = env.register(RewardsLedger, ());
    let client = RewardsLedgerClient::new(&env, &contract_id);
    let _ = client.try_initialize(&owner, &reward_token, &None);
    let _ = client.try_add_token(&owner, &stake_token, &oracle);

    let mut users = vec![owner.clone()];
    for _ in 0..4 {
        users.push(Address::generate(&env));
    }
    for user in &users {
        StellarAssetClient::new(&env, &stake_token).mint(user, &(u64::MAX as i128));
    }

    // Drive arbitrary call sequences looking for unhandled panics rather
    // than full correctness; the ledger must answer every input with
    // Ok or a typed error.
    for (i, action) in actions.into_iter().enumerate() {
        let caller = &users[i % users.len()];
        match action {
            FuzzAction::Stake { amount } => {
                let _ = client.try_stake(caller, &stake_token, &(amount as i128));
            }
            FuzzAction::Unstake { amount } => {
                let _ = client.try_unstake(caller, &stake_token, &(amount as i128));
            }
            FuzzAction::UnstakeAll => {
                let _ = client.try_unstake_all_from(caller, &stake_token);
            }
            FuzzAction::Redeem { amount } => {
                let _ =
                    client.try_redeem_reward_from(caller, &stake_token, &(amount as i128), &false);
            }
            FuzzAction::RedeemAll => {
                let _ = client.try_redeem_all_rewards(caller, &false);
            }
            FuzzAction::Exit => {
                let _ = client.try_exit(caller, &false);
            }
            FuzzAction::AccrueReward { amount } => {
                StellarAssetClient::new(&env, &reward_token)
                    .mint(&contract_id, &(amount as i128));
            }
            FuzzAction::UpdateRewards => {
                let _ = client.try_update_rewards(caller);
            }
        }
    }
});
