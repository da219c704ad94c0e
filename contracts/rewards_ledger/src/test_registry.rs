extern crate std;

use soroban_sdk::{testutils::Address as _, Address, Env, U256};

use crate::test::{accrue_rewards, deploy_oracle, mint, register_staking_token, setup};
use crate::ContractError;

fn u(env: &Env, v: u128) -> U256 {
    U256::from_u128(env, v)
}

// A conforming oracle that reports an unusable quote, for exercising the
// registration-time validation.
mod bad_oracle {
    use common::oracle::ValueFraction;
    use soroban_sdk::{contract, contractimpl, Env};

    #[contract]
    pub struct BadOracle;

    #[contractimpl]
    impl BadOracle {
        pub fn value_per_unit(_env: Env) -> ValueFraction {
            ValueFraction {
                numerator: 1,
                denominator: 0,
            }
        }
    }
}

// ── Registration ─────────────────────────────────────────────────────────────

#[test]
fn test_add_token_registers_in_order() {
    let (env, client, owner, _) = setup();

    let token_a = register_staking_token(&env, &client, &owner, 1, 1);
    let token_b = register_staking_token(&env, &client, &owner, 1, 1);

    let tokens = client.get_registered_tokens();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens.get(0), Some(token_a.clone()));
    assert_eq!(tokens.get(1), Some(token_b));
    assert!(client.is_stakeable(&token_a));
}

#[test]
fn test_add_token_twice_fails() {
    let (env, client, owner, _) = setup();
    let token = register_staking_token(&env, &client, &owner, 1, 1);
    let oracle = deploy_oracle(&env, 1, 1);

    let result = client.try_add_token(&owner, &token, &oracle);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::TokenAlreadyRegistered),
        _ => unreachable!("Expected TokenAlreadyRegistered error"),
    }
}

#[test]
fn test_add_token_by_non_owner_fails() {
    let (env, client, _owner, _) = setup();

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let oracle = deploy_oracle(&env, 1, 1);
    let intruder = Address::generate(&env);

    let result = client.try_add_token(&intruder, &token, &oracle);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_add_rewards_token_as_staking_type_fails() {
    let (env, client, owner, reward_token) = setup();
    let oracle = deploy_oracle(&env, 1, 1);

    let result = client.try_add_token(&owner, &reward_token, &oracle);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::TokensIdentical),
        _ => unreachable!("Expected TokensIdentical error"),
    }
}

#[test]
fn test_add_token_with_unusable_oracle_fails() {
    use bad_oracle::BadOracle;

    let (env, client, owner, _) = setup();
    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let oracle = env.register(BadOracle, ());

    let result = client.try_add_token(&owner, &token, &oracle);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidOracleValue),
        _ => unreachable!("Expected InvalidOracleValue error"),
    }
}

// ── Oracle changes ───────────────────────────────────────────────────────────

#[test]
fn test_change_oracle_swaps_binding() {
    let (env, client, owner, _) = setup();
    let token = register_staking_token(&env, &client, &owner, 1, 1);

    let new_oracle = deploy_oracle(&env, 5, 1);
    client.change_oracle(&owner, &token, &new_oracle);
    assert_eq!(client.get_oracle(&token), new_oracle);
}

#[test]
fn test_change_oracle_unknown_token_fails() {
    let (env, client, owner, _) = setup();
    let unknown = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let oracle = deploy_oracle(&env, 1, 1);

    let result = client.try_change_oracle(&owner, &unknown, &oracle);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::TokenNotRegistered),
        _ => unreachable!("Expected TokenNotRegistered error"),
    }
}

#[test]
fn test_registry_mutation_checkpoints_pending_rewards_first() {
    let (env, client, owner, reward_token) = setup();
    let token_a = register_staking_token(&env, &client, &owner, 1, 1);
    let token_b = register_staking_token(&env, &client, &owner, 1, 1);

    let x = Address::generate(&env);
    let y = Address::generate(&env);
    mint(&env, &token_a, &x, 100);
    mint(&env, &token_b, &y, 100);
    client.stake(&x, &token_a, &100);
    client.stake(&y, &token_b, &100);

    // 400 arrives but is not yet checkpointed when the owner re-quotes B
    // at 3×. The forced checkpoint must apportion it under the old 1:1
    // weighting: 200/200, not 100/300.
    accrue_rewards(&env, &reward_token, &client.address, 400);
    let new_oracle = deploy_oracle(&env, 3, 1);
    client.change_oracle(&owner, &token_b, &new_oracle);

    assert_eq!(client.get_rewards_for_token(&token_a), u(&env, 200));
    assert_eq!(client.get_rewards_for_token(&token_b), u(&env, 200));

    // Accrual after the change uses the new weighting: 100/300.
    accrue_rewards(&env, &reward_token, &client.address, 400);
    client.update_rewards(&x);
    assert_eq!(client.get_rewards_for_token(&token_a), u(&env, 300));
    assert_eq!(client.get_rewards_for_token(&token_b), u(&env, 500));
}

// ── Removal (soft delete) ────────────────────────────────────────────────────

#[test]
fn test_removed_token_blocks_new_stakes_only() {
    let (env, client, owner, reward_token) = setup();
    let token = register_staking_token(&env, &client, &owner, 1, 1);

    let staker = Address::generate(&env);
    mint(&env, &token, &staker, 200);
    client.stake(&staker, &token, &100);
    accrue_rewards(&env, &reward_token, &client.address, 500);

    client.remove_token(&owner, &token);
    assert!(!client.is_stakeable(&token));

    // New stakes are rejected…
    let result = client.try_stake(&staker, &token, &100);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::TokenNotStakeable),
        _ => unreachable!("Expected TokenNotStakeable error"),
    }

    // …but the tombstoned type keeps accruing, unstaking, and redeeming.
    assert_eq!(client.get_owed(&staker, &token), u(&env, 500));
    client.unstake(&staker, &token, &100);
    client.redeem_reward_from(&staker, &token, &500, &false);
    assert_eq!(client.get_owed(&staker, &token), u(&env, 0));

    // History stays queryable.
    assert_eq!(client.get_total_rewards_redeemed_for(&token), u(&env, 500));
    assert_eq!(client.get_registered_tokens().len(), 1);
}

#[test]
fn test_remove_token_twice_fails() {
    let (env, client, owner, _) = setup();
    let token = register_staking_token(&env, &client, &owner, 1, 1);

    client.remove_token(&owner, &token);
    let result = client.try_remove_token(&owner, &token);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::TokenNotStakeable),
        _ => unreachable!("Expected TokenNotStakeable error"),
    }
}

#[test]
fn test_change_oracle_works_on_removed_token() {
    let (env, client, owner, _) = setup();
    let token = register_staking_token(&env, &client, &owner, 1, 1);

    client.remove_token(&owner, &token);
    let new_oracle = deploy_oracle(&env, 2, 1);
    client.change_oracle(&owner, &token, &new_oracle);
    assert_eq!(client.get_oracle(&token), new_oracle);
}

// ── Owner transfer (two-step) ────────────────────────────────────────────────

#[test]
fn test_owner_transfer_two_step() {
    let (env, client, owner, _) = setup();

    let new_owner = Address::generate(&env);
    client.propose_owner(&owner, &new_owner);
    assert_eq!(client.get_pending_owner(), Some(new_owner.clone()));

    client.accept_owner(&new_owner);
    assert_eq!(client.get_owner(), new_owner);
    assert_eq!(client.get_pending_owner(), None);

    // The old owner has lost registry rights; the new one has them.
    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let oracle = deploy_oracle(&env, 1, 1);
    let result = client.try_add_token(&owner, &token, &oracle);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    client.add_token(&new_owner, &token, &oracle);
}

#[test]
fn test_accept_owner_by_wrong_address_fails() {
    let (env, client, owner, _) = setup();

    let new_owner = Address::generate(&env);
    client.propose_owner(&owner, &new_owner);

    let impostor = Address::generate(&env);
    let result = client.try_accept_owner(&impostor);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_cancel_owner_transfer() {
    let (env, client, owner, _) = setup();

    let new_owner = Address::generate(&env);
    client.propose_owner(&owner, &new_owner);
    client.cancel_owner_transfer(&owner);
    assert_eq!(client.get_pending_owner(), None);

    let result = client.try_accept_owner(&new_owner);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::NoPendingTransfer),
        _ => unreachable!("Expected NoPendingTransfer error"),
    }
}

#[test]
fn test_cancel_without_pending_fails() {
    let (_env, client, owner, _) = setup();

    let result = client.try_cancel_owner_transfer(&owner);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::NoPendingTransfer),
        _ => unreachable!("Expected NoPendingTransfer error"),
    }
}
