//! End-to-end verification of the modular-counter semantics.
//!
//! The lifetime counters cannot reach the top of their range through
//! ordinary operation, so these tests seed them there and assert that the
//! ledger keeps accounting correctly across the wrap.

extern crate std;

use soroban_sdk::{
    testutils::Address as _, token::Client as TokenClient, Address, Env, U256,
};

use crate::test::{accrue_rewards, mint, register_staking_token, setup};
use crate::{arith, ContractError};

fn u(env: &Env, v: u128) -> U256 {
    U256::from_u128(env, v)
}

#[test]
fn test_total_accrued_wraps_past_max() {
    let (env, client, owner, reward_token) = setup();
    let token = register_staking_token(&env, &client, &owner, 1, 1);

    let staker = Address::generate(&env);
    mint(&env, &token, &staker, 100);
    client.stake(&staker, &token, &100);

    // Lifetime redemptions at the maximum representable value, with the
    // snapshot consistent for the current zero balance.
    let max = arith::max(&env);
    client.seed_counters(&max, &max);

    accrue_rewards(&env, &reward_token, &client.address, 1_000);

    // balance + redeemed ≡ 1000 − 1 (mod 2^256).
    assert_eq!(client.get_total_rewards_accrued(), u(&env, 999));

    // Differencing across the wrap still yields exactly the new 1000.
    client.update_rewards(&staker);
    assert_eq!(client.get_rewards_for_token(&token), u(&env, 1_000));
    assert_eq!(client.get_owed(&staker, &token), u(&env, 1_000));

    let expected_index = arith::multiplier(&env).mul(&u(&env, 10));
    assert_eq!(client.get_accrued_rewards_per_token(&token), expected_index);
}

#[test]
fn test_redeemed_counter_wraps_on_payout() {
    let (env, client, owner, reward_token) = setup();
    let token = register_staking_token(&env, &client, &owner, 1, 1);

    let staker = Address::generate(&env);
    mint(&env, &token, &staker, 100);
    client.stake(&staker, &token, &100);

    let max = arith::max(&env);
    client.seed_counters(&max, &max);
    accrue_rewards(&env, &reward_token, &client.address, 1_000);

    client.redeem_reward_from(&staker, &token, &1_000, &false);

    assert_eq!(TokenClient::new(&env, &reward_token).balance(&staker), 1_000);
    // max + 1000 ≡ 999 (mod 2^256).
    assert_eq!(client.get_total_rewards_redeemed(), u(&env, 999));
    // Balance is back to zero, so lifetime accrual agrees with the
    // wrapped redeemed counter.
    assert_eq!(client.get_total_rewards_accrued(), u(&env, 999));
    assert_eq!(client.get_owed(&staker, &token), u(&env, 0));
}

#[test]
fn test_index_product_overflow_is_reported() {
    let (env, client, owner, _reward_token) = setup();
    let token = register_staking_token(&env, &client, &owner, 1, 1);

    let staker = Address::generate(&env);
    mint(&env, &token, &staker, 100);
    client.stake(&staker, &token, &100);

    // Fabricate a pending per-type delta of 2^200: its product with the
    // 10^36 multiplier exceeds 2^256. This boundary is specified to revert,
    // not wrap.
    let two_pow_100 = u(&env, 1u128 << 100);
    let huge = two_pow_100.mul(&two_pow_100);
    client.seed_token_rewards(&token, &huge);

    let result = client.try_update_rewards(&staker);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::ArithmeticOverflow),
        _ => unreachable!("Expected ArithmeticOverflow error"),
    }
}

#[test]
fn test_wrapped_counters_stay_consistent_across_cycles() {
    let (env, client, owner, reward_token) = setup();
    let token = register_staking_token(&env, &client, &owner, 1, 1);

    let staker = Address::generate(&env);
    mint(&env, &token, &staker, 100);
    client.stake(&staker, &token, &100);

    // Start just below the wrap point and run several accrue/redeem
    // rounds across it.
    let near_max = arith::wrapping_sub(&env, &arith::max(&env), &u(&env, 250));
    client.seed_counters(&near_max, &near_max);

    let mut expected_redeemed = near_max;
    for round in 1..=5u32 {
        let amount = 100i128 * round as i128;
        accrue_rewards(&env, &reward_token, &client.address, amount);
        client.update_rewards(&staker);
        assert_eq!(
            client.get_owed(&staker, &token),
            u(&env, amount as u128),
            "round {} accrual",
            round
        );

        client.redeem_reward_from(&staker, &token, &amount, &false);
        expected_redeemed =
            arith::wrapping_add(&env, &expected_redeemed, &u(&env, amount as u128));
        assert_eq!(client.get_total_rewards_redeemed(), expected_redeemed);
    }

    // 100+200+300+400+500 paid out in total.
    assert_eq!(
        TokenClient::new(&env, &reward_token).balance(&staker),
        1_500
    );
}
