//! The checkpoint engine.
//!
//! Every state-changing operation first brings three accumulator layers up
//! to date, in order:
//!
//! 1. **Global accrual** — newly received rewards-token balance
//!    (`balance + total_redeemed`, mod 2^256, differenced against the last
//!    snapshot) is apportioned across token types in proportion to their
//!    live value-weighted shares.
//! 2. **Per-type index** — each type's newly apportioned rewards are folded
//!    into its cumulative per-staked-unit index, scaled by the fixed-point
//!    multiplier.
//! 3. **Per-account snapshot** — an account's realised rewards are rolled
//!    forward and its index checkpoint re-pinned.
//!
//! Layers 1 and 2 are computed as a [`Projection`] first and written
//! second, so read-only queries can reuse the same arithmetic without
//! mutating storage.

use soroban_sdk::{token, Address, Env, Map, U256};

use common::oracle::ValueOracleClient;

use crate::arith;
use crate::storage::{self, AccountStake, StakingTokenType};
use crate::ContractError;

/// Fully-updated global and per-type state, not yet written back.
pub struct Projection {
    /// New `last_total_rewards_accrued` snapshot.
    pub total_accrued: U256,
    /// Updated per-type records, keyed by token address.
    pub infos: Map<Address, StakingTokenType>,
}

/// Live value-weighted shares for `staked` units quoted by `oracle`.
///
/// `shares = staked × numerator / denominator`, floored. Never cached:
/// the weighting must reflect the valuation at the instant of the
/// checkpoint.
pub fn shares_of(env: &Env, oracle: &Address, staked: i128) -> Result<U256, ContractError> {
    if staked <= 0 {
        return Ok(arith::zero(env));
    }
    let quote = ValueOracleClient::new(env, oracle).value_per_unit();
    if !quote.is_valid() {
        return Err(ContractError::InvalidOracleValue);
    }
    arith::mul_div_floor(
        env,
        &arith::from_amount(env, staked),
        &arith::from_amount(env, quote.numerator),
        &arith::from_amount(env, quote.denominator),
    )
    .ok_or(ContractError::ArithmeticOverflow)
}

/// Compute the post-checkpoint global and per-type state without touching
/// storage.
pub fn project(env: &Env) -> Result<Projection, ContractError> {
    let config = storage::config(env).ok_or(ContractError::NotInitialized)?;
    let tokens = storage::token_list(env);
    let zero = arith::zero(env);

    let mut infos: Map<Address, StakingTokenType> = Map::new(env);
    for t in tokens.iter() {
        if let Some(info) = storage::token_info(env, &t) {
            infos.set(t.clone(), info);
        }
    }

    // Layer 1: global accrual. The rewards stream has no deposit call; new
    // rewards are detected as a balance increase net of lifetime payouts.
    let balance = token::Client::new(env, &config.rewards_token)
        .balance(&env.current_contract_address());
    let total_accrued = arith::wrapping_add(
        env,
        &arith::from_amount(env, balance),
        &storage::total_redeemed(env),
    );
    let delta_global =
        arith::wrapping_sub(env, &total_accrued, &storage::last_total_accrued(env));

    if delta_global != zero {
        let mut shares: Map<Address, U256> = Map::new(env);
        let mut total_shares = zero.clone();
        for t in tokens.iter() {
            if let Some(info) = infos.get(t.clone()) {
                let s = shares_of(env, &info.value_oracle, info.total_staked)?;
                if s == zero {
                    continue;
                }
                total_shares = arith::checked_add(env, &total_shares, &s)
                    .ok_or(ContractError::ArithmeticOverflow)?;
                shares.set(t.clone(), s);
            }
        }

        // When nobody holds shares the whole delta is parked: it stays in
        // the contract balance but is attributed to no type, permanently.
        // Likewise the floor-division remainder below.
        if total_shares != zero {
            for t in tokens.iter() {
                if let Some(s) = shares.get(t.clone()) {
                    if let Some(mut info) = infos.get(t.clone()) {
                        let portion = arith::checked_mul(env, &delta_global, &s)
                            .ok_or(ContractError::ArithmeticOverflow)?
                            .div(&total_shares);
                        info.rewards_for_token =
                            arith::wrapping_add(env, &info.rewards_for_token, &portion);
                        infos.set(t.clone(), info);
                    }
                }
            }
        }
    }

    // Layer 2: per-type index. A type with nothing staked keeps both its
    // index and its snapshot; the pending delta stays parked in
    // `rewards_for_token` for whoever is staked when the type next has
    // stake — not retroactively for past holders.
    let mult = arith::multiplier(env);
    for t in tokens.iter() {
        if let Some(mut info) = infos.get(t.clone()) {
            if info.total_staked <= 0 {
                continue;
            }
            let delta_token = arith::wrapping_sub(
                env,
                &info.rewards_for_token,
                &info.last_rewards_accrued_for,
            );
            if delta_token != zero {
                let increment = arith::mul_div_floor(
                    env,
                    &delta_token,
                    &mult,
                    &arith::from_amount(env, info.total_staked),
                )
                .ok_or(ContractError::ArithmeticOverflow)?;
                info.accrued_rewards_per_token =
                    arith::wrapping_add(env, &info.accrued_rewards_per_token, &increment);
            }
            info.last_rewards_accrued_for = info.rewards_for_token.clone();
            infos.set(t.clone(), info);
        }
    }

    Ok(Projection {
        total_accrued,
        infos,
    })
}

/// Write a projection back. The global snapshot always advances, even when
/// the delta was parked unapportioned.
pub fn commit(env: &Env, projection: &Projection) {
    storage::put_last_total_accrued(env, &projection.total_accrued);
    for t in storage::token_list(env).iter() {
        if let Some(info) = projection.infos.get(t.clone()) {
            storage::put_token_info(env, &t, &info);
        }
    }
}

/// Realised rewards an account can redeem from one type, given an
/// up-to-date type record.
pub fn owed(
    env: &Env,
    info: &StakingTokenType,
    account: &AccountStake,
) -> Result<U256, ContractError> {
    let delta_index = arith::wrapping_sub(
        env,
        &info.accrued_rewards_per_token,
        &account.accrued_rewards_per_token_last,
    );
    let earned = arith::mul_div_floor(
        env,
        &arith::from_amount(env, account.staked_balance),
        &delta_index,
        &arith::multiplier(env),
    )
    .ok_or(ContractError::ArithmeticOverflow)?;
    Ok(arith::wrapping_add(env, &earned, &account.last_rewards_balance))
}

/// Bring global and per-type accumulators up to date.
pub fn checkpoint(env: &Env) -> Result<(), ContractError> {
    let projection = project(env)?;
    commit(env, &projection);
    Ok(())
}

/// Full checkpoint including `account`'s snapshots across every type it
/// holds a record for.
pub fn checkpoint_account(env: &Env, account: &Address) -> Result<(), ContractError> {
    let projection = project(env)?;
    commit(env, &projection);

    for t in storage::token_list(env).iter() {
        if let Some(info) = projection.infos.get(t.clone()) {
            if let Some(mut stake) = storage::account_stake(env, account, &t) {
                stake.last_rewards_balance = owed(env, &info, &stake)?;
                stake.accrued_rewards_per_token_last = info.accrued_rewards_per_token.clone();
                storage::put_account_stake(env, account, &t, &stake);
            }
        }
    }
    Ok(())
}
