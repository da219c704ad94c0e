//! Storage keys and record types.
//!
//! Instance storage carries the singleton ledger state (config, registry
//! order, global counters). Per-type and per-account records live in
//! persistent storage under tuple keys so they survive independently of
//! instance TTL bumps.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec, U256};

use crate::arith;

// ── Instance keys ────────────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const CONFIG: Symbol = symbol_short!("CONFIG");
const TOKENS: Symbol = symbol_short!("TOKENS");
const LAST_ACCRUED: Symbol = symbol_short!("LAST_ACCR");
const TOTAL_REDEEMED: Symbol = symbol_short!("TOT_RDMD");

// Persistent records use tuple keys: (prefix, token) and (prefix, account, token).
const TOKEN_INFO: Symbol = symbol_short!("TOK_INFO");
const STAKE: Symbol = symbol_short!("STK");

// ── Record types ─────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LedgerConfig {
    /// The single token distributed to stakers across all types.
    pub rewards_token: Address,
    /// Optional adapter paying the underlying asset when redemption
    /// requests the native form of a wrapped rewards token.
    pub reward_unwrapper: Option<Address>,
}

/// Per-staking-token-type accounting record.
///
/// Never erased: removal flips `stakeable` so historical counters stay
/// queryable and existing stakers can still unstake and redeem.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakingTokenType {
    pub value_oracle: Address,
    /// Raw units currently staked across all accounts.
    pub total_staked: i128,
    /// Cumulative reward-token units apportioned to this type, mod 2^256.
    pub rewards_for_token: U256,
    /// Snapshot of `rewards_for_token` at the last index update.
    pub last_rewards_accrued_for: U256,
    /// Cumulative fixed-point reward-per-staked-unit index, mod 2^256.
    pub accrued_rewards_per_token: U256,
    /// Lifetime rewards redeemed from this type, mod 2^256.
    pub total_rewards_redeemed_for: U256,
    pub stakeable: bool,
}

/// Per-(account, token-type) position.
///
/// Created on first stake; persists after the stake reaches zero until the
/// realised rewards are fully redeemed, then pruned.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccountStake {
    pub staked_balance: i128,
    /// Index value at this account's last checkpoint.
    pub accrued_rewards_per_token_last: U256,
    /// Realised-but-unredeemed rewards as of the last checkpoint.
    pub last_rewards_balance: U256,
}

// ── Accessors ────────────────────────────────────────────────────────────────

pub fn set_initialized(env: &Env) {
    env.storage().instance().set(&INITIALIZED, &true);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&INITIALIZED)
}

pub fn put_config(env: &Env, config: &LedgerConfig) {
    env.storage().instance().set(&CONFIG, config);
}

pub fn config(env: &Env) -> Option<LedgerConfig> {
    env.storage().instance().get(&CONFIG)
}

/// Registered token types in registration order. The order is load-bearing:
/// spread redemption walks it front to back.
pub fn token_list(env: &Env) -> Vec<Address> {
    env.storage()
        .instance()
        .get(&TOKENS)
        .unwrap_or_else(|| Vec::new(env))
}

pub fn push_token(env: &Env, token: &Address) {
    let mut tokens = token_list(env);
    tokens.push_back(token.clone());
    env.storage().instance().set(&TOKENS, &tokens);
}

pub fn token_info(env: &Env, token: &Address) -> Option<StakingTokenType> {
    env.storage().persistent().get(&(TOKEN_INFO, token.clone()))
}

pub fn put_token_info(env: &Env, token: &Address, info: &StakingTokenType) {
    env.storage()
        .persistent()
        .set(&(TOKEN_INFO, token.clone()), info);
}

pub fn new_token_info(env: &Env, oracle: &Address) -> StakingTokenType {
    StakingTokenType {
        value_oracle: oracle.clone(),
        total_staked: 0,
        rewards_for_token: arith::zero(env),
        last_rewards_accrued_for: arith::zero(env),
        accrued_rewards_per_token: arith::zero(env),
        total_rewards_redeemed_for: arith::zero(env),
        stakeable: true,
    }
}

pub fn account_stake(env: &Env, account: &Address, token: &Address) -> Option<AccountStake> {
    env.storage()
        .persistent()
        .get(&(STAKE, account.clone(), token.clone()))
}

pub fn put_account_stake(env: &Env, account: &Address, token: &Address, stake: &AccountStake) {
    env.storage()
        .persistent()
        .set(&(STAKE, account.clone(), token.clone()), stake);
}

pub fn remove_account_stake(env: &Env, account: &Address, token: &Address) {
    env.storage()
        .persistent()
        .remove(&(STAKE, account.clone(), token.clone()));
}

pub fn last_total_accrued(env: &Env) -> U256 {
    env.storage()
        .instance()
        .get(&LAST_ACCRUED)
        .unwrap_or_else(|| arith::zero(env))
}

pub fn put_last_total_accrued(env: &Env, value: &U256) {
    env.storage().instance().set(&LAST_ACCRUED, value);
}

pub fn total_redeemed(env: &Env) -> U256 {
    env.storage()
        .instance()
        .get(&TOTAL_REDEEMED)
        .unwrap_or_else(|| arith::zero(env))
}

pub fn put_total_redeemed(env: &Env, value: &U256) {
    env.storage().instance().set(&TOTAL_REDEEMED, value);
}
