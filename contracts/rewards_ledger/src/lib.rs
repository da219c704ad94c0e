#![no_std]

//! Multi-pool, value-weighted staking-rewards ledger.
//!
//! Accounts stake units of any registered token type into a shared pool.
//! A single rewards token accrues to the ledger by direct balance increase
//! (there is no reward-deposit call). Accrued rewards are split across
//! token types in proportion to the live economic value each type
//! represents — staked amount times the quote of that type's pluggable
//! value oracle — and within a type among its stakers in proportion to raw
//! staked amount.
//!
//! Counter arithmetic is deliberately modular (mod 2^256) for the
//! monotonic accumulators and checked for reward-rate products; see
//! [`arith`] for the split and why it must not be unified.

pub mod accrual;
pub mod arith;
pub mod events;
pub mod storage;

use soroban_sdk::{
    contract, contractimpl, token, Address, BytesN, Env, Vec, U256,
};

use common::admin;
use common::oracle::ValueOracleClient;
use common::unwrapper::RewardUnwrapperClient;

use storage::{AccountStake, LedgerConfig};

// ── Contract errors ──────────────────────────────────────────────────────────

/// Error codes, grouped in stable ranges:
/// lifecycle 1–9, access 10–19, registration 20–29, validation 30–39,
/// arithmetic 40–49.
#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 10,
    TokenAlreadyRegistered = 20,
    TokenNotRegistered = 21,
    TokenNotStakeable = 22,
    InvalidOracleValue = 23,
    InvalidAmount = 30,
    InsufficientStake = 31,
    InsufficientRewards = 32,
    UnwrapNotSupported = 33,
    TokensIdentical = 34,
    NoPendingTransfer = 35,
    ArithmeticOverflow = 40,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct RewardsLedger;

#[contractimpl]
impl RewardsLedger {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the ledger.
    ///
    /// * `owner`            – address allowed to mutate the registry.
    /// * `rewards_token`    – the single token distributed to stakers.
    /// * `reward_unwrapper` – optional adapter for native payouts when the
    ///                        rewards token wraps an underlying asset.
    pub fn initialize(
        env: Env,
        owner: Address,
        rewards_token: Address,
        reward_unwrapper: Option<Address>,
    ) -> Result<(), ContractError> {
        if storage::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }

        storage::set_initialized(&env);
        storage::put_config(
            &env,
            &LedgerConfig {
                rewards_token: rewards_token.clone(),
                reward_unwrapper,
            },
        );
        admin::put_owner(&env, &owner);
        // Counters start at zero; any rewards-token balance already held
        // becomes the first checkpoint's delta.

        events::publish_initialized(&env, owner, rewards_token);

        Ok(())
    }

    /// Replace the running contract code. Owner only.
    pub fn upgrade(
        env: Env,
        caller: Address,
        new_wasm_hash: BytesN<32>,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        Self::require_owner(&env, &caller)?;
        env.deployer().update_current_contract_wasm(new_wasm_hash);
        Ok(())
    }

    pub fn version() -> u32 {
        1
    }

    // ── Token registry ──────────────────────────────────────────────────────

    /// Register a staking-token type and bind its value oracle.
    ///
    /// Rewards already received are checkpointed under the previous
    /// registry configuration before the weighting set changes.
    pub fn add_token(
        env: Env,
        caller: Address,
        token: Address,
        oracle: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        Self::require_owner(&env, &caller)?;

        accrual::checkpoint(&env)?;

        let config = Self::load_config(&env)?;
        if token == config.rewards_token {
            // Staked rewards tokens would be indistinguishable from newly
            // accrued rewards in the balance-based accrual.
            return Err(ContractError::TokensIdentical);
        }
        if storage::token_info(&env, &token).is_some() {
            return Err(ContractError::TokenAlreadyRegistered);
        }
        Self::validate_oracle(&env, &oracle)?;

        storage::put_token_info(&env, &token, &storage::new_token_info(&env, &oracle));
        storage::push_token(&env, &token);

        events::publish_token_added(&env, token, oracle);

        Ok(())
    }

    /// Swap a type's oracle binding. Works on tombstoned types, whose
    /// existing stakers keep accruing.
    pub fn change_oracle(
        env: Env,
        caller: Address,
        token: Address,
        oracle: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        Self::require_owner(&env, &caller)?;

        accrual::checkpoint(&env)?;

        let mut info =
            storage::token_info(&env, &token).ok_or(ContractError::TokenNotRegistered)?;
        Self::validate_oracle(&env, &oracle)?;

        let old_oracle = info.value_oracle.clone();
        info.value_oracle = oracle.clone();
        storage::put_token_info(&env, &token, &info);

        events::publish_oracle_changed(&env, token, old_oracle, oracle);

        Ok(())
    }

    /// Tombstone a type: no new stakes, but existing stakers can still
    /// unstake and redeem, and the type's counters stay queryable.
    pub fn remove_token(env: Env, caller: Address, token: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        Self::require_owner(&env, &caller)?;

        let mut info =
            storage::token_info(&env, &token).ok_or(ContractError::TokenNotRegistered)?;
        if !info.stakeable {
            return Err(ContractError::TokenNotStakeable);
        }
        info.stakeable = false;
        storage::put_token_info(&env, &token, &info);

        events::publish_token_removed(&env, token);

        Ok(())
    }

    // ── Checkpointing ───────────────────────────────────────────────────────

    /// Bring global, per-type, and `account`'s accumulators up to date.
    ///
    /// Permissionless: it only advances accruals, never moves funds.
    pub fn update_rewards(env: Env, account: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        accrual::checkpoint_account(&env, &account)
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` units of `token`.
    pub fn stake(
        env: Env,
        staker: Address,
        token: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        {
            let info =
                storage::token_info(&env, &token).ok_or(ContractError::TokenNotRegistered)?;
            if !info.stakeable {
                return Err(ContractError::TokenNotStakeable);
            }
        }

        // Checkpoint before the balance change so the deposit earns nothing
        // retroactively.
        accrual::checkpoint_account(&env, &staker)?;

        token::Client::new(&env, &token).transfer(
            &staker,
            &env.current_contract_address(),
            &amount,
        );

        let mut info =
            storage::token_info(&env, &token).ok_or(ContractError::TokenNotRegistered)?;
        let mut stake = storage::account_stake(&env, &staker, &token).unwrap_or(AccountStake {
            staked_balance: 0,
            accrued_rewards_per_token_last: info.accrued_rewards_per_token.clone(),
            last_rewards_balance: arith::zero(&env),
        });

        stake.staked_balance = stake
            .staked_balance
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        info.total_staked = info
            .total_staked
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        let new_total = info.total_staked;

        storage::put_account_stake(&env, &staker, &token, &stake);
        storage::put_token_info(&env, &token, &info);

        events::publish_staked(&env, staker, token, amount, new_total);

        Ok(())
    }

    /// Withdraw `amount` staked units of `token`.
    pub fn unstake(
        env: Env,
        staker: Address,
        token: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        accrual::checkpoint_account(&env, &staker)?;
        Self::unstake_inner(&env, &staker, &token, amount)
    }

    /// Withdraw the full staked balance of `token`. Returns the amount.
    pub fn unstake_all_from(
        env: Env,
        staker: Address,
        token: Address,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        accrual::checkpoint_account(&env, &staker)?;

        let amount = storage::account_stake(&env, &staker, &token)
            .map(|s| s.staked_balance)
            .unwrap_or(0);
        if amount == 0 {
            return Err(ContractError::InvalidAmount);
        }
        Self::unstake_inner(&env, &staker, &token, amount)?;
        Ok(amount)
    }

    // ── Redemption ──────────────────────────────────────────────────────────

    /// Redeem `amount` realised rewards earned through `token`.
    pub fn redeem_reward_from(
        env: Env,
        staker: Address,
        token: Address,
        amount: i128,
        unwrap: bool,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        accrual::checkpoint_account(&env, &staker)?;

        Self::debit_rewards(&env, &staker, &token, amount)?;
        let config = Self::load_config(&env)?;
        Self::pay_reward(&env, &config, &staker, amount, unwrap)?;

        events::publish_rewards_redeemed(&env, staker, token, amount, unwrap);

        Ok(())
    }

    /// Redeem `amount` realised rewards, drawn from the caller's held types
    /// in registry order until exhausted.
    pub fn redeem_reward(
        env: Env,
        staker: Address,
        amount: i128,
        unwrap: bool,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        accrual::checkpoint_account(&env, &staker)?;

        let zero = arith::zero(&env);
        let mut remaining = amount;
        for t in storage::token_list(&env).iter() {
            if remaining == 0 {
                break;
            }
            if let Some(stake) = storage::account_stake(&env, &staker, &t) {
                let remaining_u = arith::from_amount(&env, remaining);
                let take_u = if stake.last_rewards_balance < remaining_u {
                    stake.last_rewards_balance.clone()
                } else {
                    remaining_u
                };
                if take_u == zero {
                    continue;
                }
                // take_u ≤ remaining, so it narrows.
                let take =
                    arith::to_amount(&take_u).ok_or(ContractError::ArithmeticOverflow)?;
                Self::debit_rewards(&env, &staker, &t, take)?;
                events::publish_rewards_redeemed(&env, staker.clone(), t.clone(), take, unwrap);
                remaining -= take;
            }
        }
        if remaining != 0 {
            return Err(ContractError::InsufficientRewards);
        }

        let config = Self::load_config(&env)?;
        Self::pay_reward(&env, &config, &staker, amount, unwrap)
    }

    /// Redeem every realised reward the caller holds. Returns the total
    /// paid; zero owed is not an error.
    pub fn redeem_all_rewards(
        env: Env,
        staker: Address,
        unwrap: bool,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        accrual::checkpoint_account(&env, &staker)?;
        Self::redeem_all_inner(&env, &staker, unwrap)
    }

    /// Unstake everything and redeem everything, across all types, as one
    /// atomic operation.
    pub fn exit(env: Env, staker: Address, unwrap: bool) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        accrual::checkpoint_account(&env, &staker)?;

        for t in storage::token_list(&env).iter() {
            if let Some(stake) = storage::account_stake(&env, &staker, &t) {
                if stake.staked_balance > 0 {
                    Self::unstake_inner(&env, &staker, &t, stake.staked_balance)?;
                }
            }
        }
        Self::redeem_all_inner(&env, &staker, unwrap)?;
        Ok(())
    }

    /// [`Self::exit`] restricted to a single type.
    pub fn exit_from(
        env: Env,
        staker: Address,
        token: Address,
        unwrap: bool,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        accrual::checkpoint_account(&env, &staker)?;

        if let Some(stake) = storage::account_stake(&env, &staker, &token) {
            if stake.staked_balance > 0 {
                Self::unstake_inner(&env, &staker, &token, stake.staked_balance)?;
            }
        }
        if let Some(stake) = storage::account_stake(&env, &staker, &token) {
            if stake.last_rewards_balance != arith::zero(&env) {
                let take = arith::to_amount(&stake.last_rewards_balance)
                    .ok_or(ContractError::ArithmeticOverflow)?;
                Self::debit_rewards(&env, &staker, &token, take)?;
                let config = Self::load_config(&env)?;
                Self::pay_reward(&env, &config, &staker, take, unwrap)?;
                events::publish_rewards_redeemed(&env, staker, token, take, unwrap);
            }
        }
        Ok(())
    }

    // ── Owner transfer (two-step) ───────────────────────────────────────────

    /// Propose a new owner. The proposed address must call
    /// [`Self::accept_owner`] to complete the transfer.
    pub fn propose_owner(
        env: Env,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        Self::require_owner(&env, &caller)?;

        admin::propose_owner(&env, &new_owner);

        events::publish_owner_transfer_proposed(&env, caller, new_owner);

        Ok(())
    }

    /// Complete a proposed owner transfer. Only the proposed address may
    /// accept.
    pub fn accept_owner(env: Env, new_owner: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        new_owner.require_auth();

        let pending = admin::pending_owner(&env).ok_or(ContractError::NoPendingTransfer)?;
        if new_owner != pending {
            return Err(ContractError::Unauthorized);
        }

        let old_owner = admin::accept_owner(&env, &new_owner)
            .ok_or(ContractError::NotInitialized)?;

        events::publish_owner_transfer_accepted(&env, old_owner, new_owner);

        Ok(())
    }

    /// Abort an in-flight owner transfer.
    pub fn cancel_owner_transfer(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        Self::require_owner(&env, &caller)?;

        let cancelled = admin::cancel_transfer(&env).ok_or(ContractError::NoPendingTransfer)?;

        events::publish_owner_transfer_cancelled(&env, caller, cancelled);

        Ok(())
    }

    // ── Queries (pure reads) ────────────────────────────────────────────────

    pub fn get_owner(env: Env) -> Result<Address, ContractError> {
        admin::owner(&env).ok_or(ContractError::NotInitialized)
    }

    pub fn get_pending_owner(env: Env) -> Option<Address> {
        admin::pending_owner(&env)
    }

    pub fn get_rewards_token(env: Env) -> Result<Address, ContractError> {
        Ok(Self::load_config(&env)?.rewards_token)
    }

    /// Registered types in registration order, tombstoned entries included.
    pub fn get_registered_tokens(env: Env) -> Vec<Address> {
        storage::token_list(&env)
    }

    pub fn is_stakeable(env: Env, token: Address) -> bool {
        storage::token_info(&env, &token).is_some_and(|i| i.stakeable)
    }

    pub fn get_oracle(env: Env, token: Address) -> Result<Address, ContractError> {
        storage::token_info(&env, &token)
            .map(|i| i.value_oracle)
            .ok_or(ContractError::TokenNotRegistered)
    }

    pub fn get_staked(env: Env, account: Address, token: Address) -> i128 {
        storage::account_stake(&env, &account, &token)
            .map(|s| s.staked_balance)
            .unwrap_or(0)
    }

    pub fn get_total_staked(env: Env, token: Address) -> i128 {
        storage::token_info(&env, &token)
            .map(|i| i.total_staked)
            .unwrap_or(0)
    }

    /// Cumulative rewards apportioned to `token`, mod 2^256, as stored.
    pub fn get_rewards_for_token(env: Env, token: Address) -> Result<U256, ContractError> {
        storage::token_info(&env, &token)
            .map(|i| i.rewards_for_token)
            .ok_or(ContractError::TokenNotRegistered)
    }

    /// The stored per-staked-unit index of `token`, mod 2^256.
    pub fn get_accrued_rewards_per_token(
        env: Env,
        token: Address,
    ) -> Result<U256, ContractError> {
        storage::token_info(&env, &token)
            .map(|i| i.accrued_rewards_per_token)
            .ok_or(ContractError::TokenNotRegistered)
    }

    pub fn get_total_rewards_redeemed_for(
        env: Env,
        token: Address,
    ) -> Result<U256, ContractError> {
        storage::token_info(&env, &token)
            .map(|i| i.total_rewards_redeemed_for)
            .ok_or(ContractError::TokenNotRegistered)
    }

    pub fn get_total_rewards_redeemed(env: Env) -> U256 {
        storage::total_redeemed(&env)
    }

    /// Live lifetime accrual: current rewards-token balance plus lifetime
    /// redemptions, mod 2^256.
    pub fn get_total_rewards_accrued(env: Env) -> Result<U256, ContractError> {
        let config = Self::load_config(&env)?;
        let balance = token::Client::new(&env, &config.rewards_token)
            .balance(&env.current_contract_address());
        Ok(arith::wrapping_add(
            &env,
            &arith::from_amount(&env, balance),
            &storage::total_redeemed(&env),
        ))
    }

    /// Real-time redeemable rewards for one (account, type) pair, including
    /// accrual that has not been checkpointed yet. Does not mutate state.
    pub fn get_owed(env: Env, account: Address, token: Address) -> Result<U256, ContractError> {
        Self::require_initialized(&env)?;
        let projection = accrual::project(&env)?;
        match (
            projection.infos.get(token),
            storage::account_stake(&env, &account, &token),
        ) {
            (Some(info), Some(stake)) => accrual::owed(&env, &info, &stake),
            _ => Ok(arith::zero(&env)),
        }
    }

    /// Real-time redeemable rewards for an account across all types.
    pub fn get_total_owed(env: Env, account: Address) -> Result<U256, ContractError> {
        Self::require_initialized(&env)?;
        let projection = accrual::project(&env)?;
        let mut total = arith::zero(&env);
        for t in storage::token_list(&env).iter() {
            if let Some(info) = projection.infos.get(t.clone()) {
                if let Some(stake) = storage::account_stake(&env, &account, &t) {
                    let owed = accrual::owed(&env, &info, &stake)?;
                    total = arith::wrapping_add(&env, &total, &owed);
                }
            }
        }
        Ok(total)
    }

    /// Live value-weighted shares of one account in one type.
    pub fn get_shares(env: Env, account: Address, token: Address) -> Result<U256, ContractError> {
        let info =
            storage::token_info(&env, &token).ok_or(ContractError::TokenNotRegistered)?;
        let staked = storage::account_stake(&env, &account, &token)
            .map(|s| s.staked_balance)
            .unwrap_or(0);
        accrual::shares_of(&env, &info.value_oracle, staked)
    }

    /// Live value-weighted shares of a whole type.
    pub fn get_token_shares(env: Env, token: Address) -> Result<U256, ContractError> {
        let info =
            storage::token_info(&env, &token).ok_or(ContractError::TokenNotRegistered)?;
        accrual::shares_of(&env, &info.value_oracle, info.total_staked)
    }

    /// Live value-weighted shares across every registered type.
    pub fn get_total_shares(env: Env) -> Result<U256, ContractError> {
        let mut total = arith::zero(&env);
        for t in storage::token_list(&env).iter() {
            if let Some(info) = storage::token_info(&env, &t) {
                let s = accrual::shares_of(&env, &info.value_oracle, info.total_staked)?;
                total = arith::checked_add(&env, &total, &s)
                    .ok_or(ContractError::ArithmeticOverflow)?;
            }
        }
        Ok(total)
    }

    // ── Internal helpers ────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !storage::is_initialized(env) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Guard: authenticate `caller` and revert unless it is the owner.
    fn require_owner(env: &Env, caller: &Address) -> Result<(), ContractError> {
        caller.require_auth();
        if !admin::is_owner(env, caller) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn load_config(env: &Env) -> Result<LedgerConfig, ContractError> {
        storage::config(env).ok_or(ContractError::NotInitialized)
    }

    /// Reject oracles that cannot produce a usable quote right now.
    fn validate_oracle(env: &Env, oracle: &Address) -> Result<(), ContractError> {
        let quote = ValueOracleClient::new(env, oracle).value_per_unit();
        if !quote.is_valid() {
            return Err(ContractError::InvalidOracleValue);
        }
        Ok(())
    }

    /// Balance mutation shared by the unstake entry points. Assumes the
    /// caller has already checkpointed.
    fn unstake_inner(
        env: &Env,
        staker: &Address,
        token: &Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        let mut info =
            storage::token_info(env, token).ok_or(ContractError::TokenNotRegistered)?;
        let mut stake =
            storage::account_stake(env, staker, token).ok_or(ContractError::InsufficientStake)?;
        if amount > stake.staked_balance {
            return Err(ContractError::InsufficientStake);
        }

        stake.staked_balance -= amount;
        info.total_staked -= amount;
        if stake.staked_balance == 0 {
            // Forfeits catch-up against future index growth; the realised
            // balance stays redeemable.
            stake.accrued_rewards_per_token_last = arith::zero(env);
        }
        let remaining = stake.staked_balance;

        if remaining == 0 && stake.last_rewards_balance == arith::zero(env) {
            storage::remove_account_stake(env, staker, token);
        } else {
            storage::put_account_stake(env, staker, token, &stake);
        }
        storage::put_token_info(env, token, &info);

        token::Client::new(env, token).transfer(
            &env.current_contract_address(),
            staker,
            &amount,
        );

        events::publish_unstaked(env, staker.clone(), token.clone(), amount, remaining);

        Ok(())
    }

    /// Deduct `amount` from an account's realised rewards for one type and
    /// advance the redeemed counters. Prunes the record once both the stake
    /// and the realised balance are exhausted.
    fn debit_rewards(
        env: &Env,
        staker: &Address,
        token: &Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        let amount_u = arith::from_amount(env, amount);
        let mut stake =
            storage::account_stake(env, staker, token).ok_or(ContractError::InsufficientRewards)?;
        if amount_u > stake.last_rewards_balance {
            return Err(ContractError::InsufficientRewards);
        }
        stake.last_rewards_balance = stake.last_rewards_balance.sub(&amount_u);

        let mut info =
            storage::token_info(env, token).ok_or(ContractError::TokenNotRegistered)?;
        info.total_rewards_redeemed_for =
            arith::wrapping_add(env, &info.total_rewards_redeemed_for, &amount_u);
        storage::put_token_info(env, token, &info);

        storage::put_total_redeemed(
            env,
            &arith::wrapping_add(env, &storage::total_redeemed(env), &amount_u),
        );

        if stake.staked_balance == 0 && stake.last_rewards_balance == arith::zero(env) {
            storage::remove_account_stake(env, staker, token);
        } else {
            storage::put_account_stake(env, staker, token, &stake);
        }

        Ok(())
    }

    /// Pay out rewards, optionally through the configured unwrapper so the
    /// recipient receives the underlying asset instead of the wrapped form.
    fn pay_reward(
        env: &Env,
        config: &LedgerConfig,
        to: &Address,
        amount: i128,
        unwrap: bool,
    ) -> Result<(), ContractError> {
        let client = token::Client::new(env, &config.rewards_token);
        if unwrap {
            let unwrapper = config
                .reward_unwrapper
                .clone()
                .ok_or(ContractError::UnwrapNotSupported)?;
            client.transfer(&env.current_contract_address(), &unwrapper, &amount);
            RewardUnwrapperClient::new(env, &unwrapper).unwrap_to(to, &amount);
        } else {
            client.transfer(&env.current_contract_address(), to, &amount);
        }
        Ok(())
    }

    /// Redemption shared by `redeem_all_rewards`, `exit`, and `exit_from`.
    /// Assumes the caller has already checkpointed.
    fn redeem_all_inner(
        env: &Env,
        staker: &Address,
        unwrap: bool,
    ) -> Result<i128, ContractError> {
        let zero = arith::zero(env);
        let mut total: i128 = 0;
        for t in storage::token_list(env).iter() {
            if let Some(stake) = storage::account_stake(env, staker, &t) {
                if stake.last_rewards_balance == zero {
                    continue;
                }
                let take = arith::to_amount(&stake.last_rewards_balance)
                    .ok_or(ContractError::ArithmeticOverflow)?;
                Self::debit_rewards(env, staker, &t, take)?;
                events::publish_rewards_redeemed(env, staker.clone(), t.clone(), take, unwrap);
                total = total
                    .checked_add(take)
                    .ok_or(ContractError::ArithmeticOverflow)?;
            }
        }
        if total > 0 {
            let config = Self::load_config(env)?;
            Self::pay_reward(env, &config, staker, total, unwrap)?;
        }
        Ok(total)
    }
}

// ── Test-only entry points ───────────────────────────────────────────────────

#[cfg(any(test, feature = "testutils"))]
#[contractimpl]
impl RewardsLedger {
    /// Place the global counters at arbitrary points so wraparound
    /// behaviour near 2^256 can be exercised end-to-end.
    pub fn seed_counters(env: Env, total_redeemed: U256, last_total_accrued: U256) {
        storage::put_total_redeemed(&env, &total_redeemed);
        storage::put_last_total_accrued(&env, &last_total_accrued);
    }

    /// Pre-load a type's apportioned-rewards counter, e.g. to model a
    /// backlog pending against a type whose stake has gone to zero.
    pub fn seed_token_rewards(env: Env, token: Address, rewards_for_token: U256) {
        if let Some(mut info) = storage::token_info(&env, &token) {
            info.rewards_for_token = rewards_for_token;
            storage::put_token_info(&env, &token, &info);
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_registry;

#[cfg(test)]
mod test_wraparound;
