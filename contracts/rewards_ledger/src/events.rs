use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the ledger is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub rewards_token: Address,
    pub timestamp: u64,
}

/// Fired when a staking-token type is registered.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenAddedEvent {
    pub token: Address,
    pub oracle: Address,
    pub timestamp: u64,
}

/// Fired when a type's oracle binding is replaced.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OracleChangedEvent {
    pub token: Address,
    pub old_oracle: Address,
    pub new_oracle: Address,
    pub timestamp: u64,
}

/// Fired when a type is tombstoned for new stakes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenRemovedEvent {
    pub token: Address,
    pub timestamp: u64,
}

/// Fired when an account deposits stake.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub staker: Address,
    pub token: Address,
    pub amount: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

/// Fired when an account withdraws stake.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakedEvent {
    pub staker: Address,
    pub token: Address,
    pub amount: i128,
    pub remaining_balance: i128,
    pub timestamp: u64,
}

/// Fired once per token type touched by a redemption.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsRedeemedEvent {
    pub staker: Address,
    pub token: Address,
    pub amount: i128,
    pub unwrapped: bool,
    pub timestamp: u64,
}

/// Fired when an owner transfer is proposed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferProposedEvent {
    pub current_owner: Address,
    pub proposed_owner: Address,
    pub timestamp: u64,
}

/// Fired when an owner transfer is accepted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferAcceptedEvent {
    pub old_owner: Address,
    pub new_owner: Address,
    pub timestamp: u64,
}

/// Fired when a pending owner transfer is cancelled.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferCancelledEvent {
    pub owner: Address,
    pub cancelled_proposed: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, owner: Address, rewards_token: Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            rewards_token,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_token_added(env: &Env, token: Address, oracle: Address) {
    env.events().publish(
        (symbol_short!("TOK_ADD"), token.clone()),
        TokenAddedEvent {
            token,
            oracle,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_oracle_changed(env: &Env, token: Address, old_oracle: Address, new_oracle: Address) {
    env.events().publish(
        (symbol_short!("ORCL_SET"), token.clone()),
        OracleChangedEvent {
            token,
            old_oracle,
            new_oracle,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_token_removed(env: &Env, token: Address) {
    env.events().publish(
        (symbol_short!("TOK_RMV"), token.clone()),
        TokenRemovedEvent {
            token,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(env: &Env, staker: Address, token: Address, amount: i128, new_total_staked: i128) {
    env.events().publish(
        (symbol_short!("STAKED"), staker.clone(), token.clone()),
        StakedEvent {
            staker,
            token,
            amount,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unstaked(
    env: &Env,
    staker: Address,
    token: Address,
    amount: i128,
    remaining_balance: i128,
) {
    env.events().publish(
        (symbol_short!("UNSTAKED"), staker.clone(), token.clone()),
        UnstakedEvent {
            staker,
            token,
            amount,
            remaining_balance,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rewards_redeemed(
    env: &Env,
    staker: Address,
    token: Address,
    amount: i128,
    unwrapped: bool,
) {
    env.events().publish(
        (symbol_short!("RDMD"), staker.clone(), token.clone()),
        RewardsRedeemedEvent {
            staker,
            token,
            amount,
            unwrapped,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_transfer_proposed(env: &Env, current_owner: Address, proposed_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_PROP"), current_owner.clone()),
        OwnerTransferProposedEvent {
            current_owner,
            proposed_owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_transfer_accepted(env: &Env, old_owner: Address, new_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_ACPT"), new_owner.clone()),
        OwnerTransferAcceptedEvent {
            old_owner,
            new_owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_transfer_cancelled(env: &Env, owner: Address, cancelled_proposed: Address) {
    env.events().publish(
        (symbol_short!("OWN_CNCL"), owner.clone()),
        OwnerTransferCancelledEvent {
            owner,
            cancelled_proposed,
            timestamp: env.ledger().timestamp(),
        },
    );
}
