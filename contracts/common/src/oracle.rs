//! The pluggable value-oracle interface.
//!
//! Each staking-token type registered with the ledger is bound to exactly
//! one oracle contract reporting the live reward-token-equivalent value of
//! one unit of that type. Oracles are read-only collaborators: they must
//! never mutate ledger state.

use soroban_sdk::{contractclient, contracttype, Env};

/// A live value quote expressed as a fraction, so integer-only oracles can
/// report sub-unit prices without a fixed-point convention of their own.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ValueFraction {
    pub numerator: i128,
    pub denominator: i128,
}

impl ValueFraction {
    /// A quote is usable when the denominator is positive and the
    /// numerator non-negative. Zero numerators are valid (a worthless
    /// pool earns no share of rewards).
    pub fn is_valid(&self) -> bool {
        self.denominator > 0 && self.numerator >= 0
    }
}

/// Interface every value oracle must export.
#[contractclient(name = "ValueOracleClient")]
pub trait ValueOracle {
    /// Reward-token-equivalent value of one unit of the staking token.
    fn value_per_unit(env: Env) -> ValueFraction;
}
