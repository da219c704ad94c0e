#![no_std]

//! Reference value oracle reporting an admin-settable fixed fraction.
//!
//! Production deployments are expected to bind pool-backed oracles to the
//! ledger; this contract is the minimal conforming implementation, useful
//! for stable-rate pools and for integration tests.


use common::oracle::ValueFraction;
use common::CommonError;
use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, Symbol};

const ADMIN: Symbol = symbol_short!("ADMIN");
const VALUE: Symbol = symbol_short!("VALUE");

#[contract]
pub struct FixedRateOracle;

#[contractimpl]
impl FixedRateOracle {
    /// Bootstrap the oracle with an admin and its initial quote.
    pub fn initialize(
        env: Env,
        admin: Address,
        numerator: i128,
        denominator: i128,
    ) -> Result<(), CommonError> {
        if env.storage().instance().has(&ADMIN) {
            return Err(CommonError::AlreadyInitialized);
        }
        let value = ValueFraction {
            numerator,
            denominator,
        };
        if !value.is_valid() {
            return Err(CommonError::InvalidInput);
        }

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&VALUE, &value);

        Ok(())
    }

    /// Replace the reported quote. Admin only.
    pub fn set_value(
        env: Env,
        caller: Address,
        numerator: i128,
        denominator: i128,
    ) -> Result<(), CommonError> {
        caller.require_auth();
        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(CommonError::NotInitialized)?;
        if caller != admin {
            return Err(CommonError::AccessDenied);
        }

        let value = ValueFraction {
            numerator,
            denominator,
        };
        if !value.is_valid() {
            return Err(CommonError::InvalidInput);
        }

        env.storage().instance().set(&VALUE, &value);

        Ok(())
    }

    /// Reward-token-equivalent value of one unit of the staking token.
    ///
    /// Part of the value-oracle interface consumed by the ledger; must not
    /// mutate state.
    pub fn value_per_unit(env: Env) -> Result<ValueFraction, CommonError> {
        env.storage()
            .instance()
            .get(&VALUE)
            .ok_or(CommonError::NotInitialized)
    }

    pub fn get_admin(env: Env) -> Result<Address, CommonError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(CommonError::NotInitialized)
    }
}
