//! 256-bit counter arithmetic.
//!
//! Two disciplines coexist here and must never be merged:
//!
//! - Monotonic counters (`rewards_for_token`, the per-token index, the
//!   redeemed totals) live in Z/2^256. Differencing and accumulating them
//!   uses [`wrapping_add`] / [`wrapping_sub`], which reduce mod 2^256
//!   instead of trapping.
//! - Reward-rate products (Δ × shares, Δ × [`multiplier`], stake × Δindex)
//!   use [`checked_mul`] / [`mul_div_floor`], which report overflow of the
//!   intermediate product so the caller can surface an arithmetic error.
//!
//! The host's own `U256` operators trap on overflow, so the wrapping
//! variants are built from ordering comparisons plus in-range host ops.

use soroban_sdk::{Env, U256};

/// Fixed-point scale for the per-staked-unit reward index.
///
/// 10^36 preserves sub-unit precision across the full i128 range of staked
/// balances without a floating-point representation.
pub fn multiplier(env: &Env) -> U256 {
    U256::from_u128(env, 1_000_000_000_000_000_000_000_000_000_000_000_000u128)
}

pub fn zero(env: &Env) -> U256 {
    U256::from_u32(env, 0)
}

fn one(env: &Env) -> U256 {
    U256::from_u32(env, 1)
}

/// 2^256 − 1, the largest representable counter value.
pub fn max(env: &Env) -> U256 {
    U256::from_parts(env, u64::MAX, u64::MAX, u64::MAX, u64::MAX)
}

/// Widen a non-negative token amount to a counter.
pub fn from_amount(env: &Env, amount: i128) -> U256 {
    U256::from_u128(env, amount.max(0) as u128)
}

/// Narrow a counter back to a token amount.
///
/// Fails when the value does not fit, which redemption paths report as an
/// arithmetic overflow rather than silently truncating.
pub fn to_amount(value: &U256) -> Option<i128> {
    value.to_u128().and_then(|v| i128::try_from(v).ok())
}

/// `a + b` mod 2^256.
pub fn wrapping_add(env: &Env, a: &U256, b: &U256) -> U256 {
    let room = max(env).sub(a);
    if *b <= room {
        a.add(b)
    } else {
        // a + b − 2^256 == b − (2^256 − a) == b − room − 1
        b.sub(&room).sub(&one(env))
    }
}

/// `a − b` mod 2^256.
pub fn wrapping_sub(env: &Env, a: &U256, b: &U256) -> U256 {
    if a >= b {
        a.sub(b)
    } else {
        // a − b + 2^256 == (2^256 − 1) − (b − a) + 1
        max(env).sub(&b.sub(a)).add(&one(env))
    }
}

/// `a + b`, or `None` when the true sum exceeds 2^256 − 1.
pub fn checked_add(env: &Env, a: &U256, b: &U256) -> Option<U256> {
    if *b <= max(env).sub(a) {
        Some(a.add(b))
    } else {
        None
    }
}

/// `a × b`, or `None` when the true product exceeds 2^256 − 1.
pub fn checked_mul(env: &Env, a: &U256, b: &U256) -> Option<U256> {
    let zero = zero(env);
    if *a == zero || *b == zero {
        return Some(zero);
    }
    // b ≤ ⌊max / a⌋ exactly characterises a × b ≤ max.
    if *b <= max(env).div(a) {
        Some(a.mul(b))
    } else {
        None
    }
}

/// `⌊a × b / d⌋` with a checked product. `d` must be nonzero.
pub fn mul_div_floor(env: &Env, a: &U256, b: &U256, d: &U256) -> Option<U256> {
    checked_mul(env, a, b).map(|p| p.div(d))
}

// ── Unit tests ──────────────────────────────────────────────────────────────
// Pure counter arithmetic; only an Env for host-integer construction.
