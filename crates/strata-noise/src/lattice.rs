//! Deterministic lattice hash.
//!
//! Maps `(seed, x, y)` on the integer lattice to a pseudo-random value in
//! `[0, 1)`. The mixing is fixed and non-cryptographic; identical inputs give
//! identical outputs on every platform because only wrapping `i32` arithmetic
//! is involved.

/// Prime applied to lattice X coordinates before hashing.
pub const PRIME_X: i32 = 501_125_321;
/// Prime applied to lattice Y coordinates before hashing.
pub const PRIME_Y: i32 = 1_136_930_381;

const SEED_OFFSET: i32 = 0x9E37_79B9_u32 as i32;
const X_OFFSET: i32 = 0x85EB_CA6B_u32 as i32;
const Y_OFFSET: i32 = 0xC2B2_AE35_u32 as i32;
const HASH_MULTIPLIER: i32 = 0x27D4_EB2D;

const HASH_MASK: i32 = 0x7FFF_FFFF;
const HASH_SCALE: f64 = 2_147_483_647.0;

/// Largest `f32` strictly below 1.0.
const MAX_BELOW_ONE: f32 = 1.0 - f32::EPSILON / 2.0;

/// Primes a lattice X coordinate.
#[inline]
pub fn prime_x(x: i32) -> i32 {
    x.wrapping_mul(PRIME_X)
}

/// Primes a lattice Y coordinate.
#[inline]
pub fn prime_y(y: i32) -> i32 {
    y.wrapping_mul(PRIME_Y)
}

/// Mixes a seed with two primed lattice coordinates.
#[inline]
pub fn hash(seed: i32, x_primed: i32, y_primed: i32) -> i32 {
    let mixed = seed.wrapping_add(SEED_OFFSET)
        ^ x_primed.wrapping_add(X_OFFSET)
        ^ y_primed.wrapping_add(Y_OFFSET);
    mixed.wrapping_mul(HASH_MULTIPLIER)
}

/// Lattice value for already-primed coordinates, in `[0, 1)`.
///
/// The noise paths prime each cell corner once and step neighbors by adding
/// the prime, which matches `prime_x(x + 1)` under wrapping arithmetic.
#[inline]
pub fn primed_value(seed: i32, x_primed: i32, y_primed: i32) -> f32 {
    let masked = hash(seed, x_primed, y_primed) & HASH_MASK;
    ((masked as f64 / HASH_SCALE) as f32).min(MAX_BELOW_ONE)
}

/// Lattice value at integer world coordinates, in `[0, 1)`.
#[inline]
pub fn hash_float(seed: i32, x: i32, y: i32) -> f32 {
    primed_value(seed, prime_x(x), prime_y(y))
}
