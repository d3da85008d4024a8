//! Big counts of addresses and subnets.
//!
//! Counts reach 2^128 (all addresses of `::/0`), one more than `u128` holds,
//! so they are [`BigUint`] values serialized as decimal strings.

use num_bigint::BigUint;
use serde::Serializer;

/// `2^exp` as a [`BigUint`].
pub fn pow2(exp: u8) -> BigUint {
    BigUint::from(1u8) << usize::from(exp)
}

/// Serialize a [`BigUint`] as a decimal string.
pub fn serialize_biguint<S>(n: &BigUint, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&n.to_str_radix(10))
}

/// Serialize a `u128` as a decimal string; JSON numbers stop at 2^64.
pub fn serialize_u128<S>(n: &u128, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&n.to_string())
}
