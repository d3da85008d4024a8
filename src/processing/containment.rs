//! Containment and overlap checks between addresses and prefixes.

use crate::error::Result;
use crate::models::{compress_u128, prefix_mask, to_u128, Ipv6Prefix};
use serde::Serialize;

/// True if `addr` lies inside `cidr`.
///
/// # Examples
/// ```
/// use ipv6_subnet_calc::prefix_contains;
/// assert!(prefix_contains("2001:db8::/48", "2001:db8::1").unwrap());
/// assert!(!prefix_contains("2001:db8::/48", "2001:db9::1").unwrap());
/// ```
pub fn prefix_contains(cidr: &str, addr: &str) -> Result<bool> {
    let net = Ipv6Prefix::new(cidr)?;
    let addr = to_u128(addr)?;
    let mask = prefix_mask(net.len)?;
    Ok(addr & mask == net.addr & mask)
}

/// Whether operand A was given as a bare address or as a prefix.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperandKind {
    Address,
    Prefix,
}

/// Result of [`containment_overlap_check`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainmentCheck {
    #[serde(rename = "A_in_B")]
    pub a_in_b: bool,
    /// `None` when A is a bare address.
    pub overlap: Option<bool>,
    #[serde(rename = "aType")]
    pub a_kind: OperandKind,
    #[serde(rename = "A_normalized")]
    pub a_normalized: String,
    #[serde(rename = "B_normalized")]
    pub b_normalized: String,
}

/// True if the address ranges of two prefixes intersect.
///
/// Two aligned blocks either nest or are disjoint, so it is enough to compare
/// the networks under the shorter of the two lengths.
pub fn prefixes_overlap(a: &Ipv6Prefix, b: &Ipv6Prefix) -> bool {
    let shorter = a.len.min(b.len);
    let mask = if shorter == 0 {
        0
    } else {
        u128::MAX << (128 - shorter)
    };
    a.addr & mask == b.addr & mask
}

/// Check whether A (address or prefix) lies in prefix B, and for a prefix A
/// whether the two ranges overlap.
///
/// `A_in_B` tests A's address part against B.
pub fn containment_overlap_check(a: &str, b: &str) -> Result<ContainmentCheck> {
    let b_prefix = Ipv6Prefix::new(b)?;
    let a = a.trim();

    let check = if a.contains('/') {
        let a_prefix = Ipv6Prefix::new(a)?;
        ContainmentCheck {
            a_in_b: b_prefix.contains(a_prefix.addr),
            overlap: Some(prefixes_overlap(&a_prefix, &b_prefix)),
            a_kind: OperandKind::Prefix,
            a_normalized: a_prefix.cidr(),
            b_normalized: b_prefix.cidr(),
        }
    } else {
        let a_addr = to_u128(a)?;
        ContainmentCheck {
            a_in_b: b_prefix.contains(a_addr),
            overlap: None,
            a_kind: OperandKind::Address,
            a_normalized: compress_u128(a_addr),
            b_normalized: b_prefix.cidr(),
        }
    };
    log::debug!(
        "containment_overlap_check({a}, {b}) A_in_B={} overlap={:?}",
        check.a_in_b,
        check.overlap
    );
    Ok(check)
}
