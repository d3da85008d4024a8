//! Subnetting engine.
//!
//! Splits a parent prefix into `2^add_bits` equally sized children. Child
//! number `index` is `parent_network | index << (128 - new_len)`, so the
//! indices `0..2^add_bits` map one-to-one onto disjoint children that exactly
//! cover the parent.

use crate::error::{Ipv6Error, Result};
use crate::models::count::{pow2, serialize_biguint, serialize_u128};
use crate::models::{check_prefix_len, compress_u128, from_u128, Ipv6Prefix, MAX_LENGTH};
use num_bigint::BigUint;
use serde::Serialize;

/// One child subnet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subprefix {
    /// Network address, expanded form.
    pub address: String,
    #[serde(rename = "prefixLen")]
    pub prefix_len: u8,
    /// Compressed CIDR, e.g. "2001:db8:0:300::/56".
    pub cidr: String,
    /// Expanded CIDR.
    #[serde(rename = "cidrFull")]
    pub cidr_full: String,
}

impl From<Ipv6Prefix> for Subprefix {
    fn from(p: Ipv6Prefix) -> Self {
        let network = p.network();
        Subprefix {
            address: from_u128(network),
            prefix_len: p.len,
            cidr: format!("{}/{}", compress_u128(network), p.len),
            cidr_full: format!("{}/{}", from_u128(network), p.len),
        }
    }
}

/// Validate a split of `parent` by `add_bits` and return the child length.
fn child_len(parent: &Ipv6Prefix, add_bits: u8) -> Result<u8> {
    let new_len = u32::from(parent.len) + u32::from(add_bits);
    if new_len > u32::from(MAX_LENGTH) {
        return Err(Ipv6Error::PrefixTooLong(new_len));
    }
    if add_bits < 1 {
        return Err(Ipv6Error::InvalidArgument(
            "add_bits must be >= 1".to_string(),
        ));
    }
    Ok(new_len as u8)
}

/// Child number `index` of `parent` split by `add_bits`.
pub(crate) fn child_prefix(parent: &Ipv6Prefix, add_bits: u8, index: u128) -> Result<Ipv6Prefix> {
    let new_len = child_len(parent, add_bits)?;
    // add_bits == 128 admits every u128 index.
    if add_bits < MAX_LENGTH && index >= 1u128 << add_bits {
        return Err(Ipv6Error::IndexOutOfRange { index, add_bits });
    }
    let network = parent.network() | (index << (MAX_LENGTH - new_len));
    Ipv6Prefix::from_parts(network, new_len)
}

/// Compute the `index`-th child subnet of `parent_cidr` with `add_bits` more
/// prefix bits.
///
/// # Examples
/// ```
/// use ipv6_subnet_calc::subprefix;
/// assert_eq!(subprefix("2001:db8::/48", 8, 3).unwrap().cidr, "2001:db8:0:300::/56");
/// ```
pub fn subprefix(parent_cidr: &str, add_bits: u8, index: u128) -> Result<Subprefix> {
    let parent = Ipv6Prefix::new(parent_cidr)?;
    let child = child_prefix(&parent, add_bits, index)?;
    log::trace!(
        "subprefix({parent_cidr}, +{add_bits}, {index}) = {}",
        child.cidr()
    );
    Ok(child.into())
}

/// First children of a split plus the very last one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubnetList {
    pub subnets: Vec<Subprefix>,
    /// Last child, `None` when `subnets` already lists all of them.
    pub last: Option<Subprefix>,
    #[serde(serialize_with = "serialize_biguint")]
    pub total: BigUint,
    #[serde(rename = "newPrefixLen")]
    pub new_prefix_len: u8,
}

/// List the first `max_show` children of a split and the last one, without
/// materializing all `2^add_bits` of them.
pub fn list_subnets(parent_cidr: &str, add_bits: u8, max_show: usize) -> Result<SubnetList> {
    let parent = Ipv6Prefix::new(parent_cidr)?;
    let new_prefix_len = child_len(&parent, add_bits)?;
    let total = pow2(add_bits);

    let show = if total <= BigUint::from(max_show) {
        // total <= max_show fits in usize
        u128::try_from(&total).unwrap_or(u128::MAX) as usize
    } else {
        max_show
    };

    let subnets = (0..show as u128)
        .map(|i| child_prefix(&parent, add_bits, i).map(Subprefix::from))
        .collect::<Result<Vec<_>>>()?;

    let last = if total > BigUint::from(max_show) {
        let last_index = u128::try_from(&(total.clone() - 1u32))
            .map_err(|e| Ipv6Error::InvalidArgument(format!("last index: {e}")))?;
        Some(child_prefix(&parent, add_bits, last_index)?.into())
    } else {
        None
    };

    log::debug!(
        "list_subnets({parent_cidr}, +{add_bits}) total={total} shown={}",
        subnets.len()
    );
    Ok(SubnetList {
        subnets,
        last,
        total,
        new_prefix_len,
    })
}

/// A child subnet tagged with its absolute index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexedSubprefix {
    #[serde(serialize_with = "serialize_u128")]
    pub index: u128,
    #[serde(flatten)]
    pub subnet: Subprefix,
}

/// One page of children, see [`enumerate_subprefixes`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubprefixWindow {
    #[serde(serialize_with = "serialize_biguint")]
    pub total: BigUint,
    pub subnets: Vec<IndexedSubprefix>,
    pub parent_prefix_len: u8,
    pub target_prefix: u8,
    #[serde(serialize_with = "serialize_u128")]
    pub offset: u128,
    pub limit: usize,
}

/// Page through all `/target_prefix` children of `parent_cidr`.
///
/// Returns at most `limit` children starting at index `offset`. An offset
/// past the end gives an empty page, not an error. A `target_prefix` equal to
/// the parent length yields the parent itself as the only child.
pub fn enumerate_subprefixes(
    parent_cidr: &str,
    target_prefix: u8,
    offset: u128,
    limit: usize,
) -> Result<SubprefixWindow> {
    let parent = Ipv6Prefix::new(parent_cidr)?;
    let target_prefix = check_prefix_len(target_prefix)?;
    if target_prefix < parent.len {
        return Err(Ipv6Error::InvalidArgument(format!(
            "target prefix /{target_prefix} must be >= parent /{}",
            parent.len
        )));
    }
    if limit < 1 {
        return Err(Ipv6Error::InvalidArgument(
            "limit must be >= 1".to_string(),
        ));
    }

    let add_bits = target_prefix - parent.len;
    let total = pow2(add_bits);
    let mut subnets = Vec::new();

    if BigUint::from(offset) < total {
        let remaining = total.clone() - offset;
        let count = if remaining < BigUint::from(limit) {
            u128::try_from(&remaining).unwrap_or(0) as usize
        } else {
            limit
        };
        for i in 0..count as u128 {
            let index = offset + i;
            let child = if add_bits == 0 {
                Ipv6Prefix::from_parts(parent.network(), parent.len)?
            } else {
                child_prefix(&parent, add_bits, index)?
            };
            subnets.push(IndexedSubprefix {
                index,
                subnet: child.into(),
            });
        }
    }

    log::debug!(
        "enumerate_subprefixes({parent_cidr} -> /{target_prefix}) total={total} offset={offset} returned={}",
        subnets.len()
    );
    Ok(SubprefixWindow {
        total,
        subnets,
        parent_prefix_len: parent.len,
        target_prefix,
        offset,
        limit,
    })
}

/// Number of children for `add_bits` extra prefix bits, `2^add_bits`.
pub fn subnet_count(add_bits: u8) -> Result<BigUint> {
    Ok(pow2(check_prefix_len(add_bits)?))
}

/// Number of addresses in a `/len`, `2^(128 - len)`.
pub fn address_count_for_prefix(len: u8) -> Result<BigUint> {
    Ok(pow2(MAX_LENGTH - check_prefix_len(len)?))
}

/// Number of `/new_len` subnets inside a `/old_len`.
pub fn subnet_count_between(old_len: u8, new_len: u8) -> Result<BigUint> {
    let old_len = check_prefix_len(old_len)?;
    let new_len = check_prefix_len(new_len)?;
    if new_len < old_len {
        return Err(Ipv6Error::InvalidArgument(format!(
            "new prefix /{new_len} must be >= old prefix /{old_len}"
        )));
    }
    Ok(pow2(new_len - old_len))
}

/// Fewest extra bits (at least 1) giving `needed` subnets.
pub fn bits_for_subnet_count(needed: u128) -> Result<u8> {
    if needed == 0 {
        return Err(Ipv6Error::InvalidArgument(
            "subnet count must be >= 1".to_string(),
        ));
    }
    let bits = if needed == 1 {
        0
    } else {
        (128 - (needed - 1).leading_zeros()) as u8
    };
    Ok(bits.max(1))
}
