//! Stepping to neighbouring networks of the same size.

use crate::error::{Ipv6Error, Result};
use crate::models::count::{pow2, serialize_biguint};
use crate::models::{compress_u128, Ipv6Prefix};
use num_bigint::BigUint;
use serde::Serialize;

/// Result of [`next_previous_network`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkNeighbours {
    /// Normalized input prefix.
    pub base_prefix: String,
    pub prefix_len: u8,
    /// Addresses per network, `2^(128 - prefix_len)`.
    #[serde(serialize_with = "serialize_biguint")]
    pub block_size: BigUint,
    /// `None` past the top of the address space.
    pub next_prefix: Option<String>,
    /// `None` below address 0.
    pub previous_prefix: Option<String>,
}

/// Network `steps` blocks after or before `prefix`, without wrapping around.
///
/// `None` whenever the move would leave the 128-bit address space.
pub fn step_network(prefix: &Ipv6Prefix, steps: u128, forward: bool) -> Option<Ipv6Prefix> {
    // A /0 block is 2^128 wide; there is nothing next to it.
    let block = 1u128.checked_shl(u32::from(prefix.host_bits()))?;
    let distance = steps.checked_mul(block)?;
    let network = prefix.network();
    let moved = if forward {
        network.checked_add(distance)?
    } else {
        network.checked_sub(distance)?
    };
    Some(Ipv6Prefix {
        addr: moved,
        len: prefix.len,
    })
}

/// Find the next and previous network of the same length as `prefix`,
/// `steps` blocks away.
///
/// # Examples
/// ```
/// use ipv6_subnet_calc::next_previous_network;
/// let n = next_previous_network("2001:db8::/64", 1).unwrap();
/// assert_eq!(n.next_prefix.as_deref(), Some("2001:db8:0:1::/64"));
/// ```
pub fn next_previous_network(prefix: &str, steps: u128) -> Result<NetworkNeighbours> {
    if steps < 1 {
        return Err(Ipv6Error::InvalidArgument(
            "steps must be a positive integer".to_string(),
        ));
    }
    let base = Ipv6Prefix::new(prefix)?;
    let next_prefix = step_network(&base, steps, true).map(|p| p.cidr());
    let previous_prefix = step_network(&base, steps, false).map(|p| p.cidr());

    if next_prefix.is_none() || previous_prefix.is_none() {
        log::debug!(
            "next_previous_network({prefix}, {steps}) reached the edge of the address space"
        );
    }

    Ok(NetworkNeighbours {
        base_prefix: format!("{}/{}", compress_u128(base.network()), base.len),
        prefix_len: base.len,
        block_size: pow2(base.host_bits()),
        next_prefix,
        previous_prefix,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_previous() {
        let n = next_previous_network("2001:db8::/64", 1).unwrap();
        assert_eq!(n.base_prefix, "2001:db8::/64");
        assert_eq!(n.prefix_len, 64);
        assert_eq!(n.block_size.to_string(), "18446744073709551616");
        assert_eq!(n.next_prefix.as_deref(), Some("2001:db8:0:1::/64"));
        assert_eq!(
            n.previous_prefix.as_deref(),
            Some("2001:db7:ffff:ffff::/64")
        );
    }

    #[test]
    fn test_steps_and_host_bits() {
        let n = next_previous_network("2001:db8:0:100::1234/56", 3).unwrap();
        assert_eq!(n.base_prefix, "2001:db8:0:100::/56");
        assert_eq!(n.next_prefix.as_deref(), Some("2001:db8:0:400::/56"));
        assert_eq!(
            n.previous_prefix.as_deref(),
            Some("2001:db7:ffff:fe00::/56")
        );
    }

    #[test]
    fn test_edges_do_not_wrap() {
        let top = next_previous_network("ffff:ffff:ffff:ffff::/64", 1).unwrap();
        assert_eq!(top.next_prefix, None);
        assert_eq!(
            top.previous_prefix.as_deref(),
            Some("ffff:ffff:ffff:fffe::/64")
        );

        let bottom = next_previous_network("::/64", 1).unwrap();
        assert_eq!(bottom.previous_prefix, None);
        assert_eq!(bottom.next_prefix.as_deref(), Some("0:0:0:1::/64"));

        let far = next_previous_network("8000::/1", 2).unwrap();
        assert_eq!(far.next_prefix, None);
        assert_eq!(far.previous_prefix, None);
    }

    #[test]
    fn test_whole_space_and_hosts() {
        let all = next_previous_network("::/0", 1).unwrap();
        assert_eq!(all.next_prefix, None);
        assert_eq!(all.previous_prefix, None);
        assert_eq!(
            all.block_size.to_string(),
            "340282366920938463463374607431768211456"
        );

        let host = next_previous_network("::1/128", 1).unwrap();
        assert_eq!(host.next_prefix.as_deref(), Some("::2/128"));
        assert_eq!(host.previous_prefix.as_deref(), Some("::/128"));
        assert_eq!(host.block_size, BigUint::from(1u8));
    }

    #[test]
    fn test_huge_steps_overflow_to_none() {
        let n = next_previous_network("2001:db8::/32", u128::MAX).unwrap();
        assert_eq!(n.next_prefix, None);
        assert_eq!(n.previous_prefix, None);
    }

    #[test]
    fn test_invalid_input() {
        assert!(matches!(
            next_previous_network("2001:db8::/64", 0),
            Err(Ipv6Error::InvalidArgument(_))
        ));
        assert!(next_previous_network("2001:db8::", 1).is_err());
    }
}
