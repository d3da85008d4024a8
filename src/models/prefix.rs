//! IPv6 prefix (CIDR) type, masks and network ranges.
//!
//! Provides [`Ipv6Prefix`] for `address/length` values, along with the mask
//! and range helpers the subnetting code is built on.

use super::address::{compress_u128, from_u128, to_u128, ALL_ONES};
use crate::error::{Ipv6Error, Result};
use regex::Regex;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::OnceLock;

/// Maximum IPv6 prefix length (128 bits).
pub const MAX_LENGTH: u8 = 128;

/// Regex splitting `address/length`.
static CIDR_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_cidr_regex() -> &'static Regex {
    CIDR_REGEX.get_or_init(|| Regex::new(r"^(.+?)/(\d+)$").expect("Invalid Regex"))
}

/// Reject prefix lengths above /128.
pub fn check_prefix_len(len: u8) -> Result<u8> {
    if len > MAX_LENGTH {
        Err(Ipv6Error::InvalidPrefixLength(len.to_string()))
    } else {
        Ok(len)
    }
}

/// Convert a prefix length to a 128-bit network mask.
///
/// # Examples
/// ```
/// use ipv6_subnet_calc::prefix_mask;
/// assert_eq!(prefix_mask(0).unwrap(), 0);
/// assert_eq!(prefix_mask(64).unwrap(), 0xffff_ffff_ffff_ffff_0000_0000_0000_0000);
/// assert_eq!(prefix_mask(128).unwrap(), u128::MAX);
/// ```
pub fn prefix_mask(len: u8) -> Result<u128> {
    let len = check_prefix_len(len)?;
    if len == 0 {
        Ok(0)
    } else {
        Ok(ALL_ONES << (MAX_LENGTH - len))
    }
}

/// Host part mask, the complement of [`prefix_mask`].
pub(crate) fn host_mask(len: u8) -> Result<u128> {
    Ok(!prefix_mask(len)?)
}

/// Network address (host bits cleared) of `addr/len`, expanded form.
pub fn apply_mask(addr: &str, len: u8) -> Result<String> {
    Ok(from_u128(to_u128(addr)? & prefix_mask(len)?))
}

/// Highest address of `addr/len`, expanded form.
pub fn prefix_last_address(addr: &str, len: u8) -> Result<String> {
    let network = to_u128(addr)? & prefix_mask(len)?;
    Ok(from_u128(network | host_mask(len)?))
}

/// Boundaries of a prefix. In IPv6 the first address is the network address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrefixRange {
    pub network: String,
    pub first: String,
    pub last: String,
}

/// Network, first and last address of `addr/len`, all in expanded form.
pub fn prefix_range(addr: &str, len: u8) -> Result<PrefixRange> {
    let network = apply_mask(addr, len)?;
    let last = prefix_last_address(addr, len)?;
    Ok(PrefixRange {
        first: network.clone(),
        network,
        last,
    })
}

/// An IPv6 address with a prefix length.
///
/// The address is kept as given; host bits are "don't care" for network
/// identity and are cleared by [`Ipv6Prefix::network`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ipv6Prefix {
    /// The address as a 128-bit value.
    pub addr: u128,
    /// The prefix length (0-128).
    pub len: u8,
}

impl Ipv6Prefix {
    /// Parse a CIDR string (e.g. "2001:db8::/48").
    pub fn new(cidr: &str) -> Result<Ipv6Prefix> {
        let cidr = cidr.trim();
        let caps = get_cidr_regex().captures(cidr).ok_or_else(|| {
            Ipv6Error::malformed(cidr, "expected CIDR in the form address/length")
        })?;
        let addr = to_u128(caps[1].trim())?;
        let len: u8 = caps[2]
            .parse()
            .map_err(|_| Ipv6Error::InvalidPrefixLength(caps[2].to_string()))?;
        Ipv6Prefix::from_parts(addr, len)
    }

    /// Build from a value and a length, validating the length.
    pub fn from_parts(addr: u128, len: u8) -> Result<Ipv6Prefix> {
        Ok(Ipv6Prefix {
            addr,
            len: check_prefix_len(len)?,
        })
    }

    /// Lowest (network) address.
    pub fn network(&self) -> u128 {
        if self.len == 0 {
            0
        } else {
            self.addr & (ALL_ONES << (MAX_LENGTH - self.len))
        }
    }

    /// Highest address.
    pub fn last(&self) -> u128 {
        if self.len == 0 {
            ALL_ONES
        } else {
            self.network() | !(ALL_ONES << (MAX_LENGTH - self.len))
        }
    }

    /// Number of host bits, `128 - len`.
    pub fn host_bits(&self) -> u8 {
        MAX_LENGTH - self.len
    }

    /// True if `addr` falls inside this prefix.
    pub fn contains(&self, addr: u128) -> bool {
        self.network() <= addr && addr <= self.last()
    }

    /// Normalized CIDR in compressed form, e.g. "2001:db8::/48".
    pub fn cidr(&self) -> String {
        format!("{}/{}", compress_u128(self.network()), self.len)
    }

    /// Normalized CIDR in expanded form.
    pub fn cidr_full(&self) -> String {
        format!("{}/{}", from_u128(self.network()), self.len)
    }

    /// Network, first and last address, expanded form.
    pub fn range(&self) -> PrefixRange {
        let network = from_u128(self.network());
        PrefixRange {
            first: network.clone(),
            network,
            last: from_u128(self.last()),
        }
    }
}

impl std::fmt::Display for Ipv6Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", compress_u128(self.addr), self.len)
    }
}

impl std::str::FromStr for Ipv6Prefix {
    type Err = Ipv6Error;

    fn from_str(s: &str) -> Result<Self> {
        Ipv6Prefix::new(s)
    }
}

impl Serialize for Ipv6Prefix {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Ipv6Prefix {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Ipv6Prefix, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ipv6Prefix::new(&s).map_err(|e| de::Error::custom(format!("invalid CIDR {s}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::address::compress;

    #[test]
    fn test_prefix_mask() {
        assert_eq!(prefix_mask(0).unwrap(), 0);
        assert_eq!(prefix_mask(1).unwrap(), 1u128 << 127);
        assert_eq!(
            compress(&from_u128(prefix_mask(48).unwrap())).unwrap(),
            "ffff:ffff:ffff::"
        );
        assert_eq!(
            compress(&from_u128(prefix_mask(64).unwrap())).unwrap(),
            "ffff:ffff:ffff:ffff::"
        );
        assert_eq!(prefix_mask(128).unwrap(), u128::MAX);
        assert_eq!(
            prefix_mask(129),
            Err(Ipv6Error::InvalidPrefixLength("129".to_string()))
        );
    }

    #[test]
    fn test_prefix_mask_monotonic() {
        for n1 in 0..=MAX_LENGTH {
            let m1 = prefix_mask(n1).unwrap();
            assert_eq!(m1 & m1, m1);
            assert_eq!(m1.count_ones(), n1 as u32);
            for n2 in n1..=MAX_LENGTH {
                let m2 = prefix_mask(n2).unwrap();
                assert_eq!(m1 & m2, m1, "mask /{n1} not within /{n2}");
            }
        }
    }

    #[test]
    fn test_apply_mask() {
        assert_eq!(
            compress(&apply_mask("2001:db8::1", 48).unwrap()).unwrap(),
            "2001:db8::"
        );
        assert_eq!(
            compress(&apply_mask("fe80::202:b3ff:fe1e:8329", 64).unwrap()).unwrap(),
            "fe80::"
        );
        assert_eq!(
            apply_mask("2001:db8::1", 128).unwrap(),
            "2001:0db8:0000:0000:0000:0000:0000:0001"
        );
        assert!(apply_mask("2001:db8::1", 200).is_err());
    }

    #[test]
    fn test_prefix_range() {
        let range = prefix_range("2001:db8::1234", 64).unwrap();
        assert_eq!(compress(&range.network).unwrap(), "2001:db8::");
        assert_eq!(range.first, range.network);
        assert_eq!(
            compress(&range.last).unwrap(),
            "2001:db8:0:ffff:ffff:ffff:ffff:ffff"
        );
        assert_eq!(
            compress(&prefix_last_address("2001:db8::", 48).unwrap()).unwrap(),
            "2001:db8:0:ffff:ffff:ffff:ffff:ffff"
        );
        let all = prefix_range("::", 0).unwrap();
        assert_eq!(compress(&all.last).unwrap(), "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff");
    }

    #[test]
    fn test_ipv6_prefix_range_matches_text_range() {
        for (addr, len) in [("2001:db8::1", 48u8), ("::", 0), ("fe80::1", 128), ("fd00::", 7)] {
            let p = Ipv6Prefix::from_parts(to_u128(addr).unwrap(), len).unwrap();
            assert_eq!(p.range(), prefix_range(addr, len).unwrap());
        }
        let r = Ipv6Prefix::new("2001:db8:abcd:1234::1/52").unwrap().range();
        assert_eq!(r.network, "2001:0db8:abcd:1000:0000:0000:0000:0000");
        assert_eq!(r.last, "2001:0db8:abcd:1fff:ffff:ffff:ffff:ffff");
    }

    #[test]
    fn test_ipv6_prefix_new() {
        let p = Ipv6Prefix::new("2001:db8::1/48").unwrap();
        assert_eq!(p.len, 48);
        assert_eq!(p.to_string(), "2001:db8::1/48");
        assert_eq!(p.cidr(), "2001:db8::/48");
        assert_eq!(
            p.cidr_full(),
            "2001:0db8:0000:0000:0000:0000:0000:0000/48"
        );
        assert_eq!(p.host_bits(), 80);
        assert!(p.contains(to_u128("2001:db8:0:ffff::").unwrap()));
        assert!(!p.contains(to_u128("2001:db9::").unwrap()));

        assert!(matches!(
            Ipv6Prefix::new("2001:db8::"),
            Err(Ipv6Error::MalformedAddress { .. })
        ));
        assert!(matches!(
            Ipv6Prefix::new("2001:db8::/129"),
            Err(Ipv6Error::InvalidPrefixLength(_))
        ));
        assert!(matches!(
            Ipv6Prefix::new("2001:db8::/999"),
            Err(Ipv6Error::InvalidPrefixLength(_))
        ));
        assert!(Ipv6Prefix::new("2001:db8::/-1").is_err());
        assert!(Ipv6Prefix::new("zz::/48").is_err());
    }

    #[test]
    fn test_ipv6_prefix_bounds() {
        let all = Ipv6Prefix::new("::/0").unwrap();
        assert_eq!(all.network(), 0);
        assert_eq!(all.last(), u128::MAX);
        let host = Ipv6Prefix::new("::1/128").unwrap();
        assert_eq!(host.network(), 1);
        assert_eq!(host.last(), 1);
    }

    #[test]
    fn test_ipv6_prefix_serde() {
        let p = Ipv6Prefix::new("2001:db8::/32").unwrap();
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "\"2001:db8::/32\"");
        let back: Ipv6Prefix = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
        assert!(serde_json::from_str::<Ipv6Prefix>("\"2001:db8::\"").is_err());
    }

    #[test]
    fn test_ipv6_prefix_cmp() {
        let a = Ipv6Prefix::new("2001:db8::/32").unwrap();
        let b = Ipv6Prefix::new("2001:db8::/48").unwrap();
        let c = Ipv6Prefix::new("2001:db9::/32").unwrap();
        assert!(a < b);
        assert!(b < c);
    }
}
