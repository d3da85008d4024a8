//! Reverse DNS (ip6.arpa) names.
//!
//! Names are built nibble by nibble in reverse order. Delegation cuts only
//! happen on 4-bit boundaries, so a prefix that is not a multiple of 4 is
//! rounded up to the next one.

use crate::error::Result;
use crate::models::{check_prefix_len, to_u128};
use itertools::Itertools;
use serde::Serialize;

const SUFFIX: &str = "ip6.arpa";

/// Result of [`reverse_dns_ip6_arpa`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReverseDns {
    /// All 32 nibbles, e.g. "1.0.0.0....8.b.d.0.1.0.0.2.ip6.arpa".
    pub ip6_arpa_full: String,
    /// Zone cut at `effective_prefix`; `None` without a prefix.
    pub ip6_arpa_bis_prefix: Option<String>,
    /// Prefix rounded up to a nibble boundary.
    pub effective_prefix: Option<u8>,
}

/// The 32 nibbles of `n`, most significant first.
fn nibbles(n: u128) -> Vec<char> {
    (0..32)
        .rev()
        .map(|i| {
            let nibble = ((n >> (i * 4)) & 0xf) as u32;
            char::from_digit(nibble, 16).unwrap_or('0')
        })
        .collect()
}

fn arpa_name(nibbles: &[char]) -> String {
    nibbles
        .iter()
        .rev()
        .map(char::to_string)
        .chain(std::iter::once(SUFFIX.to_string()))
        .join(".")
}

/// Build the `ip6.arpa` name for `address` and, when `prefix` is given, the
/// zone name at that prefix rounded up to the next nibble.
///
/// # Examples
/// ```
/// use ipv6_subnet_calc::reverse_dns_ip6_arpa;
/// let rdns = reverse_dns_ip6_arpa("2001:db8::1", Some(32)).unwrap();
/// assert_eq!(rdns.ip6_arpa_bis_prefix.unwrap(), "8.b.d.0.1.0.0.2.ip6.arpa");
/// ```
pub fn reverse_dns_ip6_arpa(address: &str, prefix: Option<u8>) -> Result<ReverseDns> {
    let all = nibbles(to_u128(address)?);
    let ip6_arpa_full = arpa_name(&all);

    let (ip6_arpa_bis_prefix, effective_prefix) = match prefix {
        Some(prefix) => {
            let prefix = check_prefix_len(prefix)?;
            let effective = prefix.div_ceil(4) * 4;
            let count = usize::from(effective / 4);
            if effective != prefix {
                log::debug!("reverse_dns_ip6_arpa: /{prefix} rounded to /{effective}");
            }
            (Some(arpa_name(&all[..count])), Some(effective))
        }
        None => (None, None),
    };

    Ok(ReverseDns {
        ip6_arpa_full,
        ip6_arpa_bis_prefix,
        effective_prefix,
    })
}
