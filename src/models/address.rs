//! IPv6 text codec and integer bridge.
//!
//! Converts between any legal IPv6 text form, the fully expanded form
//! (8 groups of 4 lowercase hex digits), the RFC 5952 shortest form and a
//! native `u128` value. All arithmetic in the crate runs on the `u128`.

use crate::error::{Ipv6Error, Result};
use itertools::Itertools;

/// Number of 16-bit groups in an IPv6 address.
pub const GROUPS: usize = 8;

/// Address with every bit set.
pub const ALL_ONES: u128 = u128::MAX;

/// Parse one group of 1-4 hex digits.
fn parse_group(input: &str, group: &str) -> Result<u16> {
    if group.is_empty() {
        return Err(Ipv6Error::malformed(input, "empty group"));
    }
    if group.len() > 4 || !group.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Ipv6Error::malformed(
            input,
            format!("group \"{group}\" is not 1-4 hex digits"),
        ));
    }
    u16::from_str_radix(group, 16)
        .map_err(|e| Ipv6Error::malformed(input, format!("group \"{group}\": {e}")))
}

fn parse_group_list(input: &str, part: &str) -> Result<Vec<u16>> {
    if part.is_empty() {
        return Ok(vec![]);
    }
    part.split(':').map(|g| parse_group(input, g)).collect()
}

/// Parse IPv6 text into its 8 groups, most significant first.
pub(crate) fn parse_groups(addr: &str) -> Result<[u16; GROUPS]> {
    let text = addr.trim().to_lowercase();
    let mut groups = [0u16; GROUPS];

    if text.contains("::") {
        let halves: Vec<&str> = text.split("::").collect();
        if halves.len() != 2 {
            return Err(Ipv6Error::malformed(addr, "more than one '::'"));
        }
        let left = parse_group_list(addr, halves[0])?;
        let right = parse_group_list(addr, halves[1])?;
        if left.len() + right.len() > GROUPS {
            return Err(Ipv6Error::malformed(addr, "too many groups"));
        }
        groups[..left.len()].copy_from_slice(&left);
        groups[GROUPS - right.len()..].copy_from_slice(&right);
        log::trace!(
            "parse_groups({addr}) left={} right={} missing={}",
            left.len(),
            right.len(),
            GROUPS - left.len() - right.len()
        );
        return Ok(groups);
    }

    let parts: Vec<&str> = text.split(':').collect();
    if parts.len() != GROUPS {
        return Err(Ipv6Error::malformed(
            addr,
            format!("{} of 8 groups", parts.len()),
        ));
    }
    for (slot, part) in groups.iter_mut().zip(parts) {
        *slot = parse_group(addr, part)?;
    }
    Ok(groups)
}

fn groups_of(n: u128) -> [u16; GROUPS] {
    let mut groups = [0u16; GROUPS];
    let mut rest = n;
    for slot in groups.iter_mut().rev() {
        *slot = (rest & 0xffff) as u16;
        rest >>= 16;
    }
    groups
}

fn format_expanded(groups: &[u16; GROUPS]) -> String {
    groups.iter().map(|g| format!("{g:04x}")).join(":")
}

fn format_compressed(groups: &[u16; GROUPS]) -> String {
    // Longest run of zero groups, the first one wins a tie.
    let (mut best_start, mut best_len) = (0, 0);
    let mut i = 0;
    while i < GROUPS {
        if groups[i] == 0 {
            let start = i;
            while i < GROUPS && groups[i] == 0 {
                i += 1;
            }
            if i - start > best_len {
                best_start = start;
                best_len = i - start;
            }
        } else {
            i += 1;
        }
    }

    let short = |gs: &[u16]| gs.iter().map(|g| format!("{g:x}")).join(":");
    if best_len < 2 {
        return short(groups);
    }
    format!(
        "{}::{}",
        short(&groups[..best_start]),
        short(&groups[best_start + best_len..])
    )
}

/// Expand an IPv6 address to its full form (8 x 4 lowercase hex digits).
///
/// # Examples
/// ```
/// use ipv6_subnet_calc::expand;
/// assert_eq!(expand("::1").unwrap(), "0000:0000:0000:0000:0000:0000:0000:0001");
/// ```
pub fn expand(addr: &str) -> Result<String> {
    Ok(format_expanded(&parse_groups(addr)?))
}

/// Compress an IPv6 address to the RFC 5952 shortest form.
///
/// # Examples
/// ```
/// use ipv6_subnet_calc::compress;
/// assert_eq!(compress("2001:0db8:0000:0000:0000:0000:0000:0001").unwrap(), "2001:db8::1");
/// ```
pub fn compress(addr: &str) -> Result<String> {
    Ok(format_compressed(&parse_groups(addr)?))
}

/// Compressed text for a `u128` value.
pub fn compress_u128(n: u128) -> String {
    format_compressed(&groups_of(n))
}

/// Fold the 8 groups of an address into a `u128`, most significant first.
pub fn to_u128(addr: &str) -> Result<u128> {
    Ok(parse_groups(addr)?
        .iter()
        .fold(0u128, |acc, g| (acc << 16) | u128::from(*g)))
}

/// Render a `u128` as an expanded address. Never compressed; use
/// [`compress`] or [`compress_u128`] for the short form.
pub fn from_u128(n: u128) -> String {
    format_expanded(&groups_of(n))
}

/// True if `addr` parses as an IPv6 address.
pub fn is_valid_ipv6(addr: &str) -> bool {
    parse_groups(addr).is_ok()
}
