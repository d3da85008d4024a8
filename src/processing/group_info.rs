//! Per-group breakdown of an address against a prefix length.

use crate::error::Result;
use crate::models::address::parse_groups;
use crate::models::check_prefix_len;
use serde::Serialize;

/// How much of a 16-bit group is covered by the prefix.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrefixCoverage {
    Full,
    Partial,
    None,
}

/// One of the 8 groups of an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupInfo {
    /// 4 hex digits.
    pub hex: String,
    /// 16 binary digits.
    pub bits: String,
    pub in_prefix: PrefixCoverage,
    pub group_index: usize,
    /// First bit of the group, counted from the most significant bit.
    pub group_start: u16,
    pub group_end: u16,
}

/// Split `addr` into its 8 groups and mark which lie inside `/prefix_len`.
pub fn group_info(addr: &str, prefix_len: u8) -> Result<Vec<GroupInfo>> {
    let prefix_len = u16::from(check_prefix_len(prefix_len)?);
    let groups = parse_groups(addr)?;

    Ok(groups
        .iter()
        .enumerate()
        .map(|(i, g)| {
            let group_start = i as u16 * 16;
            let group_end = group_start + 16;
            let in_prefix = if group_end <= prefix_len {
                PrefixCoverage::Full
            } else if group_start < prefix_len {
                PrefixCoverage::Partial
            } else {
                PrefixCoverage::None
            };
            GroupInfo {
                hex: format!("{g:04x}"),
                bits: format!("{g:016b}"),
                in_prefix,
                group_index: i,
                group_start,
                group_end,
            }
        })
        .collect())
}
