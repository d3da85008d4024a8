//! Value types and leaf codecs for IPv6 calculations.
//!
//! This module contains the core data structures used throughout the crate:
//! - [`address`] - text codec and `u128` bridge
//! - [`Ipv6Prefix`] - address with prefix length, masks and ranges
//! - [`AddressType`] - classification of addresses
//! - [`count`] - big address/subnet counts

pub mod address;
mod address_type;
pub mod count;
mod prefix;

// Re-export public types
pub use address::{
    compress, compress_u128, expand, from_u128, is_valid_ipv6, to_u128, ALL_ONES, GROUPS,
};
pub use address_type::{get_address_type, is_nibble_boundary, AddressType, AddressTypeInfo};
pub use prefix::{
    apply_mask, check_prefix_len, prefix_last_address, prefix_mask, prefix_range, Ipv6Prefix,
    PrefixRange, MAX_LENGTH,
};
