//! IPv6 address and prefix arithmetic.
//!
//! Addresses are handled as 128-bit integers internally; every public
//! operation takes and returns text.
//! - [`models`] - address parsing/formatting, prefixes, address types
//! - [`processing`] - subnetting, containment, reverse DNS, navigation
//! - [`output`] - terminal and CSV rendering of results
//! - [`config`] - command line options
//! - [`error`] - the [`Ipv6Error`] type

// cargo watch -x 'fmt' -x 'test'

pub mod cmd;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod processing;

pub use error::{Ipv6Error, Result};
pub use models::{
    apply_mask, compress, expand, from_u128, get_address_type, is_nibble_boundary,
    is_valid_ipv6, prefix_last_address, prefix_mask, prefix_range, to_u128, AddressType,
    AddressTypeInfo, Ipv6Prefix, PrefixRange,
};
pub use processing::{
    address_count_for_prefix, bits_for_subnet_count, containment_overlap_check,
    enumerate_subprefixes, generate_scenario, group_info, list_subnets, next_previous_network,
    prefix_contains, reverse_dns_ip6_arpa, subnet_count, subnet_count_between, subprefix,
    validate_user_plan, ContainmentCheck, NetworkNeighbours, ReverseDns, SubnetList, Subprefix,
    SubprefixWindow,
};
