//! IPv6 prefix calculations.
//!
//! This module contains the logic built on top of [`crate::models`]:
//! - [`subnetting`] - splitting prefixes into child subnets and counting them
//! - [`containment`] - address/prefix containment and overlap
//! - [`reverse_dns`] - ip6.arpa names and delegation cuts
//! - [`navigator`] - next/previous network of the same size
//! - [`group_info`] - per-group breakdown for display
//! - [`scenario`] - seeded planning exercises and plan checks

mod containment;
mod group_info;
mod navigator;
mod reverse_dns;
mod scenario;
mod subnetting;

// Re-export public functions
pub use containment::{
    containment_overlap_check, prefix_contains, prefixes_overlap, ContainmentCheck, OperandKind,
};
pub use group_info::{group_info, GroupInfo, PrefixCoverage};
pub use navigator::{next_previous_network, step_network, NetworkNeighbours};
pub use reverse_dns::{reverse_dns_ip6_arpa, ReverseDns};
pub use scenario::{
    generate_scenario, validate_user_plan, Lcg, PlanFinding, Scenario, Severity, SiteExample,
    PARENT_PREFIX_LEN,
};
pub use subnetting::{
    address_count_for_prefix, bits_for_subnet_count, enumerate_subprefixes, list_subnets,
    subnet_count, subnet_count_between, subprefix, IndexedSubprefix, SubnetList, Subprefix,
    SubprefixWindow,
};
