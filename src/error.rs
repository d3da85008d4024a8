//! Error types for IPv6 calculations.

use thiserror::Error;

/// Everything that can go wrong in an address or prefix calculation.
///
/// Errors are returned at the point of detection; nothing is retried or
/// partially applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Ipv6Error {
    /// Text does not parse as an IPv6 address (or as `address/length`).
    #[error("Malformed IPv6 address \"{input}\": {reason}")]
    MalformedAddress { input: String, reason: String },

    /// A prefix length outside 0..=128.
    #[error("Invalid prefix length {0} (must be 0-128)")]
    InvalidPrefixLength(String),

    /// Structurally invalid call, e.g. a split that adds no bits.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Subnet index does not fit into the number of added bits.
    #[error("Index {index} exceeds 2^{add_bits} subnets")]
    IndexOutOfRange { index: u128, add_bits: u8 },

    /// A derived prefix length would exceed /128.
    #[error("Resulting prefix length /{0} > /128")]
    PrefixTooLong(u32),
}

impl Ipv6Error {
    pub(crate) fn malformed(input: &str, reason: impl Into<String>) -> Self {
        Ipv6Error::MalformedAddress {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result alias used by the library.
pub type Result<T> = std::result::Result<T, Ipv6Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let e = Ipv6Error::malformed("::1::2", "more than one '::'");
        assert_eq!(
            e.to_string(),
            "Malformed IPv6 address \"::1::2\": more than one '::'"
        );
        assert_eq!(
            Ipv6Error::IndexOutOfRange {
                index: 256,
                add_bits: 8
            }
            .to_string(),
            "Index 256 exceeds 2^8 subnets"
        );
        assert_eq!(
            Ipv6Error::PrefixTooLong(132).to_string(),
            "Resulting prefix length /132 > /128"
        );
    }
}
