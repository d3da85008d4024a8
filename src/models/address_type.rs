//! Address classification by fixed bit patterns.

use super::address::to_u128;
use crate::error::Result;
use serde::Serialize;

/// Kind of IPv6 address.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AddressType {
    Unspecified,
    Loopback,
    LinkLocal,
    Ula,
    Gua,
    Multicast,
    Unknown,
}

impl AddressType {
    /// Classify a 128-bit value.
    ///
    /// Checks run in a fixed order: `::` and `::1` first, then multicast
    /// before link-local and ULA, then global unicast.
    pub fn of(n: u128) -> AddressType {
        if n == 0 {
            AddressType::Unspecified
        } else if n == 1 {
            AddressType::Loopback
        } else if n >> 120 == 0xff {
            AddressType::Multicast
        } else if n >> 118 == 0b11_1111_1010 {
            AddressType::LinkLocal
        } else if n >> 121 == 0b111_1110 {
            AddressType::Ula
        } else if n >> 125 == 0b001 {
            AddressType::Gua
        } else {
            AddressType::Unknown
        }
    }

    /// Short tag, e.g. "link-local".
    pub fn tag(&self) -> &'static str {
        match self {
            AddressType::Unspecified => "unspecified",
            AddressType::Loopback => "loopback",
            AddressType::LinkLocal => "link-local",
            AddressType::Ula => "ula",
            AddressType::Gua => "gua",
            AddressType::Multicast => "multicast",
            AddressType::Unknown => "unknown",
        }
    }

    /// Human readable label including the defining range.
    pub fn label(&self) -> &'static str {
        match self {
            AddressType::Unspecified => "Unspecified (::)",
            AddressType::Loopback => "Loopback (::1)",
            AddressType::LinkLocal => "Link-Local (fe80::/10)",
            AddressType::Ula => "ULA - Unique Local (fc00::/7)",
            AddressType::Gua => "GUA - Global Unicast (2000::/3)",
            AddressType::Multicast => "Multicast (ff00::/8)",
            AddressType::Unknown => "Unknown type",
        }
    }
}

impl std::fmt::Display for AddressType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Type tag plus label, as returned by [`get_address_type`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressTypeInfo {
    #[serde(rename = "type")]
    pub kind: AddressType,
    pub label: String,
}

/// Classify an address given as text.
pub fn get_address_type(addr: &str) -> Result<AddressTypeInfo> {
    let kind = AddressType::of(to_u128(addr)?);
    log::trace!("get_address_type({addr}) = {kind}");
    Ok(AddressTypeInfo {
        kind,
        label: kind.label().to_string(),
    })
}

/// True if `len` falls on a hex digit (4 bit) boundary.
pub fn is_nibble_boundary(len: u8) -> bool {
    len % 4 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(addr: &str) -> AddressType {
        get_address_type(addr).unwrap().kind
    }

    #[test]
    fn test_get_address_type() {
        assert_eq!(kind("::"), AddressType::Unspecified);
        assert_eq!(kind("::1"), AddressType::Loopback);
        assert_eq!(kind("fe80::1"), AddressType::LinkLocal);
        assert_eq!(kind("febf:ffff::1"), AddressType::LinkLocal);
        assert_eq!(kind("fd00::1"), AddressType::Ula);
        assert_eq!(kind("fc00::"), AddressType::Ula);
        assert_eq!(kind("2001:db8::1"), AddressType::Gua);
        assert_eq!(kind("3fff:ffff::"), AddressType::Gua);
        assert_eq!(kind("ff02::1"), AddressType::Multicast);
        assert_eq!(kind("::2"), AddressType::Unknown);
        assert_eq!(kind("fec0::1"), AddressType::Unknown);
        assert_eq!(kind("4000::"), AddressType::Unknown);
        assert!(get_address_type("fe80::1::").is_err());
    }

    #[test]
    fn test_address_type_serialize() {
        let info = get_address_type("fe80::1").unwrap();
        assert_eq!(info.label, "Link-Local (fe80::/10)");
        assert_eq!(
            serde_json::to_string(&info).unwrap(),
            r#"{"type":"link-local","label":"Link-Local (fe80::/10)"}"#
        );
        assert_eq!(
            serde_json::to_string(&AddressType::Ula).unwrap(),
            "\"ula\""
        );
    }

    #[test]
    fn test_is_nibble_boundary() {
        assert!(is_nibble_boundary(0));
        assert!(is_nibble_boundary(48));
        assert!(!is_nibble_boundary(50));
        assert!(is_nibble_boundary(128));
    }
}
