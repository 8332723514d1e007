use ipnetwork::IpNetwork;
use serde::{Deserialize, Serialize};
use std::fmt;

/*-------------------------------------------------------------------------------------------------
  IP Address Version
-------------------------------------------------------------------------------------------------*/

/// IP address version (IPv4 or IPv6) of a WAFv2 IP set.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum IpAddressVersion {
    #[serde(rename = "IPV4")]
    IPv4,

    #[serde(rename = "IPV6")]
    IPv6,
}

impl IpAddressVersion {
    pub fn is_ipv4(&self) -> bool {
        match self {
            IpAddressVersion::IPv4 => true,
            IpAddressVersion::IPv6 => false,
        }
    }

    pub fn is_ipv6(&self) -> bool {
        match self {
            IpAddressVersion::IPv4 => false,
            IpAddressVersion::IPv6 => true,
        }
    }

    /// Check if a network belongs to this address family.
    pub fn matches(&self, network: &IpNetwork) -> bool {
        match self {
            IpAddressVersion::IPv4 => network.is_ipv4(),
            IpAddressVersion::IPv6 => network.is_ipv6(),
        }
    }

    /// Two half-space prefixes that together cover every address in this family.
    ///
    /// The IP set matcher requires CIDR masks, so the whole address space is expressed as two
    /// `/1` prefixes instead of a single `/0`.
    pub fn universal_ranges(&self) -> Vec<IpNetwork> {
        let ranges: [&str; 2] = match self {
            IpAddressVersion::IPv4 => ["0.0.0.0/1", "128.0.0.0/1"],
            IpAddressVersion::IPv6 => ["::/1", "8000::/1"],
        };
        ranges
            .iter()
            .filter_map(|range| range.parse().ok())
            .collect()
    }
}

impl fmt::Display for IpAddressVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpAddressVersion::IPv4 => write!(f, "IPV4"),
            IpAddressVersion::IPv6 => write!(f, "IPV6"),
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
