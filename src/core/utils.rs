/*-------------------------------------------------------------------------------------------------
  Utilities
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Delimited Lists
--------------------------------------------------------------------------------------*/

/// Split a comma-separated list, trimming whitespace and dropping empty items.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

/// Normalize ISO 3166-1 alpha-2 country codes to their uppercase form, dropping blank entries.
pub fn normalize_country_codes<I, S>(country_codes: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    country_codes
        .into_iter()
        .map(|country_code| country_code.as_ref().trim().to_uppercase())
        .filter(|country_code| !country_code.is_empty())
        .collect()
}

/*--------------------------------------------------------------------------------------
  IP Network Supplemental Functions
--------------------------------------------------------------------------------------*/

pub mod ipnetwork {
    use crate::core::errors::Result;
    use crate::core::ip_address_version::IpAddressVersion;
    use ipnetwork::IpNetwork;

    /*
        WAFv2 IP sets hold a single address family. Parse each CIDR string and
        reject networks that belong to the other family, so an IPv6 prefix
        cannot end up in the IPv4 set (or vice versa).
    */

    pub fn parse_networks<I, S>(values: I, version: IpAddressVersion) -> Result<Vec<IpNetwork>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        values
            .into_iter()
            .map(|value| -> Result<IpNetwork> {
                let value = value.as_ref().trim();
                let network: IpNetwork = value
                    .parse()
                    .map_err(|_| format!("Invalid IP prefix: {value}"))?;
                if version.matches(&network) {
                    Ok(network)
                } else {
                    Err(format!("Not an {version} prefix: {value}").into())
                }
            })
            .collect()
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::ipnetwork::parse_networks;
    use super::{normalize_country_codes, split_list};
    use crate::core::ip_address_version::IpAddressVersion;

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("US, CA,,JP "), ["US", "CA", "JP"]);
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_normalize_country_codes() {
        assert_eq!(normalize_country_codes(["us", " Ca"]), ["US", "CA"]);
        assert_eq!(normalize_country_codes([" us", "", "gb ", "  "]), ["US", "GB"]);
        assert!(normalize_country_codes(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_parse_networks() {
        let ipv4 =
            parse_networks(["10.0.0.0/8", " 192.168.0.0/16"], IpAddressVersion::IPv4).unwrap();
        assert_eq!(ipv4.len(), 2);
        assert_eq!(ipv4[1].to_string(), "192.168.0.0/16");

        let ipv6 = parse_networks(["2001:db8::/32"], IpAddressVersion::IPv6).unwrap();
        assert_eq!(ipv6[0].to_string(), "2001:db8::/32");
    }

    #[test]
    fn test_parse_networks_rejects_invalid_prefixes() {
        assert!(parse_networks(["10.0.0.0/33"], IpAddressVersion::IPv4).is_err());
        assert!(parse_networks(["not-a-prefix"], IpAddressVersion::IPv4).is_err());
    }

    #[test]
    fn test_parse_networks_rejects_wrong_address_family() {
        assert!(parse_networks(["2001:db8::/32"], IpAddressVersion::IPv4).is_err());
        assert!(parse_networks(["10.0.0.0/8"], IpAddressVersion::IPv6).is_err());
    }
}
