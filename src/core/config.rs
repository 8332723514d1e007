use crate::core::errors::Result;
use crate::core::ip_address_version::IpAddressVersion;
use crate::core::scope::Scope;
use crate::core::utils;
use ipnetwork::IpNetwork;
use log::{info, warn};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

/*-------------------------------------------------------------------------------------------------
  Allow-List Config Builder
-------------------------------------------------------------------------------------------------*/

/// A builder for the [AllowListConfig] struct. The [AllowListConfigBuilder] provides setters for
/// each allow-list and a [AllowListConfigBuilder::build] method to create the
/// [AllowListConfig].
///
/// ```
/// let config = commonwebacl::AllowListConfigBuilder::default()
///     .scope(commonwebacl::Scope::Edge)
///     .allowed_ipv4_address_ranges(["192.0.2.0/24"])?
///     .allowed_country_codes(["JP"])
///     .build();
///
/// assert_eq!(config.scope(), commonwebacl::Scope::Edge);
/// assert!(config.allowed_ipv6_address_ranges().is_none());
/// # Ok::<(), commonwebacl::Error>(())
/// ```
///
/// The [AllowListConfigBuilder::new] method sources initial values from environment variables;
/// [AllowListConfigBuilder::from_json] and [AllowListConfigBuilder::from_file] read a JSON
/// parameters document.
#[derive(Clone, Debug, Default)]
pub struct AllowListConfigBuilder {
    scope: Scope,
    allowed_ipv4_address_ranges: Option<Vec<IpNetwork>>,
    allowed_ipv6_address_ranges: Option<Vec<IpNetwork>>,
    allowed_country_codes: Option<Vec<String>>,
}

/*--------------------------------------------------------------------------------------
  Allow-List Config Builder Implementation
--------------------------------------------------------------------------------------*/

impl AllowListConfigBuilder {
    /// Create a new [AllowListConfigBuilder] reading initial values from environment
    /// variables when set. Unset variables leave the dimension unrestricted.
    ///
    /// The environment variables used to set the initial values are:
    /// - `COMMONWEBACL_SCOPE`
    /// - `COMMONWEBACL_ALLOWED_IPV4_ADDRESS_RANGES` (comma-separated)
    /// - `COMMONWEBACL_ALLOWED_IPV6_ADDRESS_RANGES` (comma-separated)
    /// - `COMMONWEBACL_ALLOWED_COUNTRY_CODES` (comma-separated)
    pub fn new() -> Self {
        let default = AllowListConfigBuilder::default();

        Self {
            scope: get_env_var("COMMONWEBACL_SCOPE", default.scope),
            allowed_ipv4_address_ranges: get_env_networks(
                "COMMONWEBACL_ALLOWED_IPV4_ADDRESS_RANGES",
                IpAddressVersion::IPv4,
            ),
            allowed_ipv6_address_ranges: get_env_networks(
                "COMMONWEBACL_ALLOWED_IPV6_ADDRESS_RANGES",
                IpAddressVersion::IPv6,
            ),
            allowed_country_codes: get_env_value("COMMONWEBACL_ALLOWED_COUNTRY_CODES").map(
                |value| {
                    info!("Using COMMONWEBACL_ALLOWED_COUNTRY_CODES: {}", value);
                    utils::normalize_country_codes(utils::split_list(&value))
                },
            ),
        }
    }

    /// Create a new [AllowListConfigBuilder] from a JSON parameters document.
    ///
    /// ```
    /// let config = commonwebacl::AllowListConfigBuilder::from_json(
    ///     r#"{
    ///         "scope": "REGIONAL",
    ///         "allowedIpV4AddressRanges": ["10.0.0.0/8"],
    ///         "allowedIpV6AddressRanges": null,
    ///         "allowedCountryCodes": ["US", "CA"]
    ///     }"#,
    /// )?
    /// .build();
    ///
    /// assert_eq!(config.allowed_country_codes().unwrap(), ["US", "CA"]);
    /// # Ok::<(), commonwebacl::Error>(())
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let parameters: JsonParameters = serde_json::from_str(json)?;
        let mut builder = AllowListConfigBuilder::default();

        if let Some(scope) = parameters.scope {
            builder.scope(scope);
        }
        if let Some(ranges) = parameters.allowed_ipv4_address_ranges {
            builder.allowed_ipv4_address_ranges(ranges)?;
        }
        if let Some(ranges) = parameters.allowed_ipv6_address_ranges {
            builder.allowed_ipv6_address_ranges(ranges)?;
        }
        if let Some(country_codes) = parameters.allowed_country_codes {
            builder.allowed_country_codes(country_codes);
        }

        Ok(builder)
    }

    /// Create a new [AllowListConfigBuilder] from a JSON parameters file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Reading allow-list parameters from {}", path.display());
        let json = fs::read_to_string(path)
            .map_err(|error| format!("Unable to read {}: {error}", path.display()))?;
        Self::from_json(&json)
    }

    /*-------------------------------------------------------------------------
      Setters
    -------------------------------------------------------------------------*/

    /// Set the deployment scope; defaults to [Scope::Regional].
    pub fn scope(&mut self, scope: Scope) -> &mut Self {
        self.scope = scope;
        self
    }

    /// Allow only these IPv4 CIDR ranges. Returns an error when a range is not a valid IPv4
    /// CIDR prefix.
    pub fn allowed_ipv4_address_ranges<I, S>(&mut self, ranges: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ranges = utils::ipnetwork::parse_networks(ranges, IpAddressVersion::IPv4)?;
        self.allowed_ipv4_address_ranges = Some(ranges);
        Ok(self)
    }

    /// Allow only these IPv6 CIDR ranges. Returns an error when a range is not a valid IPv6
    /// CIDR prefix.
    pub fn allowed_ipv6_address_ranges<I, S>(&mut self, ranges: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ranges = utils::ipnetwork::parse_networks(ranges, IpAddressVersion::IPv6)?;
        self.allowed_ipv6_address_ranges = Some(ranges);
        Ok(self)
    }

    /// Allow only requests geolocated to these ISO 3166-1 alpha-2 country codes.
    pub fn allowed_country_codes<I, S>(&mut self, country_codes: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed_country_codes = Some(utils::normalize_country_codes(country_codes));
        self
    }

    /*-------------------------------------------------------------------------
      Build Method
    -------------------------------------------------------------------------*/

    pub fn build(&self) -> AllowListConfig {
        AllowListConfig {
            scope: self.scope,
            allowed_ipv4_address_ranges: self.allowed_ipv4_address_ranges.clone(),
            allowed_ipv6_address_ranges: self.allowed_ipv6_address_ranges.clone(),
            allowed_country_codes: self.allowed_country_codes.clone(),
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Allow-List Config
-------------------------------------------------------------------------------------------------*/

/// Declared allow-list intent for a Web ACL. Each list is independent; an undeclared list
/// (`None`) leaves that dimension unrestricted, while a declared list restricts traffic to its
/// members (even when empty).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AllowListConfig {
    pub(crate) scope: Scope,
    pub(crate) allowed_ipv4_address_ranges: Option<Vec<IpNetwork>>,
    pub(crate) allowed_ipv6_address_ranges: Option<Vec<IpNetwork>>,
    pub(crate) allowed_country_codes: Option<Vec<String>>,
}

impl AllowListConfig {
    /*-------------------------------------------------------------------------
      Getters
    -------------------------------------------------------------------------*/

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn allowed_ipv4_address_ranges(&self) -> Option<&[IpNetwork]> {
        self.allowed_ipv4_address_ranges.as_deref()
    }

    pub fn allowed_ipv6_address_ranges(&self) -> Option<&[IpNetwork]> {
        self.allowed_ipv6_address_ranges.as_deref()
    }

    pub fn allowed_country_codes(&self) -> Option<&[String]> {
        self.allowed_country_codes.as_deref()
    }

    /// Check if either address family is restricted.
    pub fn restricts_networks(&self) -> bool {
        self.allowed_ipv4_address_ranges.is_some() || self.allowed_ipv6_address_ranges.is_some()
    }

    /// Check if request origin countries are restricted.
    pub fn restricts_countries(&self) -> bool {
        self.allowed_country_codes.is_some()
    }
}

/*-------------------------------------------------------------------------------------------------
  JSON Parameters
-------------------------------------------------------------------------------------------------*/

#[derive(Debug, Default, Deserialize)]
struct JsonParameters {
    #[serde(default)]
    scope: Option<Scope>,

    #[serde(default, rename = "allowedIpV4AddressRanges")]
    allowed_ipv4_address_ranges: Option<Vec<String>>,

    #[serde(default, rename = "allowedIpV6AddressRanges")]
    allowed_ipv6_address_ranges: Option<Vec<String>>,

    #[serde(default, rename = "allowedCountryCodes")]
    allowed_country_codes: Option<Vec<String>>,
}

/*-------------------------------------------------------------------------------------------------
  Helper Functions
-------------------------------------------------------------------------------------------------*/

/// Get an environment variable value or a default value if the environment variable is not
/// set or the value cannot be parsed.
fn get_env_var<T: std::str::FromStr>(env_var: &str, default: T) -> T {
    get_env_value(env_var)
        .and_then(|value| {
            value
                .parse::<T>()
                .inspect(|_| info!("Using {}: {}", env_var, value))
                .inspect_err(|_| warn!("Invalid {}: {}", env_var, value))
                .ok()
        })
        .unwrap_or(default)
}

/// Get a non-empty environment variable value. An empty (or whitespace-only) value is treated
/// the same as an unset variable.
fn get_env_value(env_var: &str) -> Option<String> {
    env::var(env_var).ok().filter(|value| {
        let is_set = !value.trim().is_empty();
        if !is_set {
            info!("Ignoring empty {}", env_var);
        }
        is_set
    })
}

/// Get a comma-separated list of CIDR prefixes from an environment variable. An unset or
/// invalid variable leaves the address family unrestricted.
fn get_env_networks(env_var: &str, version: IpAddressVersion) -> Option<Vec<IpNetwork>> {
    get_env_value(env_var).and_then(|value| {
        utils::ipnetwork::parse_networks(utils::split_list(&value), version)
            .inspect(|_| info!("Using {}: {}", env_var, value))
            .inspect_err(|error| warn!("Invalid {}: {} ({})", env_var, value, error))
            .ok()
    })
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
