//! Assemble AWS WAFv2 Web ACLs that allow traffic only from declared IPv4/IPv6 CIDR ranges and
//! ISO country codes.
//!
//! Build an [AllowListConfig] with the [AllowListConfigBuilder], [assemble] it into a [RuleSet],
//! or wrap it in a [WebAcl] to render the IP sets and Web ACL as a CloudFormation template.
//!
//! ```
//! let config = commonwebacl::AllowListConfigBuilder::default()
//!     .allowed_ipv4_address_ranges(["10.0.0.0/8"])?
//!     .allowed_country_codes(["US", "CA"])
//!     .build();
//!
//! // Rules: block unless the source is allowed (priority 1), block unless the country is
//! // allowed (priority 2); everything else is allowed.
//! let rule_set = commonwebacl::assemble(&config);
//! assert_eq!(rule_set.len(), 2);
//!
//! let web_acl = commonwebacl::WebAcl::new("Api", &config)?;
//! println!("{}", web_acl.to_json()?);
//! # Ok::<(), commonwebacl::Error>(())
//! ```

mod core;

/*-------------------------------------------------------------------------------------------------
  Library Interface
-------------------------------------------------------------------------------------------------*/

pub use crate::core::config::{AllowListConfig, AllowListConfigBuilder};
pub use crate::core::errors::{Error, Result};
pub use crate::core::ip_address_version::IpAddressVersion;
pub use crate::core::rules::{assemble, Action, BlockRule, IpSet, RuleKind, RuleSet, Statement};
pub use crate::core::scope::Scope;
pub use crate::core::template::{Template, WebAcl};

/*-------------------------------------------------------------------------------------------------
  Re-exports
-------------------------------------------------------------------------------------------------*/

pub use ipnetwork;
