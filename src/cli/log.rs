use commonwebacl::{AllowListConfig, RuleKind, WebAcl};
use log::{info, warn};

/*-------------------------------------------------------------------------------------------------
  Logging Functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Assembled Rules
--------------------------------------------------------------------------------------*/

pub fn assembled_rules(config: &AllowListConfig, web_acl: &WebAcl) {
    let rule_set = web_acl.rule_set();

    if rule_set.is_empty() {
        warn!("No allow-lists declared; {} allows all traffic", web_acl.name());
        return;
    }

    let count_rules = rule_set.len();
    info!("Assembled {count_rules} block rule(s) for {}", web_acl.name());

    if let Some(rule) = rule_set.get(RuleKind::Network) {
        let count_addresses: usize = rule_set
            .ip_sets()
            .iter()
            .map(|ip_set| ip_set.addresses.len())
            .sum();
        info!(
            "{} allows {count_addresses} CIDR range(s)",
            rule.name(web_acl.id())
        );
    }

    // A declared but empty list blocks the whole dimension
    if config.allowed_ipv4_address_ranges().is_some_and(|r| r.is_empty()) {
        warn!("Allowed IPv4 address ranges is empty; all IPv4 traffic will be blocked");
    }
    if config.allowed_ipv6_address_ranges().is_some_and(|r| r.is_empty()) {
        warn!("Allowed IPv6 address ranges is empty; all IPv6 traffic will be blocked");
    }
    if config.allowed_country_codes().is_some_and(|c| c.is_empty()) {
        warn!("Allowed country codes is empty; all traffic will be blocked");
    }
}
