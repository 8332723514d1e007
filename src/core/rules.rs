use crate::core::config::AllowListConfig;
use crate::core::ip_address_version::IpAddressVersion;
use ipnetwork::IpNetwork;
use log::{debug, trace};
use std::fmt;

/*-------------------------------------------------------------------------------------------------
  Rule Assembler
-------------------------------------------------------------------------------------------------*/

/// Assemble the block rules for an [AllowListConfig].
///
/// - When either address family is declared, a network rule (priority `1`) blocks requests whose
///   source address is in neither the IPv4 nor the IPv6 set. An undeclared family is covered by
///   its universal range so it is not blocked outright.
/// - When country codes are declared, a geo rule (priority `2`) blocks requests that do not
///   originate from one of the countries.
///
/// Requests not blocked by a rule are allowed. An empty [RuleSet] allows all traffic.
///
/// ```
/// let config = commonwebacl::AllowListConfigBuilder::default()
///     .allowed_country_codes(["US", "CA"])
///     .build();
/// let rule_set = commonwebacl::assemble(&config);
///
/// assert_eq!(rule_set.len(), 1);
/// assert_eq!(rule_set.rules()[0].priority(), 2);
/// ```
pub fn assemble(config: &AllowListConfig) -> RuleSet {
    let mut rules: Vec<BlockRule> = Vec::with_capacity(2);

    if config.restricts_networks() {
        let ipv4_set = resolve_ip_set(IpAddressVersion::IPv4, config.allowed_ipv4_address_ranges());
        let ipv6_set = resolve_ip_set(IpAddressVersion::IPv6, config.allowed_ipv6_address_ranges());

        // Block if not (in the IPv4 set or in the IPv6 set)
        let statement = Statement::not(Statement::Or(vec![
            Statement::IpSetReference(ipv4_set),
            Statement::IpSetReference(ipv6_set),
        ]));
        debug!("Emitting network rule: {statement}");
        rules.push(BlockRule::new(RuleKind::Network, statement));
    } else {
        trace!("No address range allow-lists");
    }

    if let Some(country_codes) = config.allowed_country_codes() {
        // Block if not in the allowed country codes
        let statement = Statement::not(Statement::GeoMatch(country_codes.to_vec()));
        debug!("Emitting geo rule: {statement}");
        rules.push(BlockRule::new(RuleKind::Geo, statement));
    } else {
        trace!("No country code allow-list");
    }

    rules.sort_by_key(BlockRule::priority);

    RuleSet {
        rules,
        default_action: Action::Allow,
    }
}

fn resolve_ip_set(version: IpAddressVersion, declared: Option<&[IpNetwork]>) -> IpSet {
    let addresses = match declared {
        Some(ranges) => ranges.to_vec(),
        None => {
            trace!("No {version} allow-list; allowing all {version} addresses");
            version.universal_ranges()
        }
    };
    IpSet { version, addresses }
}

/*-------------------------------------------------------------------------------------------------
  Rule Set
-------------------------------------------------------------------------------------------------*/

/// Block rules in ascending priority order, plus the default action applied to requests that
/// no rule blocks.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RuleSet {
    rules: Vec<BlockRule>,
    default_action: Action,
}

impl RuleSet {
    pub fn rules(&self) -> &[BlockRule] {
        &self.rules
    }

    /// Always [Action::Allow].
    pub fn default_action(&self) -> Action {
        self.default_action
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// An empty rule set allows all traffic.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Get the rule of the given kind, if it was emitted.
    pub fn get(&self, kind: RuleKind) -> Option<&BlockRule> {
        self.rules.iter().find(|rule| rule.kind == kind)
    }

    /// IP sets referenced by the rules, in reference order.
    pub fn ip_sets(&self) -> Vec<&IpSet> {
        self.rules
            .iter()
            .flat_map(|rule| rule.statement.ip_sets())
            .collect()
    }

    /// Country codes matched by the rules, in reference order.
    pub fn country_codes(&self) -> Vec<&str> {
        self.rules
            .iter()
            .flat_map(|rule| rule.statement.country_codes())
            .collect()
    }
}

impl From<&AllowListConfig> for RuleSet {
    fn from(config: &AllowListConfig) -> Self {
        assemble(config)
    }
}

/*-------------------------------------------------------------------------------------------------
  Block Rule
-------------------------------------------------------------------------------------------------*/

/// Kind of block rule. The kind fixes the rule's priority and name prefix.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum RuleKind {
    /// Blocks requests from outside the allowed address ranges.
    Network,

    /// Blocks requests from outside the allowed countries.
    Geo,
}

impl RuleKind {
    /// Priorities are tied to the rule kind and are never renumbered, so a geo-only rule set
    /// still uses priority `2`.
    pub fn priority(&self) -> u32 {
        match self {
            RuleKind::Network => 1,
            RuleKind::Geo => 2,
        }
    }

    pub fn name_prefix(&self) -> &'static str {
        match self {
            RuleKind::Network => "IpSetRule",
            RuleKind::Geo => "CountryCodeRule",
        }
    }

    /// Rule name (also used as the CloudWatch metric name) for a construct identifier.
    pub fn name(&self, id: &str) -> String {
        format!("{}{}", self.name_prefix(), id)
    }
}

/// A rule that blocks requests matching its statement.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BlockRule {
    kind: RuleKind,
    statement: Statement,
}

impl BlockRule {
    fn new(kind: RuleKind, statement: Statement) -> Self {
        Self { kind, statement }
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    pub fn priority(&self) -> u32 {
        self.kind.priority()
    }

    pub fn name(&self, id: &str) -> String {
        self.kind.name(id)
    }

    pub fn statement(&self) -> &Statement {
        &self.statement
    }

    /// Always [Action::Block].
    pub fn action(&self) -> Action {
        Action::Block
    }
}

/*-------------------------------------------------------------------------------------------------
  Statements and Actions
-------------------------------------------------------------------------------------------------*/

/// Rule action.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Action {
    Allow,
    Block,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Allow => write!(f, "allow"),
            Action::Block => write!(f, "block"),
        }
    }
}

/// Match condition of a rule.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Statement {
    /// Matches when the inner statement does not.
    Not(Box<Statement>),

    /// Matches when any inner statement matches.
    Or(Vec<Statement>),

    /// Matches when the request's source address is in the IP set.
    IpSetReference(IpSet),

    /// Matches when the request's geolocated country is one of the country codes.
    GeoMatch(Vec<String>),
}

impl Statement {
    pub fn not(statement: Statement) -> Self {
        Statement::Not(Box::new(statement))
    }

    /// IP sets referenced anywhere in this statement.
    pub fn ip_sets(&self) -> Vec<&IpSet> {
        match self {
            Statement::Not(statement) => statement.ip_sets(),
            Statement::Or(statements) => statements
                .iter()
                .flat_map(|statement| statement.ip_sets())
                .collect(),
            Statement::IpSetReference(ip_set) => vec![ip_set],
            Statement::GeoMatch(_) => Vec::new(),
        }
    }

    /// Country codes matched anywhere in this statement.
    pub fn country_codes(&self) -> Vec<&str> {
        match self {
            Statement::Not(statement) => statement.country_codes(),
            Statement::Or(statements) => statements
                .iter()
                .flat_map(|statement| statement.country_codes())
                .collect(),
            Statement::IpSetReference(_) => Vec::new(),
            Statement::GeoMatch(country_codes) => {
                country_codes.iter().map(String::as_str).collect()
            }
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Not(statement) => write!(f, "NOT ({statement})"),
            Statement::Or(statements) => {
                let statements: Vec<String> = statements.iter().map(|s| s.to_string()).collect();
                write!(f, "{}", statements.join(" OR "))
            }
            Statement::IpSetReference(ip_set) => write!(f, "source IN {ip_set}"),
            Statement::GeoMatch(country_codes) => {
                write!(f, "country IN {{{}}}", country_codes.join(", "))
            }
        }
    }
}

/// An IP set: a single address family and its CIDR ranges.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IpSet {
    pub version: IpAddressVersion,
    pub addresses: Vec<IpNetwork>,
}

impl fmt::Display for IpSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let addresses: Vec<String> = self.addresses.iter().map(|a| a.to_string()).collect();
        write!(f, "{} {{{}}}", self.version, addresses.join(", "))
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
