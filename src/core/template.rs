use crate::core::config::AllowListConfig;
use crate::core::errors::Result;
use crate::core::ip_address_version::IpAddressVersion;
use crate::core::rules::{self, Action, BlockRule, RuleSet, Statement};
use crate::core::scope::Scope;
use ipnetwork::IpNetwork;
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;

/*-------------------------------------------------------------------------------------------------
  Web ACL
-------------------------------------------------------------------------------------------------*/

/// A Web ACL assembled from an [AllowListConfig]: the [RuleSet] plus the identifiers needed to
/// render it as CloudFormation resources.
///
/// ```
/// let config = commonwebacl::AllowListConfigBuilder::default()
///     .allowed_ipv4_address_ranges(["10.0.0.0/8"])?
///     .build();
/// let web_acl = commonwebacl::WebAcl::new("Frontend", &config)?;
///
/// assert_eq!(web_acl.name(), "WebAcl-Frontend");
/// let json = web_acl.to_json()?;
/// assert!(json.contains("IPv4SetFrontend"));
/// # Ok::<(), commonwebacl::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct WebAcl {
    id: String,
    name_suffix: String,
    scope: Scope,
    rule_set: RuleSet,
}

impl WebAcl {
    /// Assemble a Web ACL. The identifier is used in CloudFormation logical IDs and rule names,
    /// so it must be non-empty and alphanumeric.
    pub fn new(id: &str, config: &AllowListConfig) -> Result<Self> {
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(format!("Invalid Web ACL identifier: {id:?}").into());
        }

        Ok(Self {
            id: id.to_string(),
            name_suffix: id.to_string(),
            scope: config.scope(),
            rule_set: rules::assemble(config),
        })
    }

    /// Set the unique suffix of the Web ACL name; defaults to the identifier. Uniqueness of the
    /// resulting name within the account is the caller's concern.
    pub fn name_suffix(mut self, name_suffix: &str) -> Self {
        self.name_suffix = name_suffix.to_string();
        self
    }

    /*-------------------------------------------------------------------------
      Getters
    -------------------------------------------------------------------------*/

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn rule_set(&self) -> &RuleSet {
        &self.rule_set
    }

    /// Web ACL name, also used as its CloudWatch metric name.
    pub fn name(&self) -> String {
        format!("WebAcl-{}", self.name_suffix)
    }

    pub fn logical_id(&self) -> String {
        format!("WebAcl{}", self.id)
    }

    pub fn ip_set_logical_id(&self, version: IpAddressVersion) -> String {
        match version {
            IpAddressVersion::IPv4 => format!("IPv4Set{}", self.id),
            IpAddressVersion::IPv6 => format!("IPv6Set{}", self.id),
        }
    }

    /*-------------------------------------------------------------------------
      Rendering
    -------------------------------------------------------------------------*/

    /// Render the CloudFormation template. IP set resources are only included when the network
    /// rule references them; the `WebAclArn` output returns the Web ACL's ARN.
    pub fn to_template(&self) -> Template {
        let mut resources: BTreeMap<String, Resource> = BTreeMap::new();

        for ip_set in self.rule_set.ip_sets() {
            resources.insert(
                self.ip_set_logical_id(ip_set.version),
                Resource::IpSet(IpSetProperties {
                    ip_address_version: ip_set.version,
                    scope: self.scope,
                    addresses: ip_set.addresses.clone(),
                }),
            );
        }

        let rules: Vec<RuleProperty> = self
            .rule_set
            .rules()
            .iter()
            .map(|rule| self.rule_property(rule))
            .collect();
        debug!("Rendering {} with {} rule(s)", self.logical_id(), rules.len());

        resources.insert(
            self.logical_id(),
            Resource::WebAcl(WebAclProperties {
                default_action: self.rule_set.default_action().into(),
                name: self.name(),
                scope: self.scope,
                visibility_config: VisibilityConfig::enabled(self.name()),
                rules,
            }),
        );

        let outputs = BTreeMap::from([(
            "WebAclArn".to_string(),
            Output {
                description: format!("ARN of the {} Web ACL", self.name()),
                value: GetAtt::arn(self.logical_id()),
            },
        )]);

        Template {
            aws_template_format_version: "2010-09-09",
            description: format!("{} Web ACL", self.id),
            resources,
            outputs,
        }
    }

    /// Render the CloudFormation template as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_template())?)
    }

    fn rule_property(&self, rule: &BlockRule) -> RuleProperty {
        let name = rule.name(&self.id);
        RuleProperty {
            name: name.clone(),
            priority: rule.priority(),
            action: rule.action().into(),
            statement: self.statement_property(rule.statement()),
            visibility_config: VisibilityConfig::enabled(name),
        }
    }

    fn statement_property(&self, statement: &Statement) -> StatementProperty {
        match statement {
            Statement::Not(statement) => StatementProperty::Not(NotStatementProperty {
                statement: Box::new(self.statement_property(statement)),
            }),
            Statement::Or(statements) => StatementProperty::Or(OrStatementProperty {
                statements: statements
                    .iter()
                    .map(|statement| self.statement_property(statement))
                    .collect(),
            }),
            Statement::IpSetReference(ip_set) => {
                StatementProperty::IpSetReference(IpSetReferenceStatementProperty {
                    arn: GetAtt::arn(self.ip_set_logical_id(ip_set.version)),
                })
            }
            Statement::GeoMatch(country_codes) => {
                StatementProperty::GeoMatch(GeoMatchStatementProperty {
                    country_codes: country_codes.clone(),
                })
            }
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  CloudFormation Data Structures
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Template
--------------------------------------------------------------------------------------*/

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Template {
    #[serde(rename = "AWSTemplateFormatVersion")]
    pub aws_template_format_version: &'static str,
    pub description: String,
    pub resources: BTreeMap<String, Resource>,
    pub outputs: BTreeMap<String, Output>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "Type", content = "Properties")]
pub enum Resource {
    #[serde(rename = "AWS::WAFv2::IPSet")]
    IpSet(IpSetProperties),

    #[serde(rename = "AWS::WAFv2::WebACL")]
    WebAcl(WebAclProperties),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Output {
    pub description: String,
    pub value: GetAtt,
}

/// `Fn::GetAtt` intrinsic function.
#[derive(Debug, Eq, PartialEq, Serialize)]
pub struct GetAtt {
    #[serde(rename = "Fn::GetAtt")]
    pub get_att: [String; 2],
}

impl GetAtt {
    fn arn(logical_id: String) -> Self {
        Self {
            get_att: [logical_id, "Arn".to_string()],
        }
    }
}

/*--------------------------------------------------------------------------------------
  AWS::WAFv2::IPSet
--------------------------------------------------------------------------------------*/

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct IpSetProperties {
    #[serde(rename = "IPAddressVersion")]
    pub ip_address_version: IpAddressVersion,
    pub scope: Scope,
    pub addresses: Vec<IpNetwork>,
}

/*--------------------------------------------------------------------------------------
  AWS::WAFv2::WebACL
--------------------------------------------------------------------------------------*/

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct WebAclProperties {
    pub default_action: ActionProperty,
    pub name: String,
    pub scope: Scope,
    pub visibility_config: VisibilityConfig,
    pub rules: Vec<RuleProperty>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RuleProperty {
    pub name: String,
    pub priority: u32,
    pub action: ActionProperty,
    pub statement: StatementProperty,
    pub visibility_config: VisibilityConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct VisibilityConfig {
    pub sampled_requests_enabled: bool,
    pub cloud_watch_metrics_enabled: bool,
    pub metric_name: String,
}

impl VisibilityConfig {
    fn enabled(metric_name: String) -> Self {
        Self {
            sampled_requests_enabled: true,
            cloud_watch_metrics_enabled: true,
            metric_name,
        }
    }
}

/// Rule or default action; serializes as `{"Allow": {}}` or `{"Block": {}}`.
#[derive(Debug, Eq, PartialEq, Serialize)]
pub enum ActionProperty {
    Allow(EmptyProperty),
    Block(EmptyProperty),
}

#[derive(Debug, Default, Eq, PartialEq, Serialize)]
pub struct EmptyProperty {}

impl From<Action> for ActionProperty {
    fn from(action: Action) -> Self {
        match action {
            Action::Allow => ActionProperty::Allow(EmptyProperty {}),
            Action::Block => ActionProperty::Block(EmptyProperty {}),
        }
    }
}

#[derive(Debug, Serialize)]
pub enum StatementProperty {
    #[serde(rename = "NotStatement")]
    Not(NotStatementProperty),

    #[serde(rename = "OrStatement")]
    Or(OrStatementProperty),

    #[serde(rename = "IPSetReferenceStatement")]
    IpSetReference(IpSetReferenceStatementProperty),

    #[serde(rename = "GeoMatchStatement")]
    GeoMatch(GeoMatchStatementProperty),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NotStatementProperty {
    pub statement: Box<StatementProperty>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrStatementProperty {
    pub statements: Vec<StatementProperty>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct IpSetReferenceStatementProperty {
    pub arn: GetAtt,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GeoMatchStatementProperty {
    pub country_codes: Vec<String>,
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
