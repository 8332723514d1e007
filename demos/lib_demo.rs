use commonwebacl::{AllowListConfigBuilder, Result, RuleKind, Scope, WebAcl};

fn main() -> Result<()> {
    // Declare the allow-lists
    let config = AllowListConfigBuilder::default()
        .scope(Scope::Edge)
        .allowed_ipv4_address_ranges(["192.0.2.0/24", "198.51.100.0/24"])?
        .allowed_country_codes(["JP"])
        .build();

    // Assemble the block rules
    let rule_set = commonwebacl::assemble(&config);
    for rule in rule_set.rules() {
        println!("{} {:?}: {}", rule.priority(), rule.kind(), rule.statement());
    }
    if let Some(rule) = rule_set.get(RuleKind::Geo) {
        println!("Geo rule name: {}", rule.name("Demo"));
    }

    // Render the CloudFormation template
    let web_acl = WebAcl::new("Demo", &config)?.name_suffix("Demo8F3A1C");
    println!("{}", web_acl.to_json()?);

    Ok(())
}
