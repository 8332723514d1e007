use commonwebacl::{Result, WebAcl};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{NOTHING, UTF8_FULL};
use comfy_table::*;

/*-------------------------------------------------------------------------------------------------
  Output Functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  CloudFormation Template
--------------------------------------------------------------------------------------*/

pub fn template(web_acl: &WebAcl) -> Result<()> {
    println!("{}", web_acl.to_json()?);
    Ok(())
}

/*--------------------------------------------------------------------------------------
  Rule Table
--------------------------------------------------------------------------------------*/

pub fn rule_table(web_acl: &WebAcl) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Priority")
            .add_attribute(Attribute::Bold)
            .fg(Color::Green),
        Cell::new("Rule")
            .add_attribute(Attribute::Bold)
            .fg(Color::Green),
        Cell::new("Action")
            .add_attribute(Attribute::Bold)
            .fg(Color::Green),
        Cell::new("Condition")
            .add_attribute(Attribute::Bold)
            .fg(Color::Green),
    ]);

    for rule in web_acl.rule_set().rules() {
        table.add_row(vec![
            Cell::new(rule.priority()).add_attribute(Attribute::Bold),
            Cell::new(rule.name(web_acl.id())),
            Cell::new(rule.action()).fg(Color::Red),
            Cell::new(rule.statement()),
        ]);
    }

    // Right-align the Priority column
    let column = table.column_mut(0).expect("The first column exists");
    column.set_cell_alignment(CellAlignment::Right);

    println!("{table}");

    // Print rule-table summary
    let mut summary_table = Table::new();
    summary_table
        .load_preset(NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic);

    summary_table.add_row(vec![Cell::new("Web ACL"), Cell::new(web_acl.name())]);
    summary_table.add_row(vec![Cell::new("Scope"), Cell::new(web_acl.scope())]);
    summary_table.add_row(vec![
        Cell::new("Block rules"),
        Cell::new(web_acl.rule_set().len()),
    ]);
    summary_table.add_row(vec![
        Cell::new("Default action"),
        Cell::new(web_acl.rule_set().default_action()),
    ]);

    println!("{summary_table}");
}

/*--------------------------------------------------------------------------------------
  Allowed CIDR Ranges
--------------------------------------------------------------------------------------*/

pub fn cidrs(web_acl: &WebAcl) {
    for ip_set in web_acl.rule_set().ip_sets() {
        for address in ip_set.addresses.iter() {
            println!("{address}");
        }
    }
}

/*--------------------------------------------------------------------------------------
  Allowed Country Codes
--------------------------------------------------------------------------------------*/

pub fn countries(web_acl: &WebAcl) {
    for country_code in web_acl.rule_set().country_codes() {
        println!("{country_code}");
    }
}
