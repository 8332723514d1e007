use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

/*-------------------------------------------------------------------------------------------------
  commonwebacl Binary Tests
-------------------------------------------------------------------------------------------------*/

fn commonwebacl() -> Command {
    let mut command = Command::cargo_bin("commonwebacl").unwrap();
    // Keep allow-lists from the surrounding environment out of the tests
    for env_var in [
        "COMMONWEBACL_SCOPE",
        "COMMONWEBACL_ALLOWED_IPV4_ADDRESS_RANGES",
        "COMMONWEBACL_ALLOWED_IPV6_ADDRESS_RANGES",
        "COMMONWEBACL_ALLOWED_COUNTRY_CODES",
    ] {
        command.env_remove(env_var);
    }
    command
}

/*--------------------------------------------------------------------------------------
  No Arguments - Allow-All Web ACL
--------------------------------------------------------------------------------------*/

#[test]
fn command_no_args() {
    commonwebacl()
        .assert()
        .success()
        .stdout(predicate::str::contains("AWS::WAFv2::WebACL"))
        .stdout(predicate::str::contains("AWS::WAFv2::IPSet").not());
}

/*--------------------------------------------------------------------------------------
  Version
--------------------------------------------------------------------------------------*/

#[test]
fn command_version() {
    commonwebacl().arg("--version").assert().success();
}

/*--------------------------------------------------------------------------------------
  Output Formats
--------------------------------------------------------------------------------------*/

/*-----------------------------------------------------------------------------
  Output: Template
-----------------------------------------------------------------------------*/

#[test]
fn command_output_template() {
    let output = commonwebacl()
        .args(["--id", "Api", "--ipv4", "10.0.0.0/8", "--country", "us,ca"])
        .args(["--output", "template"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let template: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rules = &template["Resources"]["WebAclApi"]["Properties"]["Rules"];
    assert_eq!(rules[0]["Name"], "IpSetRuleApi");
    assert_eq!(rules[0]["Priority"], 1);
    assert_eq!(rules[1]["Name"], "CountryCodeRuleApi");
    assert_eq!(rules[1]["Priority"], 2);
    assert_eq!(
        template["Resources"]["IPv6SetApi"]["Properties"]["Addresses"],
        serde_json::json!(["::/1", "8000::/1"])
    );
    assert_eq!(
        template["Outputs"]["WebAclArn"]["Value"]["Fn::GetAtt"][0],
        "WebAclApi"
    );
}

/*-----------------------------------------------------------------------------
  Output: Table
-----------------------------------------------------------------------------*/

#[test]
fn command_output_table() {
    commonwebacl()
        .args(["--country", "JP", "--output", "table"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CountryCodeRuleWebAcl"))
        .stdout(predicate::str::contains("IpSetRule").not());
}

/*-----------------------------------------------------------------------------
  Output: CIDR
-----------------------------------------------------------------------------*/

#[test]
fn command_output_cidr() {
    commonwebacl()
        .args(["-6", "2001:db8::/32", "--output", "cidr"])
        .assert()
        .success()
        .stdout("0.0.0.0/1\n128.0.0.0/1\n2001:db8::/32\n");
}

/*-----------------------------------------------------------------------------
  Output: Countries
-----------------------------------------------------------------------------*/

#[test]
fn command_output_countries() {
    commonwebacl()
        .args(["-c", "us", "-c", "ca", "--output", "countries"])
        .assert()
        .success()
        .stdout("US\nCA\n");
}

/*--------------------------------------------------------------------------------------
  Scope
--------------------------------------------------------------------------------------*/

#[test]
fn command_scope_edge() {
    commonwebacl()
        .args(["--scope", "edge", "--ipv4", "10.0.0.0/8"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""Scope": "CLOUDFRONT""#));
}

#[test]
fn command_invalid_scope() {
    commonwebacl().args(["--scope", "global"]).assert().failure();
}

/*--------------------------------------------------------------------------------------
  Invalid Input
--------------------------------------------------------------------------------------*/

#[test]
fn command_invalid_prefix() {
    commonwebacl()
        .args(["--ipv4", "10.0.0.0/33"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid IP prefix"));
}

#[test]
fn command_wrong_address_family() {
    commonwebacl()
        .args(["--ipv4", "2001:db8::/32"])
        .assert()
        .failure();
}

#[test]
fn command_invalid_id() {
    commonwebacl().args(["--id", "web-acl"]).assert().failure();
}

/*--------------------------------------------------------------------------------------
  Parameters File and Environment
--------------------------------------------------------------------------------------*/

#[test]
fn command_parameters_file() {
    let mut parameters = tempfile::NamedTempFile::new().unwrap();
    write!(
        parameters,
        r#"{{"scope": "REGIONAL", "allowedIpV4AddressRanges": null, "allowedCountryCodes": ["DE"]}}"#
    )
    .unwrap();

    commonwebacl()
        .arg("--parameters")
        .arg(parameters.path())
        .args(["--output", "countries"])
        .assert()
        .success()
        .stdout("DE\n");
}

#[test]
fn command_arguments_override_environment() {
    commonwebacl()
        .env("COMMONWEBACL_ALLOWED_COUNTRY_CODES", "FR")
        .args(["--country", "IT", "--output", "countries"])
        .assert()
        .success()
        .stdout("IT\n");
}

#[test]
fn command_environment() {
    commonwebacl()
        .env("COMMONWEBACL_ALLOWED_IPV4_ADDRESS_RANGES", "192.0.2.0/24")
        .args(["--output", "cidr"])
        .assert()
        .success()
        .stdout("192.0.2.0/24\n::/1\n8000::/1\n");
}

#[test]
fn command_empty_environment_is_unrestricted() {
    commonwebacl()
        .env("COMMONWEBACL_ALLOWED_IPV4_ADDRESS_RANGES", "")
        .env("COMMONWEBACL_ALLOWED_COUNTRY_CODES", "")
        .args(["--output", "table"])
        .assert()
        .success()
        .stdout(predicate::str::contains("IpSetRule").not())
        .stdout(predicate::str::contains("CountryCodeRule").not());
}

/*--------------------------------------------------------------------------------------
  CSV
--------------------------------------------------------------------------------------*/

#[test]
fn command_csv() {
    let directory = tempfile::tempdir().unwrap();
    let csv_file = directory.path().join("rules.csv");

    commonwebacl()
        .args(["--ipv4", "10.0.0.0/8", "--country", "US", "--output", "table"])
        .arg("--csv")
        .arg(&csv_file)
        .assert()
        .success();

    let csv = std::fs::read_to_string(&csv_file).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Priority,Rule,Action,Condition,Scope"));
    assert!(lines[1].starts_with("1,IpSetRuleWebAcl,block,"));
    assert!(lines[2].starts_with("2,CountryCodeRuleWebAcl,block,"));
}
