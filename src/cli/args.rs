use clap::{Parser, ValueEnum};
use commonwebacl::Scope;
use std::path::PathBuf;

/*-------------------------------------------------------------------------------------------------
  Command Line Interface (CLI) Arguments
-------------------------------------------------------------------------------------------------*/

#[derive(Parser, Debug)]
#[command(author, version, about="Assemble an AWS WAFv2 Web ACL from IP and country allow-lists.", long_about = None)]
pub struct Args {
    /// Allow only these IPv4 CIDR ranges
    #[arg(short = '4', long = "ipv4", value_delimiter = ',')]
    pub allowed_ipv4_address_ranges: Option<Vec<String>>,

    /// Allow only these IPv6 CIDR ranges
    #[arg(short = '6', long = "ipv6", value_delimiter = ',')]
    pub allowed_ipv6_address_ranges: Option<Vec<String>>,

    /// Allow only requests from these countries (ISO 3166-1 alpha-2 codes)
    #[arg(short = 'c', long = "country", value_delimiter = ',')]
    pub allowed_country_codes: Option<Vec<String>>,

    /// Deployment scope: REGIONAL or CLOUDFRONT (EDGE)
    #[arg(short = 's', long)]
    pub scope: Option<Scope>,

    /// Read the allow-lists from a JSON parameters file
    #[arg(short = 'p', long = "parameters")]
    pub parameters_file: Option<PathBuf>,

    /// Identifier used in resource logical IDs and rule names
    #[arg(long, default_value = "WebAcl")]
    pub id: String,

    /// Unique suffix for the Web ACL name (defaults to the identifier)
    #[arg(long)]
    pub name_suffix: Option<String>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Template)]
    pub output: OutputFormat,

    /// Save the assembled rules to a CSV file
    #[arg(long = "csv")]
    pub csv_file: Option<PathBuf>,

    /// Logging verbosity
    #[command(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,
}

/*--------------------------------------------------------------------------------------
  Output Format
--------------------------------------------------------------------------------------*/

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// CloudFormation template (JSON)
    Template,

    /// Table of the assembled rules
    Table,

    /// Allowed CIDR ranges, one per line
    Cidr,

    /// Allowed country codes, one per line
    Countries,
}
