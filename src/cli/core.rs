use crate::cli;
use commonwebacl::{AllowListConfig, AllowListConfigBuilder, Result};
use log::debug;

/*-------------------------------------------------------------------------------------------------
  Core functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Build Allow-List Config from CLI arguments
--------------------------------------------------------------------------------------*/

/// Source the allow-lists from the parameters file (or the environment when no file is given),
/// then apply any allow-lists passed on the command line.
pub fn build_config(args: &cli::Args) -> Result<AllowListConfig> {
    let mut builder = match &args.parameters_file {
        Some(path) => AllowListConfigBuilder::from_file(path)?,
        None => AllowListConfigBuilder::new(),
    };

    if let Some(scope) = args.scope {
        builder.scope(scope);
    }

    if let Some(ranges) = &args.allowed_ipv4_address_ranges {
        builder.allowed_ipv4_address_ranges(ranges)?;
    }

    if let Some(ranges) = &args.allowed_ipv6_address_ranges {
        builder.allowed_ipv6_address_ranges(ranges)?;
    }

    if let Some(country_codes) = &args.allowed_country_codes {
        builder.allowed_country_codes(country_codes);
    }

    let config = builder.build();
    debug!("Allow-list config: {:?}", config);

    Ok(config)
}
