mod cli;

use clap::Parser;
use cli::OutputFormat;
use commonwebacl::{Result, WebAcl};
use log::{info, LevelFilter};

/*-------------------------------------------------------------------------------------------------
  Main CLI Function
-------------------------------------------------------------------------------------------------*/

fn main() -> Result<()> {
    let args = cli::Args::parse();

    // stderrlog verbosity counts from `0` (errors only)
    let log_level = args.verbose.log_level_filter();
    stderrlog::new()
        .module(module_path!())
        .quiet(log_level == LevelFilter::Off)
        .verbosity((log_level as usize).saturating_sub(1))
        .init()?;

    let config = cli::build_config(&args)?;

    let mut web_acl = WebAcl::new(&args.id, &config)?;
    if let Some(name_suffix) = &args.name_suffix {
        web_acl = web_acl.name_suffix(name_suffix);
    }

    cli::log::assembled_rules(&config, &web_acl);

    match args.output {
        OutputFormat::Template => cli::output::template(&web_acl)?,
        OutputFormat::Table => cli::output::rule_table(&web_acl),
        OutputFormat::Cidr => cli::output::cidrs(&web_acl),
        OutputFormat::Countries => cli::output::countries(&web_acl),
    }

    if let Some(csv_file) = &args.csv_file {
        cli::csv::save(&web_acl, csv_file)?;
        info!("Saved {} rule(s) to {}", web_acl.rule_set().len(), csv_file.display());
    }

    Ok(())
}
