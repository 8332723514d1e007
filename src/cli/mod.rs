/*-------------------------------------------------------------------------------------------------
  Command Line Interface (CLI) Modules
-------------------------------------------------------------------------------------------------*/

mod args;
mod core;

pub mod csv;
pub mod log;
pub mod output;

/*--------------------------------------------------------------------------------------
  CLI Module Interface
--------------------------------------------------------------------------------------*/

pub use args::Args;
pub use args::OutputFormat;
pub use core::build_config;
