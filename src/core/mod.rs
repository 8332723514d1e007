/*-------------------------------------------------------------------------------------------------
  Core Modules
-------------------------------------------------------------------------------------------------*/

pub mod config;
pub mod errors;
pub mod ip_address_version;
pub mod rules;
pub mod scope;
pub mod template;
pub mod utils;
