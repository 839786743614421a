pub mod api;
pub mod cli;
pub mod error;
pub mod exec;
pub mod extraction;
pub mod locate;
pub mod output;
pub mod types;

pub use api::{HarvestConfig, HarvestMode, MetadataHarvester, TreeLayout};
pub use error::{HarvestError, Result};
pub use exec::{SystemToolRunner, ToolRunner};
pub use output::write_csv;
pub use types::*;
