#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, LocalStorage};

pub const SUPPORTED_OUTPUT_FORMATS: [&str; 2] = ["json", "csv"];
pub const DEFAULT_CATALOG_SEED: u64 = 1;
