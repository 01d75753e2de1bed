//! CLI command implementations

mod config_gen;
mod migrate;
mod seed;

pub use config_gen::config_generate;
pub use migrate::run_migrate;
pub use seed::run_seed;
