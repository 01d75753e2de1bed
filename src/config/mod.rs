mod r#impl;
mod structs;
pub mod types;

pub use r#impl::{DEFAULT_CONFIG_PATH, get_config, init_config, init_config_from, try_get_config};
pub use structs::*;
pub use types::{Environment, LogFormat, TS_EXPORT_PATH};
