//! Configuration file parsing for snipkit
//!
//! Supports:
//! - `.snipkit/config.toml` - Snippets root and template listing defaults

pub mod settings;
pub mod types;

pub use settings::{config_path, load_settings, write_default_config, CONFIG_FILENAME, SNIPKIT_DIR};
pub use types::*;
