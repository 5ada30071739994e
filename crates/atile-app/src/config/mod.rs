//! Configuration file parsing for the interaction layer
//!
//! Supports:
//! - `.atile/config.toml` - Relay, timing, scroll, observer and contact settings

pub mod settings;
pub mod types;

pub use settings::{config_path, init_config_dir, load_settings, read_settings};
pub use types::*;
