//! Settings parser for .atile/config.toml

use super::types::Settings;
use atile_core::prelude::*;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.toml";
const ATILE_DIR: &str = ".atile";

/// Path of the settings file for a site root
pub fn config_path(project_path: &Path) -> PathBuf {
    project_path.join(ATILE_DIR).join(CONFIG_FILENAME)
}

/// Read and validate settings, failing on any problem.
pub fn read_settings(project_path: &Path) -> Result<Settings> {
    let path = config_path(project_path);
    if !path.exists() {
        return Err(Error::ConfigNotFound { path });
    }

    let content = std::fs::read_to_string(&path)?;
    let settings: Settings = toml::from_str(&content)?;
    settings.validate()?;
    Ok(settings)
}

/// Load settings from .atile/config.toml
///
/// Returns default settings if the file doesn't exist. A file that cannot
/// be read, parsed or validated is logged and replaced by the defaults.
pub fn load_settings(project_path: &Path) -> Settings {
    match read_settings(project_path) {
        Ok(settings) => {
            debug!("Loaded settings from {:?}", config_path(project_path));
            settings
        }
        Err(Error::ConfigNotFound { path }) => {
            debug!("No config file at {:?}, using defaults", path);
            Settings::default()
        }
        Err(e) => {
            warn!(
                "Ignoring {:?}: {}",
                config_path(project_path),
                e
            );
            Settings::default()
        }
    }
}

/// Create default config files in .atile/ directory
pub fn init_config_dir(project_path: &Path) -> Result<()> {
    let atile_dir = project_path.join(ATILE_DIR);

    if !atile_dir.exists() {
        std::fs::create_dir_all(&atile_dir)
            .map_err(|e| Error::config(format!("Failed to create .atile dir: {}", e)))?;
    }

    let config_path = atile_dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        let default_content = r#"# Aesthetic Tile interaction settings

[relay]
endpoint = "https://formspree.io/f/mzzjzbpk"
subject = "Aesthetic Tile — New Website Inquiry"

[rotation]
interval_ms = 8000      # Time between automatic advances
cooldown_ms = 15000     # Pause after manual navigation

[scroll]
shadow_threshold = 100.0
back_to_top_ratio = 0.75

[observer]
threshold = 0.1
root_margin = { top = 0.0, right = 0.0, bottom = -50.0, left = 0.0 }

[contact]
phone_label = "(502) 650-7014"
phone_href = "tel:+15026507014"
email = "office@aesthetictile.com"
"#;
        std::fs::write(&config_path, default_content)
            .map_err(|e| Error::config(format!("Failed to write config.toml: {}", e)))?;
        info!("Created default config at {:?}", config_path);
    }

    Ok(())
}
