// Configuration module for form-backup
//
// Provides:
// - Per-form backup options (exclusions, TTL, storage scope)
// - YAML configuration file loading
// - Environment variable substitution
// - Configuration validation

pub mod types;
mod loader;

pub use types::*;
pub use loader::ConfigLoader;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<FormBackupConfig> {
    ConfigLoader::load(path).context("Failed to load configuration")
}

/// Load configuration with environment variable overrides
pub fn load_config_with_env<P: AsRef<Path>>(path: P) -> Result<FormBackupConfig> {
    let mut config = load_config(path)?;

    // Allow environment variables to override config values
    if let Ok(dir) = std::env::var("FORM_BACKUP_DIR") {
        if !dir.trim().is_empty() {
            config.storage.local_dir = Some(dir);
        }
    }

    if let Ok(level) = std::env::var("FORM_BACKUP_LOG_LEVEL") {
        config.logging.level = level;
        ConfigLoader::validate(&config)?;
    }

    Ok(config)
}
