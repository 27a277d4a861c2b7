// Configuration loader with environment variable substitution

use super::types::*;
use anyhow::{bail, Context, Result};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 2] = ["text", "json"];

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file with environment variable substitution
    pub fn load<P: AsRef<Path>>(path: P) -> Result<FormBackupConfig> {
        let content = std::fs::read_to_string(path.as_ref())
            .context("Failed to read config file")?;

        Self::parse_str(&content)
    }

    /// Parse configuration from YAML text
    pub fn parse_str(content: &str) -> Result<FormBackupConfig> {
        let content = Self::substitute_env_vars(content);

        let config: FormBackupConfig = serde_yaml::from_str(&content)
            .context("Failed to parse YAML configuration")?;

        Self::validate(&config)?;

        Ok(config)
    }

    /// Substitute ${VAR} and ${VAR:-default} patterns with environment variables
    ///
    /// Examples:
    /// - ${HOME} -> /home/user
    /// - ${FORM_BACKUP_DIR:-/tmp/forms} -> /tmp/forms (if FORM_BACKUP_DIR not set)
    fn substitute_env_vars(content: &str) -> String {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        let re = PATTERN.get_or_init(|| {
            Regex::new(r"\$\{([^}:]+)(?::-([^}]+))?\}").expect("env var pattern is valid")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            let default_value = caps.get(2).map(|m| m.as_str());

            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => match default_value {
                    Some(default) => default.to_string(),
                    // Keep original if no default and var not found
                    None => format!("${{{}}}", var_name),
                },
            }
        })
        .to_string()
    }

    /// Validate configuration
    pub(crate) fn validate(config: &FormBackupConfig) -> Result<()> {
        let level = config.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            bail!(
                "logging.level must be one of {:?}, got '{}'",
                LOG_LEVELS,
                config.logging.level
            );
        }

        let format = config.logging.format.to_lowercase();
        if !LOG_FORMATS.contains(&format.as_str()) {
            bail!(
                "logging.format must be one of {:?}, got '{}'",
                LOG_FORMATS,
                config.logging.format
            );
        }

        if let Some(dir) = &config.storage.local_dir {
            if dir.trim().is_empty() {
                bail!("storage.local_dir cannot be empty");
            }
        }

        for (form_id, options) in &config.forms {
            if form_id.is_empty() {
                bail!("forms: form id cannot be empty");
            }
            if options.exclude.iter().any(|field| field.is_empty()) {
                bail!("forms.{}.exclude cannot contain empty field names", form_id);
            }
        }

        Ok(())
    }
}
