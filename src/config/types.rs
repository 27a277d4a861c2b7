// Copyright 2025 coScene
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Configuration types for form-backup

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Which key space backs a form backup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum StorageScope {
    /// Durable across sessions
    Local,
    /// Lives as long as the tab / host process
    #[default]
    Session,
}

impl StorageScope {
    /// Name of the matching browser facility
    pub fn facility_name(self) -> &'static str {
        match self {
            StorageScope::Local => "localStorage",
            StorageScope::Session => "sessionStorage",
        }
    }
}

// Anything that is not explicitly "local" falls back to session storage
impl From<&str> for StorageScope {
    fn from(value: &str) -> Self {
        if value.eq_ignore_ascii_case("local") {
            StorageScope::Local
        } else {
            StorageScope::Session
        }
    }
}

impl From<String> for StorageScope {
    fn from(value: String) -> Self {
        StorageScope::from(value.as_str())
    }
}

impl fmt::Display for StorageScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageScope::Local => write!(f, "local"),
            StorageScope::Session => write!(f, "session"),
        }
    }
}

/// Per-form backup options
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct BackupOptions {
    /// Field names stripped before anything reaches storage
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Maximum age in milliseconds. `None` means never expire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u64>,

    #[serde(default)]
    pub storage: StorageScope,
}

impl BackupOptions {
    pub fn with_exclude<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_ttl(mut self, ttl_ms: u64) -> Self {
        self.ttl = Some(ttl_ms);
        self
    }

    pub fn with_storage(mut self, storage: StorageScope) -> Self {
        self.storage = storage;
        self
    }

    /// TTL with a zero value treated as absent
    pub fn effective_ttl(&self) -> Option<u64> {
        self.ttl.filter(|ttl| *ttl > 0)
    }
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FormBackupConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub storage: StorageSettings,

    /// Options keyed by form id
    #[serde(default)]
    pub forms: BTreeMap<String, BackupOptions>,
}

impl FormBackupConfig {
    /// Configured options for a form, or the defaults
    pub fn options_for(&self, form_id: &str) -> BackupOptions {
        self.forms.get(form_id).cloned().unwrap_or_default()
    }
}

/// Where the native host keeps its key spaces
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StorageSettings {
    /// Directory backing local-scope storage. Local storage is unavailable
    /// on native hosts when unset.
    #[serde(default)]
    pub local_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,  // "trace", "debug", "info", "warn", "error"

    #[serde(default = "default_log_format")]
    pub format: String,  // "text", "json"
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// Default value functions
fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "text".to_string() }
