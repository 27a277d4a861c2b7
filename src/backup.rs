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

// Form backup store
//
// Wraps one storage slot per form. Operations never fail loudly: storage and
// serialization errors are logged (and passed to an optional diagnostics
// hook) and turned into false / None.

use crate::clock::{Clock, SystemClock};
use crate::config::{BackupOptions, FormBackupConfig};
use crate::error::{FormBackupError, Result};
use crate::payload::{storage_key, FormData, StoredPayload};
use crate::storage::{default_host, StorageBackend, StorageHost};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Operation reported to a diagnostics hook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Save,
    Restore,
    Clear,
    Exists,
    RemainingTtl,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Save => "save",
            Operation::Restore => "restore",
            Operation::Clear => "clear",
            Operation::Exists => "exists",
            Operation::RemainingTtl => "remaining_ttl",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives every error a `FormBackup` swallows
pub type DiagnosticHook = Arc<dyn Fn(Operation, &FormBackupError) + Send + Sync>;

#[derive(Clone)]
enum Mode {
    Live(Arc<dyn StorageBackend>),
    /// Storage was unavailable at construction; every operation is a no-op
    Null,
}

/// Persists one form's in-progress data
#[derive(Clone)]
pub struct FormBackup {
    form_id: String,
    storage_key: String,
    options: BackupOptions,
    exclude: HashSet<String>,
    ttl: Option<u64>,
    mode: Mode,
    clock: Arc<dyn Clock>,
    diagnostics: Option<DiagnosticHook>,
}

/// Create a backup for `form_id` on the default host
pub fn create_form_backup(
    form_id: impl Into<String>,
    options: BackupOptions,
) -> Result<FormBackup> {
    FormBackup::new(form_id, options)
}

impl FormBackup {
    /// Create a backup on the default host for this target
    pub fn new(form_id: impl Into<String>, options: BackupOptions) -> Result<Self> {
        Self::with_host(form_id, options, default_host())
    }

    /// Create a backup, asking `host` for the configured storage scope
    ///
    /// An unavailable scope does not fail construction: the returned backup
    /// is degraded and all of its operations return their empty result.
    pub fn with_host(
        form_id: impl Into<String>,
        options: BackupOptions,
        host: &dyn StorageHost,
    ) -> Result<Self> {
        let form_id = validate_form_id(form_id.into())?;

        let mode = match host.storage(options.storage) {
            Ok(storage) => Mode::Live(storage),
            Err(e) => {
                warn!("Form backup for '{}' disabled: {}", form_id, e);
                Mode::Null
            }
        };

        Ok(Self::build(form_id, options, mode))
    }

    /// Create a backup over an explicit storage backend
    pub fn with_storage(
        form_id: impl Into<String>,
        options: BackupOptions,
        storage: Arc<dyn StorageBackend>,
    ) -> Result<Self> {
        let form_id = validate_form_id(form_id.into())?;
        Ok(Self::build(form_id, options, Mode::Live(storage)))
    }

    /// Create a backup using the options and storage settings from a config file
    ///
    /// Local-scope forms use `storage.local_dir` when it is set; everything
    /// else goes through the default host.
    pub fn from_config(form_id: impl Into<String>, config: &FormBackupConfig) -> Result<Self> {
        let form_id = validate_form_id(form_id.into())?;
        let options = config.options_for(&form_id);

        match configured_local_storage(&options, config) {
            Some(storage) => Self::with_storage(form_id, options, storage),
            None => Self::with_host(form_id, options, default_host()),
        }
    }

    fn build(form_id: String, options: BackupOptions, mode: Mode) -> Self {
        Self {
            storage_key: storage_key(&form_id),
            exclude: options.exclude.iter().cloned().collect(),
            ttl: options.effective_ttl(),
            form_id,
            options,
            mode,
            clock: Arc::new(SystemClock),
            diagnostics: None,
        }
    }

    /// Replace the time source used for timestamps and expiry
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Register a hook that sees every swallowed error
    pub fn with_diagnostics<F>(mut self, hook: F) -> Self
    where
        F: Fn(Operation, &FormBackupError) + Send + Sync + 'static,
    {
        self.diagnostics = Some(Arc::new(hook));
        self
    }

    pub fn form_id(&self) -> &str {
        &self.form_id
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn options(&self) -> &BackupOptions {
        &self.options
    }

    /// True when storage was unavailable at construction
    pub fn is_degraded(&self) -> bool {
        matches!(self.mode, Mode::Null)
    }

    pub fn backend_type(&self) -> Option<&str> {
        match &self.mode {
            Mode::Live(storage) => Some(storage.backend_type()),
            Mode::Null => None,
        }
    }

    /// Store `data` minus excluded fields, replacing any previous backup
    pub fn save(&self, data: &FormData) -> bool {
        let Mode::Live(storage) = &self.mode else {
            return false;
        };

        let filtered: FormData = data
            .iter()
            .filter(|(field, _)| !self.exclude.contains(field.as_str()))
            .map(|(field, value)| (field.clone(), value.clone()))
            .collect();
        let payload = StoredPayload::new(filtered, self.clock.now_ms());

        let result = payload
            .encode()
            .and_then(|raw| storage.set_item(&self.storage_key, &raw));

        match result {
            Ok(()) => {
                debug!(
                    "Saved {} fields for form '{}'",
                    payload.data.len(),
                    self.form_id
                );
                true
            }
            Err(e) => {
                self.report(Operation::Save, &e);
                false
            }
        }
    }

    /// Serialize `value` and save it; it must serialize to a JSON object
    pub fn save_as<T: Serialize>(&self, value: &T) -> bool {
        if self.is_degraded() {
            return false;
        }

        match serde_json::to_value(value) {
            Ok(serde_json::Value::Object(data)) => self.save(&data),
            Ok(_) => {
                let e = <serde_json::Error as serde::ser::Error>::custom(
                    "form data must serialize to a JSON object",
                );
                self.report(Operation::Save, &e.into());
                false
            }
            Err(e) => {
                self.report(Operation::Save, &e.into());
                false
            }
        }
    }

    /// Load the saved data
    ///
    /// Expired backups are removed and read as `None`. A payload that fails
    /// to parse also reads as `None` but is left in storage.
    pub fn restore(&self) -> Option<FormData> {
        let Mode::Live(storage) = &self.mode else {
            return None;
        };

        match self.load_payload(storage.as_ref()) {
            Ok(Some(payload)) => {
                if self.is_expired(&payload) {
                    info!("Form backup for '{}' expired, clearing", self.form_id);
                    self.clear();
                    return None;
                }
                Some(payload.data)
            }
            Ok(None) => None,
            Err(e) => {
                self.report(Operation::Restore, &e);
                None
            }
        }
    }

    /// Load the saved data and deserialize it into `T`
    pub fn restore_as<T: DeserializeOwned>(&self) -> Option<T> {
        let data = self.restore()?;

        match serde_json::from_value(serde_json::Value::Object(data)) {
            Ok(value) => Some(value),
            Err(e) => {
                self.report(Operation::Restore, &e.into());
                None
            }
        }
    }

    /// Remove the backup. Succeeds when nothing is stored.
    pub fn clear(&self) -> bool {
        let Mode::Live(storage) = &self.mode else {
            return false;
        };

        match storage.remove_item(&self.storage_key) {
            Ok(()) => true,
            Err(e) => {
                self.report(Operation::Clear, &e);
                false
            }
        }
    }

    /// Whether anything is stored under this form's key, expired or not
    pub fn exists(&self) -> bool {
        let Mode::Live(storage) = &self.mode else {
            return false;
        };

        match storage.get_item(&self.storage_key) {
            Ok(value) => value.is_some(),
            Err(e) => {
                self.report(Operation::Exists, &e);
                false
            }
        }
    }

    /// Milliseconds until the stored backup expires, floored at zero
    ///
    /// `None` without a TTL, without a stored backup, or when the stored
    /// payload cannot be parsed. Never evicts.
    pub fn remaining_ttl(&self) -> Option<u64> {
        let ttl = self.ttl?;
        let Mode::Live(storage) = &self.mode else {
            return None;
        };

        match self.load_payload(storage.as_ref()) {
            Ok(Some(payload)) => {
                let age = payload.age_ms(self.clock.now_ms());
                let remaining = ttl_as_millis(ttl).saturating_sub(age);
                Some(u64::try_from(remaining).unwrap_or(0))
            }
            Ok(None) => None,
            Err(e) => {
                self.report(Operation::RemainingTtl, &e);
                None
            }
        }
    }

    // An empty stored string counts as absent
    fn load_payload(&self, storage: &dyn StorageBackend) -> Result<Option<StoredPayload>> {
        match storage.get_item(&self.storage_key)? {
            Some(raw) if !raw.is_empty() => StoredPayload::decode(&raw).map(Some),
            _ => Ok(None),
        }
    }

    // Payloads without a timestamp never expire
    fn is_expired(&self, payload: &StoredPayload) -> bool {
        match self.ttl {
            Some(ttl) if payload.timestamp != 0 => {
                payload.age_ms(self.clock.now_ms()) > ttl_as_millis(ttl)
            }
            _ => false,
        }
    }

    fn report(&self, operation: Operation, err: &FormBackupError) {
        match operation {
            Operation::Save | Operation::Restore | Operation::Clear => error!(
                "Form backup {} failed for '{}' ({}): {}",
                operation,
                self.form_id,
                err.kind(),
                err
            ),
            Operation::Exists | Operation::RemainingTtl => debug!(
                "Form backup {} failed for '{}' ({}): {}",
                operation,
                self.form_id,
                err.kind(),
                err
            ),
        }

        if let Some(hook) = &self.diagnostics {
            hook(operation, err);
        }
    }
}

impl fmt::Debug for FormBackup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormBackup")
            .field("form_id", &self.form_id)
            .field("storage_key", &self.storage_key)
            .field("options", &self.options)
            .field("backend", &self.backend_type())
            .finish()
    }
}

fn validate_form_id(form_id: String) -> Result<String> {
    if form_id.is_empty() {
        return Err(FormBackupError::Configuration(
            "formId is required".to_string(),
        ));
    }
    Ok(form_id)
}

#[cfg(not(target_arch = "wasm32"))]
fn configured_local_storage(
    options: &BackupOptions,
    config: &FormBackupConfig,
) -> Option<Arc<dyn StorageBackend>> {
    if options.storage != crate::config::StorageScope::Local {
        return None;
    }
    let dir = config.storage.local_dir.as_ref()?;
    Some(Arc::new(crate::storage::FileStorage::new(dir)))
}

// Browsers always use Web Storage
#[cfg(target_arch = "wasm32")]
fn configured_local_storage(
    _options: &BackupOptions,
    _config: &FormBackupConfig,
) -> Option<Arc<dyn StorageBackend>> {
    None
}

fn ttl_as_millis(ttl: u64) -> i64 {
    i64::try_from(ttl).unwrap_or(i64::MAX)
}
