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

// Storage hosts: resolve a storage scope to a backend for the current environment

use super::backend::StorageBackend;
use super::filesystem::FileStorage;
use super::memory::MemoryStorage;
use crate::config::{StorageScope, StorageSettings};
use crate::error::{FormBackupError, Result};
use std::sync::Arc;

/// Environment that may or may not provide local and session storage
///
/// An `Err` from `storage` is the capability check that puts a
/// `FormBackup` into its no-op mode.
pub trait StorageHost: Send + Sync {
    fn storage(&self, scope: StorageScope) -> Result<Arc<dyn StorageBackend>>;
}

/// Host for native processes
///
/// Session storage is an in-memory key space shared by every backup created
/// from this host. Local storage is a directory on disk, and is unavailable
/// when no directory is configured.
#[derive(Debug, Clone, Default)]
pub struct NativeHost {
    session: Arc<MemoryStorage>,
    local: Option<Arc<FileStorage>>,
}

impl NativeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_local_dir<P: AsRef<std::path::Path>>(mut self, dir: P) -> Self {
        self.local = Some(Arc::new(FileStorage::new(dir)));
        self
    }

    pub fn from_settings(settings: &StorageSettings) -> Self {
        match &settings.local_dir {
            Some(dir) => Self::new().with_local_dir(dir),
            None => Self::new(),
        }
    }

    /// Host configured from `FORM_BACKUP_DIR`
    pub fn from_env() -> Self {
        let local_dir = std::env::var("FORM_BACKUP_DIR")
            .ok()
            .filter(|dir| !dir.trim().is_empty());

        Self::from_settings(&StorageSettings { local_dir })
    }

    pub fn session_storage(&self) -> Arc<MemoryStorage> {
        self.session.clone()
    }
}

impl StorageHost for NativeHost {
    fn storage(&self, scope: StorageScope) -> Result<Arc<dyn StorageBackend>> {
        match scope {
            StorageScope::Session => Ok(self.session.clone()),
            StorageScope::Local => match &self.local {
                Some(local) => Ok(local.clone()),
                None => Err(FormBackupError::StorageUnavailable(
                    scope.facility_name().to_string(),
                )),
            },
        }
    }
}

/// Host with no storage at all
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessHost;

impl StorageHost for HeadlessHost {
    fn storage(&self, scope: StorageScope) -> Result<Arc<dyn StorageBackend>> {
        Err(FormBackupError::StorageUnavailable(
            scope.facility_name().to_string(),
        ))
    }
}

/// Host backed by the page's Web Storage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserHost;

#[cfg(target_arch = "wasm32")]
impl StorageHost for BrowserHost {
    fn storage(&self, scope: StorageScope) -> Result<Arc<dyn StorageBackend>> {
        super::web::BrowserStorage::open(scope)
            .map(|storage| Arc::new(storage) as Arc<dyn StorageBackend>)
            .ok_or_else(|| FormBackupError::StorageUnavailable(scope.facility_name().to_string()))
    }
}

/// Host for the current target
#[cfg(target_arch = "wasm32")]
pub fn default_host() -> &'static dyn StorageHost {
    &BrowserHost
}

/// Host for the current target
///
/// On native targets this is one process-wide [`NativeHost`], so backups
/// created separately still share session storage.
#[cfg(not(target_arch = "wasm32"))]
pub fn default_host() -> &'static dyn StorageHost {
    static HOST: std::sync::OnceLock<NativeHost> = std::sync::OnceLock::new();
    HOST.get_or_init(NativeHost::from_env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_native_session_always_available() {
        let host = NativeHost::new();
        let storage = host.storage(StorageScope::Session).unwrap();
        assert_eq!(storage.backend_type(), "memory");
    }

    #[test]
    fn test_native_session_is_shared() {
        let host = NativeHost::new();
        host.storage(StorageScope::Session)
            .unwrap()
            .set_item("k", "v")
            .unwrap();

        let again = host.storage(StorageScope::Session).unwrap();
        assert_eq!(again.get_item("k").unwrap(), Some("v".to_string()));
        assert_eq!(host.session_storage().len(), 1);
    }

    #[test]
    fn test_native_local_requires_dir() {
        let host = NativeHost::new();
        let err = host.storage(StorageScope::Local).err().unwrap();
        assert_eq!(err.kind(), "storage_unavailable");
        assert!(err.to_string().contains("localStorage"));
    }

    #[test]
    fn test_native_local_with_dir() {
        let temp_dir = TempDir::new().unwrap();
        let host = NativeHost::from_settings(&StorageSettings {
            local_dir: Some(temp_dir.path().to_string_lossy().to_string()),
        });

        let storage = host.storage(StorageScope::Local).unwrap();
        assert_eq!(storage.backend_type(), "filesystem");
    }

    #[test]
    fn test_headless_has_nothing() {
        assert!(HeadlessHost.storage(StorageScope::Session).is_err());
        assert!(HeadlessHost.storage(StorageScope::Local).is_err());
    }
}
