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

// Browser Web Storage backend (wasm32 only)

use super::backend::StorageBackend;
use crate::config::StorageScope;
use crate::error::{FormBackupError, Result};

/// `window.localStorage` or `window.sessionStorage`
///
/// The `web_sys::Storage` handle is looked up on every call rather than held,
/// since JS handles are neither `Send` nor `Sync`.
#[derive(Debug, Clone, Copy)]
pub struct BrowserStorage {
    scope: StorageScope,
}

impl BrowserStorage {
    /// Returns `None` when the page has no window or the facility is disabled
    pub fn open(scope: StorageScope) -> Option<Self> {
        let storage = Self { scope };
        storage.storage().ok().map(|_| storage)
    }

    fn storage(&self) -> Result<web_sys::Storage> {
        let unavailable =
            || FormBackupError::StorageUnavailable(self.scope.facility_name().to_string());

        let window = web_sys::window().ok_or_else(unavailable)?;
        let storage = match self.scope {
            StorageScope::Local => window.local_storage(),
            StorageScope::Session => window.session_storage(),
        };

        storage.ok().flatten().ok_or_else(unavailable)
    }
}

impl StorageBackend for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|e| FormBackupError::StorageRead(format!("{:?}", e)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        // Quota exceeded surfaces here as a DOMException
        self.storage()?
            .set_item(key, value)
            .map_err(|e| FormBackupError::StorageWrite(format!("{:?}", e)))
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| FormBackupError::StorageWrite(format!("{:?}", e)))
    }

    fn backend_type(&self) -> &str {
        self.scope.facility_name()
    }
}
