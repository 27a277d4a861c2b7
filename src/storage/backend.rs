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

// Storage backend trait: a string key-value area

use crate::error::Result;

/// Key-value storage area shaped like the browser Web Storage API
///
/// Every call is synchronous and completes before returning. Implementations
/// do no locking of their own beyond what is needed to be `Sync`; concurrent
/// writers to the same key are last-writer-wins.
pub trait StorageBackend: Send + Sync {
    /// Read the value under `key`, `None` when absent
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key succeeds.
    fn remove_item(&self, key: &str) -> Result<()>;

    /// Get backend type identifier
    fn backend_type(&self) -> &str;
}
