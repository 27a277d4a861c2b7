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

// Form backup: keep in-progress form input across page reloads
//
// Persists a form's field data into local or session key-value storage:
// - Strips excluded fields (passwords, card numbers) before writing
// - Expires backups lazily after an optional TTL
// - Degrades to a no-op store when the host has no storage
// - Never fails a caller's form handling on runtime errors

pub mod backup;
pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod payload;
pub mod storage;

// Re-export main types
pub use backup::{create_form_backup, DiagnosticHook, FormBackup, Operation};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{
    load_config, load_config_with_env, BackupOptions, FormBackupConfig, LoggingConfig,
    StorageScope, StorageSettings,
};
pub use error::{FormBackupError, Result};
pub use logging::init_logging;
pub use payload::{storage_key, FormData, StoredPayload};
pub use storage::{
    default_host, FileStorage, HeadlessHost, MemoryStorage, NativeHost, StorageBackend,
    StorageHost,
};
