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

// Filesystem backend implementation, used for durable local-scope storage

use super::backend::StorageBackend;
use crate::error::{FormBackupError, Result};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

const FILE_EXTENSION: &str = "json";

/// Filesystem backend keeping one file per key under a base directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        let base_path = base_path.as_ref().to_path_buf();

        info!(
            "Initializing filesystem storage at: {}",
            base_path.display()
        );

        Self { base_path }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Get the file path for a given key
    fn get_file_path(&self, key: &str) -> PathBuf {
        self.base_path
            .join(format!("{}.{}", key_to_file_name(key), FILE_EXTENSION))
    }

    /// Ensure base directory exists
    fn ensure_base_directory(&self) -> Result<()> {
        if !self.base_path.exists() {
            debug!("Creating base directory: {}", self.base_path.display());
            fs::create_dir_all(&self.base_path).map_err(|e| {
                FormBackupError::StorageWrite(format!(
                    "failed to create {}: {}",
                    self.base_path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }
}

impl StorageBackend for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let file_path = self.get_file_path(key);

        match fs::read_to_string(&file_path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(FormBackupError::StorageRead(format!(
                "failed to read {}: {}",
                file_path.display(),
                e
            ))),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_base_directory()?;

        let file_path = self.get_file_path(key);
        let write_error = |e: std::io::Error| {
            FormBackupError::StorageWrite(format!(
                "failed to write {}: {}",
                file_path.display(),
                e
            ))
        };

        debug!("Writing {} bytes to {}", value.len(), file_path.display());

        // Each write gets its own temp file, renamed into place so readers
        // never observe a half-written value
        let mut tmp_file = NamedTempFile::new_in(&self.base_path).map_err(write_error)?;
        tmp_file
            .write_all(value.as_bytes())
            .and_then(|_| tmp_file.flush())
            .map_err(write_error)?;
        tmp_file
            .persist(&file_path)
            .map_err(|e| write_error(e.error))?;

        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let file_path = self.get_file_path(key);

        match fs::remove_file(&file_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(FormBackupError::StorageWrite(format!(
                "failed to remove {}: {}",
                file_path.display(),
                e
            ))),
        }
    }

    fn backend_type(&self) -> &str {
        "filesystem"
    }
}

/// Convert a storage key into a portable file name
///
/// ASCII letters, digits, `-` and `_` pass through; every other byte is
/// written as `%XX`.
pub fn key_to_file_name(key: &str) -> String {
    let mut name = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            name.push(byte as char);
        } else {
            name.push_str(&format!("%{:02X}", byte));
        }
    }
    name
}
