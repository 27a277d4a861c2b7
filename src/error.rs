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

// Error taxonomy for form backups

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FormBackupError>;

/// Errors produced while backing up form data
///
/// Only `Configuration` ever reaches a caller (from construction). The other
/// variants are caught at the boundary of each `FormBackup` operation, logged,
/// and turned into that operation's empty result.
#[derive(Debug, Error)]
pub enum FormBackupError {
    #[error("FormBackup: {0}")]
    Configuration(String),

    #[error("FormBackup: serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("FormBackup: {0} is not available")]
    StorageUnavailable(String),

    #[error("FormBackup: storage write failed: {0}")]
    StorageWrite(String),

    #[error("FormBackup: storage read failed: {0}")]
    StorageRead(String),
}

impl FormBackupError {
    /// Stable label used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            FormBackupError::Configuration(_) => "configuration",
            FormBackupError::Serialization(_) => "serialization",
            FormBackupError::StorageUnavailable(_) => "storage_unavailable",
            FormBackupError::StorageWrite(_) => "storage_write",
            FormBackupError::StorageRead(_) => "storage_read",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_message() {
        let err = FormBackupError::Configuration("formId is required".to_string());
        assert_eq!(err.to_string(), "FormBackup: formId is required");
        assert_eq!(err.kind(), "configuration");
    }

    #[test]
    fn test_serialization_from_serde() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: FormBackupError = parse_err.into();
        assert_eq!(err.kind(), "serialization");
        assert!(err.to_string().contains("serialization failed"));
    }

    #[test]
    fn test_unavailable_message() {
        let err = FormBackupError::StorageUnavailable("localStorage".to_string());
        assert_eq!(err.to_string(), "FormBackup: localStorage is not available");
    }
}
