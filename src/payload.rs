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

// Stored payload format
//
// On storage every backup is a single JSON document:
//   {"data": {...form fields...}, "timestamp": <epoch millis>}
// There is no version field.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Form field name to arbitrary JSON value, in insertion order
pub type FormData = serde_json::Map<String, serde_json::Value>;

const KEY_PREFIX: &str = "form-backup-";

/// Storage key for a form
pub fn storage_key(form_id: &str) -> String {
    format!("{}{}", KEY_PREFIX, form_id)
}

/// The only entity ever persisted, replaced wholesale on every save
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPayload {
    pub data: FormData,

    /// Epoch milliseconds at save time. Zero when a foreign payload omits it.
    #[serde(default)]
    pub timestamp: i64,
}

impl StoredPayload {
    pub fn new(data: FormData, timestamp: i64) -> Self {
        Self { data, timestamp }
    }

    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn decode(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Milliseconds since the payload was written
    pub fn age_ms(&self, now_ms: i64) -> i64 {
        now_ms.saturating_sub(self.timestamp)
    }
}
