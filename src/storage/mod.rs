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

// Storage backend module
//
// Provides a trait-based abstraction over string key-value storage areas,
// so form backups can be written to browser Web Storage, an in-memory
// session key space, or a directory on disk.
//
// A StorageHost decides which areas exist in the current environment.

pub mod backend;
pub mod filesystem;
pub mod host;
pub mod memory;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use backend::StorageBackend;
pub use filesystem::{key_to_file_name, FileStorage};
pub use host::{default_host, HeadlessHost, NativeHost, StorageHost};
pub use memory::MemoryStorage;

#[cfg(target_arch = "wasm32")]
pub use host::BrowserHost;
#[cfg(target_arch = "wasm32")]
pub use web::BrowserStorage;
