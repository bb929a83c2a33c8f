// Copyright 2025 dentsusoken
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

//! Persisted `KEY=VALUE` environment entries and `JAVA_HOME` registration.

pub mod registry;
pub mod store;

pub use registry::{EnvironmentRegistry, LogNotifier, Notifier, RegistrationOutcome};
pub use store::{EnvironmentStore, MemoryEnvironmentStore, TomlEnvironmentStore};

use std::path::Path;

pub const JAVA_HOME_VAR: &str = "JAVA_HOME";

/// Builds the persisted `JAVA_HOME=<path>` entry for `java_home`.
pub fn java_home_entry(java_home: &Path) -> String {
    format!("{JAVA_HOME_VAR}={}", java_home.display())
}

/// Key portion of a `KEY=VALUE` entry, or the whole entry if it has no `=`.
pub fn entry_key(entry: &str) -> &str {
    entry.split_once('=').map_or(entry, |(key, _)| key)
}
