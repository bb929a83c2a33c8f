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

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary private data directory, removed when dropped
pub struct TestHomeGuard {
    temp_dir: TempDir,
}

impl TestHomeGuard {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create test home directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The private data directory (absolute, as `JDK_PROVISIONER_HOME` requires)
    pub fn data_dir(&self) -> PathBuf {
        let data_dir = self.path().join("data");
        fs::create_dir_all(&data_dir).expect("Failed to create data directory");
        data_dir
    }

    pub fn settings_file(&self) -> PathBuf {
        self.data_dir().join("settings.toml")
    }
}
