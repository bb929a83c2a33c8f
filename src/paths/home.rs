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

use crate::error::{ProvisionError, Result};
use crate::paths::shared::ensure_directory;
use std::env;
use std::path::{Path, PathBuf};

/// Overrides the private data directory when set to an absolute path.
pub const HOME_ENV_VAR: &str = "JDK_PROVISIONER_HOME";
pub const DATA_DIR_NAME: &str = "jdk-provisioner";
pub const HIDDEN_DATA_DIR_NAME: &str = ".jdk-provisioner";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DEFAULT_SETTINGS_FILE_NAME: &str = "settings.toml";

/// Resolve the private data directory.
///
/// Order: `JDK_PROVISIONER_HOME`, the platform data directory, then a hidden
/// directory under the user's home.
pub fn resolve_data_dir() -> Result<PathBuf> {
    if let Ok(value) = env::var(HOME_ENV_VAR) {
        let path = PathBuf::from(value);
        if path.is_absolute() {
            return Ok(path);
        }
        log::warn!(
            "Ignoring {HOME_ENV_VAR}={}: path must be absolute",
            path.display()
        );
    }

    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join(DATA_DIR_NAME));
    }

    dirs::home_dir()
        .map(|home| home.join(HIDDEN_DATA_DIR_NAME))
        .ok_or(ProvisionError::DataDirNotFound)
}

pub fn ensure_data_dir(data_dir: &Path) -> Result<PathBuf> {
    ensure_directory(data_dir.to_path_buf())
}

pub fn config_file(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE_NAME)
}

pub fn settings_file(data_dir: &Path, file_name: &str) -> PathBuf {
    data_dir.join(file_name)
}
