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
use crate::paths::{config_file, resolve_data_dir, settings_file};
use crate::paths::home::DEFAULT_SETTINGS_FILE_NAME;
use crate::version::{DOWNLOAD_VERSION, MajorVersion, REQUIRED_VERSION, VersionRule};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const ENV_PREFIX: &str = "JDK_PROVISIONER";
const ENV_SEPARATOR: &str = "__";
const DEFAULT_POLL_INTERVAL_MS: u64 = 100;
const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvisionerConfig {
    /// Private data directory; resolved, never read from the file.
    #[serde(skip)]
    pub data_dir: PathBuf,

    pub required_version: MajorVersion,
    pub download_version: MajorVersion,
    pub poll_interval_ms: u64,
    /// Ask before downloading
    pub prompt: bool,
    /// File name of the persisted environment store inside `data_dir`
    pub settings_file: String,
    pub download: DownloadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    pub timeout_secs: u64,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_DOWNLOAD_TIMEOUT_SECS,
        }
    }
}

impl Default for ProvisionerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::new(),
            required_version: REQUIRED_VERSION,
            download_version: DOWNLOAD_VERSION,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            prompt: true,
            settings_file: DEFAULT_SETTINGS_FILE_NAME.to_string(),
            download: DownloadConfig::default(),
        }
    }
}

impl ProvisionerConfig {
    /// Load from the resolved private data directory.
    pub fn load_default() -> Result<Self> {
        Self::load(&resolve_data_dir()?)
    }

    /// Load defaults, then `<data_dir>/config.toml`, then `JDK_PROVISIONER_*`
    /// environment variables (`__` separates nested keys).
    pub fn load(data_dir: &Path) -> Result<Self> {
        let config_path = config_file(data_dir);
        if !config_path.exists() {
            log::debug!("Config file not found at {config_path:?}, using defaults");
        }

        let settings = config::Config::builder()
            .add_source(
                config::File::from(config_path.as_path())
                    .format(config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| {
                ProvisionError::ConfigError(format!("Failed to load {}: {e}", config_path.display()))
            })?;

        let mut config: ProvisionerConfig = settings
            .try_deserialize()
            .map_err(|e| ProvisionError::ConfigError(format!("Invalid configuration: {e}")))?;
        config.data_dir = data_dir.to_path_buf();
        config.validate()?;

        log::debug!("Loaded config for {data_dir:?}");
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = config_file(&self.data_dir);

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;
        log::debug!("Saved config to {config_path:?}");
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == 0 {
            return Err(ProvisionError::ConfigError(
                "poll_interval_ms must be greater than 0".to_string(),
            ));
        }

        if self.settings_file.trim().is_empty() {
            return Err(ProvisionError::ConfigError(
                "settings_file must not be empty".to_string(),
            ));
        }

        if self.download_version < self.required_version {
            log::warn!(
                "download_version {} is lower than required_version {}; downloaded JDKs \
                 will not be accepted on the next run",
                self.download_version,
                self.required_version
            );
        }

        Ok(())
    }

    pub fn version_rule(&self) -> VersionRule {
        VersionRule::new(self.required_version)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download.timeout_secs)
    }

    pub fn settings_path(&self) -> PathBuf {
        settings_file(&self.data_dir, &self.settings_file)
    }
}
