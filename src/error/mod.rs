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

mod context;
mod exit_codes;
mod format;

pub use context::ErrorContext;
pub use exit_codes::get_exit_code;
pub use format::{format_error_chain, format_error_with_color};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("Failed to download JDK {version}: {reason}")]
    Download { version: u32, reason: String },

    #[error("Failed to extract archive: {0}")]
    Extract(String),

    #[error("No directory matching '{prefix}' found in {data_dir} after download")]
    InstallNotFound { prefix: String, data_dir: PathBuf },

    #[error("'{0}' does not contain a Java compiler")]
    InvalidInstall(PathBuf),

    #[error("Failed to remove stale install {path}: {source}")]
    Cleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to rename {from} to {to}: {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read environment settings from {path}: {reason}")]
    StoreRead { path: PathBuf, reason: String },

    #[error("Failed to write environment settings to {path}: {reason}")]
    StoreWrite { path: PathBuf, reason: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Data directory could not be determined")]
    DataDirNotFound,

    #[error("Cannot {event} while {state}")]
    InvalidTransition { state: String, event: String },

    #[error("JDK installation was declined")]
    UserDeclined,

    #[error("Provisioning worker stopped unexpectedly: {0}")]
    WorkerPanicked(String),

    #[error("System error: {0}")]
    SystemError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    TomlSerialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),
}

pub type Result<T> = std::result::Result<T, ProvisionError>;
