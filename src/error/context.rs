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

use crate::error::ProvisionError;
use std::fmt;
use std::io;

pub struct ErrorContext<'a> {
    pub error: &'a ProvisionError,
    pub suggestion: Option<String>,
    pub details: Option<String>,
}

impl<'a> ErrorContext<'a> {
    pub fn new(error: &'a ProvisionError) -> Self {
        let (suggestion, details) = match error {
            ProvisionError::Download { version, .. } => (
                Some(format!(
                    "Check your internet connection and proxy settings (HTTPS_PROXY) and run \
                     'jdk-provisioner ensure' again. \
                     You can also install JDK {version} manually and register it with \
                     'jdk-provisioner register <path>'."
                )),
                None,
            ),
            ProvisionError::Extract(msg) => (
                Some("The downloaded archive may be corrupt. Try again.".to_string()),
                Some(format!("Extraction failed: {msg}")),
            ),
            ProvisionError::InstallNotFound { prefix, data_dir } => (
                Some(
                    "The download finished but produced no JDK directory. Try again."
                        .to_string(),
                ),
                Some(format!(
                    "Expected a directory starting with '{prefix}' in {}",
                    data_dir.display()
                )),
            ),
            ProvisionError::InvalidInstall(path) => (
                Some(
                    "Point to the root of a JDK installation containing bin/javac.".to_string(),
                ),
                Some(format!("Checked: {}", path.display())),
            ),
            ProvisionError::Cleanup { path, .. } | ProvisionError::Rename { from: path, .. } => {
                let suggestion = if cfg!(windows) {
                    "Close any program using the JDK directory and try again."
                } else {
                    "Check the directory permissions and try again."
                };
                (
                    Some(suggestion.to_string()),
                    Some(format!("Affected path: {}", path.display())),
                )
            }
            ProvisionError::StoreRead { .. } | ProvisionError::StoreWrite { .. } => (
                Some(
                    "Fix or remove the settings file; it will be recreated on the next \
                     registration."
                        .to_string(),
                ),
                None,
            ),
            ProvisionError::ConfigError(_) => (
                Some(
                    "Check config.toml in the data directory and JDK_PROVISIONER_* \
                     environment variables."
                        .to_string(),
                ),
                None,
            ),
            ProvisionError::DataDirNotFound => (
                Some("Set JDK_PROVISIONER_HOME to a writable directory.".to_string()),
                None,
            ),
            ProvisionError::UserDeclined => (
                Some(
                    "Run 'jdk-provisioner ensure' again to install, or set JAVA_HOME to an \
                     existing JDK."
                        .to_string(),
                ),
                None,
            ),
            ProvisionError::Io(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                let suggestion = if cfg!(windows) {
                    "Run as Administrator or check file permissions."
                } else {
                    "Check file permissions or use sudo if appropriate."
                };
                (Some(suggestion.to_string()), None)
            }
            _ => (None, None),
        };

        Self {
            error,
            suggestion,
            details,
        }
    }
}

impl<'a> fmt::Display for ErrorContext<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\n\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}
