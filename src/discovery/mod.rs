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

//! Locating a usable JDK without downloading anything.
//!
//! Two sources are consulted: the `JAVA_HOME` of the running process and the
//! installation roots under the private data directory. Every failure along
//! the way (unset variable, dangling link, unparsable name, missing
//! compiler) degrades to "not found"; nothing here returns an error.

use crate::environment::JAVA_HOME_VAR;
use crate::platform::{HostOs, has_compiler_for, normalize_for};
use crate::storage::list_installation_roots;
use crate::storage::listing::dir_name;
use crate::version::{VersionRule, parse_major_version};
use log::debug;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

pub struct CandidateLocator {
    data_dir: PathBuf,
    rule: VersionRule,
    os: HostOs,
}

impl CandidateLocator {
    pub fn new(data_dir: impl Into<PathBuf>, rule: VersionRule) -> Self {
        Self {
            data_dir: data_dir.into(),
            rule,
            os: HostOs::current(),
        }
    }

    /// Evaluate layouts as they would be on `os`.
    pub fn with_os(mut self, os: HostOs) -> Self {
        self.os = os;
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn os(&self) -> HostOs {
        self.os
    }

    /// Binary root of the JDK named by the process `JAVA_HOME`, if usable.
    pub fn live_environment_candidate(&self) -> Option<PathBuf> {
        self.java_home_candidate(env::var_os(JAVA_HOME_VAR))
    }

    /// Same as [`Self::live_environment_candidate`] for an explicit value.
    pub fn java_home_candidate(&self, java_home: Option<OsString>) -> Option<PathBuf> {
        let java_home = PathBuf::from(java_home.filter(|v| !v.is_empty())?);
        let resolved = resolve_link(&java_home)?;

        let version = parse_major_version(&resolved.to_string_lossy());
        if !self.rule.is_acceptable(version) {
            debug!(
                "{JAVA_HOME_VAR}={} rejected: version {version:?} below {}",
                resolved.display(),
                self.rule.required()
            );
            return None;
        }

        let binary_root = normalize_for(&resolved, self.os);
        if !has_compiler_for(&binary_root, self.os) {
            debug!("{JAVA_HOME_VAR}={} rejected: no compiler", resolved.display());
            return None;
        }

        debug!("Using {JAVA_HOME_VAR} candidate {}", binary_root.display());
        Some(binary_root)
    }

    /// First acceptable installation root in the private data directory.
    ///
    /// Roots are tried in descending name order, which prefers newer-looking
    /// names without comparing versions semantically.
    pub fn discover_installed_candidate(&self) -> Option<PathBuf> {
        let roots = match list_installation_roots(&self.data_dir) {
            Ok(roots) => roots,
            Err(e) => {
                debug!("Cannot list {}: {e}", self.data_dir.display());
                return None;
            }
        };

        roots.into_iter().find(|root| self.is_valid_root(root))
    }

    fn is_valid_root(&self, root: &Path) -> bool {
        let Some(name) = dir_name(root) else {
            return false;
        };

        if self.rule.accept_name(name).is_none() {
            debug!("Skipping {name}: no acceptable JDK version in name");
            return false;
        }

        has_compiler_for(&normalize_for(root, self.os), self.os)
    }
}

// Follows a symbolic link to its final target; other paths pass through.
fn resolve_link(path: &Path) -> Option<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.file_type().is_symlink() => match fs::canonicalize(path) {
            Ok(target) => Some(target),
            Err(e) => {
                debug!("Cannot resolve link {}: {e}", path.display());
                None
            }
        },
        _ => Some(path.to_path_buf()),
    }
}
