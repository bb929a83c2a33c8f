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

//! Major-version rules for JDK installation roots.
//!
//! Installation directories are recognised by name alone: a name such as
//! `jdk-17.0.2` or `zulu-java21` carries the major version, and that version
//! must meet the configured minimum before the directory is even probed for
//! a compiler.

pub mod parser;

pub use parser::parse_major_version;

/// A JDK major version number, e.g. `17` for `jdk-17.0.2`.
pub type MajorVersion = u32;

/// Minimum major version any accepted JDK must meet.
pub const REQUIRED_VERSION: MajorVersion = 17;

/// Exact major version fetched when a fresh install is needed.
pub const DOWNLOAD_VERSION: MajorVersion = 21;

/// Acceptance rule for candidate JDK versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionRule {
    required: MajorVersion,
}

impl VersionRule {
    pub fn new(required: MajorVersion) -> Self {
        Self { required }
    }

    pub fn required(&self) -> MajorVersion {
        self.required
    }

    /// True iff a version is present and at least the required version.
    pub fn is_acceptable(&self, version: Option<MajorVersion>) -> bool {
        version.is_some_and(|v| v >= self.required)
    }

    /// Parses `name` and returns its major version only if it is acceptable.
    pub fn accept_name(&self, name: &str) -> Option<MajorVersion> {
        let version = parse_major_version(name);
        if self.is_acceptable(version) {
            version
        } else {
            None
        }
    }
}

impl Default for VersionRule {
    fn default() -> Self {
        Self::new(REQUIRED_VERSION)
    }
}

/// Checks `version` against [`REQUIRED_VERSION`].
pub fn is_acceptable(version: Option<MajorVersion>) -> bool {
    VersionRule::default().is_acceptable(version)
}
