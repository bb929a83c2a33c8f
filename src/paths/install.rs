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

use crate::version::MajorVersion;
use std::path::{Path, PathBuf};

pub const CANONICAL_PREFIX: &str = "jdk-";

/// Directory name a provisioned JDK ends up with, e.g. `jdk-21`.
pub fn canonical_install_name(version: MajorVersion) -> String {
    format!("{CANONICAL_PREFIX}{version}")
}

pub fn canonical_install_dir(data_dir: &Path, version: MajorVersion) -> PathBuf {
    data_dir.join(canonical_install_name(version))
}

/// Whether `name` looks like an install of `version` produced by this tool,
/// either already renamed (`jdk-21`) or freshly extracted (`jdk-21.0.5+11`).
pub fn is_canonical_candidate(name: &str, version: MajorVersion) -> bool {
    name.starts_with(&canonical_install_name(version))
}
