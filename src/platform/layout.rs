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

//! Mapping installation roots to binary roots.
//!
//! A macOS JDK bundle keeps its real home under `Contents/Home`; every other
//! platform uses the installation root directly.

use crate::platform::HostOs;
use crate::platform::constants::{
    BIN_DIR, BUNDLE_CONTENTS_DIR, BUNDLE_HOME_DIR, compiler_executable_name,
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Returns the binary root for `root` on the current platform.
pub fn normalize(root: &Path) -> PathBuf {
    normalize_for(root, HostOs::current())
}

/// Returns the binary root for `root` on `os`.
///
/// Idempotent: a path already ending in the bundle home segment is returned
/// unchanged.
pub fn normalize_for(root: &Path, os: HostOs) -> PathBuf {
    if !os.uses_bundle_layout() || root.file_name() == Some(OsStr::new(BUNDLE_HOME_DIR)) {
        return root.to_path_buf();
    }

    root.join(BUNDLE_CONTENTS_DIR).join(BUNDLE_HOME_DIR)
}

/// True iff `binary_root/bin/javac` (or `javac.exe`) is a regular file.
pub fn has_compiler(binary_root: &Path) -> bool {
    has_compiler_for(binary_root, HostOs::current())
}

pub fn has_compiler_for(binary_root: &Path, os: HostOs) -> bool {
    let compiler = binary_root
        .join(BIN_DIR)
        .join(compiler_executable_name(os));
    let found = compiler.is_file();
    if !found {
        log::debug!("No compiler at {}", compiler.display());
    }
    found
}
