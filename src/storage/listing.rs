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

use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Lists the immediate subdirectories of `data_dir`, newest-looking first.
///
/// Names are sorted in descending lexicographic order so that `jdk-21` is
/// tried before `jdk-17`. Hidden directories (staging areas) are skipped and
/// a missing `data_dir` yields an empty list.
pub fn list_installation_roots(data_dir: &Path) -> Result<Vec<PathBuf>> {
    if !data_dir.exists() {
        return Ok(Vec::new());
    }

    let mut roots = Vec::new();

    for entry in fs::read_dir(data_dir)? {
        let entry = entry?;
        let path = entry.path();

        if !path.is_dir() {
            continue;
        }

        if path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.starts_with('.'))
            .unwrap_or(false)
        {
            continue;
        }

        roots.push(path);
    }

    roots.sort_by(|a, b| b.file_name().cmp(&a.file_name()));

    Ok(roots)
}

/// First subdirectory of `data_dir` (in listing order) whose name starts with
/// `prefix`.
pub fn find_first_with_prefix(data_dir: &Path, prefix: &str) -> Result<Option<PathBuf>> {
    Ok(list_installation_roots(data_dir)?
        .into_iter()
        .find(|path| dir_name(path).is_some_and(|name| name.starts_with(prefix))))
}

pub(crate) fn dir_name(path: &Path) -> Option<&str> {
    path.file_name()?.to_str()
}
