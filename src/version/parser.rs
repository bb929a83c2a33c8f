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
use regex::Regex;
use std::sync::LazyLock;

// `java` or `jdk`, an optional hyphen, then the major version digits.
static JDK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:java|jdk)-?(\d+)").expect("JDK pattern is valid"));

/// Extracts the major version from a directory or path name.
///
/// The first match wins, so `jdk-17.0.2` yields `17` and `openjdk21` yields
/// `21`. Returns `None` when there is no match or the digit run does not fit
/// in a [`MajorVersion`].
pub fn parse_major_version(name: &str) -> Option<MajorVersion> {
    let captures = JDK_PATTERN.captures(name)?;
    let digits = captures.get(1)?.as_str();

    match digits.parse::<MajorVersion>() {
        Ok(version) => Some(version),
        Err(e) => {
            log::debug!("Ignoring out-of-range version '{digits}' in '{name}': {e}");
            None
        }
    }
}
