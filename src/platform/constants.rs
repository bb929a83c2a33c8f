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

//! Platform-specific constants and utility functions.

use crate::platform::HostOs;

/// Name of the Java compiler executable, without extension.
pub const COMPILER_NAME: &str = "javac";

/// Directory holding JDK executables below the binary root.
pub const BIN_DIR: &str = "bin";

/// Bundle subpath that holds the real JDK home on macOS.
pub const BUNDLE_CONTENTS_DIR: &str = "Contents";
pub const BUNDLE_HOME_DIR: &str = "Home";

/// Compiler executable name for the given platform
pub fn compiler_executable_name(os: HostOs) -> String {
    match os {
        HostOs::Windows => format!("{COMPILER_NAME}.exe"),
        _ => COMPILER_NAME.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compiler_executable_name() {
        assert_eq!(compiler_executable_name(HostOs::Windows), "javac.exe");
        assert_eq!(compiler_executable_name(HostOs::MacOs), "javac");
        assert_eq!(compiler_executable_name(HostOs::Linux), "javac");
        assert_eq!(compiler_executable_name(HostOs::Other), COMPILER_NAME);
    }
}
