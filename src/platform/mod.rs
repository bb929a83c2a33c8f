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

//! Platform detection and platform-specific JDK layout rules.

pub mod constants;
pub mod layout;

pub use constants::compiler_executable_name;
pub use layout::{has_compiler, has_compiler_for, normalize, normalize_for};

/// Operating system family, as far as JDK layout is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    Windows,
    MacOs,
    Linux,
    Other,
}

impl HostOs {
    pub fn current() -> Self {
        #[cfg(target_os = "windows")]
        return HostOs::Windows;

        #[cfg(target_os = "macos")]
        return HostOs::MacOs;

        #[cfg(target_os = "linux")]
        return HostOs::Linux;

        #[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
        return HostOs::Other;
    }

    /// Whether JDK binaries live below a `Contents/Home` bundle directory.
    pub fn uses_bundle_layout(&self) -> bool {
        matches!(self, HostOs::MacOs)
    }
}

/// Get the current architecture in the vocabulary of JDK download services.
pub fn get_current_architecture() -> &'static str {
    #[cfg(target_arch = "x86_64")]
    return "x64";

    #[cfg(target_arch = "x86")]
    return "x86";

    #[cfg(target_arch = "aarch64")]
    return "aarch64";

    #[cfg(target_arch = "arm")]
    return "arm";

    #[cfg(all(target_arch = "powerpc64", target_endian = "little"))]
    return "ppc64le";

    #[cfg(target_arch = "s390x")]
    return "s390x";

    #[cfg(not(any(
        target_arch = "x86_64",
        target_arch = "x86",
        target_arch = "aarch64",
        target_arch = "arm",
        all(target_arch = "powerpc64", target_endian = "little"),
        target_arch = "s390x"
    )))]
    return "unknown";
}
