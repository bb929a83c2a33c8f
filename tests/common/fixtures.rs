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

use jdk_provisioner::error::{ProvisionError, Result};
use jdk_provisioner::platform::{HostOs, compiler_executable_name, normalize};
use jdk_provisioner::provision::JdkFetcher;
use jdk_provisioner::version::MajorVersion;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Creates `root` as a minimal JDK for the host platform and returns its
/// binary root.
pub fn create_fake_jdk(root: &Path) -> PathBuf {
    let binary_root = normalize(root);
    let bin = binary_root.join("bin");
    fs::create_dir_all(&bin).unwrap();
    fs::write(bin.join(compiler_executable_name(HostOs::current())), "").unwrap();
    binary_root
}

/// Fetcher standing in for the network: extracts a fixed directory name or fails.
#[derive(Clone)]
pub struct StaticFetcher {
    extracted_name: Option<&'static str>,
    calls: Arc<AtomicUsize>,
}

impl StaticFetcher {
    pub fn extracting(name: &'static str) -> Self {
        Self {
            extracted_name: Some(name),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing() -> Self {
        Self {
            extracted_name: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl JdkFetcher for StaticFetcher {
    fn fetch(&self, version: MajorVersion, destination: &Path) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let Some(name) = self.extracted_name else {
            return Err(ProvisionError::Download {
                version,
                reason: "network unreachable".to_string(),
            });
        };
        create_fake_jdk(&destination.join(name));
        Ok(())
    }
}

/// Restores environment variables on drop
pub struct EnvGuard {
    vars: Vec<(String, Option<std::ffi::OsString>)>,
}

impl EnvGuard {
    pub fn new() -> Self {
        Self { vars: Vec::new() }
    }

    pub fn remove(&mut self, key: &str) {
        self.vars.push((key.to_string(), std::env::var_os(key)));
        unsafe {
            std::env::remove_var(key);
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in self.vars.iter().rev() {
            match value {
                Some(v) => unsafe { std::env::set_var(key, v) },
                None => unsafe { std::env::remove_var(key) },
            }
        }
    }
}
