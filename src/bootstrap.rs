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

//! Top-level "make sure a JDK is available" flow.
//!
//! Checked in order: the live `JAVA_HOME`, a JDK previously installed into
//! the private data directory, and finally an acquisition supplied by the
//! caller (normally the consent dialog plus a download).

use crate::discovery::CandidateLocator;
use crate::environment::{EnvironmentRegistry, EnvironmentStore, Notifier};
use crate::error::Result;
use crate::platform::normalize_for;
use log::info;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JdkSource {
    /// `JAVA_HOME` already named an acceptable JDK
    Environment,
    /// Found under the private data directory and registered
    PrivateInstall,
    /// Downloaded during this call
    Provisioned,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnsureOutcome {
    pub source: JdkSource,
    /// Binary root of the JDK now in use
    pub java_home: PathBuf,
}

/// Ensures a usable JDK, acquiring one with `acquire` as a last resort.
///
/// `acquire` receives the store so it can register the new install from the
/// calling thread, and returns the install root.
pub fn ensure_jdk<S, N, A>(
    locator: &CandidateLocator,
    store: &mut S,
    notifier: &N,
    acquire: A,
) -> Result<EnsureOutcome>
where
    S: EnvironmentStore + ?Sized,
    N: Notifier + ?Sized,
    A: FnOnce(&mut S) -> Result<PathBuf>,
{
    if let Some(java_home) = locator.live_environment_candidate() {
        return Ok(EnsureOutcome {
            source: JdkSource::Environment,
            java_home,
        });
    }

    if let Some(root) = locator.discover_installed_candidate() {
        info!("Found existing JDK at {}", root.display());
        let outcome = EnvironmentRegistry::new(store)
            .with_os(locator.os())
            .register_java_home(&root, notifier)?;
        return Ok(EnsureOutcome {
            source: JdkSource::PrivateInstall,
            java_home: outcome.java_home().to_path_buf(),
        });
    }

    info!(
        "No usable JDK found in {} or the environment",
        locator.data_dir().display()
    );
    let root = acquire(store)?;
    Ok(EnsureOutcome {
        source: JdkSource::Provisioned,
        java_home: normalize_for(&root, locator.os()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{LogNotifier, MemoryEnvironmentStore};
    use crate::error::ProvisionError;
    use crate::platform::HostOs;
    use crate::test::fixtures::{EnvGuard, create_fake_jdk};
    use crate::version::VersionRule;
    use serial_test::serial;
    use std::cell::Cell;
    use tempfile::TempDir;

    fn locator(temp_dir: &TempDir) -> CandidateLocator {
        CandidateLocator::new(temp_dir.path().join("data"), VersionRule::default())
            .with_os(HostOs::Linux)
    }

    #[test]
    #[serial]
    fn test_live_environment_short_circuits() {
        let temp_dir = TempDir::new().unwrap();
        let system_jdk = temp_dir.path().join("jdk-17.0.2");
        create_fake_jdk(&system_jdk, HostOs::Linux);

        let mut guard = EnvGuard::new();
        guard.set("JAVA_HOME", &system_jdk);

        let mut store = MemoryEnvironmentStore::default();
        let acquired = Cell::new(false);
        let outcome = ensure_jdk(&locator(&temp_dir), &mut store, &LogNotifier, |_| {
            acquired.set(true);
            Err(ProvisionError::UserDeclined)
        })
        .unwrap();

        assert_eq!(outcome.source, JdkSource::Environment);
        assert_eq!(outcome.java_home, system_jdk);
        assert_eq!(store.writes(), 0);
        assert!(!acquired.get());
    }

    #[test]
    #[serial]
    fn test_private_install_is_registered() {
        let temp_dir = TempDir::new().unwrap();
        let mut guard = EnvGuard::new();
        guard.remove("JAVA_HOME");

        let installed = temp_dir.path().join("data/jdk-21");
        create_fake_jdk(&installed, HostOs::Linux);

        let mut store = MemoryEnvironmentStore::default();
        let outcome = ensure_jdk(&locator(&temp_dir), &mut store, &LogNotifier, |_| {
            Err(ProvisionError::UserDeclined)
        })
        .unwrap();

        assert_eq!(outcome.source, JdkSource::PrivateInstall);
        assert_eq!(outcome.java_home, installed);
        assert_eq!(
            store.entries(),
            [format!("JAVA_HOME={}", installed.display())]
        );
    }

    #[test]
    #[serial]
    fn test_empty_data_dir_falls_through_to_acquisition() {
        let temp_dir = TempDir::new().unwrap();
        let mut guard = EnvGuard::new();
        guard.remove("JAVA_HOME");

        let mut store = MemoryEnvironmentStore::default();
        let result = ensure_jdk(&locator(&temp_dir), &mut store, &LogNotifier, |_| {
            Err(ProvisionError::UserDeclined)
        });

        assert!(matches!(result, Err(ProvisionError::UserDeclined)));
        assert_eq!(store.writes(), 0);
    }

    #[test]
    #[serial]
    fn test_acquired_root_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let mut guard = EnvGuard::new();
        guard.remove("JAVA_HOME");

        let mut store = MemoryEnvironmentStore::default();
        let root = temp_dir.path().join("data/jdk-21");
        let outcome = ensure_jdk(&locator(&temp_dir), &mut store, &LogNotifier, |_| {
            Ok(root.clone())
        })
        .unwrap();

        assert_eq!(outcome.source, JdkSource::Provisioned);
        assert_eq!(outcome.java_home, root);
    }
}
