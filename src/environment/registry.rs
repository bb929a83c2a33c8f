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

use crate::environment::store::EnvironmentStore;
use crate::environment::{JAVA_HOME_VAR, entry_key, java_home_entry};
use crate::error::Result;
use crate::platform::{HostOs, normalize_for};
use log::{debug, info};
use std::env;
use std::path::{Path, PathBuf};

/// Receives user-facing notices.
pub trait Notifier {
    fn notify(&self, title: &str, message: &str);
}

/// Notifier that only writes to the log.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, title: &str, message: &str) {
        info!("{title}: {message}");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// The exact entry was already persisted; nothing was written.
    Unchanged(PathBuf),
    /// Prior `JAVA_HOME` entries were replaced by this one.
    Updated(PathBuf),
}

impl RegistrationOutcome {
    pub fn java_home(&self) -> &Path {
        match self {
            Self::Unchanged(path) | Self::Updated(path) => path,
        }
    }
}

/// Registers `JAVA_HOME` in both the live process and the persisted store.
///
/// Borrows the store for its own lifetime only; the host keeps ownership.
pub struct EnvironmentRegistry<'a, S: EnvironmentStore + ?Sized> {
    store: &'a mut S,
    os: HostOs,
}

impl<'a, S: EnvironmentStore + ?Sized> EnvironmentRegistry<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        Self {
            store,
            os: HostOs::current(),
        }
    }

    pub fn with_os(mut self, os: HostOs) -> Self {
        self.os = os;
        self
    }

    /// Points `JAVA_HOME` at the binary root of `path`.
    ///
    /// The process variable is always updated. The persisted list is only
    /// rewritten, and `notifier` only called, when the exact entry is not
    /// already present; every other `JAVA_HOME=` entry is dropped first.
    ///
    /// Must run on the thread that owns the host's UI loop, since it mutates
    /// the process environment.
    pub fn register_java_home<N: Notifier + ?Sized>(
        &mut self,
        path: &Path,
        notifier: &N,
    ) -> Result<RegistrationOutcome> {
        let java_home = normalize_for(path, self.os);

        // SAFETY: only called from the UI-loop thread; the worker never
        // touches the environment.
        unsafe {
            env::set_var(JAVA_HOME_VAR, &java_home);
        }

        let entry = java_home_entry(&java_home);
        let entries = self.store.environment_entries()?;

        if entries.contains(&entry) {
            debug!("{entry} already registered");
            return Ok(RegistrationOutcome::Unchanged(java_home));
        }

        let mut updated: Vec<String> = entries
            .into_iter()
            .filter(|existing| entry_key(existing) != JAVA_HOME_VAR)
            .collect();
        updated.push(entry.clone());

        self.store.set_environment_entries(updated)?;
        info!("Registered {entry}");
        notifier.notify(JAVA_HOME_VAR, &entry);

        Ok(RegistrationOutcome::Updated(java_home))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::MemoryEnvironmentStore;
    use crate::test::fixtures::EnvGuard;
    use mockall::mock;
    use serial_test::serial;

    mock! {
        Notice {}

        impl Notifier for Notice {
            fn notify(&self, title: &str, message: &str);
        }
    }

    fn java_home_entries(store: &MemoryEnvironmentStore) -> Vec<&String> {
        store
            .entries()
            .iter()
            .filter(|e| entry_key(e) == JAVA_HOME_VAR)
            .collect()
    }

    #[test]
    #[serial]
    fn test_register_is_idempotent() {
        let mut guard = EnvGuard::new();
        guard.remove(JAVA_HOME_VAR);

        let mut notifier = MockNotice::new();
        notifier
            .expect_notify()
            .withf(|title, message| {
                title.to_string() == "JAVA_HOME" && message.to_string() == "JAVA_HOME=/data/jdk-21"
            })
            .times(1)
            .return_const(());

        let mut store = MemoryEnvironmentStore::default();
        let path = Path::new("/data/jdk-21");

        let first = EnvironmentRegistry::new(&mut store)
            .with_os(HostOs::Linux)
            .register_java_home(path, &notifier)
            .unwrap();
        let second = EnvironmentRegistry::new(&mut store)
            .with_os(HostOs::Linux)
            .register_java_home(path, &notifier)
            .unwrap();

        assert_eq!(first, RegistrationOutcome::Updated(path.to_path_buf()));
        assert_eq!(second, RegistrationOutcome::Unchanged(path.to_path_buf()));
        assert_eq!(store.entries(), ["JAVA_HOME=/data/jdk-21".to_string()]);
        assert_eq!(store.writes(), 1);
    }

    #[test]
    #[serial]
    fn test_register_replaces_previous_java_home() {
        let mut guard = EnvGuard::new();
        guard.remove(JAVA_HOME_VAR);

        let mut store = MemoryEnvironmentStore::new(vec![
            "JAVA_HOME=/old/jdk-17".to_string(),
            "PY5_IMPORTED_MODE=True".to_string(),
            "JAVA_HOME=/older/jdk-11".to_string(),
        ]);

        EnvironmentRegistry::new(&mut store)
            .with_os(HostOs::Linux)
            .register_java_home(Path::new("/data/jdk-21"), &LogNotifier)
            .unwrap();

        assert_eq!(
            store.entries(),
            [
                "PY5_IMPORTED_MODE=True".to_string(),
                "JAVA_HOME=/data/jdk-21".to_string()
            ]
        );
        assert_eq!(java_home_entries(&store).len(), 1);
    }

    #[test]
    #[serial]
    fn test_register_keeps_similar_keys() {
        let mut guard = EnvGuard::new();
        guard.remove(JAVA_HOME_VAR);

        let mut store = MemoryEnvironmentStore::new(vec!["JAVA_HOME_OLD=/x".to_string()]);
        EnvironmentRegistry::new(&mut store)
            .with_os(HostOs::Linux)
            .register_java_home(Path::new("/data/jdk-21"), &LogNotifier)
            .unwrap();

        assert_eq!(store.entries().len(), 2);
        assert_eq!(store.entries()[0], "JAVA_HOME_OLD=/x");
    }

    #[test]
    #[serial]
    fn test_register_sets_process_variable() {
        let mut guard = EnvGuard::new();
        guard.remove(JAVA_HOME_VAR);

        let mut store = MemoryEnvironmentStore::new(vec!["JAVA_HOME=/data/jdk-21".to_string()]);
        EnvironmentRegistry::new(&mut store)
            .with_os(HostOs::Linux)
            .register_java_home(Path::new("/data/jdk-21"), &LogNotifier)
            .unwrap();

        assert_eq!(env::var(JAVA_HOME_VAR).unwrap(), "/data/jdk-21");
        assert_eq!(store.writes(), 0);
    }

    #[test]
    #[serial]
    fn test_register_normalizes_macos_bundle() {
        let mut guard = EnvGuard::new();
        guard.remove(JAVA_HOME_VAR);

        let mut store = MemoryEnvironmentStore::default();
        let outcome = EnvironmentRegistry::new(&mut store)
            .with_os(HostOs::MacOs)
            .register_java_home(Path::new("/data/jdk-21"), &LogNotifier)
            .unwrap();

        let expected = Path::new("/data/jdk-21").join("Contents").join("Home");
        assert_eq!(outcome.java_home(), expected);
        assert_eq!(
            store.entries(),
            [format!("JAVA_HOME={}", expected.display())]
        );
    }
}
