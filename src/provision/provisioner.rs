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

use crate::error::{ProvisionError, Result};
use crate::paths::{canonical_install_dir, canonical_install_name, ensure_data_dir};
use crate::platform::{HostOs, has_compiler_for, normalize_for};
use crate::provision::fetch::JdkFetcher;
use crate::storage::listing::dir_name;
use crate::storage::{find_first_with_prefix, list_installation_roots};
use crate::version::MajorVersion;
use log::{debug, info};
use std::any::Any;
use std::fs;
use std::path::PathBuf;
use std::thread::{self, JoinHandle};

const WORKER_THREAD_NAME: &str = "jdk-provision";

/// Replaces any private `jdk-<version>*` install with a fresh download.
///
/// A provisioner is consumed by [`run`](Self::run) or [`spawn`](Self::spawn)
/// and cannot be restarted. It never touches the environment store; the
/// caller registers the returned directory.
pub struct Provisioner {
    data_dir: PathBuf,
    version: MajorVersion,
    fetcher: Box<dyn JdkFetcher>,
    os: HostOs,
}

impl Provisioner {
    pub fn new(
        data_dir: impl Into<PathBuf>,
        version: MajorVersion,
        fetcher: Box<dyn JdkFetcher>,
    ) -> Self {
        Self {
            data_dir: data_dir.into(),
            version,
            fetcher,
            os: HostOs::current(),
        }
    }

    pub fn with_os(mut self, os: HostOs) -> Self {
        self.os = os;
        self
    }

    pub fn version(&self) -> MajorVersion {
        self.version
    }

    pub fn canonical_dir(&self) -> PathBuf {
        canonical_install_dir(&self.data_dir, self.version)
    }

    /// Runs the whole sequence on the calling thread.
    ///
    /// Returns the canonical install directory (`<data_dir>/jdk-<version>`).
    pub fn run(self) -> Result<PathBuf> {
        let prefix = canonical_install_name(self.version);
        ensure_data_dir(&self.data_dir)?;

        self.remove_stale_installs(&prefix)?;

        self.fetcher.fetch(self.version, &self.data_dir)?;

        let extracted = find_first_with_prefix(&self.data_dir, &prefix)?.ok_or_else(|| {
            ProvisionError::InstallNotFound {
                prefix: prefix.clone(),
                data_dir: self.data_dir.clone(),
            }
        })?;

        let canonical = self.canonical_dir();
        if extracted != canonical {
            debug!(
                "Renaming {} to {}",
                extracted.display(),
                canonical.display()
            );
            fs::rename(&extracted, &canonical).map_err(|source| ProvisionError::Rename {
                from: extracted.clone(),
                to: canonical.clone(),
                source,
            })?;
        }

        if !has_compiler_for(&normalize_for(&canonical, self.os), self.os) {
            return Err(ProvisionError::InvalidInstall(canonical));
        }

        info!("JDK {} installed at {}", self.version, canonical.display());
        Ok(canonical)
    }

    /// Starts [`run`](Self::run) on a dedicated worker thread.
    pub fn spawn(self) -> Result<ProvisionTask> {
        let handle = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || self.run())?;
        Ok(ProvisionTask { handle })
    }

    fn remove_stale_installs(&self, prefix: &str) -> Result<()> {
        for root in list_installation_roots(&self.data_dir)? {
            if dir_name(&root).is_some_and(|name| name.starts_with(prefix)) {
                info!("Removing previous install {}", root.display());
                fs::remove_dir_all(&root)
                    .map_err(|source| ProvisionError::Cleanup { path: root, source })?;
            }
        }
        Ok(())
    }
}

/// Handle to a running provisioning worker.
pub struct ProvisionTask {
    handle: JoinHandle<Result<PathBuf>>,
}

impl ProvisionTask {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the worker and returns its result.
    pub fn join(self) -> Result<PathBuf> {
        match self.handle.join() {
            Ok(result) => result,
            Err(payload) => Err(ProvisionError::WorkerPanicked(panic_message(&*payload))),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
