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

use crate::acquisition::ConsoleNotifier;
use crate::config::ProvisionerConfig;
use crate::environment::{EnvironmentRegistry, RegistrationOutcome, TomlEnvironmentStore};
use crate::error::{ProvisionError, Result};
use crate::platform::{has_compiler, normalize};
use crate::version::parse_major_version;
use log::warn;
use std::path::Path;

/// Registers an existing JDK as `JAVA_HOME`.
pub struct RegisterCommand<'a> {
    config: &'a ProvisionerConfig,
}

impl<'a> RegisterCommand<'a> {
    pub fn new(config: &'a ProvisionerConfig) -> Result<Self> {
        Ok(Self { config })
    }

    pub fn execute(&self, path: &Path) -> Result<()> {
        let root = std::path::absolute(path)?;
        if !has_compiler(&normalize(&root)) {
            return Err(ProvisionError::InvalidInstall(root));
        }

        let rule = self.config.version_rule();
        if !rule.is_acceptable(parse_major_version(&root.to_string_lossy())) {
            warn!(
                "{} does not look like JDK {} or newer; registering anyway",
                root.display(),
                rule.required()
            );
        }

        let mut store = TomlEnvironmentStore::new(self.config.settings_path());
        let outcome =
            EnvironmentRegistry::new(&mut store).register_java_home(&root, &ConsoleNotifier)?;

        if let RegistrationOutcome::Unchanged(java_home) = outcome {
            println!("JAVA_HOME is already {}", java_home.display());
        }
        Ok(())
    }
}
