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

use crate::config::ProvisionerConfig;
use crate::environment::{EnvironmentStore, TomlEnvironmentStore};
use crate::error::Result;
use std::io::Write;

/// Prints the persisted environment entries, one `KEY=VALUE` per line.
pub struct EnvCommand<'a> {
    config: &'a ProvisionerConfig,
}

impl<'a> EnvCommand<'a> {
    pub fn new(config: &'a ProvisionerConfig) -> Result<Self> {
        Ok(Self { config })
    }

    pub fn execute(&self) -> Result<()> {
        let store = TomlEnvironmentStore::new(self.config.settings_path());
        let entries = store.environment_entries()?;

        let mut stdout = std::io::stdout();
        for entry in entries {
            writeln!(stdout, "{entry}")?;
        }
        stdout.flush()?;
        Ok(())
    }
}
