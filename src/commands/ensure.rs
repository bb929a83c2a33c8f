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

use crate::acquisition::{
    AcquisitionController, ConsoleNotifier, TerminalUi, run_terminal_acquisition,
};
use crate::bootstrap::{JdkSource, ensure_jdk};
use crate::config::ProvisionerConfig;
use crate::discovery::CandidateLocator;
use crate::environment::TomlEnvironmentStore;
use crate::error::Result;
use crate::indicator::ProgressFactory;
use crate::provision::{Provisioner, TemurinFetcher};
use colored::Colorize;

pub struct EnsureCommand<'a> {
    config: &'a ProvisionerConfig,
}

impl<'a> EnsureCommand<'a> {
    pub fn new(config: &'a ProvisionerConfig) -> Result<Self> {
        Ok(Self { config })
    }

    pub fn execute(&self, assume_yes: bool, no_progress: bool) -> Result<()> {
        let config = self.config;
        let locator = CandidateLocator::new(&config.data_dir, config.version_rule());
        let mut store = TomlEnvironmentStore::new(config.settings_path());

        let fetcher = TemurinFetcher::new().with_timeout(config.download_timeout());
        let provisioner = Provisioner::new(
            &config.data_dir,
            config.download_version,
            Box::new(fetcher),
        );
        let controller =
            AcquisitionController::new(provisioner).with_poll_interval(config.poll_interval());
        let mut ui = TerminalUi::new(
            ProgressFactory::create(no_progress),
            assume_yes || !config.prompt,
        );

        let outcome = ensure_jdk(&locator, &mut store, &ConsoleNotifier, |store| {
            run_terminal_acquisition(controller, &mut ui, store)
        })?;

        let source = match outcome.source {
            JdkSource::Environment => "from JAVA_HOME",
            JdkSource::PrivateInstall => "private install",
            JdkSource::Provisioned => "newly installed",
        };
        println!(
            "{} JDK ready ({source}): {}",
            "✓".green().bold(),
            outcome.java_home.display()
        );
        Ok(())
    }
}
