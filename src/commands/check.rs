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
use crate::discovery::CandidateLocator;
use crate::error::Result;
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
struct CheckOutput {
    required_version: u32,
    data_dir: PathBuf,
    live_environment: Option<PathBuf>,
    installed: Option<PathBuf>,
}

/// Reports discovery results without registering or downloading anything.
pub struct CheckCommand<'a> {
    config: &'a ProvisionerConfig,
}

impl<'a> CheckCommand<'a> {
    pub fn new(config: &'a ProvisionerConfig) -> Result<Self> {
        Ok(Self { config })
    }

    pub fn execute(&self, json: bool) -> Result<()> {
        let locator = CandidateLocator::new(&self.config.data_dir, self.config.version_rule());
        let output = CheckOutput {
            required_version: self.config.required_version,
            data_dir: self.config.data_dir.clone(),
            live_environment: locator.live_environment_candidate(),
            installed: locator.discover_installed_candidate(),
        };

        if json {
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        println!(
            "Required JDK: {} or newer",
            output.required_version.to_string().bold()
        );
        print_candidate("JAVA_HOME", output.live_environment.as_deref());
        print_candidate("Private install", output.installed.as_deref());

        if output.live_environment.is_none() && output.installed.is_none() {
            println!();
            println!("Run 'jdk-provisioner ensure' to download a JDK.");
        }

        Ok(())
    }
}

fn print_candidate(label: &str, candidate: Option<&Path>) {
    match candidate {
        Some(path) => println!("{} {label}: {}", "✓".green(), path.display()),
        None => println!("{} {label}: {}", "✗".red(), "not found".dimmed()),
    }
}
