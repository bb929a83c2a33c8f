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

use crate::indicator::ProgressIndicator;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] {msg}";
const TICK_INTERVAL: Duration = Duration::from_millis(100);

pub struct SpinnerProgress {
    progress_bar: Option<ProgressBar>,
}

impl SpinnerProgress {
    pub fn new() -> Self {
        Self { progress_bar: None }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template(TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⣾⣽⣻⢿⡿⣟⣯⣷")
    }
}

impl Default for SpinnerProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressIndicator for SpinnerProgress {
    fn start(&mut self, message: &str) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::style());
        pb.set_message(message.to_string());
        pb.enable_steady_tick(TICK_INTERVAL);
        self.progress_bar = Some(pb);
    }

    fn complete(&mut self, message: Option<String>) {
        if let Some(pb) = self.progress_bar.take() {
            let msg = message.unwrap_or_else(|| "Complete".to_string());
            pb.finish_with_message(format!("✓ {msg}"));
        }
    }

    fn error(&mut self, message: String) {
        if let Some(pb) = self.progress_bar.take() {
            pb.abandon_with_message(format!("✗ {message}"));
        }
    }
}
