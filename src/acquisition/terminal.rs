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

use crate::acquisition::controller::{AcquisitionController, Poll};
use crate::acquisition::ui::AcquisitionUi;
use crate::environment::{EnvironmentStore, Notifier};
use crate::error::{ProvisionError, Result};
use crate::indicator::ProgressIndicator;
use colored::Colorize;
use log::debug;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::thread;

/// Console rendering of the acquisition dialog.
pub struct TerminalUi {
    progress: Box<dyn ProgressIndicator>,
    input: Box<dyn BufRead>,
    assume_yes: bool,
    pending_prompt: Option<(String, String)>,
}

impl TerminalUi {
    pub fn new(progress: Box<dyn ProgressIndicator>, assume_yes: bool) -> Self {
        Self {
            progress,
            input: Box::new(BufReader::new(io::stdin())),
            assume_yes,
            pending_prompt: None,
        }
    }

    pub fn with_input(mut self, input: Box<dyn BufRead>) -> Self {
        self.input = input;
        self
    }

    /// Ask the pending consent question. An empty answer means yes.
    pub fn read_consent(&mut self) -> Result<bool> {
        let Some((title, message)) = self.pending_prompt.take() else {
            return Ok(false);
        };

        if self.assume_yes {
            debug!("Consent assumed for '{title}'");
            return Ok(true);
        }

        println!("{}", title.bold());
        print!("{message} Proceed? [Y/n] ");
        io::stdout()
            .flush()
            .map_err(|e| ProvisionError::SystemError(e.to_string()))?;

        let mut answer = String::new();
        self.input
            .read_line(&mut answer)
            .map_err(|e| ProvisionError::SystemError(e.to_string()))?;

        Ok(is_affirmative(&answer))
    }
}

fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    answer.is_empty() || answer == "y" || answer == "yes"
}

/// Prints notices to stdout.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, title: &str, message: &str) {
        println!("{} {message}", format!("{title}:").green().bold());
    }
}

impl Notifier for TerminalUi {
    fn notify(&self, title: &str, message: &str) {
        ConsoleNotifier.notify(title, message);
    }
}

impl AcquisitionUi for TerminalUi {
    fn show_consent(&mut self, title: &str, message: &str) {
        self.pending_prompt = Some((title.to_string(), message.to_string()));
    }

    fn show_progress(&mut self, message: &str) {
        self.progress.start(message);
    }

    fn stop_progress(&mut self, succeeded: bool) {
        if succeeded {
            self.progress.complete(None);
        } else {
            self.progress.error("Failed".to_string());
        }
    }

    fn close(&mut self) {
        self.pending_prompt = None;
    }

    fn report_error(&mut self, error: &ProvisionError) {
        // Printed by the caller together with its suggestion
        debug!("Acquisition failed: {error}");
    }
}

/// Runs an acquisition to completion on the current thread.
///
/// Returns the installed JDK directory, [`ProvisionError::UserDeclined`], or
/// the provisioning failure.
pub fn run_terminal_acquisition<S: EnvironmentStore + ?Sized>(
    mut controller: AcquisitionController,
    ui: &mut TerminalUi,
    store: &mut S,
) -> Result<PathBuf> {
    controller.begin(ui);

    if ui.read_consent()? {
        controller.proceed(ui)?;
    } else {
        controller.cancel(ui)?;
    }

    loop {
        match controller.poll(ui, store)? {
            Poll::Reschedule(interval) => thread::sleep(interval),
            Poll::Done(state) => {
                debug!("Acquisition finished: {state}");
                return controller.into_result();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::MemoryEnvironmentStore;
    use crate::indicator::SilentProgress;
    use crate::provision::Provisioner;
    use crate::test::fixtures::{EnvGuard, FakeFetcher};
    use serial_test::serial;
    use std::io::Cursor;
    use std::time::Duration;
    use tempfile::TempDir;

    fn ui(answer: &str, assume_yes: bool) -> TerminalUi {
        TerminalUi::new(Box::new(SilentProgress::new()), assume_yes)
            .with_input(Box::new(Cursor::new(answer.to_string())))
    }

    fn controller(temp_dir: &TempDir, fetcher: &FakeFetcher) -> AcquisitionController {
        AcquisitionController::new(Provisioner::new(
            temp_dir.path(),
            21,
            Box::new(fetcher.clone()),
        ))
        .with_poll_interval(Duration::from_millis(1))
    }

    #[test]
    fn test_is_affirmative() {
        assert!(is_affirmative("\n"));
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative("YES"));
        assert!(!is_affirmative("n\n"));
        assert!(!is_affirmative("later"));
    }

    #[test]
    fn test_declined_leaves_store_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let fetcher = FakeFetcher::extracting("jdk-21.0.5+11");
        let mut store = MemoryEnvironmentStore::default();
        let mut ui = ui("n\n", false);

        let result = run_terminal_acquisition(controller(&temp_dir, &fetcher), &mut ui, &mut store);

        assert!(matches!(result, Err(ProvisionError::UserDeclined)));
        assert_eq!(fetcher.calls(), 0);
        assert_eq!(store.writes(), 0);
    }

    #[test]
    #[serial]
    fn test_assume_yes_installs() {
        let mut guard = EnvGuard::new();
        guard.remove("JAVA_HOME");

        let temp_dir = TempDir::new().unwrap();
        let fetcher = FakeFetcher::extracting("jdk-21.0.5+11");
        let mut store = MemoryEnvironmentStore::default();
        let mut ui = ui("", true);

        let installed =
            run_terminal_acquisition(controller(&temp_dir, &fetcher), &mut ui, &mut store)
                .unwrap();

        assert_eq!(installed, temp_dir.path().join("jdk-21"));
        assert_eq!(store.entries().len(), 1);
    }

    #[test]
    fn test_failure_is_returned() {
        let temp_dir = TempDir::new().unwrap();
        let fetcher = FakeFetcher::failing();
        let mut store = MemoryEnvironmentStore::default();
        let mut ui = ui("y\n", false);

        let result = run_terminal_acquisition(controller(&temp_dir, &fetcher), &mut ui, &mut store);

        assert!(matches!(result, Err(ProvisionError::Download { .. })));
        assert_eq!(store.writes(), 0);
    }
}
