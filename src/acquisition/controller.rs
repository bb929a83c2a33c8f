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

use crate::acquisition::state::{AcquisitionEvent, ProvisioningState, transition};
use crate::acquisition::ui::{AcquisitionUi, IdentityTranslator, Translator};
use crate::environment::{EnvironmentRegistry, EnvironmentStore};
use crate::error::{ProvisionError, Result};
use crate::platform::HostOs;
use crate::provision::{ProvisionTask, Provisioner};
use crate::version::MajorVersion;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);
const DOWNLOAD_SIZE_MB: u32 = 180;

/// What the host loop should do after a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll {
    /// Call `poll` again after the interval.
    Reschedule(Duration),
    Done(ProvisioningState),
}

/// Drives one acquisition from consent to a terminal state.
///
/// Owns the provisioner until consent is given; at most one worker is ever
/// started. Registration of the installed JDK happens in [`poll`](Self::poll)
/// on the caller's thread.
pub struct AcquisitionController {
    state: ProvisioningState,
    version: MajorVersion,
    install_dir: PathBuf,
    provisioner: Option<Provisioner>,
    task: Option<ProvisionTask>,
    installed: Option<PathBuf>,
    failure: Option<ProvisionError>,
    poll_interval: Duration,
    translator: Box<dyn Translator>,
    os: HostOs,
}

impl AcquisitionController {
    pub fn new(provisioner: Provisioner) -> Self {
        Self {
            state: ProvisioningState::AwaitingConsent,
            version: provisioner.version(),
            install_dir: provisioner.canonical_dir(),
            provisioner: Some(provisioner),
            task: None,
            installed: None,
            failure: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            translator: Box::new(IdentityTranslator),
            os: HostOs::current(),
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_translator(mut self, translator: Box<dyn Translator>) -> Self {
        self.translator = translator;
        self
    }

    pub fn with_os(mut self, os: HostOs) -> Self {
        self.os = os;
        self
    }

    pub fn state(&self) -> ProvisioningState {
        self.state
    }

    pub fn consent_title(&self) -> String {
        self.translator
            .translate(&format!("Install JDK {}", self.version))
    }

    pub fn consent_message(&self) -> String {
        self.translator.translate(&format!(
            "Running sketches requires JDK {}. It'll need to download about {DOWNLOAD_SIZE_MB} MB.",
            self.version
        ))
    }

    pub fn progress_message(&self) -> String {
        self.translator
            .translate(&format!("Downloading and extracting JDK {} ...", self.version))
    }

    pub fn completion_title(&self) -> String {
        self.translator.translate("JDK done")
    }

    pub fn completion_message(&self, install_dir: &Path) -> String {
        format!(
            "JDK {}{}{}{}",
            self.version,
            self.translator.translate(" extracted to "),
            install_dir.display(),
            self.translator.translate("\n\nYou can now run sketches.")
        )
    }

    /// Present the consent prompt for the initial state.
    pub fn begin<U: AcquisitionUi + ?Sized>(&self, ui: &mut U) {
        if self.state == ProvisioningState::AwaitingConsent {
            ui.show_consent(&self.consent_title(), &self.consent_message());
        }
    }

    /// Consent given: show progress and start the worker.
    pub fn proceed<U: AcquisitionUi + ?Sized>(&mut self, ui: &mut U) -> Result<()> {
        let next = transition(self.state, AcquisitionEvent::Proceed)?;
        let provisioner = self
            .provisioner
            .take()
            .ok_or_else(|| ProvisionError::InvalidTransition {
                state: self.state.to_string(),
                event: AcquisitionEvent::Proceed.to_string(),
            })?;
        self.state = next;

        ui.show_progress(&self.progress_message());
        info!(
            "Provisioning JDK {} into {}",
            self.version,
            self.install_dir.display()
        );

        match provisioner.spawn() {
            Ok(task) => self.task = Some(task),
            Err(e) => {
                ui.stop_progress(false);
                self.finish_failed(ui, e)?;
            }
        }
        Ok(())
    }

    /// Consent refused: close the dialog without starting anything.
    pub fn cancel<U: AcquisitionUi + ?Sized>(&mut self, ui: &mut U) -> Result<()> {
        self.state = transition(self.state, AcquisitionEvent::Cancel)?;
        self.provisioner = None;
        ui.close();
        debug!("JDK {} installation declined", self.version);
        Ok(())
    }

    /// One poll step. Must be called from the host loop thread.
    pub fn poll<U, S>(&mut self, ui: &mut U, store: &mut S) -> Result<Poll>
    where
        U: AcquisitionUi + ?Sized,
        S: EnvironmentStore + ?Sized,
    {
        if self.state.is_terminal() {
            return Ok(Poll::Done(self.state));
        }

        let Some(task) = self.task.take() else {
            return Err(ProvisionError::InvalidTransition {
                state: self.state.to_string(),
                event: "poll".to_string(),
            });
        };

        if !task.is_finished() {
            self.task = Some(task);
            return Ok(Poll::Reschedule(self.poll_interval));
        }

        let joined = task.join();
        // The registry notice must not be drawn over a live spinner
        ui.stop_progress(joined.is_ok());

        let result = joined.and_then(|java_home| {
            EnvironmentRegistry::new(store)
                .with_os(self.os)
                .register_java_home(&java_home, &*ui)
                .map(|_| java_home)
        });

        match result {
            Ok(java_home) => {
                self.state = transition(self.state, AcquisitionEvent::WorkerSucceeded)?;
                ui.close();
                ui.notify(
                    &self.completion_title(),
                    &self.completion_message(&java_home),
                );
                self.installed = Some(java_home);
            }
            Err(e) => self.finish_failed(ui, e)?,
        }

        Ok(Poll::Done(self.state))
    }

    fn finish_failed<U: AcquisitionUi + ?Sized>(
        &mut self,
        ui: &mut U,
        error: ProvisionError,
    ) -> Result<()> {
        self.state = transition(self.state, AcquisitionEvent::WorkerFailed)?;
        warn!("JDK {} provisioning failed: {error}", self.version);
        ui.close();
        ui.report_error(&error);
        self.failure = Some(error);
        Ok(())
    }

    /// Converts a terminal state into the installed path or the reason there is none.
    pub fn into_result(self) -> Result<PathBuf> {
        match (self.state, self.installed, self.failure) {
            (ProvisioningState::Completed, Some(java_home), _) => Ok(java_home),
            (ProvisioningState::Declined, _, _) => Err(ProvisionError::UserDeclined),
            (ProvisioningState::Failed, _, Some(error)) => Err(error),
            (state, _, _) => Err(ProvisionError::InvalidTransition {
                state: state.to_string(),
                event: "finish".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{MemoryEnvironmentStore, Notifier};
    use crate::test::fixtures::{EnvGuard, FakeFetcher};
    use serial_test::serial;
    use std::cell::RefCell;
    use std::fs;
    use std::thread;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingUi {
        events: RefCell<Vec<String>>,
    }

    impl RecordingUi {
        fn record(&self, event: String) {
            self.events.borrow_mut().push(event);
        }

        fn events(&self) -> Vec<String> {
            self.events.borrow().clone()
        }

        fn kinds(&self) -> Vec<String> {
            self.events()
                .iter()
                .map(|e| e.split(':').next().unwrap_or_default().to_string())
                .collect()
        }
    }

    impl Notifier for RecordingUi {
        fn notify(&self, title: &str, _message: &str) {
            self.record(format!("notify:{title}"));
        }
    }

    impl AcquisitionUi for RecordingUi {
        fn show_consent(&mut self, title: &str, _message: &str) {
            self.record(format!("consent:{title}"));
        }

        fn show_progress(&mut self, message: &str) {
            self.record(format!("progress:{message}"));
        }

        fn stop_progress(&mut self, succeeded: bool) {
            self.record(format!("stop:{succeeded}"));
        }

        fn close(&mut self) {
            self.record("close".to_string());
        }

        fn report_error(&mut self, error: &ProvisionError) {
            self.record(format!("error:{error}"));
        }
    }

    fn controller(data_dir: &Path, fetcher: &FakeFetcher) -> AcquisitionController {
        let provisioner = Provisioner::new(data_dir, 21, Box::new(fetcher.clone()));
        AcquisitionController::new(provisioner).with_poll_interval(Duration::from_millis(1))
    }

    fn poll_until_done(
        controller: &mut AcquisitionController,
        ui: &mut RecordingUi,
        store: &mut MemoryEnvironmentStore,
    ) -> ProvisioningState {
        loop {
            match controller.poll(ui, store).unwrap() {
                Poll::Reschedule(interval) => thread::sleep(interval),
                Poll::Done(state) => return state,
            }
        }
    }

    #[test]
    fn test_begin_shows_consent() {
        let temp_dir = TempDir::new().unwrap();
        let fetcher = FakeFetcher::extracting("jdk-21.0.5+11");
        let controller = controller(temp_dir.path(), &fetcher);
        let mut ui = RecordingUi::default();

        controller.begin(&mut ui);

        assert_eq!(controller.state(), ProvisioningState::AwaitingConsent);
        assert_eq!(ui.events(), vec!["consent:Install JDK 21"]);
        assert!(controller.consent_message().contains("180 MB"));
    }

    #[test]
    fn test_cancel_starts_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let fetcher = FakeFetcher::extracting("jdk-21.0.5+11");
        let mut controller = controller(temp_dir.path(), &fetcher);
        let mut ui = RecordingUi::default();
        let mut store = MemoryEnvironmentStore::new(vec!["PATH=/usr/bin".to_string()]);

        controller.begin(&mut ui);
        controller.cancel(&mut ui).unwrap();

        assert_eq!(controller.state(), ProvisioningState::Declined);
        assert_eq!(
            controller.poll(&mut ui, &mut store).unwrap(),
            Poll::Done(ProvisioningState::Declined)
        );
        assert_eq!(fetcher.calls(), 0);
        assert_eq!(store.entries(), ["PATH=/usr/bin"]);
        assert_eq!(store.writes(), 0);
        assert_eq!(ui.kinds(), vec!["consent", "close"]);
        assert!(fs::read_dir(temp_dir.path()).unwrap().next().is_none());
        assert!(matches!(
            controller.into_result(),
            Err(ProvisionError::UserDeclined)
        ));
    }

    #[test]
    #[serial]
    fn test_successful_acquisition_registers_on_poll() {
        let mut guard = EnvGuard::new();
        guard.remove("JAVA_HOME");

        let temp_dir = TempDir::new().unwrap();
        let fetcher = FakeFetcher::extracting("jdk-21.0.5+11");
        let mut controller = controller(temp_dir.path(), &fetcher);
        let mut ui = RecordingUi::default();
        let mut store = MemoryEnvironmentStore::default();

        controller.begin(&mut ui);
        controller.proceed(&mut ui).unwrap();
        assert_eq!(controller.state(), ProvisioningState::Downloading);

        let state = poll_until_done(&mut controller, &mut ui, &mut store);

        assert_eq!(state, ProvisioningState::Completed);
        assert_eq!(fetcher.calls(), 1);
        let expected = crate::platform::normalize(&temp_dir.path().join("jdk-21"));
        assert_eq!(
            store.entries(),
            [format!("JAVA_HOME={}", expected.display())]
        );
        assert_eq!(
            ui.kinds(),
            vec!["consent", "progress", "stop", "notify", "close", "notify"]
        );
        assert_eq!(ui.events()[2], "stop:true");
        assert_eq!(ui.events().last().unwrap(), "notify:JDK done");
        assert_eq!(controller.into_result().unwrap(), temp_dir.path().join("jdk-21"));
    }

    #[test]
    fn test_failed_download_reaches_failed_state() {
        let temp_dir = TempDir::new().unwrap();
        let fetcher = FakeFetcher::failing();
        let mut controller = controller(temp_dir.path(), &fetcher);
        let mut ui = RecordingUi::default();
        let mut store = MemoryEnvironmentStore::default();

        controller.begin(&mut ui);
        controller.proceed(&mut ui).unwrap();
        let state = poll_until_done(&mut controller, &mut ui, &mut store);

        assert_eq!(state, ProvisioningState::Failed);
        assert_eq!(store.writes(), 0);
        assert_eq!(
            ui.kinds(),
            vec!["consent", "progress", "stop", "close", "error"]
        );
        assert!(ui.events().contains(&"stop:false".to_string()));
        assert!(matches!(
            controller.into_result(),
            Err(ProvisionError::Download { version: 21, .. })
        ));
    }

    #[test]
    fn test_rename_failure_leaves_store_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let fetcher = FakeFetcher::extracting_all(&["jdk-21.0.5+11", "jdk-21"]);
        let mut controller = controller(temp_dir.path(), &fetcher);
        let mut ui = RecordingUi::default();
        let mut store = MemoryEnvironmentStore::new(vec!["PATH=/usr/bin".to_string()]);

        controller.begin(&mut ui);
        controller.proceed(&mut ui).unwrap();
        let state = poll_until_done(&mut controller, &mut ui, &mut store);

        assert_eq!(state, ProvisioningState::Failed);
        assert_eq!(store.entries(), ["PATH=/usr/bin"]);
        assert_eq!(store.writes(), 0);
        assert_eq!(
            ui.kinds(),
            vec!["consent", "progress", "stop", "close", "error"]
        );
        assert!(ui.events().contains(&"stop:false".to_string()));
        assert!(matches!(
            controller.into_result(),
            Err(ProvisionError::Rename { .. })
        ));
    }

    struct ReadOnlyStore;

    impl EnvironmentStore for ReadOnlyStore {
        fn environment_entries(&self) -> Result<Vec<String>> {
            Ok(Vec::new())
        }

        fn set_environment_entries(&mut self, _entries: Vec<String>) -> Result<()> {
            Err(ProvisionError::StoreWrite {
                path: PathBuf::from("/data/settings.toml"),
                reason: "read-only file system".to_string(),
            })
        }
    }

    #[test]
    #[serial]
    fn test_registration_failure_after_download() {
        let mut guard = EnvGuard::new();
        guard.remove("JAVA_HOME");

        let temp_dir = TempDir::new().unwrap();
        let fetcher = FakeFetcher::extracting("jdk-21.0.5+11");
        let mut controller = controller(temp_dir.path(), &fetcher);
        let mut ui = RecordingUi::default();

        controller.proceed(&mut ui).unwrap();
        let state = loop {
            match controller.poll(&mut ui, &mut ReadOnlyStore).unwrap() {
                Poll::Reschedule(interval) => thread::sleep(interval),
                Poll::Done(state) => break state,
            }
        };

        assert_eq!(state, ProvisioningState::Failed);
        assert_eq!(ui.kinds(), vec!["progress", "stop", "close", "error"]);
        assert!(matches!(
            controller.into_result(),
            Err(ProvisionError::StoreWrite { .. })
        ));
    }

    #[test]
    fn test_second_proceed_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let fetcher = FakeFetcher::failing();
        let mut controller = controller(temp_dir.path(), &fetcher);
        let mut ui = RecordingUi::default();
        let mut store = MemoryEnvironmentStore::default();

        controller.proceed(&mut ui).unwrap();
        assert!(matches!(
            controller.proceed(&mut ui),
            Err(ProvisionError::InvalidTransition { .. })
        ));
        poll_until_done(&mut controller, &mut ui, &mut store);
        assert_eq!(fetcher.calls(), 1);
    }

    #[test]
    fn test_poll_before_consent_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let fetcher = FakeFetcher::failing();
        let mut controller = controller(temp_dir.path(), &fetcher);
        let mut ui = RecordingUi::default();
        let mut store = MemoryEnvironmentStore::default();

        assert!(controller.poll(&mut ui, &mut store).is_err());
        assert_eq!(controller.state(), ProvisioningState::AwaitingConsent);
    }

    #[test]
    fn test_completion_message_names_directory() {
        let temp_dir = TempDir::new().unwrap();
        let fetcher = FakeFetcher::failing();
        let controller = controller(temp_dir.path(), &fetcher);

        let message = controller.completion_message(Path::new("/data/jdk-21"));
        assert!(message.starts_with("JDK 21 extracted to /data/jdk-21"));
        assert!(message.ends_with("You can now run sketches."));
    }
}
