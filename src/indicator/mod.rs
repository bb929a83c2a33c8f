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

//! Progress feedback while a JDK download runs.
//!
//! The download reports no byte counts, so every indicator here is
//! indeterminate: it is started, then either completed or failed.

pub mod factory;
pub mod silent;
pub mod simple;
pub mod spinner;

pub use factory::ProgressFactory;
pub use silent::SilentProgress;
pub use simple::SimpleProgress;
pub use spinner::SpinnerProgress;

/// Core trait for progress indicator implementations
///
/// - `SpinnerProgress` - animated spinner for terminals
/// - `SimpleProgress` - plain lines for pipes and CI logs
/// - `SilentProgress` - no output
pub trait ProgressIndicator: Send {
    /// Show the indicator with an initial message
    fn start(&mut self, message: &str);

    /// Stop the indicator after success
    fn complete(&mut self, message: Option<String>);

    /// Stop the indicator after failure
    ///
    /// The message should stay visible even when animation is disabled.
    fn error(&mut self, message: String);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingProgress {
        events: Vec<String>,
    }

    impl ProgressIndicator for RecordingProgress {
        fn start(&mut self, message: &str) {
            self.events.push(format!("start:{message}"));
        }

        fn complete(&mut self, message: Option<String>) {
            self.events
                .push(format!("complete:{}", message.unwrap_or_default()));
        }

        fn error(&mut self, message: String) {
            self.events.push(format!("error:{message}"));
        }
    }

    #[test]
    fn test_trait_object() {
        let mut progress: Box<dyn ProgressIndicator> = Box::new(SilentProgress::new());
        progress.start("Downloading JDK 21");
        progress.complete(None);

        fn accept_progress(_p: Box<dyn ProgressIndicator>) {}
        accept_progress(progress);
    }

    #[test]
    fn test_lifecycle_order() {
        let mut progress = RecordingProgress::default();
        progress.start("Downloading");
        progress.error("timed out".to_string());

        assert_eq!(progress.events, vec!["start:Downloading", "error:timed out"]);
    }
}
