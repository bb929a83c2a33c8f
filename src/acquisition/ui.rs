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

use crate::environment::Notifier;
use crate::error::ProvisionError;

/// Display-string lookup supplied by the host.
pub trait Translator: Send {
    fn translate(&self, text: &str) -> String;
}

pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Rendering side of the acquisition dialog.
///
/// Every method is called from the host loop thread, never from the worker.
pub trait AcquisitionUi: Notifier {
    /// Present the Proceed/Cancel prompt.
    fn show_consent(&mut self, title: &str, message: &str);

    /// Replace the prompt with an indeterminate progress indicator.
    fn show_progress(&mut self, message: &str);

    fn stop_progress(&mut self, succeeded: bool);

    /// Tear down the dialog. Called exactly once per acquisition.
    fn close(&mut self);

    fn report_error(&mut self, error: &ProvisionError);
}
