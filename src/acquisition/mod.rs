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

//! Consent-driven acquisition of a JDK.
//!
//! The controller is a state machine driven from a single-threaded host
//! loop. It asks for consent, starts the provisioner on a worker thread and
//! is polled until the worker finishes. Rendering is delegated to an
//! [`AcquisitionUi`].

pub mod controller;
pub mod state;
pub mod terminal;
pub mod ui;

pub use controller::{AcquisitionController, DEFAULT_POLL_INTERVAL, Poll};
pub use state::{AcquisitionEvent, ProvisioningState, transition};
pub use terminal::{ConsoleNotifier, TerminalUi, run_terminal_acquisition};
pub use ui::{AcquisitionUi, IdentityTranslator, Translator};
