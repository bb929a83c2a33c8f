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

use crate::error::{ProvisionError, Result};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisioningState {
    AwaitingConsent,
    Downloading,
    Completed,
    Declined,
    Failed,
}

impl ProvisioningState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Declined | Self::Failed)
    }
}

impl fmt::Display for ProvisioningState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AwaitingConsent => "awaiting consent",
            Self::Downloading => "downloading",
            Self::Completed => "completed",
            Self::Declined => "declined",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionEvent {
    Proceed,
    Cancel,
    WorkerSucceeded,
    WorkerFailed,
}

impl fmt::Display for AcquisitionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Proceed => "proceed",
            Self::Cancel => "cancel",
            Self::WorkerSucceeded => "complete a download",
            Self::WorkerFailed => "fail a download",
        };
        f.write_str(name)
    }
}

/// Computes the next state.
///
/// Consent is only answered once and a running download has no exit other
/// than finishing, so every other pair is rejected.
pub fn transition(
    state: ProvisioningState,
    event: AcquisitionEvent,
) -> Result<ProvisioningState> {
    use AcquisitionEvent::*;
    use ProvisioningState::*;

    match (state, event) {
        (AwaitingConsent, Proceed) => Ok(Downloading),
        (AwaitingConsent, Cancel) => Ok(Declined),
        (Downloading, WorkerSucceeded) => Ok(Completed),
        (Downloading, WorkerFailed) => Ok(Failed),
        (state, event) => Err(ProvisionError::InvalidTransition {
            state: state.to_string(),
            event: event.to_string(),
        }),
    }
}
