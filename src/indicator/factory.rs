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

use crate::indicator::{ProgressIndicator, SilentProgress, SimpleProgress, SpinnerProgress};
use std::env;
use std::io::IsTerminal;

pub struct ProgressFactory;

impl ProgressFactory {
    pub fn create(no_progress: bool) -> Box<dyn ProgressIndicator> {
        if no_progress {
            Box::new(SilentProgress::new())
        } else if Self::should_use_simple_progress() {
            Box::new(SimpleProgress::new())
        } else {
            Box::new(SpinnerProgress::new())
        }
    }

    fn should_use_simple_progress() -> bool {
        if !std::io::stderr().is_terminal() {
            return true;
        }

        if env::var("CI").is_ok() {
            return true;
        }

        if let Ok(term) = env::var("TERM")
            && term == "dumb"
        {
            return true;
        }

        env::var("NO_COLOR").is_ok()
    }
}
