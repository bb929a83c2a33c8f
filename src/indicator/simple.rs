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

/// Line-oriented output for non-terminal environments
pub struct SimpleProgress {
    operation: String,
}

impl SimpleProgress {
    pub fn new() -> Self {
        Self {
            operation: String::new(),
        }
    }

    fn completion_line(&self, message: Option<&str>) -> String {
        format!("✓ {} - {}", self.operation, message.unwrap_or("Complete"))
    }

    fn error_line(&self, message: &str) -> String {
        format!("✗ {} - {message}", self.operation)
    }
}

impl Default for SimpleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressIndicator for SimpleProgress {
    fn start(&mut self, message: &str) {
        self.operation = message.to_string();
        println!("{message}...");
    }

    fn complete(&mut self, message: Option<String>) {
        println!("{}", self.completion_line(message.as_deref()));
    }

    fn error(&mut self, message: String) {
        eprintln!("{}", self.error_line(&message));
    }
}
