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
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const GENERAL_SECTION: &str = "general";
const ENVIRONMENT_KEY: &str = "environment";

/// Host-owned store of persisted environment entries.
///
/// The list is always read and written as a whole; implementations must keep
/// the order of entries.
pub trait EnvironmentStore {
    fn environment_entries(&self) -> Result<Vec<String>>;

    fn set_environment_entries(&mut self, entries: Vec<String>) -> Result<()>;
}

/// Keeps the first occurrence of every entry, preserving order.
fn dedup_entries(entries: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(entries.len());
    for entry in entries {
        if !unique.contains(&entry) {
            unique.push(entry);
        }
    }
    unique
}

/// Store backed by the `[general] environment = [...]` array of a TOML
/// settings file. Other tables and keys in the file are left untouched.
#[derive(Debug, Clone)]
pub struct TomlEnvironmentStore {
    path: PathBuf,
}

impl TomlEnvironmentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_table(&self) -> Result<toml::Table> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(toml::Table::new()),
            Err(e) => return Err(self.read_error(e)),
        };

        contents.parse::<toml::Table>().map_err(|e| self.read_error(e))
    }

    fn write_table(&self, table: &toml::Table) -> Result<()> {
        let contents = toml::to_string_pretty(table).map_err(|e| self.write_error(e))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
        }

        // Write atomically using a temporary file
        let temp_path = self.path.with_extension("tmp");
        {
            let mut file = fs::File::create(&temp_path).map_err(|e| self.write_error(e))?;
            file.write_all(contents.as_bytes())
                .map_err(|e| self.write_error(e))?;
            file.flush().map_err(|e| self.write_error(e))?;
        }
        fs::rename(&temp_path, &self.path).map_err(|e| self.write_error(e))?;

        log::debug!("Wrote environment settings: {:?}", self.path);
        Ok(())
    }

    fn read_error(&self, reason: impl ToString) -> ProvisionError {
        ProvisionError::StoreRead {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }

    fn write_error(&self, reason: impl ToString) -> ProvisionError {
        ProvisionError::StoreWrite {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}

impl EnvironmentStore for TomlEnvironmentStore {
    fn environment_entries(&self) -> Result<Vec<String>> {
        let table = self.read_table()?;
        let Some(values) = table
            .get(GENERAL_SECTION)
            .and_then(|general| general.get(ENVIRONMENT_KEY))
            .and_then(|env| env.as_array())
        else {
            return Ok(Vec::new());
        };

        Ok(values
            .iter()
            .filter_map(|value| match value.as_str() {
                Some(entry) => Some(entry.to_string()),
                None => {
                    log::warn!("Ignoring non-string environment entry {value} in {:?}", self.path);
                    None
                }
            })
            .collect())
    }

    fn set_environment_entries(&mut self, entries: Vec<String>) -> Result<()> {
        let mut table = self.read_table()?;
        let general = table
            .entry(GENERAL_SECTION)
            .or_insert(toml::Value::Table(toml::Table::new()));

        let Some(general) = general.as_table_mut() else {
            return Err(self.write_error(format!("'{GENERAL_SECTION}' is not a table")));
        };

        let values = dedup_entries(entries)
            .into_iter()
            .map(toml::Value::String)
            .collect();
        general.insert(ENVIRONMENT_KEY.to_string(), toml::Value::Array(values));

        self.write_table(&table)
    }
}

/// In-process store, for hosts that persist settings themselves.
#[derive(Debug, Clone, Default)]
pub struct MemoryEnvironmentStore {
    entries: Vec<String>,
    writes: usize,
}

impl MemoryEnvironmentStore {
    pub fn new(entries: Vec<String>) -> Self {
        Self {
            entries,
            writes: 0,
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of times the entry list has been rewritten.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl EnvironmentStore for MemoryEnvironmentStore {
    fn environment_entries(&self) -> Result<Vec<String>> {
        Ok(self.entries.clone())
    }

    fn set_environment_entries(&mut self, entries: Vec<String>) -> Result<()> {
        self.entries = dedup_entries(entries);
        self.writes += 1;
        Ok(())
    }
}
