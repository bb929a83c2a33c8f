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

use crate::archive::extract_archive;
use crate::error::{ProvisionError, Result};
use crate::platform::{HostOs, get_current_architecture};
use crate::user_agent;
use crate::version::MajorVersion;
use attohttpc::Session;
use log::{debug, info};
use retry::{OperationResult, delay::Exponential, retry_with_index};
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;
use std::time::Duration;

const ADOPTIUM_API_BASE: &str = "https://api.adoptium.net/v3";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);
const MAX_RETRIES: usize = 3;
const INITIAL_BACKOFF_MS: u64 = 1000;
const BACKOFF_FACTOR: f64 = 2.0;
const DOWNLOAD_CHUNK_SIZE: usize = 64 * 1024;
const STAGING_PREFIX: &str = ".download-";
// No extension: the archive type is detected from its content.
const ARCHIVE_FILE_NAME: &str = "jdk-archive";

/// Downloads and extracts a JDK.
///
/// On success `destination` contains a new subdirectory holding the JDK
/// (named however the archive names it, e.g. `jdk-21.0.5+11`). Blocks the
/// calling thread for the whole download.
pub trait JdkFetcher: Send + Sync {
    fn fetch(&self, version: MajorVersion, destination: &Path) -> Result<()>;
}

/// Fetches the latest GA Eclipse Temurin build from the Adoptium API.
pub struct TemurinFetcher {
    base_url: String,
    timeout: Duration,
    os: HostOs,
    arch: String,
}

impl TemurinFetcher {
    pub fn new() -> Self {
        Self {
            base_url: ADOPTIUM_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            os: HostOs::current(),
            arch: get_current_architecture().to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_platform(mut self, os: HostOs, arch: impl Into<String>) -> Self {
        self.os = os;
        self.arch = arch.into();
        self
    }

    pub fn binary_url(&self, version: MajorVersion) -> Result<String> {
        let os = match self.os {
            HostOs::Windows => "windows",
            HostOs::MacOs => "mac",
            HostOs::Linux => "linux",
            HostOs::Other => {
                return Err(ProvisionError::Download {
                    version,
                    reason: "no Temurin builds for this operating system".to_string(),
                });
            }
        };

        Ok(format!(
            "{}/binary/latest/{version}/ga/{os}/{}/jdk/hotspot/normal/eclipse",
            self.base_url, self.arch
        ))
    }

    fn download(&self, version: MajorVersion, url: &str, target: &Path) -> Result<u64> {
        let mut session = Session::new();
        let user_agent = user_agent::download_client();
        session.header("User-Agent", &user_agent);
        session.timeout(self.timeout);
        session.proxy_settings(attohttpc::ProxySettings::from_env());

        let download_error = |reason: String| ProvisionError::Download { version, reason };

        let result = retry_with_index(
            retry_delays(),
            |current_try| {
                debug!("GET {url} (attempt {current_try})");

                let response = match session.get(url).send() {
                    Ok(response) => response,
                    Err(e) => return OperationResult::Retry(download_error(e.to_string())),
                };

                let status = response.status();
                if !response.is_success() {
                    let error = download_error(format!(
                        "HTTP {} {}",
                        status.as_u16(),
                        status.canonical_reason().unwrap_or("Unknown error")
                    ));
                    return if status.is_server_error() {
                        OperationResult::Retry(error)
                    } else {
                        OperationResult::Err(error)
                    };
                }

                let file = match File::create(target) {
                    Ok(file) => file,
                    Err(e) => return OperationResult::Err(ProvisionError::Io(e)),
                };

                write_body(version, response, file)
            },
        );

        result.map_err(|e| e.error)
    }
}

/// Delays slept between download attempts: 1 s, 2 s, 4 s.
fn retry_delays() -> impl Iterator<Item = Duration> {
    Exponential::from_millis_with_factor(INITIAL_BACKOFF_MS, BACKOFF_FACTOR).take(MAX_RETRIES)
}

// Read failures are the network's and worth retrying; write failures are local
// and fatal.
fn write_body<R: Read, W: Write>(
    version: MajorVersion,
    mut body: R,
    file: W,
) -> OperationResult<u64, ProvisionError> {
    let mut writer = BufWriter::new(file);
    let mut buffer = vec![0; DOWNLOAD_CHUNK_SIZE];
    let mut written = 0u64;

    loop {
        match body.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => {
                if let Err(e) = writer.write_all(&buffer[..n]) {
                    return OperationResult::Err(ProvisionError::Io(e));
                }
                written += n as u64;
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                return OperationResult::Retry(ProvisionError::Download {
                    version,
                    reason: e.to_string(),
                });
            }
        }
    }

    match writer.flush() {
        Ok(()) => OperationResult::Ok(written),
        Err(e) => OperationResult::Err(ProvisionError::Io(e)),
    }
}

impl Default for TemurinFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl JdkFetcher for TemurinFetcher {
    fn fetch(&self, version: MajorVersion, destination: &Path) -> Result<()> {
        let url = self.binary_url(version)?;
        fs::create_dir_all(destination)?;

        // Hidden, so discovery never mistakes a half-written download for an install
        let staging = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir_in(destination)?;
        let archive_path = staging.path().join(ARCHIVE_FILE_NAME);

        info!("Downloading JDK {version} from {url}");
        let bytes = self.download(version, &url, &archive_path)?;
        info!("Downloaded {bytes} bytes, extracting to {}", destination.display());

        extract_archive(&archive_path, destination)
    }
}
