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
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Component, Path};
use tar::Archive as TarArchive;
use zip::ZipArchive;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveType {
    TarGz,
    Zip,
}

/// Extract a JDK archive into `destination`, keeping the archive's top-level
/// directory (e.g. `jdk-21.0.5+11/`).
pub fn extract_archive(archive_path: &Path, destination: &Path) -> Result<()> {
    fs::create_dir_all(destination)?;

    match detect_archive_type(archive_path)? {
        ArchiveType::TarGz => extract_tar_gz(archive_path, destination),
        ArchiveType::Zip => extract_zip(archive_path, destination),
    }
}

pub fn detect_archive_type(path: &Path) -> Result<ArchiveType> {
    let path_str = path.to_string_lossy().to_lowercase();
    if path_str.ends_with(".tar.gz") || path_str.ends_with(".tgz") {
        return Ok(ArchiveType::TarGz);
    }
    if path_str.ends_with(".zip") {
        return Ok(ArchiveType::Zip);
    }

    detect_by_content(path)
}

fn detect_by_content(path: &Path) -> Result<ArchiveType> {
    let mut magic_bytes = [0u8; 4];
    File::open(path)?.read_exact(&mut magic_bytes).map_err(|_| {
        ProvisionError::Extract(format!("Cannot read file to determine archive type: {path:?}"))
    })?;

    match magic_bytes {
        [0x1f, 0x8b, _, _] => Ok(ArchiveType::TarGz),
        [0x50, 0x4b, 0x03 | 0x05 | 0x07, _] => Ok(ArchiveType::Zip),
        _ => Err(ProvisionError::Extract(format!(
            "Unsupported archive format. File does not appear to be tar.gz or zip: {path:?}"
        ))),
    }
}

fn extract_tar_gz(archive_path: &Path, destination: &Path) -> Result<()> {
    let mut archive = TarArchive::new(GzDecoder::new(File::open(archive_path)?));
    archive.set_preserve_permissions(true);
    archive.set_overwrite(true);

    let mut extracted_count = 0;
    for entry in archive.entries()? {
        let mut entry = entry?;
        let path = entry.path()?.into_owned();
        validate_entry_path(&path)?;

        let dest_path = destination.join(&path);
        if let Some(parent) = dest_path.parent() {
            fs::create_dir_all(parent)?;
        }

        entry.unpack(&dest_path)?;
        extracted_count += 1;

        if extracted_count % 100 == 0 {
            log::debug!("Extracted {extracted_count} files...");
        }
    }

    log::info!("Extracted {extracted_count} files from tar.gz archive");
    Ok(())
}

fn extract_zip(archive_path: &Path, destination: &Path) -> Result<()> {
    let mut archive = ZipArchive::new(File::open(archive_path)?)?;
    let total_files = archive.len();

    for i in 0..total_files {
        let mut file = archive.by_index(i)?;
        let Some(path) = file.enclosed_name() else {
            log::warn!("Skipping file with invalid name at index {i}");
            continue;
        };
        validate_entry_path(&path)?;
        let outpath = destination.join(path);

        if file.is_dir() {
            fs::create_dir_all(&outpath)?;
            continue;
        }

        if let Some(parent) = outpath.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut outfile = File::create(&outpath)?;
        std::io::copy(&mut file, &mut outfile)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = file.unix_mode() {
                fs::set_permissions(&outpath, fs::Permissions::from_mode(mode))?;
            }
        }
    }

    log::info!("Extracted {total_files} files from zip archive");
    Ok(())
}

/// Rejects entries that would land outside the destination directory.
fn validate_entry_path(entry_path: &Path) -> Result<()> {
    for component in entry_path.components() {
        match component {
            Component::ParentDir => {
                return Err(ProvisionError::Extract(format!(
                    "Archive contains path traversal: {entry_path:?}"
                )));
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(ProvisionError::Extract(format!(
                    "Archive contains absolute path: {entry_path:?}"
                )));
            }
            _ => {}
        }
    }
    Ok(())
}
