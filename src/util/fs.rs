// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Filesystem-related utility functions.

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::Path;

/// Files created by file managers that do not keep a directory alive.
const HOUSEKEEPING_FILES: [&str; 3] = [".DS_Store", "Thumbs.db", "desktop.ini"];

/// Copy the file
fn copy_file<S: AsRef<Path>, D: AsRef<Path>>(source: S, destination: D) -> io::Result<()> {
    let dest_filename = destination
        .as_ref()
        .file_name()
        .and_then(OsStr::to_str)
        .ok_or(io::Error::other("cannot determine destination file name"))?;
    let dest_dir = destination
        .as_ref()
        .parent()
        .ok_or(io::Error::other("cannot determine destination directory"))?;
    fs::create_dir_all(dest_dir)?;
    let mut temp_destination_file = tempfile::Builder::new()
        .prefix(format!(".tagwrap.{dest_filename}").as_str())
        .suffix(".tmp")
        .tempfile_in(dest_dir)?;
    let mut source_file = fs::File::open(&source)?;
    let _ = io::copy(&mut source_file, &mut temp_destination_file)?;

    // When copying succeeded, persist the temporary file at the actual destination.
    let temp_destination = temp_destination_file.into_temp_path();
    temp_destination.persist(&destination)?;
    log::info!(
        "Copied file {} to {}",
        source.as_ref().display(),
        destination.as_ref().display()
    );

    Ok(())
}

/// Move the file, creating missing parent directories of the destination.
pub fn move_file<S: AsRef<Path>, D: AsRef<Path>>(source: S, destination: D) -> crate::Result<()> {
    if let Some(dest_dir) = destination.as_ref().parent() {
        fs::create_dir_all(dest_dir)?;
    }

    // First, try renaming.
    if let Ok(()) = fs::rename(&source, &destination) {
        log::info!(
            "Renamed file {} to {}",
            source.as_ref().display(),
            destination.as_ref().display()
        );
        return Ok(());
    }

    // If that didn't work, try to copy the source file to a temporary file on the destination
    // filesystem and persist the temporary file under the actual destination path if this
    // succeeds.
    copy_file(&source, destination)?;

    // Then remove the source file.
    fs::remove_file(&source)?;
    log::info!("Removed file {}", source.as_ref().display());

    Ok(())
}

/// Returns `true` if the directory only contains housekeeping files (or nothing at all).
fn only_housekeeping_files(dir: &Path) -> io::Result<bool> {
    for entry in fs::read_dir(dir)? {
        let file_name = entry?.file_name();
        if !HOUSEKEEPING_FILES
            .iter()
            .any(|name| file_name.as_os_str() == OsStr::new(name))
        {
            return Ok(false);
        }
    }

    Ok(true)
}

/// Remove `dir` and its ancestors as long as they are empty apart from housekeeping files.
///
/// Stops silently at the first directory that still has content or cannot be removed.
pub fn prune_empty_dirs(dir: &Path) {
    let mut current = Some(dir);
    while let Some(dir) = current.filter(|dir| !dir.as_os_str().is_empty()) {
        match only_housekeeping_files(dir) {
            Ok(true) => (),
            Ok(false) => break,
            Err(err) => {
                log::debug!("Cannot list directory {}: {err}", dir.display());
                break;
            }
        }

        for name in HOUSEKEEPING_FILES {
            let path = dir.join(name);
            if path.is_file() {
                if let Err(err) = fs::remove_file(&path) {
                    log::debug!("Cannot remove {}: {err}", path.display());
                    return;
                }
                log::debug!("Removed {}", path.display());
            }
        }

        if let Err(err) = fs::remove_dir(dir) {
            log::debug!("Cannot remove directory {}: {err}", dir.display());
            break;
        }
        log::info!("Removed empty directory {}", dir.display());

        current = dir.parent();
    }
}
