// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Module for the `remove` CLI subcommand.

use crate::tag::open_with_config;
use crate::Config;
use clap::Parser;
use std::path::PathBuf;

/// Command line arguments for the `remove` CLI command.
#[derive(Parser, Debug)]
pub struct Args {
    /// Path of the audio file.
    path: PathBuf,
    /// Normalized field names (e.g. `artist`).
    #[arg(required = true)]
    fields: Vec<String>,
    /// Do not fail if a field is not present.
    #[arg(short, long)]
    ignore_missing: bool,
}

/// Remove fields and save the file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or written, or a field is missing and
/// `--ignore-missing` was not given.
pub fn run(config: &Config, args: Args) -> crate::Result<()> {
    let mut tag = open_with_config(&args.path, config)?;
    for field in &args.fields {
        match tag.remove(field) {
            Ok(()) => log::debug!("Removed field {field:?}"),
            Err(crate::Error::KeyNotFound(_)) if args.ignore_missing => {
                log::info!("Field {field:?} not present in {}", args.path.display());
            }
            Err(err) => return Err(err),
        }
    }

    tag.save()
}
