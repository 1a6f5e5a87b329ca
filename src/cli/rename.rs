// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Module for the `rename` CLI subcommand.

use crate::tag::open_with_config;
use crate::Config;
use clap::Parser;
use std::path::PathBuf;

/// Command line arguments for the `rename` CLI command.
#[derive(Parser, Debug)]
pub struct Args {
    /// Path of the audio file.
    path: PathBuf,
    /// New path of the audio file.
    destination: PathBuf,
    /// Overwrite an existing file at the destination.
    #[arg(short, long)]
    force: bool,
}

/// Save the file and move it to its destination.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, saved or moved.
pub fn run(config: &Config, args: Args) -> crate::Result<()> {
    let mut tag = open_with_config(&args.path, config)?;
    if !tag.rename(&args.destination, args.force)? {
        log::warn!(
            "Destination {} already exists, use --force to overwrite it",
            args.destination.display()
        );
    }

    Ok(())
}
