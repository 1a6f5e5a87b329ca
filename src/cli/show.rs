// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Module for the `show` CLI subcommand.

use crate::tag::open_with_config;
use crate::Config;
use clap::Parser;
use std::path::PathBuf;

/// Command line arguments for the `show` CLI command.
#[derive(Parser, Debug)]
pub struct Args {
    /// Paths of the audio files.
    #[arg(required = true)]
    paths: Vec<PathBuf>,
}

/// Print all fields of each file.
///
/// # Errors
///
/// Returns an error if a file cannot be opened or contains malformed values.
pub fn run(config: &Config, args: Args) -> crate::Result<()> {
    for path in args.paths {
        let tag = open_with_config(&path, config)?;
        println!("{} ({})", path.display(), tag.inner().format());
        for (key, values) in tag.items()? {
            for value in values {
                println!("  {key}: {value}");
            }
        }
    }

    Ok(())
}
