// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Module for the `get` CLI subcommand.

use crate::tag::{open_with_config, Value};
use crate::Config;
use clap::Parser;
use std::fs;
use std::path::PathBuf;

/// Command line arguments for the `get` CLI command.
#[derive(Parser, Debug)]
pub struct Args {
    /// Path of the audio file.
    path: PathBuf,
    /// Normalized field name (e.g. `artist`).
    field: String,
    /// Write binary values (like the album cover) to this file instead of printing them.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Print the values of a field, one per line.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or the field is not present.
pub fn run(config: &Config, args: Args) -> crate::Result<()> {
    let tag = open_with_config(&args.path, config)?;
    for value in tag.get(&args.field)? {
        match (&value, &args.output) {
            (Value::Binary(data), Some(output)) => {
                fs::write(output, data)?;
                log::info!("Wrote {} bytes to {}", data.len(), output.display());
            }
            _ => println!("{value}"),
        }
    }

    Ok(())
}
