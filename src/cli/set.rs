// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Module for the `set` CLI subcommand.

use crate::tag::{open_with_config, Value};
use crate::Config;
use clap::Parser;
use std::fs;
use std::path::PathBuf;

/// Command line arguments for the `set` CLI command.
#[derive(Parser, Debug)]
pub struct Args {
    /// Path of the audio file.
    path: PathBuf,
    /// Normalized field name (e.g. `artist`).
    field: String,
    /// New values of the field.
    #[arg(required = true)]
    values: Vec<String>,
    /// Treat the values as paths of files whose contents are stored (e.g. for the album cover).
    #[arg(short, long)]
    binary: bool,
}

/// Replace the values of a field and save the file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or written, or the values are not accepted by
/// the field.
pub fn run(config: &Config, args: Args) -> crate::Result<()> {
    let mut tag = open_with_config(&args.path, config)?;
    let values = if args.binary {
        args.values
            .iter()
            .map(|path| fs::read(path).map(Value::Binary))
            .collect::<Result<Vec<_>, _>>()?
    } else {
        args.values.into_iter().map(Value::Text).collect()
    };

    tag.insert(&args.field, values)?;
    tag.save()
}
