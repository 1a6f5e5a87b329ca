// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Command line interface.

mod config;
mod get;
mod remove;
mod rename;
mod set;
mod show;

use crate::tag::TextEncoding;
use crate::Config;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use std::path::PathBuf;

/// Command line Arguments.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Show debug information.
    #[arg(short, long)]
    verbose: bool,
    /// Path to configuration file.
    #[arg(short, long, required = false)]
    config_path: Option<PathBuf>,
    /// Three-letter language code of ID3 comment frames (e.g. `eng`).
    #[arg(short, long)]
    language: Option<String>,
    /// Text encoding of written ID3 frames (name like `utf-8` or numeric code).
    #[arg(short, long)]
    encoding: Option<String>,
    /// Command to run.
    #[command(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Print all fields of a file.
    Show(show::Args),
    /// Print the values of a single field.
    Get(get::Args),
    /// Replace the values of a field.
    Set(set::Args),
    /// Remove fields.
    Remove(remove::Args),
    /// Move a file to a new location.
    Rename(rename::Args),
    /// Print the active configuration.
    Config(config::Args),
}

impl Args {
    /// Get the desired log level, depending on the verbose flag passed on the command line.
    fn log_level_filter(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    /// Get the current configuration, including overrides from the command line.
    fn config(&self) -> crate::Result<Config> {
        let mut config = match &self.config_path {
            Some(path) => Config::load_from_path(path).map(|config| config.with_defaults())?,
            None => Config::default(),
        };

        if let Some(language) = &self.language {
            config.id3.language = Some(language.clone());
        }
        if let Some(encoding) = &self.encoding {
            config.id3.encoding = Some(encoding.parse::<TextEncoding>()?);
        }

        // Fail early on invalid options instead of when the first file is opened.
        let _options = config.id3_options()?;
        Ok(config)
    }
}

/// Main entry point.
///
/// # Errors
///
/// Can returns errors if the command line arguments are incorrect or the executed command leads to
/// an error.
pub fn main() -> crate::Result<()> {
    let args = Args::parse();

    if let Err(err) = TermLogger::init(
        args.log_level_filter(),
        simplelog::Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("Failed to initialize logging: {err}");
    }

    let config = args.config()?;
    match args.command {
        Command::Show(cmd_args) => show::run(&config, cmd_args),
        Command::Get(cmd_args) => get::run(&config, cmd_args),
        Command::Set(cmd_args) => set::run(&config, cmd_args),
        Command::Remove(cmd_args) => remove::run(&config, cmd_args),
        Command::Rename(cmd_args) => rename::run(&config, cmd_args),
        Command::Config(cmd_args) => config::run(&config, cmd_args),
    }
}
