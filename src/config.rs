// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Configuration utils.

use crate::tag::{Id3Options, TextEncoding};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Encountered when the configuration cannot be loaded.
#[derive(Error, Debug)]
#[error("Configuration Error: {0}")]
pub struct ConfigError(#[from] toml::de::Error);

/// Default configuration TOML string.
const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Represents a piece of configuration that can be merged with another one.
trait MergeableConfig {
    /// Merge this configuration object with another one, taking values not set in this object from
    /// the other one (if present).
    fn merge(&self, other: &Self) -> Self;
}

/// Configuration for ID3 tags.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct Id3Config {
    /// Three-letter language code used for comment frames.
    pub language: Option<String>,
    /// Text encoding used for new frames.
    pub encoding: Option<TextEncoding>,
}

impl MergeableConfig for Id3Config {
    fn merge(&self, other: &Self) -> Self {
        Id3Config {
            language: self.language.clone().or_else(|| other.language.clone()),
            encoding: self.encoding.or(other.encoding),
        }
    }
}

/// The main configuration struct.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// ID3 tag configuration.
    #[serde(default)]
    pub id3: Id3Config,
}

impl Default for Config {
    fn default() -> Self {
        Self::load_default().expect("Failed to load default config")
    }
}

impl MergeableConfig for Config {
    /// Merge this configuration object with another one, taking values not set in this object from
    /// the other one (if present).
    fn merge(&self, other: &Self) -> Self {
        Config {
            id3: self.id3.merge(&other.id3),
        }
    }
}

impl Config {
    /// Load the configuration from a string slice.
    fn load_from_str(text: &str) -> Result<Self, ConfigError> {
        let config = toml::from_str(text)?;
        Ok(config)
    }

    /// Load the default configuration.
    fn load_default() -> Result<Self, ConfigError> {
        Self::load_from_str(DEFAULT_CONFIG)
    }

    /// Load the configuration from a file located at the given path.
    ///
    /// # Errors
    ///
    /// This method can fail if the file cannot be accessed or if it contains malformed
    /// configuration markup.
    pub fn load_from_path<T: AsRef<Path>>(path: T) -> crate::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::load_from_str(&text)?;
        Ok(config)
    }

    /// Merge this configuration struct with the default values.
    #[must_use]
    pub fn with_defaults(&self) -> Self {
        let default = Self::default();
        self.merge(&default)
    }

    /// Build the options for ID3 tags from this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured language is not a three-letter code.
    pub fn id3_options(&self) -> crate::Result<Id3Options> {
        let defaults = Id3Options::default();
        let language = self.id3.language.as_deref().unwrap_or(&defaults.language);
        Id3Options::new(language, self.id3.encoding.unwrap_or(defaults.encoding))
    }
}
