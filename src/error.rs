// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Error and result types.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type.
#[derive(Error, Debug)]
pub enum ErrorType {
    /// Configuration error.
    #[error("Configuration Error ({0})")]
    Config(#[from] crate::config::ConfigError),
    /// I/O Error.
    #[error("Input/Output error ({:?})", .0)]
    Io(#[from] io::Error),
    /// The file does not contain a supported tag format.
    #[error("{} does not contain a supported tag format", .0.display())]
    UnsupportedFormat(PathBuf),
    /// The text encoding is not supported by ID3.
    #[error("Encoding {0} not supported by ID3")]
    InvalidEncoding(String),
    /// The comment language is not a three-letter language code.
    #[error("Invalid language code {0:?}")]
    InvalidLanguage(String),
    /// The field is not present in the tag.
    #[error("Key not found: {0}")]
    KeyNotFound(String),
    /// The tag does not contain any fields.
    #[error("Tag is empty")]
    EmptyContainer,
    /// The field name cannot be mapped to a native key of the tag format.
    #[error("Field {0:?} cannot be represented in this tag format")]
    InvalidKey(String),
    /// The value cannot be converted into the shape required by the field.
    #[error("Invalid value {value:?} for field {field:?}")]
    InvalidValue {
        /// Normalized field name.
        field: String,
        /// Offending value.
        value: String,
    },
    /// Writing this field is not supported by the tag format.
    #[error("Writing field {0:?} is not supported by this tag format")]
    UnsupportedValue(String),
    /// Errors raised by the [`id3`] crate.
    #[cfg(feature = "id3")]
    #[error("Failed to read or write ID3 tag")]
    Id3(#[from] id3::Error),
    /// Errors raised by [`lofty`] while writing the ID3v1 tag.
    #[cfg(feature = "id3")]
    #[error("Failed to write ID3v1 tag")]
    Id3v1(#[from] lofty::error::LoftyError),
    /// Errors raised by the [`mp4ameta`] crate.
    #[cfg(feature = "mp4")]
    #[error("Failed to read or write MP4 tag")]
    Mp4(#[from] mp4ameta::Error),
    /// Errors raised by the [`metaflac`] crate.
    #[cfg(feature = "flac")]
    #[error("Failed to read or write FLAC tag")]
    Flac(#[from] metaflac::Error),
}

impl ErrorType {
    /// Shorthand for an [`ErrorType::InvalidValue`] error.
    pub(crate) fn invalid_value(field: &str, value: impl ToString) -> Self {
        ErrorType::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

/// Convenience type.
pub type Result<T> = std::result::Result<T, ErrorType>;
