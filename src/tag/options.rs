// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Options for writing ID3 frames.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default language code for comment frames.
pub const DEFAULT_LANGUAGE: &str = "eng";

/// Text encoding of newly written ID3 frames.
///
/// Can be selected by name or by the numeric code that ID3 uses in the frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(try_from = "EncodingSelector", into = "String")]
pub enum TextEncoding {
    /// ISO-8859-1 (code 0).
    Latin1,
    /// UTF-16 with byte order mark (code 1).
    Utf16,
    /// UTF-16 big endian without byte order mark (code 2).
    Utf16Be,
    /// UTF-8 (code 3).
    #[default]
    Utf8,
}

impl TextEncoding {
    /// All supported encodings, ordered by their numeric code.
    const ALL: [TextEncoding; 4] = [
        TextEncoding::Latin1,
        TextEncoding::Utf16,
        TextEncoding::Utf16Be,
        TextEncoding::Utf8,
    ];

    /// Name of the encoding.
    pub fn name(self) -> &'static str {
        match self {
            TextEncoding::Latin1 => "iso-8859-1",
            TextEncoding::Utf16 => "utf-16",
            TextEncoding::Utf16Be => "utf-16be",
            TextEncoding::Utf8 => "utf-8",
        }
    }

    /// Numeric code of the encoding.
    pub fn code(self) -> u8 {
        match self {
            TextEncoding::Latin1 => 0,
            TextEncoding::Utf16 => 1,
            TextEncoding::Utf16Be => 2,
            TextEncoding::Utf8 => 3,
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TextEncoding {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(code) = s.parse::<u8>() {
            return TextEncoding::try_from(code);
        }

        TextEncoding::ALL
            .into_iter()
            .find(|encoding| encoding.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| crate::Error::InvalidEncoding(s.to_string()))
    }
}

impl TryFrom<u8> for TextEncoding {
    type Error = crate::Error;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        TextEncoding::ALL
            .get(usize::from(code))
            .copied()
            .ok_or_else(|| crate::Error::InvalidEncoding(code.to_string()))
    }
}

impl From<TextEncoding> for String {
    fn from(encoding: TextEncoding) -> Self {
        encoding.name().to_string()
    }
}

#[cfg(feature = "id3")]
impl From<TextEncoding> for id3::Encoding {
    fn from(encoding: TextEncoding) -> Self {
        match encoding {
            TextEncoding::Latin1 => id3::Encoding::Latin1,
            TextEncoding::Utf16 => id3::Encoding::UTF16,
            TextEncoding::Utf16Be => id3::Encoding::UTF16BE,
            TextEncoding::Utf8 => id3::Encoding::UTF8,
        }
    }
}

/// Serialized representation of a [`TextEncoding`], either a name or a numeric code.
#[derive(Deserialize)]
#[serde(untagged)]
enum EncodingSelector {
    /// Numeric code.
    Code(u8),
    /// Encoding name.
    Name(String),
}

impl TryFrom<EncodingSelector> for TextEncoding {
    type Error = crate::Error;

    fn try_from(selector: EncodingSelector) -> Result<Self, Self::Error> {
        match selector {
            EncodingSelector::Code(code) => TextEncoding::try_from(code),
            EncodingSelector::Name(name) => name.parse(),
        }
    }
}

/// Options of an ID3 tag adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Id3Options {
    /// Three-letter language code used for comment frames.
    pub language: String,
    /// Text encoding of newly written frames.
    pub encoding: TextEncoding,
}

impl Id3Options {
    /// Create validated options.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidLanguage`] if `language` is not a three-letter code.
    pub fn new(language: &str, encoding: TextEncoding) -> crate::Result<Self> {
        if language.len() != 3 || !language.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(crate::Error::InvalidLanguage(language.to_string()));
        }

        Ok(Id3Options {
            language: language.to_string(),
            encoding,
        })
    }
}

impl Default for Id3Options {
    fn default() -> Self {
        Id3Options {
            language: DEFAULT_LANGUAGE.to_string(),
            encoding: TextEncoding::default(),
        }
    }
}
