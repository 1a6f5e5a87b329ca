// Copyright (c) 2022 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Support for FLAC tags.
//!
//! Vorbis comments are exposed as they are: field names are the comment keys, without any
//! translation.

use crate::tag::{FieldAccess, Value};
use std::fmt;
use std::path::Path;

/// FLAC tag.
pub struct FlacTag {
    /// The underlying tag data.
    data: metaflac::Tag,
}

impl fmt::Debug for FlacTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlacTag")
            .field("fields", &self.field_names())
            .finish()
    }
}

impl Default for FlacTag {
    fn default() -> Self {
        FlacTag::new()
    }
}

impl FlacTag {
    /// Create an empty tag.
    pub fn new() -> Self {
        FlacTag {
            data: metaflac::Tag::new(),
        }
    }

    /// Read the FLAC tag from the path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a FLAC file.
    pub fn read_from_path(path: impl AsRef<Path>) -> crate::Result<Self> {
        let data = metaflac::Tag::read_from_path(path)?;
        Ok(FlacTag { data })
    }
}

impl FieldAccess for FlacTag {
    fn contains_field(&self, field: &str) -> bool {
        self.data
            .get_vorbis(field)
            .is_some_and(|mut values| values.next().is_some())
    }

    fn read_field(&self, field: &str) -> crate::Result<Option<Vec<Value>>> {
        Ok(self
            .data
            .get_vorbis(field)
            .map(|values| values.map(Value::from).collect::<Vec<_>>())
            .filter(|values| !values.is_empty()))
    }

    fn write_field(&mut self, field: &str, values: Vec<Value>) -> crate::Result<()> {
        if values.is_empty() {
            self.data.remove_vorbis(field);
            return Ok(());
        }

        let texts = values
            .iter()
            .map(|value| match value {
                Value::Text(text) => Ok(text.clone()),
                Value::Bool(flag) => Ok(if *flag { "1" } else { "0" }.to_string()),
                Value::Binary(_) => Err(crate::Error::invalid_value(field, value)),
            })
            .collect::<crate::Result<Vec<String>>>()?;
        self.data.set_vorbis(field, texts);
        Ok(())
    }

    fn remove_field(&mut self, field: &str) -> bool {
        if !self.contains_field(field) {
            return false;
        }

        self.data.remove_vorbis(field);
        true
    }

    fn field_names(&self) -> Vec<String> {
        let mut names = self
            .data
            .vorbis_comments()
            .map(|comments| {
                comments
                    .comments
                    .iter()
                    .filter(|(_, values)| !values.is_empty())
                    .map(|(key, _)| key.clone())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        names.sort();
        names
    }

    fn save(&mut self, path: &Path) -> crate::Result<()> {
        self.data.write_to_path(path)?;
        Ok(())
    }

    fn reload(&mut self, path: &Path) -> crate::Result<()> {
        self.data = metaflac::Tag::read_from_path(path)?;
        Ok(())
    }
}
