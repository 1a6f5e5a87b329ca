// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Field values.

use std::fmt;

/// A single value of a tag field.
///
/// Fields always hold a list of values, even if the underlying format only stores a single one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Text value.
    Text(String),
    /// Raw binary payload (e.g. embedded cover art).
    Binary(Vec<u8>),
    /// Boolean flag (e.g. the MP4 compilation atom).
    Bool(bool),
}

impl Value {
    /// Returns the text if this is a [`Value::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Returns the payload if this is a [`Value::Binary`].
    pub fn as_binary(&self) -> Option<&[u8]> {
        match self {
            Value::Binary(data) => Some(data.as_slice()),
            _ => None,
        }
    }

    /// Interpret the value as a boolean flag.
    ///
    /// Text is false when empty or one of `0`, `false`, `no` and `off` (ignoring case). Binary
    /// data is false when empty or all zero.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(flag) => *flag,
            Value::Text(text) => {
                let text = text.trim();
                !(text.is_empty()
                    || text == "0"
                    || ["false", "no", "off"]
                        .iter()
                        .any(|falsy| text.eq_ignore_ascii_case(falsy)))
            }
            Value::Binary(data) => data.iter().any(|&byte| byte != 0),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(text) => f.write_str(text),
            Value::Binary(data) => write!(f, "<{} bytes>", data.len()),
            Value::Bool(flag) => write!(f, "{}", u8::from(*flag)),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Binary(value)
    }
}

/// Conversion into the list of values stored in a field.
///
/// Scalars become a single-element list, lists are taken as they are.
pub trait IntoValues {
    /// Perform the conversion.
    fn into_values(self) -> Vec<Value>;
}

impl IntoValues for Value {
    fn into_values(self) -> Vec<Value> {
        vec![self]
    }
}

impl IntoValues for &str {
    fn into_values(self) -> Vec<Value> {
        vec![Value::from(self)]
    }
}

impl IntoValues for String {
    fn into_values(self) -> Vec<Value> {
        vec![Value::from(self)]
    }
}

impl IntoValues for bool {
    fn into_values(self) -> Vec<Value> {
        vec![Value::from(self)]
    }
}

impl<T: Into<Value>> IntoValues for Vec<T> {
    fn into_values(self) -> Vec<Value> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T: Into<Value>, const N: usize> IntoValues for [T; N] {
    fn into_values(self) -> Vec<Value> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T: Into<Value> + Clone> IntoValues for &[T] {
    fn into_values(self) -> Vec<Value> {
        self.iter().cloned().map(Into::into).collect()
    }
}
