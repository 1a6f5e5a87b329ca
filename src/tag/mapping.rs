// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Bidirectional lookup tables between normalized field names and native tag keys.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Maps normalized field names (e.g. `"artist"`) to the native keys of a tag format and back.
///
/// The forward direction is a static table; the reverse index is built once when the mapping is
/// constructed and never changes afterwards.
#[derive(Debug)]
pub struct FieldMapping<K: 'static> {
    /// Forward table in declaration order.
    entries: &'static [(&'static str, K)],
    /// Normalized name to index into `entries`.
    by_field: HashMap<&'static str, usize>,
    /// Native key to index into `entries`.
    by_native: HashMap<K, usize>,
}

impl<K> FieldMapping<K>
where
    K: Copy + Eq + Hash + Debug,
{
    /// Build the mapping (and its inverse) from a forward table.
    ///
    /// # Panics
    ///
    /// Panics if a field name or native key occurs more than once, since the table could not be
    /// inverted in that case.
    pub fn new(entries: &'static [(&'static str, K)]) -> Self {
        let mut by_field = HashMap::with_capacity(entries.len());
        let mut by_native = HashMap::with_capacity(entries.len());
        for (index, (field, native)) in entries.iter().enumerate() {
            assert!(
                by_field.insert(*field, index).is_none(),
                "duplicate field name {field:?}"
            );
            assert!(
                by_native.insert(*native, index).is_none(),
                "duplicate native key {native:?}"
            );
        }

        FieldMapping {
            entries,
            by_field,
            by_native,
        }
    }

    /// Native key for a normalized field name.
    pub fn native_key(&self, field: &str) -> Option<K> {
        self.by_field.get(field).map(|&index| self.entries[index].1)
    }

    /// Normalized field name for a native key.
    pub fn field_name<Q>(&self, native: &Q) -> Option<&'static str>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.by_native.get(native).map(|&index| self.entries[index].0)
    }

    /// Yields all normalized field names in table order.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(field, _)| *field)
    }
}
