// Copyright (c) 2022 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Tags and tag-related functions.
//!
//! A [`Tag`] offers map-like access to the fields of an audio file's tag. The format specific
//! parts are provided by a [`FieldAccess`] implementation, which translates normalized field
//! names like `"artist"` into the native keys of its format.

#[cfg(feature = "flac")]
mod flac;
mod format;
#[cfg(feature = "id3")]
mod id3;
mod mapping;
#[cfg(feature = "mp4")]
mod mp4;
mod options;
mod value;

#[cfg(feature = "flac")]
pub use self::flac::FlacTag;
pub use self::format::{open, open_with_config, FileFormat, FormatTag};
#[cfg(feature = "id3")]
pub use self::id3::{FrameKey, Id3Tag};
pub use self::mapping::FieldMapping;
#[cfg(feature = "mp4")]
pub use self::mp4::{AtomKey, Mp4Tag};
pub use self::options::{Id3Options, TextEncoding, DEFAULT_LANGUAGE};
pub use self::value::{IntoValues, Value};

use crate::util::{move_file, prune_empty_dirs};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Primitive operations on the fields of a native tag.
///
/// Field names are normalized names (e.g. `"tracknumber"`); implementers translate them into the
/// keys and value shapes of their format. All changes only affect the in-memory tag until
/// [`FieldAccess::save`] is called.
pub trait FieldAccess {
    /// Returns `true` if the tag contains the field.
    fn contains_field(&self, field: &str) -> bool;

    /// Get the values of a field, or `None` if the field is not present.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored value cannot be converted into its normalized shape.
    fn read_field(&self, field: &str) -> crate::Result<Option<Vec<Value>>>;

    /// Replace the values of a field.
    ///
    /// # Errors
    ///
    /// Returns an error if the values cannot be converted into the native shape of the field.
    fn write_field(&mut self, field: &str, values: Vec<Value>) -> crate::Result<()>;

    /// Remove a field. Returns `false` if the field was not present.
    fn remove_field(&mut self, field: &str) -> bool;

    /// Normalized names of all fields in the tag, without duplicates.
    fn field_names(&self) -> Vec<String>;

    /// Write the tag to the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn save(&mut self, path: &Path) -> crate::Result<()>;

    /// Replace the in-memory tag with the one read from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    fn reload(&mut self, path: &Path) -> crate::Result<()>;
}

/// Map-like view of the tag of a single audio file.
#[derive(Debug)]
pub struct Tag<A> {
    /// Path of the file.
    path: PathBuf,
    /// Format adapter that holds the native tag.
    inner: A,
}

impl<A: FieldAccess> Tag<A> {
    /// Create a tag for the file at `path` from an adapter.
    pub fn new(path: impl Into<PathBuf>, inner: A) -> Self {
        Tag {
            path: path.into(),
            inner,
        }
    }

    /// Path of the file.
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    /// The underlying format adapter.
    pub fn inner(&self) -> &A {
        &self.inner
    }

    /// The underlying format adapter (mutable).
    pub fn inner_mut(&mut self) -> &mut A {
        &mut self.inner
    }

    /// Consume the tag and return the underlying format adapter.
    pub fn into_inner(self) -> A {
        self.inner
    }

    /// Returns `true` if the tag contains the field.
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_field(key)
    }

    /// Number of fields in the tag.
    pub fn len(&self) -> usize {
        self.inner.field_names().len()
    }

    /// Returns `true` if the tag does not contain any fields.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the values of a field.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::KeyNotFound`] if the field is not present, or an error if the
    /// stored value is malformed.
    pub fn get(&self, key: &str) -> crate::Result<Vec<Value>> {
        self.inner
            .read_field(key)?
            .ok_or_else(|| crate::Error::KeyNotFound(key.to_string()))
    }

    /// Get the values of a field, or `default` if the field is not present.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored value is malformed.
    pub fn get_or(&self, key: &str, default: Vec<Value>) -> crate::Result<Vec<Value>> {
        Ok(self.inner.read_field(key)?.unwrap_or(default))
    }

    /// Replace the values of a field.
    ///
    /// # Errors
    ///
    /// Returns an error if the values cannot be stored in this field.
    pub fn insert(&mut self, key: &str, values: impl IntoValues) -> crate::Result<()> {
        self.inner.write_field(key, values.into_values())
    }

    /// Remove a field.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::KeyNotFound`] if the field is not present.
    pub fn remove(&mut self, key: &str) -> crate::Result<()> {
        if self.inner.remove_field(key) {
            Ok(())
        } else {
            Err(crate::Error::KeyNotFound(key.to_string()))
        }
    }

    /// Normalized names of all fields in the tag.
    pub fn keys(&self) -> Vec<String> {
        self.inner.field_names()
    }

    /// Values of all fields, in the order of [`Tag::keys`].
    ///
    /// # Errors
    ///
    /// Returns an error if a stored value is malformed.
    pub fn values(&self) -> crate::Result<Vec<Vec<Value>>> {
        self.keys().iter().map(|key| self.get(key)).collect()
    }

    /// Pairs of field names and values, in the order of [`Tag::keys`].
    ///
    /// # Errors
    ///
    /// Returns an error if a stored value is malformed.
    pub fn items(&self) -> crate::Result<Vec<(String, Vec<Value>)>> {
        self.keys()
            .into_iter()
            .map(|key| self.get(&key).map(|values| (key, values)))
            .collect()
    }

    /// Set several fields at once.
    ///
    /// Accepts any iterator of pairs, e.g. the [`Tag::items`] of another tag or an array of
    /// literal pairs.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first error encountered. Fields set before that remain set.
    pub fn update<K, V>(&mut self, other: impl IntoIterator<Item = (K, V)>) -> crate::Result<()>
    where
        K: AsRef<str>,
        V: IntoValues,
    {
        for (key, values) in other {
            self.insert(key.as_ref(), values)?;
        }

        Ok(())
    }

    /// Remove a field and return its values.
    ///
    /// If the field is not present, `default` is returned instead.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::KeyNotFound`] if the field is not present and no default was given.
    pub fn pop(&mut self, key: &str, default: Option<Vec<Value>>) -> crate::Result<Vec<Value>> {
        match self.inner.read_field(key)? {
            Some(values) => {
                self.remove(key)?;
                Ok(values)
            }
            None => default.ok_or_else(|| crate::Error::KeyNotFound(key.to_string())),
        }
    }

    /// Remove an arbitrary field and return it together with its values.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EmptyContainer`] if the tag does not contain any fields.
    pub fn popitem(&mut self) -> crate::Result<(String, Vec<Value>)> {
        let key = self
            .keys()
            .into_iter()
            .next()
            .ok_or(crate::Error::EmptyContainer)?;
        let values = self.pop(&key, None)?;
        Ok((key, values))
    }

    /// Get the values of a field, inserting `default` first if the field is not present.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored value is malformed or the default cannot be stored.
    pub fn setdefault(&mut self, key: &str, default: Vec<Value>) -> crate::Result<Vec<Value>> {
        if let Some(values) = self.inner.read_field(key)? {
            return Ok(values);
        }

        self.insert(key, default.clone())?;
        Ok(default)
    }

    /// Shallow copy of all fields into a plain map.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored value is malformed.
    pub fn copy(&self) -> crate::Result<BTreeMap<String, Vec<Value>>> {
        self.items().map(|items| items.into_iter().collect())
    }

    /// Remove all fields.
    pub fn clear(&mut self) {
        for key in self.keys() {
            let _removed = self.inner.remove_field(&key);
        }
    }

    /// Write the tag to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&mut self) -> crate::Result<()> {
        log::info!("Saving tag to {}", self.path.display());
        self.inner.save(&self.path)
    }

    /// Save the tag and move the file to `new_path`.
    ///
    /// Does nothing (and returns `Ok(false)`) if a file already exists at `new_path` and `force`
    /// is not set. Otherwise, the current state of the tag is saved, the file is moved, emptied
    /// directories at the old location are removed and the tag is read again from the new
    /// location.
    ///
    /// # Errors
    ///
    /// Returns an error if saving, moving or reading the file fails.
    pub fn rename(&mut self, new_path: impl AsRef<Path>, force: bool) -> crate::Result<bool> {
        let new_path = new_path.as_ref();
        if new_path.exists() && !force {
            log::info!(
                "Not renaming {} to existing file {}",
                self.path.display(),
                new_path.display()
            );
            return Ok(false);
        }

        self.save()?;
        move_file(&self.path, new_path)?;
        let old_path = std::mem::replace(&mut self.path, new_path.to_path_buf());
        if let Some(old_dir) = old_path.parent() {
            prune_empty_dirs(old_dir);
        }

        self.inner.reload(&self.path)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// In-memory adapter without any field name translation.
    #[derive(Debug, Default)]
    struct MemoryTag {
        /// Stored fields.
        fields: BTreeMap<String, Vec<Value>>,
        /// Fields as of the last save.
        saved: BTreeMap<String, Vec<Value>>,
    }

    impl FieldAccess for MemoryTag {
        fn contains_field(&self, field: &str) -> bool {
            self.fields.contains_key(field)
        }

        fn read_field(&self, field: &str) -> crate::Result<Option<Vec<Value>>> {
            match field {
                "broken" => Err(crate::Error::invalid_value(field, "???")),
                _ => Ok(self.fields.get(field).cloned()),
            }
        }

        fn write_field(&mut self, field: &str, values: Vec<Value>) -> crate::Result<()> {
            let _previous = self.fields.insert(field.to_string(), values);
            Ok(())
        }

        fn remove_field(&mut self, field: &str) -> bool {
            self.fields.remove(field).is_some()
        }

        fn field_names(&self) -> Vec<String> {
            self.fields.keys().cloned().collect()
        }

        fn save(&mut self, path: &Path) -> crate::Result<()> {
            self.saved = self.fields.clone();
            fs::write(path, format!("{}", self.saved.len()))?;
            Ok(())
        }

        fn reload(&mut self, path: &Path) -> crate::Result<()> {
            if path.extension().is_some_and(|ext| ext == "unreadable") {
                return Err(crate::Error::UnsupportedFormat(path.to_path_buf()));
            }
            let _contents = fs::read_to_string(path)?;
            self.fields = self.saved.clone();
            Ok(())
        }
    }

    fn tag_with(fields: &[(&str, &str)]) -> Tag<MemoryTag> {
        let mut tag = Tag::new(PathBuf::new(), MemoryTag::default());
        tag.update(fields.iter().copied()).unwrap();
        tag
    }

    #[test]
    fn test_get_and_insert() {
        let mut tag = tag_with(&[]);
        assert!(tag.is_empty());
        assert!(!tag.contains_key("artist"));
        assert!(matches!(tag.get("artist"), Err(crate::Error::KeyNotFound(key)) if key == "artist"));

        tag.insert("artist", "Guster").unwrap();
        assert!(tag.contains_key("artist"));
        assert_eq!(tag.len(), 1);
        assert_eq!(tag.get("artist").unwrap(), vec![Value::from("Guster")]);

        tag.insert("genre", vec!["Rock", "Pop"]).unwrap();
        assert_eq!(
            tag.get("genre").unwrap(),
            vec![Value::from("Rock"), Value::from("Pop")]
        );
    }

    #[test]
    fn test_get_or() {
        let tag = tag_with(&[("artist", "Guster")]);
        let default = vec![Value::from("Unknown")];
        assert_eq!(
            tag.get_or("album", default.clone()).unwrap(),
            default.clone()
        );
        assert_eq!(
            tag.get_or("artist", default).unwrap(),
            vec![Value::from("Guster")]
        );
    }

    #[test]
    fn test_remove() {
        let mut tag = tag_with(&[("artist", "Guster")]);
        tag.remove("artist").unwrap();
        assert!(!tag.contains_key("artist"));
        assert!(matches!(
            tag.remove("artist"),
            Err(crate::Error::KeyNotFound(_))
        ));
    }

    #[test]
    fn test_keys_values_items() {
        let tag = tag_with(&[("artist", "Guster"), ("album", "Parachute")]);
        assert_eq!(tag.keys(), vec!["album", "artist"]);
        assert_eq!(
            tag.values().unwrap(),
            vec![vec![Value::from("Parachute")], vec![Value::from("Guster")]]
        );
        assert_eq!(
            tag.items().unwrap(),
            vec![
                ("album".to_string(), vec![Value::from("Parachute")]),
                ("artist".to_string(), vec![Value::from("Guster")]),
            ]
        );
    }

    #[test]
    fn test_update_from_other_tag() {
        let source = tag_with(&[("artist", "Guster"), ("album", "Parachute")]);
        let mut tag = tag_with(&[("artist", "Someone else")]);
        tag.update(source.items().unwrap()).unwrap();
        assert_eq!(tag.copy().unwrap(), source.copy().unwrap());
    }

    #[test]
    fn test_pop() {
        let mut tag = tag_with(&[("artist", "Guster")]);
        assert_eq!(tag.pop("artist", None).unwrap(), vec![Value::from("Guster")]);
        assert!(!tag.contains_key("artist"));

        assert!(matches!(
            tag.pop("artist", None),
            Err(crate::Error::KeyNotFound(_))
        ));

        let default = vec![Value::from("fallback")];
        assert_eq!(tag.pop("artist", Some(default.clone())).unwrap(), default);
        // An empty default is still a default.
        assert!(tag.pop("artist", Some(vec![])).unwrap().is_empty());
    }

    #[test]
    fn test_popitem() {
        let mut tag = tag_with(&[("artist", "Guster"), ("album", "Parachute")]);
        let (key, values) = tag.popitem().unwrap();
        assert_eq!(key, "album");
        assert_eq!(values, vec![Value::from("Parachute")]);
        let _item = tag.popitem().unwrap();
        assert!(matches!(tag.popitem(), Err(crate::Error::EmptyContainer)));
    }

    #[test]
    fn test_setdefault() {
        let mut tag = tag_with(&[("artist", "Guster")]);
        assert_eq!(
            tag.setdefault("artist", vec![Value::from("Other")]).unwrap(),
            vec![Value::from("Guster")]
        );
        assert_eq!(
            tag.setdefault("album", vec![Value::from("Parachute")])
                .unwrap(),
            vec![Value::from("Parachute")]
        );
        assert_eq!(tag.get("album").unwrap(), vec![Value::from("Parachute")]);
    }

    #[test]
    fn test_copy_is_detached() {
        let mut tag = tag_with(&[("artist", "Guster")]);
        let copy = tag.copy().unwrap();
        tag.insert("artist", "Other").unwrap();
        assert_eq!(copy["artist"], vec![Value::from("Guster")]);
    }

    #[test]
    fn test_clear() {
        let mut tag = tag_with(&[("artist", "Guster"), ("album", "Parachute")]);
        tag.clear();
        assert!(tag.is_empty());
        assert!(tag.keys().is_empty());
    }

    #[test]
    fn test_malformed_value_is_not_masked() {
        let tag = tag_with(&[]);
        assert!(matches!(
            tag.get_or("broken", vec![]),
            Err(crate::Error::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_rename() {
        let dir = tempfile::tempdir().unwrap();
        let old_dir = dir.path().join("old").join("album");
        fs::create_dir_all(&old_dir).unwrap();
        let old_path = old_dir.join("track.mp3");
        fs::write(&old_path, "0").unwrap();
        fs::write(old_dir.join(".DS_Store"), "junk").unwrap();

        let mut tag = Tag::new(&old_path, MemoryTag::default());
        tag.insert("artist", "Guster").unwrap();

        let new_path = dir.path().join("new").join("track.mp3");
        assert!(tag.rename(&new_path, false).unwrap());

        assert_eq!(tag.path(), new_path.as_path());
        assert!(new_path.exists());
        assert!(!old_path.exists());
        assert!(!dir.path().join("old").exists());
        assert!(dir.path().exists());
        assert_eq!(tag.get("artist").unwrap(), vec![Value::from("Guster")]);
    }

    #[test]
    fn test_rename_refuses_existing_target() {
        let dir = tempfile::tempdir().unwrap();
        let old_path = dir.path().join("a.mp3");
        let new_path = dir.path().join("b.mp3");
        fs::write(&old_path, "a").unwrap();
        fs::write(&new_path, "b").unwrap();

        let mut tag = Tag::new(&old_path, MemoryTag::default());
        tag.insert("artist", "Guster").unwrap();
        assert!(!tag.rename(&new_path, false).unwrap());

        assert_eq!(tag.path(), old_path.as_path());
        assert_eq!(fs::read_to_string(&old_path).unwrap(), "a");
        assert_eq!(fs::read_to_string(&new_path).unwrap(), "b");
        assert!(tag.inner().saved.is_empty());
    }

    #[test]
    fn test_rename_forced() {
        let dir = tempfile::tempdir().unwrap();
        let old_path = dir.path().join("a.mp3");
        let new_path = dir.path().join("b.mp3");
        fs::write(&old_path, "a").unwrap();
        fs::write(&new_path, "b").unwrap();

        let mut tag = Tag::new(&old_path, MemoryTag::default());
        tag.insert("artist", "Guster").unwrap();
        assert!(tag.rename(&new_path, true).unwrap());

        assert_eq!(tag.path(), new_path.as_path());
        assert!(!old_path.exists());
        assert_eq!(fs::read_to_string(&new_path).unwrap(), "1");
    }

    #[test]
    fn test_rename_tracks_moved_file_if_reload_fails() {
        let dir = tempfile::tempdir().unwrap();
        let old_path = dir.path().join("a.mp3");
        let new_path = dir.path().join("b.unreadable");
        fs::write(&old_path, "a").unwrap();

        let mut tag = Tag::new(&old_path, MemoryTag::default());
        tag.insert("artist", "Guster").unwrap();
        assert!(matches!(
            tag.rename(&new_path, false),
            Err(crate::Error::UnsupportedFormat(_))
        ));

        assert!(!old_path.exists());
        assert!(new_path.exists());
        assert_eq!(tag.path(), new_path.as_path());
    }
}
