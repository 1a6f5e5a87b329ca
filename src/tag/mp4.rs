// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Support for MP4 (iTunes-style) metadata atoms.

use crate::tag::mapping::FieldMapping;
use crate::tag::{FieldAccess, Value};
use mp4ameta::{Data, DataIdent, Fourcc, FreeformIdent};
use regex::Regex;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

/// Prefix of freeform atom names (`----:mean:name`).
const FREEFORM_PREFIX: &str = "----:";

/// Normalized field names and their atom codes.
const MP4_ATOMS: [(&str, [u8; 4]); 24] = [
    ("album cover", *b"covr"),
    ("title", *b"\xa9nam"),
    ("artist", *b"\xa9ART"),
    ("album artist", *b"aART"),
    ("album", *b"\xa9alb"),
    ("composer", *b"\xa9wrt"),
    ("genre", *b"\xa9gen"),
    ("date", *b"\xa9day"),
    ("tracknumber", *b"trkn"),
    ("discnumber", *b"disk"),
    ("bpm", *b"tmpo"),
    ("compilation", *b"cpil"),
    ("gapless", *b"pgap"),
    ("grouping", *b"\xa9grp"),
    ("album sort order", *b"soal"),
    ("title sort order", *b"sonm"),
    ("album artist sort order", *b"soaa"),
    ("artist sort order", *b"soar"),
    ("composer sort order", *b"soco"),
    ("comment", *b"\xa9cmt"),
    ("copyright", *b"cprt"),
    ("show", *b"tvsh"),
    ("purchased", *b"purd"),
    ("apple id", *b"apID"),
];

/// Lookup table built from [`MP4_ATOMS`].
static ATOM_MAPPING: LazyLock<FieldMapping<[u8; 4]>> =
    LazyLock::new(|| FieldMapping::new(&MP4_ATOMS));

/// Leading year of a stored date (`YYYY` or `YYYY-...`).
static STORED_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})(?:-|$)").expect("valid regex"));

/// A year as accepted for writing.
static WRITABLE_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}$").expect("valid regex"));

/// Atom code of the album cover.
const COVER: [u8; 4] = *b"covr";
/// Atom code of the date.
const DATE: [u8; 4] = *b"\xa9day";
/// Atom code of the track number.
const TRACK_NUMBER: [u8; 4] = *b"trkn";
/// Atom code of the disc number.
const DISC_NUMBER: [u8; 4] = *b"disk";
/// Atom code of the tempo.
const BPM: [u8; 4] = *b"tmpo";
/// Atom codes that hold a flag.
const FLAGS: [[u8; 4]; 2] = [*b"cpil", *b"pgap"];

/// Identifier of a metadata atom.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AtomKey {
    /// Standard atom with a four character code.
    Fourcc([u8; 4]),
    /// Freeform (`----`) atom.
    Freeform {
        /// Reverse DNS domain, e.g. `com.apple.iTunes`.
        mean: String,
        /// Name of the atom inside that domain.
        name: String,
    },
}

impl AtomKey {
    /// Interpret a field name that is not part of the atom table as an atom identifier.
    ///
    /// Four Latin-1 characters are used as atom code, `----:mean:name` denotes a freeform atom.
    pub fn parse(name: &str) -> Option<Self> {
        if let Some(freeform) = name.strip_prefix(FREEFORM_PREFIX) {
            let (mean, name) = freeform.split_once(':')?;
            return Some(AtomKey::Freeform {
                mean: mean.to_string(),
                name: name.to_string(),
            });
        }

        let bytes = name
            .chars()
            .map(|c| u8::try_from(u32::from(c)).ok())
            .collect::<Option<Vec<u8>>>()?;
        <[u8; 4]>::try_from(bytes).ok().map(AtomKey::Fourcc)
    }

    /// Returns `true` if the identifier of a data item refers to this atom.
    fn matches(&self, ident: &DataIdent) -> bool {
        match (self, ident) {
            (AtomKey::Fourcc(code), DataIdent::Fourcc(fourcc)) => fourcc.0 == *code,
            (
                AtomKey::Freeform { mean, name },
                DataIdent::Freeform {
                    mean: ident_mean,
                    name: ident_name,
                },
            ) => mean == ident_mean && name == ident_name,
            _ => false,
        }
    }
}

impl From<&DataIdent> for AtomKey {
    fn from(ident: &DataIdent) -> Self {
        match ident {
            DataIdent::Fourcc(fourcc) => AtomKey::Fourcc(fourcc.0),
            DataIdent::Freeform { mean, name } => AtomKey::Freeform {
                mean: mean.clone(),
                name: name.clone(),
            },
        }
    }
}

impl fmt::Display for AtomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtomKey::Fourcc(code) => code.iter().try_for_each(|&b| write!(f, "{}", char::from(b))),
            AtomKey::Freeform { mean, name } => write!(f, "{FREEFORM_PREFIX}{mean}:{name}"),
        }
    }
}

/// Interpret big-endian signed integer data as a decimal number.
fn be_signed_to_string(bytes: &[u8]) -> String {
    let negative = bytes.first().is_some_and(|b| b & 0x80 != 0);
    let number = bytes.iter().fold(if negative { -1i64 } else { 0 }, |acc, &b| {
        (acc << 8) | i64::from(b)
    });
    number.to_string()
}

/// Generic conversion of an atom's data into a value.
fn data_to_value(data: &Data) -> Value {
    match data {
        Data::Utf8(text) | Data::Utf16(text) => Value::Text(text.clone()),
        Data::BeSigned(bytes) => Value::Text(be_signed_to_string(bytes)),
        Data::Reserved(bytes) | Data::Jpeg(bytes) | Data::Png(bytes) | Data::Bmp(bytes) => {
            Value::Binary(bytes.clone())
        }
    }
}

/// Read a number pair (`trkn`, `disk`) from its native data layout.
///
/// Both atoms start with two reserved bytes, followed by the number and the total as big-endian
/// 16-bit integers.
fn number_pair(data: &Data) -> Option<(u16, u16)> {
    let bytes = match data {
        Data::Reserved(bytes) | Data::BeSigned(bytes) => bytes,
        _ => return None,
    };
    let number = u16::from_be_bytes([*bytes.get(2)?, *bytes.get(3)?]);
    let total = match (bytes.get(4), bytes.get(5)) {
        (Some(&hi), Some(&lo)) => u16::from_be_bytes([hi, lo]),
        _ => 0,
    };
    Some((number, total))
}

/// Encode a number pair in the native data layout of `code`.
fn number_pair_data(code: [u8; 4], number: u16, total: u16) -> Data {
    let mut bytes = vec![0, 0];
    bytes.extend_from_slice(&number.to_be_bytes());
    bytes.extend_from_slice(&total.to_be_bytes());
    if code == TRACK_NUMBER {
        bytes.extend_from_slice(&[0, 0]);
    }
    Data::Reserved(bytes)
}

/// Parse `"n/t"` or `"n"` into a number pair.
fn parse_number_pair(field: &str, value: &Value) -> crate::Result<(u16, u16)> {
    let text = value
        .as_text()
        .ok_or_else(|| crate::Error::invalid_value(field, value))?;
    let (number, total) = text.split_once('/').unwrap_or((text, "0"));
    let parse = |part: &str| {
        part.trim()
            .parse::<u16>()
            .map_err(|_| crate::Error::invalid_value(field, text))
    };
    Ok((parse(number)?, parse(total)?))
}

/// Text of a value that is stored in a text atom.
fn value_to_text(field: &str, value: &Value) -> crate::Result<String> {
    match value {
        Value::Text(text) => Ok(text.clone()),
        Value::Bool(flag) => Ok(if *flag { "1" } else { "0" }.to_string()),
        Value::Binary(_) => Err(crate::Error::invalid_value(field, value)),
    }
}

/// MP4 metadata (`ilst` atoms).
pub struct Mp4Tag {
    /// The underlying tag data.
    data: mp4ameta::Tag,
}

impl fmt::Debug for Mp4Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mp4Tag")
            .field("fields", &self.field_names())
            .finish()
    }
}

impl Default for Mp4Tag {
    fn default() -> Self {
        Mp4Tag::new()
    }
}

impl Mp4Tag {
    /// Create an empty tag.
    pub fn new() -> Self {
        Mp4Tag {
            data: mp4ameta::Tag::default(),
        }
    }

    /// Read the MP4 metadata from the path.
    ///
    /// A file without metadata yields an empty tag.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not an MP4 file.
    pub fn read_from_path(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let data = match mp4ameta::Tag::read_from_path(path) {
            Ok(data) => data,
            Err(err) if matches!(err.kind, mp4ameta::ErrorKind::NoTag) => {
                log::debug!("No MP4 metadata found in {}", path.display());
                mp4ameta::Tag::default()
            }
            Err(err) => return Err(err.into()),
        };

        Ok(Mp4Tag { data })
    }

    /// The underlying tag data.
    pub fn data(&self) -> &mp4ameta::Tag {
        &self.data
    }

    /// Atom identifier of a field, if the field can be stored in an MP4 file.
    pub fn native_key(&self, field: &str) -> Option<AtomKey> {
        ATOM_MAPPING
            .native_key(field)
            .map(AtomKey::Fourcc)
            .or_else(|| AtomKey::parse(field))
    }

    /// Field name of an atom identifier.
    pub fn field_name(&self, key: &AtomKey) -> String {
        match key {
            AtomKey::Fourcc(code) => ATOM_MAPPING
                .field_name(code)
                .map_or_else(|| key.to_string(), ToString::to_string),
            AtomKey::Freeform { .. } => key.to_string(),
        }
    }

    /// Data items stored under an atom.
    fn data_of<'a>(&'a self, key: &'a AtomKey) -> impl Iterator<Item = &'a Data> {
        self.data
            .data()
            .filter(move |(ident, _)| key.matches(ident))
            .map(|(_, data)| data)
    }

    /// Replace the data items of an atom.
    fn set_data_of(&mut self, key: &AtomKey, data: Vec<Data>) {
        match key {
            AtomKey::Fourcc(code) => {
                self.data.set_all_data(Fourcc(*code), data);
            }
            AtomKey::Freeform { mean, name } => {
                self.data.set_all_data(FreeformIdent::new(mean, name), data);
            }
        }
    }

    /// Remove all data items of an atom.
    fn remove_data_of(&mut self, key: &AtomKey) {
        match key {
            AtomKey::Fourcc(code) => {
                self.data.remove_data_of(&Fourcc(*code));
            }
            AtomKey::Freeform { mean, name } => {
                self.data.remove_data_of(&FreeformIdent::new(mean, name));
            }
        }
    }

    /// Convert the data of an atom into values.
    fn read_atom(&self, field: &str, key: &AtomKey) -> crate::Result<Vec<Value>> {
        let code = match key {
            AtomKey::Fourcc(code) => *code,
            AtomKey::Freeform { .. } => [0; 4],
        };

        self.data_of(key)
            .map(|data| match code {
                TRACK_NUMBER | DISC_NUMBER => number_pair(data)
                    .map(|(number, total)| Value::Text(format!("{number}/{total}")))
                    .ok_or_else(|| crate::Error::invalid_value(field, data_to_value(data))),
                DATE => match data_to_value(data) {
                    Value::Text(text) => STORED_YEAR
                        .captures(&text)
                        .and_then(|captures| captures.get(1))
                        .map(|year| Value::from(year.as_str()))
                        .ok_or_else(|| crate::Error::invalid_value(field, &text)),
                    value => Err(crate::Error::invalid_value(field, value)),
                },
                code if FLAGS.contains(&code) => Ok(Value::Bool(data_to_value(data).is_truthy())),
                _ => Ok(data_to_value(data)),
            })
            .collect()
    }

    /// Convert values into the data of an atom.
    fn write_atom(&self, field: &str, key: &AtomKey, values: &[Value]) -> crate::Result<Vec<Data>> {
        let code = match key {
            AtomKey::Fourcc(code) => *code,
            AtomKey::Freeform { .. } => [0; 4],
        };
        // Flags are single-valued.
        let values = if FLAGS.contains(&code) {
            values.get(..1).unwrap_or(values)
        } else {
            values
        };

        values
            .iter()
            .map(|value| match code {
                COVER => Err(crate::Error::UnsupportedValue(format!(
                    "writing {field:?} is not supported for MP4 files"
                ))),
                TRACK_NUMBER | DISC_NUMBER => parse_number_pair(field, value)
                    .map(|(number, total)| number_pair_data(code, number, total)),
                DATE => {
                    let text = value_to_text(field, value)?;
                    if WRITABLE_YEAR.is_match(&text) {
                        Ok(Data::Utf8(format!("{text}-01-01T07:00:00Z")))
                    } else {
                        Err(crate::Error::invalid_value(field, text))
                    }
                }
                BPM => {
                    let text = value_to_text(field, value)?;
                    let bpm = text
                        .trim()
                        .parse::<u16>()
                        .map_err(|_| crate::Error::invalid_value(field, &text))?;
                    Ok(Data::BeSigned(bpm.to_be_bytes().to_vec()))
                }
                code if FLAGS.contains(&code) => {
                    Ok(Data::BeSigned(vec![u8::from(value.is_truthy())]))
                }
                _ => match value {
                    Value::Bool(flag) => Ok(Data::BeSigned(vec![u8::from(*flag)])),
                    _ => value_to_text(field, value).map(Data::Utf8),
                },
            })
            .collect()
    }
}

impl FieldAccess for Mp4Tag {
    fn contains_field(&self, field: &str) -> bool {
        self.native_key(field)
            .is_some_and(|key| self.data_of(&key).next().is_some())
    }

    fn read_field(&self, field: &str) -> crate::Result<Option<Vec<Value>>> {
        let Some(key) = self.native_key(field) else {
            return Ok(None);
        };
        if self.data_of(&key).next().is_none() {
            return Ok(None);
        }

        self.read_atom(field, &key).map(Some)
    }

    fn write_field(&mut self, field: &str, values: Vec<Value>) -> crate::Result<()> {
        let key = self
            .native_key(field)
            .ok_or_else(|| crate::Error::InvalidKey(field.to_string()))?;
        if values.is_empty() {
            self.remove_data_of(&key);
            return Ok(());
        }

        let data = self.write_atom(field, &key, &values)?;
        log::debug!("Writing field {field:?} to atom {key}");
        self.set_data_of(&key, data);
        Ok(())
    }

    fn remove_field(&mut self, field: &str) -> bool {
        let Some(key) = self.native_key(field) else {
            return false;
        };
        if self.data_of(&key).next().is_none() {
            return false;
        }

        self.remove_data_of(&key);
        true
    }

    fn field_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for (ident, _) in self.data.data() {
            let name = self.field_name(&AtomKey::from(ident));
            if !names.contains(&name) {
                names.push(name);
            }
        }

        names
    }

    fn save(&mut self, path: &Path) -> crate::Result<()> {
        self.data.write_to_path(path)?;
        Ok(())
    }

    fn reload(&mut self, path: &Path) -> crate::Result<()> {
        self.data = Mp4Tag::read_from_path(path)?.data;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paste::paste;

    macro_rules! add_test_text_field {
        ($field:expr, $code:expr, $fnsuffix:ident) => {
            paste! {
                #[test]
                fn [<test_read_and_write_ $fnsuffix>]() {
                    let mut tag = Mp4Tag::new();
                    assert!(!tag.contains_field($field));
                    assert!(tag.read_field($field).unwrap().is_none());

                    tag.write_field($field, vec![Value::from("Example Value")]).unwrap();
                    assert!(tag.contains_field($field));
                    assert_eq!(
                        tag.read_field($field).unwrap(),
                        Some(vec![Value::from("Example Value")])
                    );
                    assert_eq!(
                        tag.data().strings_of(&Fourcc(*$code)).collect::<Vec<_>>(),
                        vec!["Example Value"]
                    );
                    assert_eq!(tag.field_names(), vec![$field.to_string()]);

                    assert!(tag.remove_field($field));
                    assert!(!tag.contains_field($field));
                }
            }
        };
    }

    add_test_text_field!("title", b"\xa9nam", title);
    add_test_text_field!("artist", b"\xa9ART", artist);
    add_test_text_field!("album artist", b"aART", albumartist);
    add_test_text_field!("album", b"\xa9alb", album);
    add_test_text_field!("composer", b"\xa9wrt", composer);
    add_test_text_field!("genre", b"\xa9gen", genre);
    add_test_text_field!("grouping", b"\xa9grp", grouping);
    add_test_text_field!("album sort order", b"soal", albumsortorder);
    add_test_text_field!("title sort order", b"sonm", titlesortorder);
    add_test_text_field!("album artist sort order", b"soaa", albumartistsortorder);
    add_test_text_field!("artist sort order", b"soar", artistsortorder);
    add_test_text_field!("composer sort order", b"soco", composersortorder);
    add_test_text_field!("comment", b"\xa9cmt", comment);
    add_test_text_field!("copyright", b"cprt", copyright);
    add_test_text_field!("show", b"tvsh", show);
    add_test_text_field!("purchased", b"purd", purchased);
    add_test_text_field!("apple id", b"apID", appleid);

    #[test]
    fn test_native_key_round_trip() {
        let tag = Mp4Tag::new();
        for field in ATOM_MAPPING.fields() {
            let key = tag.native_key(field).unwrap();
            assert_eq!(tag.field_name(&key), field);
        }
    }

    #[test]
    fn test_pass_through_keys() {
        let tag = Mp4Tag::new();
        assert_eq!(tag.native_key("desc"), Some(AtomKey::Fourcc(*b"desc")));
        assert_eq!(
            tag.native_key("----:com.apple.iTunes:MOOD"),
            Some(AtomKey::Freeform {
                mean: "com.apple.iTunes".to_string(),
                name: "MOOD".to_string(),
            })
        );
        assert_eq!(tag.native_key("\u{a9}too"), Some(AtomKey::Fourcc(*b"\xa9too")));
        assert_eq!(tag.native_key("mood"), Some(AtomKey::Fourcc(*b"mood")));
        assert!(tag.native_key("my custom field").is_none());
        assert!(tag.native_key("----:no name").is_none());
        assert!(tag.native_key("\u{263a}abc").is_none());

        let key = tag.native_key("----:com.apple.iTunes:MOOD").unwrap();
        assert_eq!(tag.field_name(&key), "----:com.apple.iTunes:MOOD");
        assert_eq!(tag.field_name(&AtomKey::Fourcc(*b"desc")), "desc");
    }

    #[test]
    fn test_unknown_field() {
        let mut tag = Mp4Tag::new();
        assert!(!tag.contains_field("my custom field"));
        assert!(tag.read_field("my custom field").unwrap().is_none());
        assert!(!tag.remove_field("my custom field"));
        assert!(matches!(
            tag.write_field("my custom field", vec![Value::from("x")]),
            Err(crate::Error::InvalidKey(field)) if field == "my custom field"
        ));
    }

    #[test]
    fn test_freeform_field() {
        let mut tag = Mp4Tag::new();
        let field = "----:com.apple.iTunes:MOOD";
        tag.write_field(field, vec![Value::from("calm"), Value::from("dark")])
            .unwrap();
        assert_eq!(
            tag.read_field(field).unwrap(),
            Some(vec![Value::from("calm"), Value::from("dark")])
        );
        assert_eq!(tag.field_names(), vec![field.to_string()]);
        assert!(tag.remove_field(field));
        assert!(tag.field_names().is_empty());
    }

    #[test]
    fn test_track_number() {
        let mut tag = Mp4Tag::new();
        tag.write_field("tracknumber", vec![Value::from("3/12")])
            .unwrap();
        assert_eq!(
            tag.read_field("tracknumber").unwrap(),
            Some(vec![Value::from("3/12")])
        );

        tag.write_field("tracknumber", vec![Value::from("3")])
            .unwrap();
        assert_eq!(
            tag.read_field("tracknumber").unwrap(),
            Some(vec![Value::from("3/0")])
        );
    }

    #[test]
    fn test_disc_number() {
        let mut tag = Mp4Tag::new();
        tag.write_field("discnumber", vec![Value::from("1/2")])
            .unwrap();
        assert_eq!(
            tag.read_field("discnumber").unwrap(),
            Some(vec![Value::from("1/2")])
        );
        assert_eq!(tag.field_names(), vec!["discnumber".to_string()]);
    }

    #[test]
    fn test_invalid_track_number() {
        let mut tag = Mp4Tag::new();
        for text in ["three", "3/twelve", "", "-1"] {
            assert!(matches!(
                tag.write_field("tracknumber", vec![Value::from(text)]),
                Err(crate::Error::InvalidValue { .. })
            ));
        }
        assert!(!tag.contains_field("tracknumber"));
    }

    #[test]
    fn test_date() {
        let mut tag = Mp4Tag::new();
        tag.write_field("date", vec![Value::from("2004")]).unwrap();
        assert_eq!(
            tag.data().strings_of(&Fourcc(DATE)).collect::<Vec<_>>(),
            vec!["2004-01-01T07:00:00Z"]
        );
        assert_eq!(
            tag.read_field("date").unwrap(),
            Some(vec![Value::from("2004")])
        );
    }

    #[test]
    fn test_stored_year_only() {
        let mut tag = Mp4Tag::new();
        tag.data.set_data(Fourcc(DATE), Data::Utf8("1999".to_string()));
        assert_eq!(
            tag.read_field("date").unwrap(),
            Some(vec![Value::from("1999")])
        );
    }

    #[test]
    fn test_malformed_date() {
        let mut tag = Mp4Tag::new();
        for text in ["2004-05-06", "04", "May 2004"] {
            assert!(matches!(
                tag.write_field("date", vec![Value::from(text)]),
                Err(crate::Error::InvalidValue { .. })
            ));
        }

        tag.data.set_data(Fourcc(DATE), Data::Utf8("sometime".to_string()));
        assert!(tag.contains_field("date"));
        assert!(matches!(
            tag.read_field("date"),
            Err(crate::Error::InvalidValue { field, value }) if field == "date" && value == "sometime"
        ));
    }

    #[test]
    fn test_flags() {
        let mut tag = Mp4Tag::new();
        tag.write_field("compilation", vec![Value::Bool(true)])
            .unwrap();
        tag.write_field("gapless", vec![Value::from("0")]).unwrap();
        assert_eq!(
            tag.read_field("compilation").unwrap(),
            Some(vec![Value::Bool(true)])
        );
        assert_eq!(
            tag.read_field("gapless").unwrap(),
            Some(vec![Value::Bool(false)])
        );
        assert_eq!(
            tag.field_names(),
            vec!["compilation".to_string(), "gapless".to_string()]
        );
    }

    #[test]
    fn test_bpm() {
        let mut tag = Mp4Tag::new();
        tag.write_field("bpm", vec![Value::from("128")]).unwrap();
        assert_eq!(
            tag.read_field("bpm").unwrap(),
            Some(vec![Value::from("128")])
        );
        assert!(matches!(
            tag.write_field("bpm", vec![Value::from("fast")]),
            Err(crate::Error::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_album_cover() {
        let mut tag = Mp4Tag::new();
        assert!(matches!(
            tag.write_field("album cover", vec![Value::Binary(vec![0x89, b'P'])]),
            Err(crate::Error::UnsupportedValue(_))
        ));

        tag.data.set_data(Fourcc(COVER), Data::Png(vec![0x89, b'P']));
        assert_eq!(
            tag.read_field("album cover").unwrap(),
            Some(vec![Value::Binary(vec![0x89, b'P'])])
        );
    }

    #[test]
    fn test_binary_text_is_invalid() {
        let mut tag = Mp4Tag::new();
        assert!(matches!(
            tag.write_field("title", vec![Value::Binary(vec![1])]),
            Err(crate::Error::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_empty_values_remove_field() {
        let mut tag = Mp4Tag::new();
        tag.write_field("title", vec![Value::from("Parachute")])
            .unwrap();
        tag.write_field("title", vec![]).unwrap();
        assert!(!tag.contains_field("title"));
    }

    #[test]
    fn test_be_signed_to_string() {
        assert_eq!(be_signed_to_string(&[0x00, 0x80]), "128");
        assert_eq!(be_signed_to_string(&[0xFF]), "-1");
        assert_eq!(be_signed_to_string(&[0x01, 0x00, 0x00, 0x00]), "16777216");
        assert_eq!(be_signed_to_string(&[]), "0");
    }
}
