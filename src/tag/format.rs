// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Detection of the tag format of a file.

use crate::config::Config;
#[cfg(feature = "flac")]
use crate::tag::FlacTag;
#[cfg(feature = "id3")]
use crate::tag::Id3Tag;
#[cfg(feature = "mp4")]
use crate::tag::Mp4Tag;
use crate::tag::{FieldAccess, Tag, Value};
use std::ffi::OsStr;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Number of bytes read from the start of a file to detect its format.
const HEADER_LEN: u64 = 12;

/// Tag format of an audio file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// MPEG audio with ID3 tags.
    Id3,
    /// MPEG-4 audio with iTunes-style metadata atoms.
    Mp4,
    /// FLAC with Vorbis comments.
    Flac,
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FileFormat::Id3 => "ID3",
            FileFormat::Mp4 => "MP4",
            FileFormat::Flac => "FLAC",
        })
    }
}

impl FileFormat {
    /// Detect the format of the file at `path`.
    ///
    /// The first bytes of the file take precedence over its extension.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnsupportedFormat`] if the format cannot be detected, or an I/O
    /// error if the file cannot be read.
    pub fn probe(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let mut header = Vec::new();
        let _len = File::open(path)?
            .take(HEADER_LEN)
            .read_to_end(&mut header)?;
        let extension = path
            .extension()
            .and_then(OsStr::to_str)
            .map(str::to_ascii_lowercase);

        Self::from_header(&header, extension.as_deref())
            .or_else(|| extension.as_deref().and_then(Self::from_extension))
            .ok_or_else(|| crate::Error::UnsupportedFormat(path.to_path_buf()))
    }

    /// Detect the format from the magic bytes at the start of a file.
    fn from_header(header: &[u8], extension: Option<&str>) -> Option<Self> {
        if header.starts_with(b"fLaC") {
            Some(FileFormat::Flac)
        } else if header.get(4..8) == Some(&b"ftyp"[..]) {
            Some(FileFormat::Mp4)
        } else if header.starts_with(b"ID3") {
            // Some taggers prepend ID3 tags to FLAC files.
            if extension == Some("flac") {
                Some(FileFormat::Flac)
            } else {
                Some(FileFormat::Id3)
            }
        } else {
            None
        }
    }

    /// Detect the format from a (lowercase) file extension.
    fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "mp3" => Some(FileFormat::Id3),
            "m4a" | "m4b" | "m4p" | "m4r" | "mp4" => Some(FileFormat::Mp4),
            "flac" => Some(FileFormat::Flac),
            _ => None,
        }
    }
}

/// Adapter for any of the supported tag formats.
#[derive(Debug)]
pub enum FormatTag {
    /// ID3 tag.
    #[cfg(feature = "id3")]
    Id3(Id3Tag),
    /// MP4 metadata.
    #[cfg(feature = "mp4")]
    Mp4(Mp4Tag),
    /// FLAC Vorbis comments.
    #[cfg(feature = "flac")]
    Flac(FlacTag),
}

/// Forward a call to the adapter of the active format.
macro_rules! dispatch {
    ($tag:expr, $inner:ident => $call:expr) => {
        match $tag {
            #[cfg(feature = "id3")]
            FormatTag::Id3($inner) => $call,
            #[cfg(feature = "mp4")]
            FormatTag::Mp4($inner) => $call,
            #[cfg(feature = "flac")]
            FormatTag::Flac($inner) => $call,
        }
    };
}

impl FormatTag {
    /// Format of the wrapped tag.
    pub fn format(&self) -> FileFormat {
        match self {
            #[cfg(feature = "id3")]
            FormatTag::Id3(_) => FileFormat::Id3,
            #[cfg(feature = "mp4")]
            FormatTag::Mp4(_) => FileFormat::Mp4,
            #[cfg(feature = "flac")]
            FormatTag::Flac(_) => FileFormat::Flac,
        }
    }
}

impl FieldAccess for FormatTag {
    fn contains_field(&self, field: &str) -> bool {
        dispatch!(self, tag => tag.contains_field(field))
    }

    fn read_field(&self, field: &str) -> crate::Result<Option<Vec<Value>>> {
        dispatch!(self, tag => tag.read_field(field))
    }

    fn write_field(&mut self, field: &str, values: Vec<Value>) -> crate::Result<()> {
        dispatch!(self, tag => tag.write_field(field, values))
    }

    fn remove_field(&mut self, field: &str) -> bool {
        dispatch!(self, tag => tag.remove_field(field))
    }

    fn field_names(&self) -> Vec<String> {
        dispatch!(self, tag => tag.field_names())
    }

    fn save(&mut self, path: &Path) -> crate::Result<()> {
        dispatch!(self, tag => tag.save(path))
    }

    fn reload(&mut self, path: &Path) -> crate::Result<()> {
        dispatch!(self, tag => tag.reload(path))
    }
}

/// Open the tag of the file at `path` using the default configuration.
///
/// # Errors
///
/// Returns an error if the format is not supported or the tag cannot be read.
pub fn open(path: impl AsRef<Path>) -> crate::Result<Tag<FormatTag>> {
    open_with_config(path, &Config::default())
}

/// Open the tag of the file at `path`.
///
/// # Errors
///
/// Returns an error if the format is not supported, the configuration is invalid or the tag
/// cannot be read.
pub fn open_with_config(path: impl AsRef<Path>, config: &Config) -> crate::Result<Tag<FormatTag>> {
    let path = path.as_ref();
    let format = FileFormat::probe(path)?;
    log::debug!("Opening {} as {format} file", path.display());

    let inner = match format {
        #[cfg(feature = "id3")]
        FileFormat::Id3 => FormatTag::Id3(Id3Tag::read_from_path(path, config.id3_options()?)?),
        #[cfg(feature = "mp4")]
        FileFormat::Mp4 => FormatTag::Mp4(Mp4Tag::read_from_path(path)?),
        #[cfg(feature = "flac")]
        FileFormat::Flac => FormatTag::Flac(FlacTag::read_from_path(path)?),
        #[allow(unreachable_patterns)]
        _ => {
            log::warn!("Support for {format} files is disabled");
            return Err(crate::Error::UnsupportedFormat(path.to_path_buf()));
        }
    };

    Ok(Tag::new(path, inner))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;

    /// Create a temporary file with the given suffix and contents.
    fn file_with(suffix: &str, contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file
    }

    /// Contents of an MPEG audio file without tags.
    fn mpeg_frame() -> Vec<u8> {
        let mut frame = vec![0xFF, 0xFB, 0x90, 0x64];
        frame.resize(417, 0);
        frame
    }

    #[test]
    fn test_probe_by_header() {
        let file = file_with(".bin", b"fLaC\0\0\0\x22");
        assert_eq!(FileFormat::probe(file.path()).unwrap(), FileFormat::Flac);

        let file = file_with(".bin", b"\0\0\0\x20ftypM4A ");
        assert_eq!(FileFormat::probe(file.path()).unwrap(), FileFormat::Mp4);

        let file = file_with(".bin", b"ID3\x04\0\0\0\0\0\0");
        assert_eq!(FileFormat::probe(file.path()).unwrap(), FileFormat::Id3);

        let file = file_with(".flac", b"ID3\x04\0\0\0\0\0\0");
        assert_eq!(FileFormat::probe(file.path()).unwrap(), FileFormat::Flac);
    }

    #[test]
    fn test_untagged_mpeg_needs_extension() {
        let file = file_with(".mp3", &mpeg_frame());
        assert_eq!(FileFormat::probe(file.path()).unwrap(), FileFormat::Id3);

        let file = file_with(".bin", &mpeg_frame());
        assert!(matches!(
            FileFormat::probe(file.path()),
            Err(crate::Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_text_file_with_byte_order_mark() {
        let file = file_with(".txt", b"\xFF\xFEh\0e\0l\0l\0o\0");
        assert!(matches!(
            open(file.path()),
            Err(crate::Error::UnsupportedFormat(path)) if path == file.path()
        ));
    }

    #[test]
    fn test_header_takes_precedence() {
        let file = file_with(".mp3", b"\0\0\0\x20ftypM4A ");
        assert_eq!(FileFormat::probe(file.path()).unwrap(), FileFormat::Mp4);
    }

    #[test]
    fn test_probe_by_extension() {
        for (suffix, format) in [
            (".mp3", FileFormat::Id3),
            (".M4A", FileFormat::Mp4),
            (".m4b", FileFormat::Mp4),
            (".mp4", FileFormat::Mp4),
            (".flac", FileFormat::Flac),
        ] {
            let file = file_with(suffix, b"unknown data");
            assert_eq!(FileFormat::probe(file.path()).unwrap(), format);
        }
    }

    #[test]
    fn test_unsupported_format() {
        let file = file_with(".xyz", b"\x13\x37 random bytes");
        assert!(matches!(
            FileFormat::probe(file.path()),
            Err(crate::Error::UnsupportedFormat(path)) if path == file.path()
        ));
        assert!(matches!(
            open(file.path()),
            Err(crate::Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            open(dir.path().join("missing.mp3")),
            Err(crate::Error::Io(_))
        ));
    }

    #[cfg(feature = "id3")]
    #[test]
    fn test_open_mp3_and_write_comment() {
        let file = file_with(".mp3", &mpeg_frame());
        let mut tag = open(file.path()).unwrap();
        assert_eq!(tag.inner().format(), FileFormat::Id3);
        assert!(tag.is_empty());

        tag.insert("comment", "hello").unwrap();
        tag.save().unwrap();

        let tag = open(file.path()).unwrap();
        assert_eq!(tag.keys(), vec!["comment".to_string()]);
        assert_eq!(tag.get("comment").unwrap(), vec![Value::from("hello")]);
        let FormatTag::Id3(id3_tag) = tag.inner() else {
            panic!("expected ID3 tag");
        };
        assert_eq!(id3_tag.native_key("comment").to_string(), "COMM::'eng'");
    }

    #[cfg(feature = "id3")]
    #[test]
    fn test_open_with_config() {
        let file = file_with(".mp3", &mpeg_frame());
        let mut config = Config::default();
        config.id3.language = Some("deu".to_string());

        let mut tag = open_with_config(file.path(), &config).unwrap();
        tag.insert("mood", "calm").unwrap();
        let FormatTag::Id3(id3_tag) = tag.inner() else {
            panic!("expected ID3 tag");
        };
        assert_eq!(id3_tag.data().comments().next().unwrap().lang, "deu");

        config.id3.language = Some("german".to_string());
        assert!(matches!(
            open_with_config(file.path(), &config),
            Err(crate::Error::InvalidLanguage(_))
        ));
    }

    #[cfg(feature = "id3")]
    #[test]
    fn test_copy_between_tags() {
        let source_file = file_with(".mp3", &mpeg_frame());
        let target_file = file_with(".mp3", &mpeg_frame());

        let mut source = open(source_file.path()).unwrap();
        source
            .update([("artist", "Guster"), ("album", "Parachute")])
            .unwrap();
        let mut target = open(target_file.path()).unwrap();
        target.update(source.items().unwrap()).unwrap();
        target.save().unwrap();

        let target = open(target_file.path()).unwrap();
        assert_eq!(target.copy().unwrap(), source.copy().unwrap());
    }

    #[cfg(feature = "id3")]
    #[test]
    fn test_rename() {
        let dir = tempfile::tempdir().unwrap();
        let old_dir = dir.path().join("Unknown Artist");
        fs::create_dir_all(&old_dir).unwrap();
        let old_path = old_dir.join("track.mp3");
        fs::write(&old_path, mpeg_frame()).unwrap();

        let mut tag = open(&old_path).unwrap();
        tag.insert("artist", "Guster").unwrap();
        let new_path = dir.path().join("Guster").join("track.mp3");
        assert!(tag.rename(&new_path, false).unwrap());

        assert!(!old_dir.exists());
        assert_eq!(tag.path(), new_path.as_path());
        assert_eq!(tag.get("artist").unwrap(), vec![Value::from("Guster")]);
        let reopened = open(&new_path).unwrap();
        assert_eq!(reopened.get("artist").unwrap(), vec![Value::from("Guster")]);
    }
}
