// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Support for ID3 tags.
//!
//! Mapped fields are stored in text frames (and the album cover in an `APIC` frame). Every other
//! field name is stored as a comment frame (`COMM`) whose description is the field name, so that
//! arbitrary fields survive a round trip through the tag.

use crate::tag::mapping::FieldMapping;
use crate::tag::{FieldAccess, Id3Options, Value};
use id3::frame::{Comment, Content, Picture, PictureType};
use id3::{Frame, TagLike, Version};
use lofty::config::WriteOptions;
use lofty::id3::v1::{Id3v1Tag, GENRES};
use lofty::tag::TagExt as _;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

/// Frame ID of attached pictures.
const PICTURE_FRAME: &str = "APIC";

/// Frame ID of comments.
const COMMENT_FRAME: &str = "COMM";

/// Field name of the unnamed comment.
const COMMENT_FIELD: &str = "comment";

/// Field name of the gapless playback flag.
const GAPLESS_FIELD: &str = "gapless";

/// Comment description that iTunes uses for the gapless playback flag.
const GAPLESS_DESCRIPTION: &str = "iTunPGAP";

/// Separator of multiple values in a single text frame.
const VALUE_SEPARATOR: char = '\0';

/// Normalized field names and their ID3v2.4 frame IDs.
const ID3_FRAMES: [(&str, &str); 22] = [
    ("album cover", PICTURE_FRAME),
    ("title", "TIT2"),
    ("artist", "TPE1"),
    ("album artist", "TPE2"),
    ("album", "TALB"),
    ("composer", "TCOM"),
    ("genre", "TCON"),
    ("date", "TDRC"),
    ("tracknumber", "TRCK"),
    ("discnumber", "TPOS"),
    ("bpm", "TBPM"),
    ("compilation", "TCMP"),
    ("grouping", "TIT1"),
    ("album sort order", "TSOA"),
    ("title sort order", "TSOT"),
    ("artist sort order", "TSOP"),
    ("copyright", "TCOP"),
    ("conductor", "TPE3"),
    ("length", "TLEN"),
    ("lyricist", "TEXT"),
    ("encoder", "TENC"),
    ("encoder settings", "TSSE"),
];

/// Lookup table built from [`ID3_FRAMES`].
static FRAME_MAPPING: LazyLock<FieldMapping<&'static str>> =
    LazyLock::new(|| FieldMapping::new(&ID3_FRAMES));

/// Native location of a field inside an ID3 tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameKey {
    /// Text frame with the given frame ID.
    Text(&'static str),
    /// Front cover picture frame.
    Picture,
    /// Comment frame, matched by its description.
    Comment {
        /// Content description of the comment.
        description: String,
        /// Language used when writing the comment.
        language: String,
    },
}

impl fmt::Display for FrameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameKey::Text(id) => f.write_str(id),
            FrameKey::Picture => f.write_str(PICTURE_FRAME),
            FrameKey::Comment {
                description,
                language,
            } => write!(f, "{COMMENT_FRAME}:{description}:'{language}'"),
        }
    }
}

/// Comment description under which a field name is stored.
fn comment_description(field: &str) -> &str {
    match field {
        COMMENT_FIELD => "",
        GAPLESS_FIELD => GAPLESS_DESCRIPTION,
        _ => field,
    }
}

/// Field name for a comment description.
fn comment_field_name(description: &str) -> &str {
    match description {
        "" => COMMENT_FIELD,
        GAPLESS_DESCRIPTION => GAPLESS_FIELD,
        _ => description,
    }
}

/// Guess the MIME type of an image from its first bytes.
fn image_mime_type(data: &[u8]) -> &'static str {
    if data.starts_with(b"\x89PNG\r\n\x1a\n") {
        "image/png"
    } else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        "image/gif"
    } else if data.starts_with(b"BM") {
        "image/bmp"
    } else {
        "image/png"
    }
}

/// Join values into the content of a single text frame.
fn join_text(field: &str, values: &[Value]) -> crate::Result<String> {
    let texts = values
        .iter()
        .map(|value| match value {
            Value::Text(text) => Ok(text.clone()),
            Value::Bool(flag) => Ok(if *flag { "1" } else { "0" }.to_string()),
            Value::Binary(_) => Err(crate::Error::invalid_value(field, value)),
        })
        .collect::<crate::Result<Vec<String>>>()?;
    Ok(texts.join(&VALUE_SEPARATOR.to_string()))
}

/// Replace every character that ISO-8859-1 cannot represent.
fn latin1_lossy(text: &str) -> String {
    text.chars()
        .map(|c| if u32::from(c) <= 0xFF { c } else { '?' })
        .collect()
}

/// Split the content of a comment frame into values.
fn split_text(text: &str) -> Vec<Value> {
    text.split(VALUE_SEPARATOR).map(Value::from).collect()
}

/// ID3 tag (version 2.4, with an ID3v1.1 tag written alongside).
#[derive(Debug)]
pub struct Id3Tag {
    /// The underlying tag data.
    data: id3::Tag,
    /// Language and encoding of written frames.
    options: Id3Options,
}

impl Id3Tag {
    /// Create an empty tag.
    pub fn new(options: Id3Options) -> Self {
        Id3Tag {
            data: id3::Tag::with_version(Version::Id3v24),
            options,
        }
    }

    /// Read the ID3 tag from the path.
    ///
    /// Falls back to the ID3v1 tag if there is no ID3v2 tag. A file without any ID3 tag yields an
    /// empty tag.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the tag is corrupt.
    pub fn read_from_path(path: impl AsRef<Path>, options: Id3Options) -> crate::Result<Self> {
        let path = path.as_ref();
        let data = match id3::v1v2::read_from_path(path) {
            Ok(data) => data,
            Err(err) if matches!(err.kind, id3::ErrorKind::NoTag) => {
                log::debug!("No ID3 tag found in {}", path.display());
                id3::Tag::with_version(Version::Id3v24)
            }
            Err(err) => return Err(err.into()),
        };

        Ok(Id3Tag { data, options })
    }

    /// Options of this tag.
    pub fn options(&self) -> &Id3Options {
        &self.options
    }

    /// The underlying tag data.
    pub fn data(&self) -> &id3::Tag {
        &self.data
    }

    /// Native location of a field.
    ///
    /// Fields that are not part of the frame table are stored as comments.
    pub fn native_key(&self, field: &str) -> FrameKey {
        match FRAME_MAPPING.native_key(field) {
            Some(PICTURE_FRAME) => FrameKey::Picture,
            Some(id) => FrameKey::Text(id),
            None => FrameKey::Comment {
                description: comment_description(field).to_string(),
                language: self.options.language.clone(),
            },
        }
    }

    /// Field name of a native location, if the location can hold a field.
    pub fn field_name(&self, key: &FrameKey) -> Option<String> {
        match key {
            FrameKey::Text(id) => FRAME_MAPPING.field_name(*id).map(ToString::to_string),
            FrameKey::Picture => FRAME_MAPPING
                .field_name(PICTURE_FRAME)
                .map(ToString::to_string),
            FrameKey::Comment { description, .. } => {
                Some(comment_field_name(description).to_string())
            }
        }
    }

    /// Returns `true` if the comment belongs to this tag's language.
    fn owns_comment(&self, comment: &Comment) -> bool {
        comment.lang == self.options.language
    }

    /// The comment with the given description in the configured language.
    fn find_comment(&self, description: &str) -> Option<&Comment> {
        self.data
            .comments()
            .find(|comment| comment.description == description && self.owns_comment(comment))
    }

    /// Remove all comments with the given description in the configured language.
    ///
    /// Returns `true` if at least one comment was removed.
    fn remove_comments(&mut self, description: &str) -> bool {
        let (removed, kept): (Vec<Frame>, Vec<Frame>) = self
            .data
            .remove(COMMENT_FRAME)
            .into_iter()
            .partition(|frame| {
                frame.content().comment().is_some_and(|comment| {
                    comment.description == description && self.owns_comment(comment)
                })
            });
        for frame in kept {
            let _replaced = self.data.add_frame(frame);
        }

        !removed.is_empty()
    }

    /// First value of a text frame.
    fn first_text(&self, id: &str) -> Option<&str> {
        self.data
            .get(id)
            .and_then(|frame| frame.content().text())
            .and_then(|text| text.split(VALUE_SEPARATOR).next())
    }

    /// The ID3v1.1 counterpart of this tag.
    fn legacy_tag(&self) -> Id3v1Tag {
        let mut legacy = Id3v1Tag::new();
        legacy.title = self.first_text("TIT2").map(latin1_lossy);
        legacy.artist = self.first_text("TPE1").map(latin1_lossy);
        legacy.album = self.first_text("TALB").map(latin1_lossy);
        legacy.year = self
            .first_text("TDRC")
            .and_then(|date| date.get(..4))
            .and_then(|year| year.parse().ok());
        legacy.comment = self
            .find_comment("")
            .and_then(|comment| comment.text.split(VALUE_SEPARATOR).next())
            .map(latin1_lossy);
        legacy.track_number = self
            .first_text("TRCK")
            .and_then(|track| track.split('/').next())
            .and_then(|number| number.trim().parse().ok());
        legacy.genre = self.first_text("TCON").and_then(|genre| {
            GENRES
                .iter()
                .position(|name| name.eq_ignore_ascii_case(genre))
                .and_then(|index| u8::try_from(index).ok())
        });
        legacy
    }
}

impl FieldAccess for Id3Tag {
    fn contains_field(&self, field: &str) -> bool {
        match self.native_key(field) {
            FrameKey::Picture => self.data.pictures().next().is_some(),
            FrameKey::Text(id) => self.data.get(id).is_some(),
            FrameKey::Comment { description, .. } => self.find_comment(&description).is_some(),
        }
    }

    fn read_field(&self, field: &str) -> crate::Result<Option<Vec<Value>>> {
        let values = match self.native_key(field) {
            FrameKey::Picture => self
                .data
                .pictures()
                .next()
                .map(|picture| vec![Value::Binary(picture.data.clone())]),
            FrameKey::Text(id) => self.data.get(id).map(|frame| {
                frame
                    .content()
                    .text_values()
                    .into_iter()
                    .flatten()
                    .map(Value::from)
                    .collect()
            }),
            FrameKey::Comment { description, .. } => self
                .find_comment(&description)
                .map(|comment| split_text(&comment.text)),
        };

        Ok(values)
    }

    fn write_field(&mut self, field: &str, values: Vec<Value>) -> crate::Result<()> {
        if values.is_empty() {
            let _removed = self.remove_field(field);
            return Ok(());
        }

        let key = self.native_key(field);
        let frame = match &key {
            FrameKey::Picture => {
                let data = match values.into_iter().next() {
                    Some(Value::Binary(data)) => data,
                    other => {
                        let value = other.map(|value| value.to_string()).unwrap_or_default();
                        return Err(crate::Error::invalid_value(field, value));
                    }
                };
                let _removed = self.data.remove(PICTURE_FRAME);
                Frame::with_content(
                    PICTURE_FRAME,
                    Content::Picture(Picture {
                        mime_type: image_mime_type(&data).to_string(),
                        picture_type: PictureType::CoverFront,
                        description: String::new(),
                        data,
                    }),
                )
            }
            FrameKey::Text(id) => Frame::with_content(*id, Content::Text(join_text(field, &values)?)),
            FrameKey::Comment {
                description,
                language,
            } => Frame::with_content(
                COMMENT_FRAME,
                Content::Comment(Comment {
                    lang: language.clone(),
                    description: description.clone(),
                    text: join_text(field, &values)?,
                }),
            ),
        };
        let frame = frame.set_encoding(Some(self.options.encoding.into()));

        // Drop duplicates that `add_frame` would leave behind.
        match &key {
            FrameKey::Picture => {}
            FrameKey::Text(id) => {
                let _removed = self.data.remove(*id);
            }
            FrameKey::Comment { description, .. } => {
                let _removed = self.remove_comments(description);
            }
        }

        log::debug!("Writing field {field:?} to frame {key}");
        let _replaced = self.data.add_frame(frame);
        Ok(())
    }

    fn remove_field(&mut self, field: &str) -> bool {
        match self.native_key(field) {
            FrameKey::Picture => !self.data.remove(PICTURE_FRAME).is_empty(),
            FrameKey::Text(id) => !self.data.remove(id).is_empty(),
            FrameKey::Comment { description, .. } => self.remove_comments(&description),
        }
    }

    fn field_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for frame in self.data.frames() {
            let name = match frame.content() {
                Content::Comment(comment) if self.owns_comment(comment) => {
                    Some(comment_field_name(&comment.description).to_string())
                }
                Content::Comment(_) => None,
                _ => FRAME_MAPPING.field_name(frame.id()).map(ToString::to_string),
            };
            if let Some(name) = name {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }

        names
    }

    fn save(&mut self, path: &Path) -> crate::Result<()> {
        // Writing the ID3v2 tag strips any ID3v1 tag, so it is appended again afterwards.
        id3::v1v2::write_to_path(path, &self.data, Version::Id3v24)?;
        self.legacy_tag()
            .save_to_path(path, WriteOptions::default())?;
        Ok(())
    }

    fn reload(&mut self, path: &Path) -> crate::Result<()> {
        let reloaded = Id3Tag::read_from_path(path, self.options.clone())?;
        self.data = reloaded.data;
        Ok(())
    }
}
