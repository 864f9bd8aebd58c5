use chrono::NaiveDateTime;
use exif::{In, Reader, Tag, Value};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const EXIF_TIMESTAMP_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no readable EXIF container in {}: {source}", .path.display())]
    Container {
        path: PathBuf,
        #[source]
        source: exif::Error,
    },
    #[error("DateTimeOriginal is missing")]
    MissingField,
    #[error("DateTimeOriginal is not an ASCII value")]
    NotAscii,
    #[error("DateTimeOriginal {0:?} does not match YYYY:MM:DD HH:MM:SS")]
    Malformed(String),
}

/// Reads the original capture timestamp (EXIF `DateTimeOriginal`) of the
/// primary image. The value carries no zone and is taken as local wall time.
pub fn read_capture_timestamp(path: &Path) -> Result<NaiveDateTime, MetadataError> {
    let file = File::open(path).map_err(|source| MetadataError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut buf = BufReader::new(file);
    let exif = Reader::new()
        .read_from_container(&mut buf)
        .map_err(|source| MetadataError::Container {
            path: path.to_path_buf(),
            source,
        })?;

    let field = exif
        .get_field(Tag::DateTimeOriginal, In::PRIMARY)
        .ok_or(MetadataError::MissingField)?;
    let raw = match &field.value {
        Value::Ascii(values) => values.first().ok_or(MetadataError::MissingField)?,
        _ => return Err(MetadataError::NotAscii),
    };

    parse_exif_timestamp(&String::from_utf8_lossy(raw))
}

pub fn parse_exif_timestamp(input: &str) -> Result<NaiveDateTime, MetadataError> {
    let normalized = input.trim_matches(|c: char| c == '\0' || c.is_whitespace());
    NaiveDateTime::parse_from_str(normalized, EXIF_TIMESTAMP_FORMAT)
        .map_err(|_| MetadataError::Malformed(normalized.to_string()))
}
