use crate::exif_reader::read_capture_timestamp;
use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Capture date together with where it came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DateSource {
    Metadata(NaiveDateTime),
    FilesystemFallback(NaiveDateTime),
}

impl DateSource {
    pub fn date(&self) -> NaiveDateTime {
        match self {
            DateSource::Metadata(date) | DateSource::FilesystemFallback(date) => *date,
        }
    }

    pub fn is_metadata(&self) -> bool {
        matches!(self, DateSource::Metadata(_))
    }
}

/// Resolves when a photo was taken. Never fails: anything wrong with the
/// embedded metadata degrades to the file's modification time.
pub fn resolve_capture_date(path: &Path) -> DateSource {
    match read_capture_timestamp(path) {
        Ok(date) => DateSource::Metadata(date),
        Err(err) => {
            log::debug!(
                "{}: falling back to modification time ({err})",
                path.display()
            );
            DateSource::FilesystemFallback(fallback_date(path))
        }
    }
}

fn fallback_date(path: &Path) -> NaiveDateTime {
    match file_modified_to_local(path) {
        Some(date) => date.naive_local(),
        None => {
            log::warn!(
                "{}: modification time unavailable, using current time",
                path.display()
            );
            Local::now().naive_local()
        }
    }
}

fn file_modified_to_local(path: &Path) -> Option<DateTime<Local>> {
    let time = fs::metadata(path).ok()?.modified().ok()?;
    Some(DateTime::from(time))
}
