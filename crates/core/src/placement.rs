use chrono::NaiveDateTime;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "tiff"];

/// Highest `_N` suffix tried before giving up on a file name.
pub const MAX_COLLISION_SUFFIX: usize = 10_000;

#[derive(Debug, Error)]
pub enum PlacementError {
    #[error("cannot create folder {}: {source}", .path.display())]
    CreateFolder {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(
        "too many name collisions for {} in {} (tried up to _{max})",
        .file_name.to_string_lossy(),
        .folder.display(),
        max = MAX_COLLISION_SUFFIX
    )]
    TooManyCollisions { folder: PathBuf, file_name: OsString },
}

pub fn relative_folder(date: &NaiveDateTime, skip_year: bool) -> PathBuf {
    let month = date.format("%m").to_string();
    if skip_year {
        PathBuf::from(month)
    } else {
        let year = date.format("%Y").to_string();
        Path::new(&year).join(month)
    }
}

pub fn folder_for(
    base_dir: &Path,
    date: &NaiveDateTime,
    skip_year: bool,
) -> Result<PathBuf, PlacementError> {
    let folder = base_dir.join(relative_folder(date, skip_year));
    fs::create_dir_all(&folder).map_err(|source| PlacementError::CreateFolder {
        path: folder.clone(),
        source,
    })?;
    Ok(folder)
}

/// `name.ext`, then `name_1.ext`, `name_2.ext`, ... up to the cap.
pub fn destination_for(folder: &Path, file_name: &OsStr) -> Result<PathBuf, PlacementError> {
    let candidate = folder.join(file_name);
    if !candidate.exists() {
        return Ok(candidate);
    }

    let name = Path::new(file_name);
    let stem = name.file_stem().unwrap_or(file_name);
    let extension = name.extension();

    for n in 1..=MAX_COLLISION_SUFFIX {
        let candidate = folder.join(suffixed_name(stem, extension, n));
        if !candidate.exists() {
            return Ok(candidate);
        }
    }

    Err(PlacementError::TooManyCollisions {
        folder: folder.to_path_buf(),
        file_name: file_name.to_os_string(),
    })
}

fn suffixed_name(stem: &OsStr, extension: Option<&OsStr>, n: usize) -> OsString {
    let mut name = stem.to_os_string();
    name.push(format!("_{n}"));
    if let Some(ext) = extension {
        name.push(".");
        name.push(ext);
    }
    name
}

pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy();
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}
