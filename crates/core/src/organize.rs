use crate::metadata::{resolve_capture_date, DateSource};
use crate::placement::{destination_for, folder_for, is_image_file};
use anyhow::{Context, Result};
use filetime::FileTime;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct OrganizeOptions {
    pub directory: PathBuf,
    pub skip_year: bool,
}

impl Default for OrganizeOptions {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            skip_year: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Stats {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum FileOutcome {
    Skipped,
    Moved {
        destination: PathBuf,
        date: DateSource,
    },
}

pub trait Reporter {
    fn started(&mut self, directory: &Path, skip_year: bool);
    fn skipped(&mut self, path: &Path);
    fn moved(&mut self, source: &Path, destination: &Path, base_dir: &Path);
    fn failed(&mut self, path: &Path, error: &anyhow::Error);
    fn finished(&mut self, stats: &Stats);
}

/// Only a failure to resolve or list the directory is returned as an error;
/// per-file problems are reported and counted in [`Stats::errors`].
pub fn organize_directory(
    options: &OrganizeOptions,
    reporter: &mut dyn Reporter,
) -> Result<Stats> {
    let base_dir = fs::canonicalize(&options.directory).with_context(|| {
        format!(
            "cannot resolve directory: {}",
            options.directory.display()
        )
    })?;
    reporter.started(&base_dir, options.skip_year);

    let mut stats = Stats::default();
    for path in list_entries(&base_dir)? {
        match organize_entry(&base_dir, &path, options.skip_year) {
            Ok(FileOutcome::Skipped) => {
                stats.skipped += 1;
                reporter.skipped(&path);
            }
            Ok(FileOutcome::Moved { destination, .. }) => {
                stats.processed += 1;
                reporter.moved(&path, &destination, &base_dir);
            }
            Err(err) => {
                stats.errors += 1;
                reporter.failed(&path, &err);
            }
        }
    }

    reporter.finished(&stats);
    Ok(stats)
}

pub fn organize_entry(base_dir: &Path, path: &Path, skip_year: bool) -> Result<FileOutcome> {
    if path.is_dir() || !is_image_file(path) {
        return Ok(FileOutcome::Skipped);
    }

    let file_name = path
        .file_name()
        .with_context(|| format!("entry has no file name: {}", path.display()))?;

    let date = resolve_capture_date(path);
    log::debug!("{}: {:?}", path.display(), date);

    let folder = folder_for(base_dir, &date.date(), skip_year)?;
    let destination = destination_for(&folder, file_name)?;
    move_file(path, &destination)?;

    Ok(FileOutcome::Moved { destination, date })
}

fn list_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for entry in
        fs::read_dir(dir).with_context(|| format!("cannot read directory: {}", dir.display()))?
    {
        let entry =
            entry.with_context(|| format!("cannot read directory entry in: {}", dir.display()))?;
        out.push(entry.path());
    }
    out.sort();
    Ok(out)
}

fn move_file(from: &Path, to: &Path) -> Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::CrossesDevices => {
            copy_across_devices(from, to)
        }
        Err(err) => Err(anyhow::Error::from(err).context(format!(
            "move failed: {} -> {}",
            from.display(),
            to.display()
        ))),
    }
}

fn copy_across_devices(from: &Path, to: &Path) -> Result<()> {
    let modified = fs::metadata(from)
        .with_context(|| format!("cannot stat source: {}", from.display()))?
        .modified()
        .with_context(|| format!("cannot read modification time: {}", from.display()))?;

    if let Err(err) = fs::copy(from, to) {
        let _ = fs::remove_file(to);
        return Err(anyhow::Error::from(err).context(format!(
            "copy failed: {} -> {}",
            from.display(),
            to.display()
        )));
    }
    filetime::set_file_mtime(to, FileTime::from_system_time(modified))
        .with_context(|| format!("cannot keep modification time: {}", to.display()))?;
    fs::remove_file(from)
        .with_context(|| format!("copied but could not remove source: {}", from.display()))?;
    Ok(())
}
