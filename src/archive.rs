//! Template archive extraction and relocation.
//!
//! Every member path and link target is checked before anything is written,
//! so an archive carrying a `..` segment or an absolute path leaves the
//! destination empty.

use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};

use flate2::read::GzDecoder;
use log::debug;
use tar::{Archive, EntryType};

use crate::error::{Error, Result};

fn open_archive(path: &Path) -> Result<Archive<GzDecoder<File>>> {
    Ok(Archive::new(GzDecoder::new(File::open(path)?)))
}

fn corrupt(e: io::Error) -> Error {
    Error::ExtractionError(e.to_string())
}

/// Rejects absolute paths and paths with a parent-directory segment.
pub fn validate_entry_path(path: &Path) -> Result<()> {
    let escapes = path.has_root()
        || path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)));
    if escapes {
        return Err(Error::PathTraversal {
            path: path.display().to_string(),
        });
    }
    Ok(())
}

fn is_metadata(kind: EntryType) -> bool {
    matches!(kind, EntryType::XGlobalHeader | EntryType::XHeader)
}

fn check_members(archive_path: &Path) -> Result<usize> {
    let mut archive = open_archive(archive_path)?;
    let mut members = 0;
    for entry in archive.entries().map_err(corrupt)? {
        let entry = entry.map_err(corrupt)?;
        if is_metadata(entry.header().entry_type()) {
            continue;
        }
        validate_entry_path(&entry.path().map_err(corrupt)?)?;
        if matches!(entry.header().entry_type(), EntryType::Symlink | EntryType::Link) {
            if let Some(target) = entry.link_name().map_err(corrupt)? {
                validate_entry_path(&target)?;
            }
        }
        members += 1;
    }
    Ok(members)
}

/// Extracts a `.tar.gz` template archive and returns its single top-level directory.
///
/// # Arguments
/// * `archive_path` - The downloaded archive
/// * `dest` - Empty directory to extract into
///
/// # Returns
/// * `Result<PathBuf>` - Path of the top-level directory inside `dest`
///
/// # Errors
/// * `Error::PathTraversal` if any member would escape `dest`; nothing is written
/// * `Error::ExtractionError` for a corrupt archive or an ambiguous unpack root
pub fn extract_tarball(archive_path: &Path, dest: &Path) -> Result<PathBuf> {
    let members = check_members(archive_path)?;
    debug!("Validated {members} archive members");

    fs::create_dir_all(dest)?;
    let mut archive = open_archive(archive_path)?;
    for entry in archive.entries().map_err(corrupt)? {
        let mut entry = entry.map_err(corrupt)?;
        if is_metadata(entry.header().entry_type()) {
            continue;
        }
        entry.unpack_in(dest).map_err(corrupt)?;
    }

    let mut top_level = Vec::new();
    for entry in fs::read_dir(dest)? {
        top_level.push(entry?.path());
    }
    match top_level.as_slice() {
        [root] if root.is_dir() => Ok(root.clone()),
        [] => Err(Error::ExtractionError("archive is empty".to_string())),
        [_] => Err(Error::ExtractionError(
            "archive does not contain a top-level directory".to_string(),
        )),
        _ => Err(Error::ExtractionError(format!(
            "expected a single top-level directory, found {} entries",
            top_level.len()
        ))),
    }
}

/// Moves the extracted template to its final location.
///
/// # Errors
/// * `Error::AlreadyExists` if `target` is already present
pub fn move_to_target(src: &Path, target: &Path) -> Result<()> {
    if target.exists() {
        return Err(Error::AlreadyExists {
            path: target.display().to_string(),
        });
    }
    debug!("Moving {} to {}", src.display(), target.display());
    fs::rename(src, target)?;
    Ok(())
}
