use crate::errors::{FileOperation, IoError};
use colored::Colorize;
use std::{
    fs,
    path::{Component, Path, PathBuf, MAIN_SEPARATOR},
};

/// What a path string asks for. Decided from the string alone, before
/// the filesystem is consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// Observable result of a single [`materialize`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    CreatedDir,
    CreatedFile,
    Skipped,
}

/// Classifies a raw path string: a trailing separator means directory,
/// anything else means file.
///
/// Callers encode intent purely through how they spell the path, so a
/// forgotten trailing separator on an intended directory yields file
/// semantics. Blueprints rely on this, do not second-guess it here.
pub fn classify(path: &str) -> EntryKind {
    if path.ends_with('/') || path.ends_with(MAIN_SEPARATOR) {
        EntryKind::Directory
    } else {
        EntryKind::File
    }
}

/// Lexically normalizes a path: drops `.` components and resolves `..`
/// by popping the previous component.
pub fn normalize_path(source: &Path) -> PathBuf {
    let mut new_path = PathBuf::new();

    for component in source.components() {
        match component {
            // Skip the current-dir marker "."
            Component::CurDir => {}

            // For "..", pop the last component if possible
            Component::ParentDir => {
                new_path.pop();
            }

            // For normal components, push them
            other => new_path.push(other.as_os_str()),
        }
    }

    new_path
}

/// Resolves a raw path against `base_dir`: absolute paths pass through,
/// relative paths are joined onto the base, and the result is normalized.
pub fn resolve(base_dir: &Path, path: &str) -> PathBuf {
    let candidate = PathBuf::from(path);

    let joined = if candidate.is_absolute() {
        candidate
    } else {
        base_dir.join(candidate)
    };

    normalize_path(&joined)
}

/// Realizes a single path on the filesystem, exactly once.
///
/// A path ending in a separator becomes a directory (ancestors included);
/// any other path becomes a file holding `content` verbatim, with its
/// parent chain created first. If anything already exists at the resolved
/// path, whatever its type, nothing is touched and [`Outcome::Skipped`]
/// comes back with a console notice. Pre-existing entries are never
/// overwritten.
///
/// # Errors
///
/// Underlying filesystem failures surface as [`IoError`]; no retry and no
/// cleanup of ancestor directories created before the failure.
pub fn materialize(base_dir: &Path, path: &str, content: &str) -> Result<Outcome, IoError> {
    let kind = classify(path);
    let full_path = resolve(base_dir, path);

    if full_path.exists() {
        let msg = format!("{} {}", "skip".yellow(), full_path.display());

        println!("{}", &msg);

        return Ok(Outcome::Skipped);
    }

    match kind {
        EntryKind::Directory => {
            fs::create_dir_all(&full_path)
                .map_err(|error| IoError::new(FileOperation::Mkdir, full_path.clone(), error))?;

            log::debug!("created directory: {}", full_path.display());

            Ok(Outcome::CreatedDir)
        }
        EntryKind::File => {
            if let Some(parent) = full_path.parent() {
                if !parent.exists() {
                    fs::create_dir_all(parent).map_err(|error| {
                        IoError::new(FileOperation::Mkdir, parent.to_path_buf(), error)
                    })?;
                }
            }

            fs::write(&full_path, content)
                .map_err(|error| IoError::new(FileOperation::Write, full_path.clone(), error))?;

            let msg = format!("{} {}", "create".green(), full_path.display());

            println!("{}", &msg);

            Ok(Outcome::CreatedFile)
        }
    }
}
