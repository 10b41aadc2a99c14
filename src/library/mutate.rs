use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::error::MoveError;

use super::model::MoveOperation;

#[derive(Debug)]
pub struct MoveFailure {
    pub operation: MoveOperation,
    pub error: MoveError,
}

/// Outcome of [`apply_moves`].
#[derive(Debug, Default)]
pub struct ApplyReport {
    pub moved: usize,
    pub failures: Vec<MoveFailure>,
}

/// Execute planned moves in order.
///
/// A failed move is recorded and the batch carries on; nothing is retried
/// or rolled back.
pub fn apply_moves(moves: &[MoveOperation]) -> ApplyReport {
    let mut report = ApplyReport::default();

    for op in moves {
        match move_file(op) {
            Ok(()) => {
                debug!(from = %op.source.display(), to = %op.destination.display(), "moved");
                report.moved += 1;
            }
            Err(error) => {
                warn!(from = %op.source.display(), %error, "move failed");
                report.failures.push(MoveFailure {
                    operation: op.clone(),
                    error,
                });
            }
        }
    }

    info!(moved = report.moved, failed = report.failures.len(), "moves applied");
    report
}

fn move_file(op: &MoveOperation) -> Result<(), MoveError> {
    // Planned moments ago, but a rename would silently clobber on Unix.
    if op.destination.exists() {
        return Err(MoveError::DestinationExists(op.destination.clone()));
    }
    if let Some(parent) = op.destination.parent() {
        fs::create_dir_all(parent).map_err(|e| MoveError::io(parent, e))?;
    }

    match fs::rename(&op.source, &op.destination) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::CrossesDevices => {
            fs::copy(&op.source, &op.destination)
                .map_err(|e| MoveError::io(&op.destination, e))?;
            fs::remove_file(&op.source).map_err(|e| MoveError::io(&op.source, e))
        }
        Err(e) => Err(MoveError::io(&op.source, e)),
    }
}

/// Delete every directory under `root` (not `root` itself) that holds no
/// audio file anywhere below it, together with whatever artwork or sidecar
/// files remain inside. Returns the number of directories removed.
///
/// Directories are visited deepest first, so a chain of now-empty folders
/// goes in one pass. Ignored directories are never entered or removed, and
/// their presence keeps the parent. Deletion failures are logged and the
/// directory stays.
pub fn prune_empty_directories(root: &Path, settings: &LibrarySettings) -> usize {
    let mut dirs: Vec<PathBuf> = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !(e.file_type().is_dir() && settings.is_ignored_dir(e.file_name())))
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_dir())
        .map(|e| e.into_path())
        .collect();

    // Pre-order reversed: every directory comes after all of its descendants.
    dirs.reverse();

    let mut removed = 0;
    for dir in dirs {
        if has_content(&dir, settings) {
            continue;
        }
        match fs::remove_dir_all(&dir) {
            Ok(()) => {
                debug!(dir = %dir.display(), "removed empty directory");
                removed += 1;
            }
            Err(err) => warn!(dir = %dir.display(), error = %err, "could not remove directory"),
        }
    }

    info!(removed, "prune pass finished");
    removed
}

/// Whether `dir` must be kept: it holds an audio file or an ignored
/// directory somewhere below it, or part of it could not be read.
fn has_content(dir: &Path, settings: &LibrarySettings) -> bool {
    for entry in WalkDir::new(dir).min_depth(1).follow_links(false) {
        let Ok(entry) = entry else {
            return true;
        };
        if entry.file_type().is_dir() {
            if settings.is_ignored_dir(entry.file_name()) {
                return true;
            }
        } else if entry.path().is_file() && settings.is_audio_file(entry.path()) {
            return true;
        }
    }
    false
}
