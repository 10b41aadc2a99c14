//! Error types shared across the organizer.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Failure of a single metadata query. The extractor downgrades every
/// variant to "no metadata"; they only surface in debug logs.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("failed to run metadata command: {0}")]
    Spawn(#[source] io::Error),

    #[error("failed to read metadata command output: {0}")]
    Read(#[source] io::Error),

    #[error("failed to wait for metadata command: {0}")]
    Wait(#[source] io::Error),

    #[error("metadata command timed out after {0:?}")]
    Timeout(Duration),

    #[error("metadata command exited with status {0:?}")]
    Status(Option<i32>),

    #[error("metadata command produced no output")]
    EmptyOutput,
}

/// Failure of one planned move. Collected per batch, never retried.
#[derive(Debug, Error)]
pub enum MoveError {
    #[error("destination already exists: {}", .0.display())]
    DestinationExists(PathBuf),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl MoveError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Startup and console errors that end the run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("music root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("no music root configured and $HOME is not set")]
    NoRoot,

    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),
}
