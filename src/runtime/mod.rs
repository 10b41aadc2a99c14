use std::env;
use std::io;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::{self, LibrarySettings};
use crate::error::Error;
use crate::metadata::{MdlsSource, MetadataExtractor};

mod pipeline;
mod settings;

pub use pipeline::{Summary, organize};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();
    let root = resolve_root(env::args_os().nth(1).map(PathBuf::from), &settings.library)?;

    let source = MdlsSource::new(&settings.metadata);
    if !source.is_available() {
        warn!(
            command = source.command(),
            "metadata command not found; every file will be skipped"
        );
    }
    let extractor = MetadataExtractor::new(source);

    let mut input = io::stdin().lock();
    let mut out = io::stdout().lock();
    let summary = organize(&root, &settings, &extractor, &mut input, &mut out)?;
    info!(
        found = summary.found,
        planned = summary.planned,
        skipped = summary.skipped,
        moved = summary.moved,
        failed = summary.failed,
        removed_dirs = ?summary.removed_dirs,
        cancelled = summary.cancelled,
        "run finished"
    );

    Ok(())
}

/// Pick the library root: command-line argument, then config, then `~/Music`.
/// The result is absolute and must exist.
pub fn resolve_root(arg: Option<PathBuf>, library: &LibrarySettings) -> Result<PathBuf, Error> {
    let root = arg
        .or_else(|| library.root.clone())
        .or_else(config::default_music_root)
        .ok_or(Error::NoRoot)?;

    root.canonicalize().map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::RootNotFound(root.clone()),
        _ => Error::Io(e),
    })
}
