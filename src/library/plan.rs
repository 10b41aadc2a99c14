use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::metadata::{MetadataExtractor, MetadataSource, TrackMetadata};

use super::artist::primary_artist;
use super::model::{MoveOperation, Plan};
use super::sanitize::sanitize_segment;

/// `NN - Title.ext` when a track number is known, `Title.ext` otherwise.
/// `ext` includes its leading dot (or is empty).
pub fn track_filename(title: &str, track: Option<u32>, ext: &str) -> String {
    match track {
        Some(n) => format!("{n:02} - {title}{ext}"),
        None => format!("{title}{ext}"),
    }
}

/// Canonical `root/Artist/Album/filename` for `source`, or `None` when the
/// metadata is incomplete (including fields that sanitize to nothing).
pub fn destination_for(source: &Path, meta: &TrackMetadata, root: &Path) -> Option<PathBuf> {
    let artist = sanitize_segment(&primary_artist(meta.artist.as_deref()?))?;
    let album = sanitize_segment(meta.album.as_deref()?)?;
    let title = sanitize_segment(meta.title.as_deref()?)?;

    let ext = source
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();

    Some(
        root.join(artist)
            .join(album)
            .join(track_filename(&title, meta.track, &ext)),
    )
}

/// Compute the moves needed to put `files` in canonical places under `root`.
///
/// Incomplete files are counted in `skipped`. Files already in place, files
/// whose destination exists, and files whose destination an earlier file in
/// this plan already claimed are silently left out. Only reads the
/// filesystem.
///
/// `on_progress(done, total)` is called after each file.
pub fn plan<S: MetadataSource>(
    files: &[PathBuf],
    root: &Path,
    extractor: &MetadataExtractor<S>,
    mut on_progress: impl FnMut(usize, usize),
) -> Plan {
    let mut out = Plan::default();
    let mut claimed: HashSet<PathBuf> = HashSet::new();

    for (i, source) in files.iter().enumerate() {
        let meta = extractor.extract(source);
        on_progress(i + 1, files.len());

        let Some(destination) = destination_for(source, &meta, root) else {
            debug!(path = %source.display(), "incomplete metadata");
            out.skipped += 1;
            continue;
        };

        if &destination == source {
            debug!(path = %source.display(), "already in place");
            continue;
        }
        if destination.exists() || !claimed.insert(destination.clone()) {
            debug!(
                path = %source.display(),
                destination = %destination.display(),
                "destination taken, leaving file alone"
            );
            continue;
        }

        out.moves.push(MoveOperation {
            source: source.clone(),
            destination,
        });
    }

    out
}
