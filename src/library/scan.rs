use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::{DirEntry, WalkDir};

use crate::config::LibrarySettings;

fn is_ignored(entry: &DirEntry, settings: &LibrarySettings) -> bool {
    entry.depth() > 0 && entry.file_type().is_dir() && settings.is_ignored_dir(entry.file_name())
}

/// Collect every supported audio file under `dir`, skipping ignored
/// directories. Order follows the directory walk.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(settings.follow_links)
        .into_iter()
        .filter_entry(|e| !is_ignored(e, settings))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        let path = entry.path();
        if path.is_file() && settings.is_audio_file(path) {
            files.push(path.to_path_buf());
        }
    }

    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn names(files: &[PathBuf]) -> Vec<String> {
        let mut names: Vec<String> = files
            .iter()
            .filter_map(|p| p.file_name().and_then(|s| s.to_str()).map(str::to_string))
            .collect();
        names.sort();
        names
    }

    #[test]
    fn scan_filters_non_audio_case_insensitive() {
        let dir = tempdir().unwrap();

        fs::write(dir.path().join("b.MP3"), b"not a real mp3").unwrap();
        fs::write(dir.path().join("a.flac"), b"not a real flac").unwrap();
        fs::write(dir.path().join("c.txt"), b"ignore me").unwrap();
        fs::write(dir.path().join("cover.jpg"), b"ignore me").unwrap();

        let files = scan(dir.path(), &LibrarySettings::default());
        assert_eq!(names(&files), vec!["a.flac", "b.MP3"]);
    }

    #[test]
    fn scan_recurses_and_skips_ignored_dirs() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("Loose").join("Deeper");
        let git = dir.path().join(".git").join("objects");
        let venv = dir.path().join("tools").join(".venv");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir_all(&git).unwrap();
        fs::create_dir_all(&venv).unwrap();
        fs::write(nested.join("deep.mp3"), b"").unwrap();
        fs::write(git.join("hidden.mp3"), b"").unwrap();
        fs::write(venv.join("also-hidden.flac"), b"").unwrap();
        fs::write(dir.path().join("tools").join("kept.flac"), b"").unwrap();

        let files = scan(dir.path(), &LibrarySettings::default());
        assert_eq!(names(&files), vec!["deep.mp3", "kept.flac"]);
    }

    #[test]
    fn scan_ignores_files_named_like_ignored_dirs() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".git"), b"gitdir: elsewhere").unwrap();
        fs::write(dir.path().join("song.mp3"), b"").unwrap();

        let files = scan(dir.path(), &LibrarySettings::default());
        assert_eq!(names(&files), vec!["song.mp3"]);
    }

    #[test]
    fn scan_respects_configured_extensions() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.mp3"), b"").unwrap();
        fs::write(dir.path().join("b.m4a"), b"").unwrap();

        let settings = LibrarySettings {
            extensions: vec!["m4a".into()],
            ..LibrarySettings::default()
        };
        assert_eq!(names(&scan(dir.path(), &settings)), vec!["b.m4a"]);
    }

    #[test]
    fn scan_of_missing_root_is_empty() {
        let dir = tempdir().unwrap();
        let files = scan(&dir.path().join("nope"), &LibrarySettings::default());
        assert!(files.is_empty());
    }
}
