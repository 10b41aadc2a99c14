use std::path::PathBuf;

use serde::Deserialize;

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/shelve/config.toml` or `~/.config/shelve/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `SHELVE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub metadata: MetadataSettings,
    pub organize: OrganizeSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Library root. Falls back to `~/Music` when unset and no path argument is given.
    pub root: Option<PathBuf>,
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Directory names never scanned, counted or pruned.
    pub ignore_dirs: Vec<String>,
    /// Whether to follow symlinks while scanning.
    pub follow_links: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            root: None,
            extensions: vec!["mp3".into(), "flac".into()],
            ignore_dirs: vec![".venv".into(), "__pycache__".into(), ".git".into()],
            follow_links: false,
        }
    }
}

impl LibrarySettings {
    /// Normalized extension list: lowercase, no leading dot, no blanks.
    pub fn normalized_extensions(&self) -> Vec<String> {
        self.extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect()
    }

    pub fn is_audio_file(&self, path: &std::path::Path) -> bool {
        let exts = self.normalized_extensions();
        path.extension()
            .and_then(|s| s.to_str())
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                exts.iter().any(|e| e == &ext)
            })
            .unwrap_or(false)
    }

    pub fn is_ignored_dir(&self, name: &std::ffi::OsStr) -> bool {
        name.to_str()
            .map(|n| self.ignore_dirs.iter().any(|d| d == n))
            .unwrap_or(false)
    }
}

/// Longest per-file query timeout accepted, in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 3600;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetadataSettings {
    /// Program queried for per-file metadata.
    pub command: String,
    /// Per-file query timeout (seconds), 1..=`MAX_TIMEOUT_SECS`.
    pub timeout_secs: u64,
}

impl Default for MetadataSettings {
    fn default() -> Self {
        Self {
            command: "mdls".to_string(),
            timeout_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OrganizeSettings {
    /// Number of pending moves shown before asking for confirmation.
    pub preview_limit: usize,
    /// Print a progress line every N files while reading metadata. 0 disables.
    pub progress_every: usize,
    /// Answer that confirms the move (case-insensitive).
    pub confirm_word: String,
}

impl Default for OrganizeSettings {
    fn default() -> Self {
        Self {
            preview_limit: 15,
            progress_every: 100,
            confirm_word: "yes".to_string(),
        }
    }
}
