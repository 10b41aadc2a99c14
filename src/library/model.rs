use std::path::{Path, PathBuf};

/// A planned relocation of one file to its canonical path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOperation {
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl MoveOperation {
    /// Both ends relative to `root`, for display.
    pub fn relative_to<'a>(&'a self, root: &Path) -> (&'a Path, &'a Path) {
        (
            self.source.strip_prefix(root).unwrap_or(&self.source),
            self.destination
                .strip_prefix(root)
                .unwrap_or(&self.destination),
        )
    }
}

/// Result of the planning pass.
#[derive(Debug, Default)]
pub struct Plan {
    pub moves: Vec<MoveOperation>,
    /// Files left alone because artist, album or title was missing.
    pub skipped: usize,
}
