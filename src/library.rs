//! The library pipeline: find audio files, decide where each one belongs,
//! move them there, and clean up the folders left behind.

mod artist;
mod model;
mod mutate;
mod plan;
mod sanitize;
mod scan;

pub use model::MoveOperation;
pub use mutate::{apply_moves, prune_empty_directories};
pub use plan::plan;
pub use scan::scan;
