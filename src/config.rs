//! Configuration loader and schema types.
//!
//! The settings replace what would otherwise be global constants (library
//! root, audio extensions, ignored directories, query timeout) and are
//! passed by reference into each stage.

mod load;
mod schema;

pub use load::default_music_root;
pub use schema::*;
