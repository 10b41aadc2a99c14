//! Per-file metadata: the external index boundary, the parser for its
//! textual output, and escaped-unicode decoding.

mod decode;
mod extract;
mod model;
mod source;

pub use decode::decode_unicode_escapes;
pub use extract::MetadataExtractor;
pub use model::TrackMetadata;
pub use source::{MdlsSource, MetadataSource};
