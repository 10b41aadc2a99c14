/// Tag fields read for one file. Every field is optional; a record missing
/// artist, album or title never produces a move.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackMetadata {
    /// Raw credit string, possibly naming several performers.
    pub artist: Option<String>,
    pub album: Option<String>,
    pub title: Option<String>,
    /// Track number, always >= 1 when present.
    pub track: Option<u32>,
}
