use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::model::TrackMetadata;
use super::source::MetadataSource;

pub const ARTIST_FIELD: &str = "kMDItemAuthors";
pub const ALBUM_FIELD: &str = "kMDItemAlbum";
pub const TITLE_FIELD: &str = "kMDItemTitle";
pub const TRACK_FIELD: &str = "kMDItemAudioTrackNumber";

/// The fields requested for every file, in query order.
pub const FIELDS: [&str; 4] = [ARTIST_FIELD, ALBUM_FIELD, TITLE_FIELD, TRACK_FIELD];

static QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#""(.+)""#).expect("valid pattern"));
static QUOTED_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"=\s*"(.+)""#).expect("valid pattern"));
static INT_VALUE: Lazy<Regex> = Lazy::new(|| Regex::new(r"=\s*(\d+)").expect("valid pattern"));

/// Reads [`TrackMetadata`] for a file through a [`MetadataSource`].
///
/// Any query failure yields an empty record: a misbehaving index on one file
/// is indistinguishable from a file without tags and never aborts a batch.
pub struct MetadataExtractor<S> {
    source: S,
}

impl<S: MetadataSource> MetadataExtractor<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn extract(&self, path: &Path) -> TrackMetadata {
        match self.source.query(path, &FIELDS) {
            Ok(text) => parse_mdls_output(&text),
            Err(err) => {
                debug!(path = %path.display(), error = %err, "metadata query failed");
                TrackMetadata::default()
            }
        }
    }
}

/// Parse the textual dump printed by `mdls` for the four requested fields.
///
/// ```text
/// kMDItemAlbum            = "Album X"
/// kMDItemAudioTrackNumber = 1
/// kMDItemAuthors          = (
///     "Foo ft. Bar"
/// )
/// kMDItemTitle            = "One"
/// ```
///
/// Fields that don't have the expected shape stay `None`.
pub fn parse_mdls_output(text: &str) -> TrackMetadata {
    let mut meta = TrackMetadata::default();
    let lines: Vec<&str> = text.trim().lines().collect();

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];

        if line.contains(ARTIST_FIELD) {
            // Authors is a list; the first entry sits on the following line.
            if !line.contains("(null)") && line.contains('(') {
                if let Some(next) = lines.get(i + 1) {
                    meta.artist = parse_list_entry(next);
                    i += 1;
                }
            }
        } else if line.contains(ALBUM_FIELD) {
            meta.album = capture(&QUOTED_VALUE, line);
        } else if line.contains(TITLE_FIELD) {
            meta.title = capture(&QUOTED_VALUE, line);
        } else if line.contains(TRACK_FIELD) {
            meta.track = capture(&INT_VALUE, line)
                .and_then(|n| n.parse::<u32>().ok())
                .filter(|n| *n > 0);
        }
        i += 1;
    }

    meta
}

/// First entry of a list value: quoted (`"Name",`) or bare (`Name,`, common for FLAC).
fn parse_list_entry(line: &str) -> Option<String> {
    let line = line.trim();
    if let Some(quoted) = capture(&QUOTED, line) {
        return Some(quoted);
    }
    let bare = line.trim_end_matches(',').trim();
    if bare.is_empty() || bare == ")" {
        None
    } else {
        Some(bare.to_string())
    }
}

fn capture(re: &Regex, line: &str) -> Option<String> {
    re.captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}
