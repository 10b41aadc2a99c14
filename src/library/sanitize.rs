use crate::metadata::decode_unicode_escapes;

/// Turn a free-text tag value into a single safe path segment.
///
/// Escaped code points are decoded first, so non-ASCII names survive as real
/// characters. Separators and `:`/`|` become `-`; wildcard, quote and angle
/// characters are dropped; surrounding whitespace and dots are trimmed until
/// none remain, which keeps the function idempotent.
///
/// The result may be empty; callers treat that like a missing field.
pub fn sanitize(text: &str) -> String {
    let decoded = decode_unicode_escapes(text);

    let cleaned: String = decoded
        .chars()
        .filter_map(|c| match c {
            '/' | '\\' | ':' | '|' => Some('-'),
            '*' | '?' | '"' | '<' | '>' => None,
            c => Some(c),
        })
        .collect();

    cleaned
        .trim_matches(|c: char| c.is_whitespace() || c == '.')
        .to_string()
}

/// `sanitize`, mapping an empty result to `None`.
pub fn sanitize_segment(text: &str) -> Option<String> {
    Some(sanitize(text)).filter(|s| !s.is_empty())
}
