use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// `\UXXXX` (as printed by `mdls`) or `\uXXXX`, optionally followed by a
/// second escape holding the low half of a surrogate pair.
static ESCAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\[Uu]([0-9a-fA-F]{4})(?:\\[Uu]([dD][c-fC-F][0-9a-fA-F]{2}))?")
        .expect("escape pattern is valid")
});

/// Replace escaped code points with the characters they name.
///
/// Decoding happens in a single pass, so a decoded backslash never starts a
/// new escape. Text without escapes is returned borrowed and unchanged.
/// Sequences that do not name a valid character are left as written.
pub fn decode_unicode_escapes(text: &str) -> Cow<'_, str> {
    ESCAPE.replace_all(text, |caps: &Captures<'_>| {
        let hi = hex(&caps[1]);
        if let Some(lo) = caps.get(2).map(|m| hex(m.as_str())) {
            if (0xD800..0xDC00).contains(&hi) {
                let code = 0x10000 + ((hi - 0xD800) << 10) + (lo - 0xDC00);
                if let Some(c) = char::from_u32(code) {
                    return c.to_string();
                }
            }
            // Not a pair: the trailing low surrogate cannot stand alone, keep it as text.
            let first = char::from_u32(hi)
                .map(String::from)
                .unwrap_or_else(|| caps[0][..6].to_string());
            return first + &caps[0][6..];
        }
        char::from_u32(hi)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    })
}

fn hex(digits: &str) -> u32 {
    // The pattern guarantees exactly four hex digits.
    u32::from_str_radix(digits, 16).unwrap_or(0)
}
