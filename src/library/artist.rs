use once_cell::sync::Lazy;
use regex::Regex;

/// Collaborator separators, in the order they are applied.
///
/// This is a heuristic, not a grammar for credit strings. The order is part
/// of the contract: each rule truncates the working string before the next
/// one runs, so a name such as "Earth, Wind & Fire" resolves to "Earth".
pub static SEPARATORS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\s+ft\.?\s+",
        r"(?i)\s+feat\.?\s+",
        r"(?i)\s+featuring\s+",
        r"(?i)\s+with\s+",
        r"(?i)\s+x\s+",
        r"\s*&\s*",
        r"\s*,\s*",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("separator pattern is valid"))
    .collect()
});

/// Reduce a multi-credit artist string to its first-listed performer.
pub fn primary_artist(raw: &str) -> String {
    let mut current = raw;
    for sep in SEPARATORS.iter() {
        if let Some(m) = sep.find(current) {
            current = &current[..m.start()];
        }
    }
    current.trim().to_string()
}
