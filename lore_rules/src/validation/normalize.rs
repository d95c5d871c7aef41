//! Text normalization shared by the validator and the lexical scorer.

/// Normalize text for matching.
///
/// Lower-cases, turns every character that is not an ASCII word character
/// (`[A-Za-z0-9_]`) or whitespace into a space, collapses whitespace runs and
/// trims. Applying it twice gives the same result as applying it once.
pub fn normalize_text(text: &str) -> String {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split normalized text into its non-empty tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize_text(text)
        .split(' ')
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}
