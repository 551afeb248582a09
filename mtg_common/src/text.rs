//! Text normalization for report output and catalog keys

/// Replacement table applied in order. No replacement output contains a
/// replaceable input, so normalization is idempotent.
const REPLACEMENTS: &[(char, &str)] = &[
    ('\u{2014}', "-"),   // em dash
    ('\u{2212}', "-"),   // minus sign
    ('\u{2018}', "'"),
    ('\u{2019}', "'"),
    ('\u{201c}', "\""),
    ('\u{201d}', "\""),
    ('\u{2022}', "-"),   // bullet
    ('\u{00c6}', "AE"),
    ('\u{00f6}', "o"),
    ('\u{00b2}', "^2"),
    ('\u{00ae}', "(R)"),
    ('\u{221e}', "INF"),
];

/// Characters whose presence in a catalog key forces the key to be normalized
pub const REKEYED_CHARS: [char; 2] = ['\u{00c6}', '\u{00f6}'];

fn replacement(c: char) -> Option<&'static str> {
    REPLACEMENTS
        .iter()
        .find(|(from, _)| *from == c)
        .map(|(_, to)| *to)
}

/// Map typographic punctuation and a few symbols to ASCII-safe equivalents.
///
/// Every other character is passed through untouched.
pub fn normalize_oracle(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match replacement(c) {
            Some(to) => out.push_str(to),
            None => out.push(c),
        }
    }
    out
}

/// Whether a catalog key must be re-keyed through [`normalize_oracle`]
pub fn needs_rekey(key: &str) -> bool {
    key.chars().any(|c| REKEYED_CHARS.contains(&c))
}
