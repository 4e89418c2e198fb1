use icu_normalizer::ComposingNormalizerBorrowed;

/// Separator that semicolon-delimited answer lists collapse to.
pub const LIST_SEPARATOR: char = ';';

/// Canonical comparison form of an answer.
///
/// NFC-composes, lower-cases and drops every whitespace character. A comma is
/// read as a decimal separator and becomes `.`; a semicolon separates list
/// items and stays as [`LIST_SEPARATOR`]. The output never contains a comma,
/// so the transform is a fixed point: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(answer: &str) -> String {
    let composed = ComposingNormalizerBorrowed::new_nfc().normalize(answer);
    composed
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            ',' => '.',
            ';' => LIST_SEPARATOR,
            other => other,
        })
        .collect()
}

pub fn answers_match(user: &str, reference: &str) -> bool {
    normalize(user) == normalize(reference)
}
