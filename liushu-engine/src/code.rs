use unicode_normalization::UnicodeNormalization;

/// Normalize an input code for dictionary storage and lookup.
///
/// Applies NFKC so full-width letters typed on some layouts (`ｎｉ`) collapse to
/// their ASCII form, trims surrounding whitespace and lowercases ASCII letters.
/// Inner spaces are kept: multi-syllable codes such as `ni hao` stay distinct
/// from `nihao`.
pub fn normalize_code(code: &str) -> String {
    let normalized: String = code.nfkc().collect();
    normalized.trim().to_ascii_lowercase()
}
