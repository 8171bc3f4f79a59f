//! Slug derivation
//!
//! A slug is the URL-safe identifier derived from a tour's display name:
//! lowercased, diacritics folded to their ASCII base letter, and every run
//! of non-alphanumeric characters collapsed into a single `-`.

use std::sync::OnceLock;

use regex::Regex;

static NON_ALPHANUMERIC: OnceLock<Regex> = OnceLock::new();

/// Derive a slug from a display name.
///
/// `"The Forest Hiker"` becomes `"the-forest-hiker"`.
pub fn slugify(name: &str) -> String {
    let folded: String = name.chars().map(fold_diacritic).collect();
    let lowered = folded.to_lowercase();

    let separator = NON_ALPHANUMERIC.get_or_init(|| Regex::new(r"[^a-z0-9]+").unwrap());
    separator
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Fold common Latin diacritics to their base ASCII letter.
///
/// Characters outside the table pass through unchanged and are later
/// collapsed into separators if they are not alphanumeric.
fn fold_diacritic(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'a',
        'ç' | 'Ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' | 'È' | 'É' | 'Ê' | 'Ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' | 'Ì' | 'Í' | 'Î' | 'Ï' => 'i',
        'ñ' | 'Ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' => 'o',
        'ù' | 'ú' | 'û' | 'ü' | 'Ù' | 'Ú' | 'Û' | 'Ü' => 'u',
        'ý' | 'ÿ' | 'Ý' => 'y',
        other => other,
    }
}
