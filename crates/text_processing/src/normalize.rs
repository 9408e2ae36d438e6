//! Text normalization
//!
//! Every classifier in this crate expects text that has already been through
//! [`normalize`]. Classifiers never re-normalize, so callers normalize once
//! per message and pass the result around.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s']").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Apostrophe look-alikes folded to ASCII `'`
const APOSTROPHES: [char; 4] = ['\u{2018}', '\u{2019}', '\u{02BC}', '\u{FF07}'];

/// Canonical form of a raw message.
///
/// Order matters:
/// 1. compatibility decomposition, combining marks dropped, curly
///    apostrophes folded to `'`
/// 2. lowercase
/// 3. anything that is not a word character, whitespace or apostrophe
///    becomes a space
/// 4. whitespace runs collapse to one space
/// 5. trim
pub fn normalize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let decomposed: String = raw
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| if APOSTROPHES.contains(&c) { '\'' } else { c })
        .collect();

    // lowercasing can reintroduce marks (`İ` -> `i̇`)
    let lowered: String = decomposed
        .to_lowercase()
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect();
    let stripped = NON_WORD.replace_all(&lowered, " ");
    let collapsed = WHITESPACE.replace_all(&stripped, " ");
    collapsed.trim().to_string()
}

/// Number of words in already-normalized text
pub fn word_count(normalized: &str) -> usize {
    normalized.unicode_words().count()
}
