//! Text normalization helpers for series and title comparison.
//!
//! Catalogs disagree on case, diacritics and punctuation; every comparison
//! of free-text names goes through the same normalization so that
//! "Marvel's Agents of S.H.I.E.L.D." and "marvels agents of shield" compare
//! equal.

use once_cell::sync::Lazy;
use regex_lite::Regex;

/// Similarity floor for near-identical names after normalization.
const FUZZY_THRESHOLD: f64 = 0.95;

static SYMBOLS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[?!.',/:\-]+").expect("symbol pattern"));
static SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ ]{2,}").expect("space pattern"));
static PARENTHETICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\([^)]*\)").expect("parenthetical pattern"));

/// Lowercased, ASCII-transliterated, punctuation-free form of a name.
pub fn normalize(s: &str) -> String {
    let ascii = deunicode::deunicode(s).to_lowercase();
    let stripped: String = ascii
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalization-insensitive equality with a small tolerance for spelling
/// drift between catalogs.
pub fn normalized_eq(a: &str, b: &str) -> bool {
    let na = normalize(a);
    let nb = normalize(b);
    if na.is_empty() || nb.is_empty() {
        return false;
    }
    if na == nb {
        return true;
    }
    strsim::jaro_winkler(&na, &nb) >= FUZZY_THRESHOLD
}

/// Condensed series form used for catalog index lookups: ASCII
/// transliteration, `&` replaced by `and`, the `?!.',/:-` symbols removed,
/// repeated spaces collapsed, lowercased.
pub fn condense_series(s: &str) -> String {
    let ascii = deunicode::deunicode(s);
    let anded = ascii.replace('&', "and");
    let symbol_free = SYMBOLS.replace_all(&anded, "");
    SPACES
        .replace_all(&symbol_free, " ")
        .trim()
        .to_lowercase()
}

/// Name with any parenthesized qualifier removed, e.g. `"Show Name (US)"`
/// becomes `"Show Name"`.
pub fn strip_qualifier(s: &str) -> String {
    PARENTHETICAL.replace_all(s, "").trim().to_string()
}
