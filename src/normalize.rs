//! Text cleanup applied to extracted titles and bodies.

use once_cell::sync::Lazy;
use regex::Regex;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\p{L}\p{N}_\s]").unwrap());
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Strip punctuation, collapse whitespace runs to one space and trim.
///
/// Letters and numbers from any script survive, as do `_` and whitespace.
/// Everything else is removed, combining marks included: a decomposed
/// accent or an Indic vowel sign goes the same way as punctuation.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize("  Hello, World!!  "), "Hello World");
/// ```
pub fn normalize(text: &str) -> String {
    let stripped = NON_WORD.replace_all(text, "");
    WHITESPACE_RUN.replace_all(&stripped, " ").trim().to_string()
}
