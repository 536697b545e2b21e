//! Text transforms for question display
//!
//! Question banks write exponents as `x^2`, `10^-3` or `m s^{-1}`. The terminal
//! has no markup, so exponents become superscript glyphs instead.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// `^{...}` grouped exponent
static BRACED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\^\{([^}]*)\}").unwrap());

/// `^2`, `^-3`, `^+1` with an ascii sign
static ASCII_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\^([+-]?\d+)").unwrap());

/// `^−3` with U+2212 MINUS SIGN; handled apart from the ascii hyphen
static UNICODE_MINUS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\^(\x{2212}\d+)").unwrap());

/// Replace exponent notation with superscript characters
pub fn superscript_exponents(text: &str) -> String {
    let text = BRACED_RE.replace_all(text, |caps: &Captures| superscript_or_keep(&caps[1]));
    let text = ASCII_RE.replace_all(&text, |caps: &Captures| superscript_or_keep(&caps[1]));
    UNICODE_MINUS_RE
        .replace_all(&text, |caps: &Captures| superscript_or_keep(&caps[1]))
        .into_owned()
}

/// Superscript the whole exponent, or fall back to `^(...)` if any character has no glyph
fn superscript_or_keep(exponent: &str) -> String {
    exponent
        .chars()
        .map(superscript_char)
        .collect::<Option<String>>()
        .unwrap_or_else(|| format!("^({})", exponent))
}

fn superscript_char(c: char) -> Option<char> {
    Some(match c {
        '0' => '\u{2070}',
        '1' => '\u{00B9}',
        '2' => '\u{00B2}',
        '3' => '\u{00B3}',
        '4' => '\u{2074}',
        '5' => '\u{2075}',
        '6' => '\u{2076}',
        '7' => '\u{2077}',
        '8' => '\u{2078}',
        '9' => '\u{2079}',
        '+' => '\u{207A}',
        '-' | '\u{2212}' => '\u{207B}',
        '=' => '\u{207C}',
        '(' => '\u{207D}',
        ')' => '\u{207E}',
        'n' => '\u{207F}',
        'i' => '\u{2071}',
        ' ' => ' ',
        _ => return None,
    })
}
