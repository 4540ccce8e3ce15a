//! Log helpers for player- and model-supplied text.
//!
//! Guesses and generated clues can contain newlines or control characters; [`escape_log`]
//! folds them into a single readable line and caps the length.

use std::fmt::Write;

const MAX_PREVIEW: usize = 160;

/// Render `s` as one log line: backslash, `\n`, `\r` and `\t` are escaped, other control
/// characters become `\xNN`, and anything past [`MAX_PREVIEW`] characters is cut with `…`.
pub fn escape_log(s: &str) -> String {
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 4);
    let mut chars = s.chars();
    for ch in chars.by_ref().take(MAX_PREVIEW) {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    if chars.next().is_some() {
        out.push('…');
    }
    out
}
