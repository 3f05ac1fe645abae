//! Text line normalization and path-segment encoding.
//!
//! Whitespace is always percent-encoded (`%20`); underscores are never
//! substituted for spaces.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Bytes left literal in a segment: alphanumerics plus `- . ! ~ * ' ( )`.
/// `_` is encoded so typed underscores never read as the blank sentinel.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Trims a text line; `None` when nothing is left.
pub fn normalize_line(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Percent-encodes `text` for use as a single URL path segment.
pub fn encode_segment(text: &str) -> String {
    utf8_percent_encode(text, SEGMENT).to_string()
}

/// Normalizes then encodes a text line, substituting `sentinel` for empty lines.
/// The sentinel is emitted verbatim.
pub fn text_segment(text: &str, sentinel: &str) -> String {
    match normalize_line(text) {
        Some(line) => encode_segment(line),
        None => sentinel.to_string(),
    }
}
