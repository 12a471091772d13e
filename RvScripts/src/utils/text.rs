//! Text normalization for script bodies

use std::borrow::Cow;

use crate::formats::ScriptContent;

/// Replace CRLF with LF until no CRLF pair is left (`\r\r\n` becomes `\n`).
pub fn replace_newlines(bytes: &[u8]) -> Cow<'_, [u8]> {
    if !bytes.windows(2).any(|w| w == b"\r\n") {
        return Cow::Borrowed(bytes);
    }
    let mut out = Vec::with_capacity(bytes.len());
    for &b in bytes {
        if b == b'\n' {
            while out.last() == Some(&b'\r') {
                out.pop();
            }
        }
        out.push(b);
    }
    Cow::Owned(out)
}

/// Normalize raw bytes to UTF-8 text with LF line endings.
///
/// Invalid UTF-8 is replaced with U+FFFD rather than rejected.
pub fn normalize_bytes(bytes: &[u8]) -> String {
    String::from_utf8_lossy(&replace_newlines(bytes)).into_owned()
}

/// Normalize script content; text that is already decoded is returned as is.
pub fn normalize_content(content: &ScriptContent) -> String {
    match content {
        ScriptContent::Bytes(bytes) => normalize_bytes(bytes),
        ScriptContent::Text(text) => text.clone(),
    }
}

/// Whether `c` ends a line: LF, CR, VT, FF, the file/group/record
/// separators, NEL and the Unicode line and paragraph separators.
pub fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Split text into lines on every [`is_line_break`] character, treating
/// `\r\n` as one break. A trailing break does not produce an empty last line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        lines.push(&text[start..i]);
        start = i + c.len_utf8();
        if c == '\r' && matches!(chars.peek(), Some((_, '\n'))) {
            chars.next();
            start += 1;
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}
