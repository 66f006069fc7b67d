//! HTML text utilities.
//!
//! - `escape_attr()` - attribute value escaping (entity-aware)
//! - `AttrSet` - ordered attribute mapping with parse/serialize round trip

mod attrs;

pub use attrs::AttrSet;

use std::borrow::Cow;

/// Characters that require escaping inside attribute values.
const ESCAPE_CHARS: [char; 5] = ['<', '>', '&', '"', '\''];

/// Get the HTML entity for a special character.
#[inline]
fn escape_char(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        _ => None,
    }
}

/// Escape HTML attribute values.
///
/// Uses `Cow` to avoid allocation when no escaping is needed.
///
/// Existing character entities are passed through verbatim rather than
/// double-encoded: attribute values arrive from markup that already went
/// through an encoder, and `src="a&amp;b"` must round-trip as
/// `data-lazy-src="a&amp;b"`, not `a&amp;amp;b`.
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    if !s.contains(ESCAPE_CHARS) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len());
    let bytes = s.as_bytes();
    for (i, c) in s.char_indices() {
        if c == '&' && is_entity_start(&bytes[i + 1..]) {
            result.push('&');
            continue;
        }
        match escape_char(c) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Check whether `rest` (the bytes after a `&`) begins with an
/// entity-shaped sequence: up to 10 name characters followed by `;`.
fn is_entity_start(rest: &[u8]) -> bool {
    for (i, &b) in rest.iter().take(11).enumerate() {
        match b {
            b';' => return i > 0,
            b'#' | b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' => {}
            _ => return false,
        }
    }
    false
}
