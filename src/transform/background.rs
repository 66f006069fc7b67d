//! Inline background-style rewriter.
//!
//! Scans content for `style` attributes carrying a `background` or
//! `background-image` declaration with a `url(...)` clause, strips the
//! clause, and records the URL in a `data-lazy-background` attribute
//! placed ahead of the style attribute so the client runtime can restore
//! it on proximity.
//!
//! To exclude an element, add the literal `lazy-load-disable` anywhere in
//! its style attribute.

use std::sync::LazyLock;

use regex::Regex;

use crate::html::escape_attr;

/// Matches the leading part of a `style` attribute up to and including
/// the first `background[-image]: ... url(...)` clause. The `css` group
/// captures the exact `url(...)` text to strip; `image` its payload.
static RE_BACKGROUND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\bstyle=['"].*?\s?background(?:-image)?\s*:.*?(?<css>url\s?\(\s*(?<image>[^)]*?)\s*\))"#,
    )
    .unwrap()
});

/// Idempotence marker: content containing this has already been rewritten.
pub const BACKGROUND_MARKER: &str = "data-lazy-background";

/// Per-element opt-out: literal substring inside a style attribute value.
pub const DISABLE_TOKEN: &str = "lazy-load-disable";

/// Rewrite every eligible inline background declaration in `content`.
///
/// Matches are collected against the original string and each one is
/// applied by exact substring replacement of the matched text, so earlier
/// substitutions never invalidate later matches.
pub fn add_background_placeholders(content: &str) -> String {
    // Don't lazy-load if the content has already been run through previously
    if content.contains(BACKGROUND_MARKER) {
        return content.to_string();
    }

    let mut out = content.to_string();
    for caps in RE_BACKGROUND.captures_iter(content) {
        let whole = &caps[0];
        if whole.contains(DISABLE_TOKEN) {
            continue;
        }

        let css = &caps["css"];
        let image = trim_url_quotes(&caps["image"]);

        let bg_less = whole.replace(css, "");
        let replacement = format!("data-lazy-background=\"{}\" {}", escape_attr(image), bg_less);
        out = out.replace(whole, &replacement);
    }

    out
}

/// Trim a matching single- or double-quote pair around a `url()` payload.
fn trim_url_quotes(s: &str) -> &str {
    let s = s.trim();
    let bytes = s.as_bytes();
    if s.len() >= 2 {
        let (first, last) = (bytes[0], bytes[s.len() - 1]);
        if (first == b'\'' && last == b'\'') || (first == b'"' && last == b'"') {
            return &s[1..s.len() - 1];
        }
    }
    s
}
