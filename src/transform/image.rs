//! `<img>` tag rewriter.
//!
//! Scans content for image tags and rewrites each one to load lazily:
//! the real `src` moves into `data-lazy-src` (likewise `srcset`/`sizes`),
//! a placeholder takes its place, and the original tag is kept verbatim
//! inside a `<noscript>` fallback so the image still renders without the
//! client runtime.
//!
//! To disable a particular image, add a `data-lazy-disable` attribute.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::html::AttrSet;

/// Matches an `<img ...>` tag: self-closing, bare, or with a body and
/// closing tag. Deliberately simple; inputs are well-formed fragments,
/// not arbitrary documents.
static RE_IMG_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<img\b([^>]*?)(>.*?</img>|/?>)").unwrap());

/// Idempotence marker: content containing this has already been rewritten.
pub const IMAGE_MARKER: &str = "data-lazy-src";

/// Rewrite every eligible `<img>` tag in `content` to defer loading.
///
/// Returns the content unchanged when it already carries the marker.
/// Individual tags degrade to "unmodified" rather than being dropped.
pub fn add_image_placeholders(content: &str, placeholder: &str) -> String {
    // Don't lazy-load if the content has already been run through previously
    if content.contains(IMAGE_MARKER) {
        return content.to_string();
    }

    RE_IMG_TAG
        .replace_all(content, |caps: &Captures| {
            let whole = &caps[0];
            process_image(whole, &caps[1], placeholder).unwrap_or_else(|| whole.to_string())
        })
        .into_owned()
}

/// Build the deferred replacement for one matched tag.
///
/// Returns `None` when the tag must be left untouched: per-tag opt-out,
/// or no `src` to defer.
fn process_image(whole: &str, attr_text: &str, placeholder: &str) -> Option<String> {
    let old_attrs = AttrSet::parse(attr_text);

    // Skip any image with a 'data-lazy-disable' attribute
    if old_attrs.contains("data-lazy-disable") {
        return None;
    }

    let src = old_attrs.get("src").filter(|s| !s.is_empty())?.to_string();

    let mut new_attrs = old_attrs.clone();

    // Set placeholder and lazy-src
    new_attrs.set("src", placeholder);
    new_attrs.set("data-lazy-src", src);

    // Handle `srcset`
    if let Some(srcset) = old_attrs.get("srcset").filter(|s| !s.is_empty()) {
        let srcset = srcset.to_string();
        new_attrs.remove("srcset");
        new_attrs.set("data-lazy-srcset", srcset);
    }

    // Handle `sizes`
    if let Some(sizes) = old_attrs.get("sizes").filter(|s| !s.is_empty()) {
        let sizes = sizes.to_string();
        new_attrs.remove("sizes");
        new_attrs.set("data-lazy-sizes", sizes);
    }

    Some(format!(
        "<img {}><noscript>{}</noscript>",
        new_attrs.serialize(),
        whole
    ))
}
