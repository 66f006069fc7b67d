//! Content pipeline (HTML fragment -> HTML fragment).
//!
//! Orchestrates the image-tag and background-style rewriters over a full
//! content string. Stateless: one transformer may serve concurrent calls
//! over independent content strings.

mod background;
mod image;

pub use background::{BACKGROUND_MARKER, DISABLE_TOKEN, add_background_placeholders};
pub use image::{IMAGE_MARKER, add_image_placeholders};

use crate::config::TransformConfig;

/// Rendering-area eligibility, decided by the host environment.
///
/// Feed views, previews, and restricted rendering modes are all host-side
/// reasons to pass `Ineligible`; the pipeline only consumes the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaContext {
    Eligible,
    Ineligible,
}

impl AreaContext {
    pub fn is_eligible(self) -> bool {
        matches!(self, Self::Eligible)
    }
}

/// Applies the deferred-loading rewrites to rendered content.
pub struct ContentTransformer {
    config: TransformConfig,
}

impl ContentTransformer {
    pub fn new(config: TransformConfig) -> Self {
        Self { config }
    }

    /// Transform a content string, deferring images and (when enabled)
    /// background images.
    ///
    /// Returns the input unchanged when the area is ineligible or lazy
    /// loading is globally disabled. Each rewriter carries its own
    /// idempotence guard, so re-transforming output is a no-op. Never
    /// fails: malformed fragments degrade to "unmodified".
    pub fn transform(&self, content: &str, area: AreaContext) -> String {
        if !area.is_eligible() || !self.config.enabled {
            return content.to_string();
        }

        let content = add_image_placeholders(content, &self.config.placeholder_image);

        if self.config.background_support {
            add_background_placeholders(&content)
        } else {
            content
        }
    }
}
