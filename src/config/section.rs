//! `[transform]` and `[loader]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [transform]
//! enabled = true                  # Master switch for the content rewrites
//! background_support = true       # Also defer inline background images
//! placeholder_image = "spacer.gif"
//!
//! [loader]
//! distance = 200                  # Proximity threshold for <img> (px)
//! distance_bg = 300               # Proximity threshold for backgrounds (px)
//! ```

use serde::{Deserialize, Serialize};

/// 1x1 transparent GIF, inlined so the placeholder never costs a request.
pub const DEFAULT_PLACEHOLDER: &str =
    "data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7";

/// Server-side transform settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Master switch. When off the pipeline returns content unchanged.
    pub enabled: bool,

    /// Also rewrite `style="background[-image]: url(...)"` declarations.
    pub background_support: bool,

    /// Inert image assigned as `src` to hold layout space until the real
    /// image loads.
    pub placeholder_image: String,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            background_support: true,
            placeholder_image: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

/// Client loader runtime settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Distance from the viewport (px) at which images materialize.
    pub distance: u32,

    /// Distance from the viewport (px) at which backgrounds materialize.
    pub distance_bg: u32,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            distance: 200,
            distance_bg: 300,
        }
    }
}
