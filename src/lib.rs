//! Lazy load images and background images.
//!
//! Two halves, sharing one wire contract of `data-lazy-*` attributes:
//!
//! - [`transform`]: a server-side content filter that rewrites `<img>`
//!   tags and inline `background[-image]: url(...)` declarations, moving
//!   the real source into data attributes and substituting a placeholder.
//! - [`loader`]: the client-side runtime that watches marked elements
//!   through an external proximity capability and swaps the real resource
//!   back in, at most once per element, when it nears the viewport.
//!
//! ```
//! use lazyload::{AreaContext, ContentTransformer, TransformConfig};
//!
//! let transformer = ContentTransformer::new(TransformConfig::default());
//! let html = transformer.transform(r#"<img src="photo.jpg">"#, AreaContext::Eligible);
//! assert!(html.contains(r#"data-lazy-src="photo.jpg""#));
//! ```

pub mod cli;
pub mod config;
pub mod html;
pub mod loader;
pub mod logger;
pub mod transform;

pub use config::{LazyLoadConfig, LoaderConfig, TransformConfig};
pub use html::AttrSet;
pub use loader::{Element, ElementId, LazyLoader, Page, ProximityObserver};
pub use transform::{AreaContext, ContentTransformer};
