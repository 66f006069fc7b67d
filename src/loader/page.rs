//! Minimal page model the loader runtime operates on.
//!
//! The runtime has no real DOM; hosts mirror their document into this
//! arena (one `Element` per candidate node, addressed by `ElementId`) and
//! copy mutations back. Attribute storage reuses [`AttrSet`] so the
//! `data-lazy-*` wire contract is shared with the server-side transform.

use crate::html::AttrSet;

/// Stable handle to an element within a [`Page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

/// One page element: tag name, attributes, computed background style and
/// visibility.
#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    attrs: AttrSet,
    background_image: Option<String>,
    hidden: bool,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self::with_attrs(tag, AttrSet::new())
    }

    pub fn with_attrs(tag: &str, attrs: AttrSet) -> Self {
        Self {
            tag: tag.to_string(),
            attrs,
            background_image: None,
            hidden: false,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name)
    }

    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        self.attrs.set(name, value);
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.attrs.remove(name)
    }

    pub fn attrs(&self) -> &AttrSet {
        &self.attrs
    }

    /// Whitespace-separated lookup within the `class` attribute.
    pub fn has_class(&self, class: &str) -> bool {
        self.attrs
            .get("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    /// Computed background-image style, e.g. `url(foo.png)`.
    pub fn background_image(&self) -> Option<&str> {
        self.background_image.as_deref()
    }

    pub fn set_background_image(&mut self, css: String) {
        self.background_image = Some(css);
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn hide(&mut self) {
        self.hidden = true;
    }

    pub fn reveal(&mut self) {
        self.hidden = false;
    }
}

/// Flat arena of elements with stable ids.
#[derive(Debug, Default)]
pub struct Page {
    elements: Vec<Element>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: Element) -> ElementId {
        self.elements.push(element);
        ElementId(self.elements.len() - 1)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.0)
    }

    pub fn ids(&self) -> impl Iterator<Item = ElementId> + use<> {
        (0..self.elements.len()).map(ElementId)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
