//! Client loader runtime.
//!
//! Discovers deferred elements on a page, registers each with an external
//! proximity capability, and on trigger performs a one-time attribute
//! swap that materializes the real resource.
//!
//! Per-element state machine: Deferred -> Materializing -> Loaded. An
//! element is Deferred while it carries `data-lazy-src` or
//! `data-lazy-background` without `data-lazy-loaded`; the Loaded state is
//! terminal and marked by `data-lazy-loaded="true"`.

mod page;

pub use page::{Element, ElementId, Page};

use rustc_hash::FxHashMap;

use crate::config::LoaderConfig;
use crate::transform::{BACKGROUND_MARKER, IMAGE_MARKER};

/// Terminal-state marker: the element has been materialized.
pub const LOADED_MARKER: &str = "data-lazy-loaded";

/// Class forcing immediate synchronous materialization at discovery time,
/// for images nested in widgets that cannot tolerate deferral.
pub const EXCLUDE_CLASS: &str = "exclude-lazy-load";

/// External viewport-intersection capability.
///
/// The runtime asks to be notified when an element's bounding box comes
/// within `distance` pixels of the viewport; the host delivers each
/// notification by calling [`LazyLoader::on_proximity`].
pub trait ProximityObserver {
    fn observe(&mut self, target: ElementId, distance: u32);
    fn unobserve(&mut self, target: ElementId);
}

/// What a watch registration will materialize when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WatchKind {
    Image,
    Background,
}

/// Discovery verdict for a single element.
enum Discovery {
    Skip,
    ForceImage,
    Watch(WatchKind),
}

/// Watches deferred elements and materializes each at most once.
pub struct LazyLoader {
    config: LoaderConfig,
    /// Live watch registrations. An entry exists exactly while the
    /// element is Deferred and subscribed; it is removed the instant the
    /// trigger fires, which is what bounds every registration to a
    /// single materialization.
    watched: FxHashMap<ElementId, WatchKind>,
}

impl LazyLoader {
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            config,
            watched: FxHashMap::default(),
        }
    }

    /// Discover deferred elements and subscribe them to proximity
    /// notifications.
    ///
    /// Re-entrant and idempotent: safe to call again after content is
    /// appended (infinite-scroll style). Already-subscribed and
    /// already-loaded elements are left alone; images carrying the
    /// exclusion class materialize immediately instead of waiting.
    pub fn scan(&mut self, page: &mut Page, observer: &mut dyn ProximityObserver) {
        for id in page.ids() {
            match self.discover(page, id) {
                Discovery::Skip => {}
                Discovery::ForceImage => {
                    if self.watched.remove(&id).is_some() {
                        observer.unobserve(id);
                    }
                    materialize_image(page, id);
                }
                Discovery::Watch(kind) => {
                    let distance = match kind {
                        WatchKind::Image => self.config.distance,
                        WatchKind::Background => self.config.distance_bg,
                    };
                    self.watched.insert(id, kind);
                    observer.observe(id, distance);
                }
            }
        }
    }

    fn discover(&self, page: &Page, id: ElementId) -> Discovery {
        let Some(el) = page.get(id) else {
            return Discovery::Skip;
        };
        if el.attr(LOADED_MARKER).is_some() {
            return Discovery::Skip;
        }
        if el.tag() == "img" && el.has_class(EXCLUDE_CLASS) {
            return Discovery::ForceImage;
        }
        if self.watched.contains_key(&id) {
            return Discovery::Skip;
        }
        if el.tag() == "img" && el.attr(IMAGE_MARKER).is_some() {
            return Discovery::Watch(WatchKind::Image);
        }
        if el.attr(BACKGROUND_MARKER).is_some() {
            return Discovery::Watch(WatchKind::Background);
        }
        Discovery::Skip
    }

    /// Handle a proximity notification for `id`.
    ///
    /// The registration is consumed before anything else happens, so a
    /// burst of notifications for the same element performs exactly one
    /// swap; the rest are no-ops.
    pub fn on_proximity(
        &mut self,
        page: &mut Page,
        id: ElementId,
        observer: &mut dyn ProximityObserver,
    ) {
        let Some(kind) = self.watched.remove(&id) else {
            return;
        };
        observer.unobserve(id);

        match kind {
            WatchKind::Image => materialize_image(page, id),
            WatchKind::Background => materialize_background(page, id),
        }
    }

    /// Whether `id` currently holds a live watch registration.
    pub fn is_watched(&self, id: ElementId) -> bool {
        self.watched.contains_key(&id)
    }

    pub fn watch_count(&self) -> usize {
        self.watched.len()
    }
}

/// Swap placeholder attributes for the real image source.
///
/// A missing or empty `data-lazy-src` aborts with no action; that guards
/// against double-processing and malformed markup.
fn materialize_image(page: &mut Page, id: ElementId) {
    let Some(el) = page.get_mut(id) else { return };

    let Some(src) = el
        .attr(IMAGE_MARKER)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
    else {
        return;
    };
    let srcset = el.remove_attr("data-lazy-srcset").filter(|s| !s.is_empty());
    let sizes = el.remove_attr("data-lazy-sizes").filter(|s| !s.is_empty());

    el.hide();
    el.remove_attr(IMAGE_MARKER);
    el.set_attr(LOADED_MARKER, "true");

    el.set_attr("src", src);
    if let Some(srcset) = srcset {
        el.set_attr("srcset", srcset);
    }
    if let Some(sizes) = sizes {
        el.set_attr("sizes", sizes);
    }
    // Reveal; the host maps this to its fade-in transition
    el.reveal();
}

/// Apply the deferred URL as the element's background-image style.
fn materialize_background(page: &mut Page, id: ElementId) {
    let Some(el) = page.get_mut(id) else { return };

    let Some(src) = el.remove_attr(BACKGROUND_MARKER) else {
        return;
    };
    el.set_attr(LOADED_MARKER, "true");
    el.set_background_image(format!("url({src})"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::AttrSet;

    /// Test double for the proximity capability: records every
    /// subscription and unsubscription.
    #[derive(Default)]
    struct RecordingObserver {
        observed: Vec<(ElementId, u32)>,
        unobserved: Vec<ElementId>,
    }

    impl ProximityObserver for RecordingObserver {
        fn observe(&mut self, target: ElementId, distance: u32) {
            self.observed.push((target, distance));
        }

        fn unobserve(&mut self, target: ElementId) {
            self.unobserved.push(target);
        }
    }

    fn deferred_img(attr_text: &str) -> Element {
        Element::with_attrs("img", AttrSet::parse(attr_text))
    }

    fn setup() -> (LazyLoader, RecordingObserver) {
        (
            LazyLoader::new(LoaderConfig::default()),
            RecordingObserver::default(),
        )
    }

    #[test]
    fn test_scan_registers_with_configured_distances() {
        let (mut loader, mut observer) = setup();
        let mut page = Page::new();
        let img = page.push(deferred_img(r#"src="p.gif" data-lazy-src="real.jpg""#));
        let bg = page.push(Element::with_attrs(
            "div",
            AttrSet::parse(r#"data-lazy-background="bg.png""#),
        ));
        // Not deferred: no markers
        page.push(Element::with_attrs("img", AttrSet::parse(r#"src="plain.jpg""#)));

        loader.scan(&mut page, &mut observer);

        assert_eq!(observer.observed, vec![(img, 200), (bg, 300)]);
        assert!(loader.is_watched(img));
        assert!(loader.is_watched(bg));
        assert_eq!(loader.watch_count(), 2);
    }

    #[test]
    fn test_image_materialization() {
        let (mut loader, mut observer) = setup();
        let mut page = Page::new();
        let id = page.push(deferred_img(concat!(
            r#"src="p.gif" data-lazy-src="real.jpg" "#,
            r#"data-lazy-srcset="real-2x.jpg 2x" data-lazy-sizes="100vw" alt="x""#,
        )));

        loader.scan(&mut page, &mut observer);
        loader.on_proximity(&mut page, id, &mut observer);

        let el = page.get(id).unwrap();
        assert_eq!(el.attr("src"), Some("real.jpg"));
        assert_eq!(el.attr("srcset"), Some("real-2x.jpg 2x"));
        assert_eq!(el.attr("sizes"), Some("100vw"));
        assert_eq!(el.attr(LOADED_MARKER), Some("true"));
        assert_eq!(el.attr(IMAGE_MARKER), None);
        assert_eq!(el.attr("data-lazy-srcset"), None);
        assert_eq!(el.attr("data-lazy-sizes"), None);
        assert_eq!(el.attr("alt"), Some("x"));
        assert!(!el.is_hidden());
        assert_eq!(observer.unobserved, vec![id]);
    }

    #[test]
    fn test_background_materialization() {
        let (mut loader, mut observer) = setup();
        let mut page = Page::new();
        let id = page.push(Element::with_attrs(
            "div",
            AttrSet::parse(r#"data-lazy-background="bg.png" style="color:red""#),
        ));

        loader.scan(&mut page, &mut observer);
        loader.on_proximity(&mut page, id, &mut observer);

        let el = page.get(id).unwrap();
        assert_eq!(el.background_image(), Some("url(bg.png)"));
        assert_eq!(el.attr(BACKGROUND_MARKER), None);
        assert_eq!(el.attr(LOADED_MARKER), Some("true"));
    }

    #[test]
    fn test_trigger_is_exactly_once() {
        let (mut loader, mut observer) = setup();
        let mut page = Page::new();
        let id = page.push(deferred_img(r#"src="p.gif" data-lazy-src="real.jpg""#));

        loader.scan(&mut page, &mut observer);

        // Burst of notifications before the unsubscribe lands host-side
        for _ in 0..5 {
            loader.on_proximity(&mut page, id, &mut observer);
        }

        let el = page.get(id).unwrap();
        assert_eq!(el.attr("src"), Some("real.jpg"));
        // Only the first trigger consumed the registration
        assert_eq!(observer.unobserved, vec![id]);
        assert!(!loader.is_watched(id));
    }

    #[test]
    fn test_scan_is_reentrant() {
        let (mut loader, mut observer) = setup();
        let mut page = Page::new();
        let a = page.push(deferred_img(r#"src="p.gif" data-lazy-src="a.jpg""#));

        loader.scan(&mut page, &mut observer);
        // Second discovery pass: nothing new, no re-subscription
        loader.scan(&mut page, &mut observer);
        assert_eq!(observer.observed.len(), 1);

        // Materialize, then append new content and rescan
        loader.on_proximity(&mut page, a, &mut observer);
        let b = page.push(deferred_img(r#"src="p.gif" data-lazy-src="b.jpg""#));
        loader.scan(&mut page, &mut observer);

        // Loaded element is not re-subscribed; the appended one is
        assert_eq!(observer.observed, vec![(a, 200), (b, 200)]);
        assert!(!loader.is_watched(a));
        assert!(loader.is_watched(b));
    }

    #[test]
    fn test_exclusion_class_loads_immediately() {
        let (mut loader, mut observer) = setup();
        let mut page = Page::new();
        let id = page.push(deferred_img(
            r#"class="exclude-lazy-load" src="p.gif" data-lazy-src="real.jpg""#,
        ));

        loader.scan(&mut page, &mut observer);

        let el = page.get(id).unwrap();
        assert_eq!(el.attr("src"), Some("real.jpg"));
        assert_eq!(el.attr(LOADED_MARKER), Some("true"));
        // Never entered the Deferred state
        assert!(observer.observed.is_empty());
        assert_eq!(loader.watch_count(), 0);
    }

    #[test]
    fn test_empty_lazy_src_aborts() {
        let (mut loader, mut observer) = setup();
        let mut page = Page::new();
        let id = page.push(deferred_img(r#"src="p.gif" data-lazy-src="""#));

        loader.scan(&mut page, &mut observer);
        assert!(loader.is_watched(id));

        loader.on_proximity(&mut page, id, &mut observer);

        // Transition aborted: no swap, no loaded marker
        let el = page.get(id).unwrap();
        assert_eq!(el.attr("src"), Some("p.gif"));
        assert_eq!(el.attr(LOADED_MARKER), None);
        // The registration is still consumed
        assert!(!loader.is_watched(id));
    }

    #[test]
    fn test_untriggered_elements_stay_deferred() {
        let (mut loader, mut observer) = setup();
        let mut page = Page::new();
        let id = page.push(deferred_img(r#"src="p.gif" data-lazy-src="real.jpg""#));

        loader.scan(&mut page, &mut observer);

        // No proximity event ever arrives: genuinely off-screen
        let el = page.get(id).unwrap();
        assert_eq!(el.attr("src"), Some("p.gif"));
        assert_eq!(el.attr(IMAGE_MARKER), Some("real.jpg"));
        assert!(loader.is_watched(id));
    }

    #[test]
    fn test_notification_for_unknown_element_is_ignored() {
        let (mut loader, mut observer) = setup();
        let mut page = Page::new();
        let id = page.push(deferred_img(r#"src="p.gif" data-lazy-src="real.jpg""#));

        // Never scanned, so no registration exists
        loader.on_proximity(&mut page, id, &mut observer);

        assert_eq!(page.get(id).unwrap().attr("src"), Some("p.gif"));
        assert!(observer.unobserved.is_empty());
    }

    #[test]
    fn test_materialization_order_follows_trigger_order() {
        let (mut loader, mut observer) = setup();
        let mut page = Page::new();
        let a = page.push(deferred_img(r#"src="p.gif" data-lazy-src="a.jpg""#));
        let b = page.push(deferred_img(r#"src="p.gif" data-lazy-src="b.jpg""#));

        loader.scan(&mut page, &mut observer);

        // b crosses the threshold first
        loader.on_proximity(&mut page, b, &mut observer);
        assert_eq!(page.get(b).unwrap().attr("src"), Some("b.jpg"));
        assert_eq!(page.get(a).unwrap().attr("src"), Some("p.gif"));

        loader.on_proximity(&mut page, a, &mut observer);
        assert_eq!(page.get(a).unwrap().attr("src"), Some("a.jpg"));
        assert_eq!(observer.unobserved, vec![b, a]);
    }
}
