//! End-to-end wire contract: content transformed on the server side must
//! materialize correctly in the client loader runtime.

use lazyload::config::{LoaderConfig, TransformConfig};
use lazyload::html::AttrSet;
use lazyload::loader::{Element, ElementId, LazyLoader, Page, ProximityObserver};
use lazyload::transform::{AreaContext, ContentTransformer};

#[derive(Default)]
struct NullObserver;

impl ProximityObserver for NullObserver {
    fn observe(&mut self, _target: ElementId, _distance: u32) {}
    fn unobserve(&mut self, _target: ElementId) {}
}

/// Pull the attribute text out of the first deferred `<img ...>` in a
/// transformed fragment (everything before the noscript fallback).
fn deferred_img_attrs(html: &str) -> AttrSet {
    let start = html.find("<img ").expect("no img tag") + "<img ".len();
    let end = html[start..].find('>').expect("unterminated tag") + start;
    AttrSet::parse(&html[start..end])
}

#[test]
fn transformed_image_materializes_with_original_sources() {
    let transformer = ContentTransformer::new(TransformConfig {
        placeholder_image: "spacer.gif".to_string(),
        ..TransformConfig::default()
    });

    let html = transformer.transform(
        r#"<img src="hero.jpg" srcset="hero-2x.jpg 2x" sizes="100vw" alt="hero">"#,
        AreaContext::Eligible,
    );

    // Deliver the transformed markup to a "page" and run the client side
    let mut page = Page::new();
    let id = page.push(Element::with_attrs("img", deferred_img_attrs(&html)));

    let mut loader = LazyLoader::new(LoaderConfig::default());
    let mut observer = NullObserver;
    loader.scan(&mut page, &mut observer);

    // Still deferred: placeholder in place
    assert_eq!(page.get(id).unwrap().attr("src"), Some("spacer.gif"));

    loader.on_proximity(&mut page, id, &mut observer);

    let el = page.get(id).unwrap();
    assert_eq!(el.attr("src"), Some("hero.jpg"));
    assert_eq!(el.attr("srcset"), Some("hero-2x.jpg 2x"));
    assert_eq!(el.attr("sizes"), Some("100vw"));
    assert_eq!(el.attr("alt"), Some("hero"));
    assert_eq!(el.attr("data-lazy-loaded"), Some("true"));
}

#[test]
fn transformed_background_materializes_with_original_url() {
    let transformer = ContentTransformer::new(TransformConfig::default());
    let html = transformer.transform(
        r#"<div style="background-image:url('banner.png')">x</div>"#,
        AreaContext::Eligible,
    );

    // The rewriter put data-lazy-background ahead of the style attribute
    let start = html.find("<div ").unwrap() + "<div ".len();
    let end = html[start..].find('>').unwrap() + start;
    let attrs = AttrSet::parse(&html[start..end]);

    let mut page = Page::new();
    let id = page.push(Element::with_attrs("div", attrs));

    let mut loader = LazyLoader::new(LoaderConfig::default());
    let mut observer = NullObserver;
    loader.scan(&mut page, &mut observer);
    loader.on_proximity(&mut page, id, &mut observer);

    let el = page.get(id).unwrap();
    assert_eq!(el.background_image(), Some("url(banner.png)"));
    assert_eq!(el.attr("data-lazy-background"), None);
}
