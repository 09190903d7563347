//! Tests for #[custom_element] registration.

use sitenav::lifecycle::{CustomElement, ElementContext};
use sitenav::{CustomElementRegistry, NavError, Page};
use sitenav_derive::custom_element;

#[custom_element(tag = "x-counter")]
#[derive(Default)]
struct Counter {
    created: usize,
    connected: usize,
}

impl CustomElement for Counter {
    fn created(&mut self, _cx: &mut ElementContext<'_>) -> Result<(), NavError> {
        self.created += 1;
        Ok(())
    }

    fn connected(&mut self, _cx: &mut ElementContext<'_>) -> Result<(), NavError> {
        self.connected += 1;
        Ok(())
    }
}

#[test]
fn test_registered_through_inventory() {
    let registry = CustomElementRegistry::from_inventory();
    assert!(registry.is_defined("x-counter"));
    assert!(registry.is_defined("site-navigation"));
}

#[test]
fn test_page_instantiates_registered_element() {
    let mut page = Page::new();
    let node = page.mount(hostdom::Element::new("x-counter")).unwrap();

    let counter = page.instance::<Counter>(node).unwrap();
    assert_eq!((counter.created, counter.connected), (1, 1));
    assert!(page.lifecycle_errors().is_empty());
}
