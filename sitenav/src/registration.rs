//! Registration types for inventory-based auto-discovery.

use crate::lifecycle::CustomElement;

/// Factory creating a fresh element instance.
pub type ElementFactory = fn() -> Box<dyn CustomElement>;

/// Custom element registration entry for inventory.
///
/// Submitted by `#[custom_element(tag = "...")]`.
pub struct ElementRegistration {
    /// Tag name the element is defined for.
    pub tag: &'static str,
    /// Factory function to create an instance.
    pub factory: ElementFactory,
}

impl ElementRegistration {
    /// Create a new element registration.
    pub const fn new(tag: &'static str, factory: ElementFactory) -> Self {
        Self { tag, factory }
    }
}

inventory::collect!(ElementRegistration);

/// Get all registered elements.
pub fn registered_elements() -> impl Iterator<Item = &'static ElementRegistration> {
    inventory::iter::<ElementRegistration>()
}
