//! Tag name to element factory lookup.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::NavError;
use crate::registration::{ElementFactory, registered_elements};

/// Names HTML reserves even though they contain a hyphen.
const RESERVED_NAMES: &[&str] = &[
    "annotation-xml",
    "color-profile",
    "font-face",
    "font-face-src",
    "font-face-uri",
    "font-face-format",
    "font-face-name",
    "missing-glyph",
];

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-z][a-z0-9._]*-[a-z0-9._-]*$").expect("Invalid regex pattern")
    })
}

/// Whether `tag` may be used as a custom element name: lowercase, starting
/// with a letter, containing a hyphen and not reserved.
pub fn is_valid_tag(tag: &str) -> bool {
    name_pattern().is_match(tag) && !RESERVED_NAMES.contains(&tag)
}

/// Registry of custom element definitions.
#[derive(Clone, Default)]
pub struct CustomElementRegistry {
    definitions: BTreeMap<String, ElementFactory>,
}

impl fmt::Debug for CustomElementRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.definitions.keys()).finish()
    }
}

impl CustomElementRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every element submitted through inventory.
    ///
    /// Invalid or duplicate registrations are logged and skipped.
    pub fn from_inventory() -> Self {
        let mut registry = Self::new();
        for registration in registered_elements() {
            if let Err(err) = registry.define(registration.tag, registration.factory) {
                log::warn!("skipping element registration: {err}");
            }
        }
        registry
    }

    /// The process-wide registry, built from inventory on first use.
    pub fn global() -> &'static CustomElementRegistry {
        static REGISTRY: OnceLock<CustomElementRegistry> = OnceLock::new();
        REGISTRY.get_or_init(Self::from_inventory)
    }

    /// Define `tag`.
    pub fn define(&mut self, tag: &str, factory: ElementFactory) -> Result<(), NavError> {
        if !is_valid_tag(tag) {
            return Err(NavError::InvalidTagName(tag.to_string()));
        }
        if self.definitions.contains_key(tag) {
            return Err(NavError::AlreadyDefined(tag.to_string()));
        }
        log::debug!("defined custom element <{tag}>");
        self.definitions.insert(tag.to_string(), factory);
        Ok(())
    }

    /// Look up the factory for `tag`. Tags are matched case-insensitively.
    pub fn get(&self, tag: &str) -> Option<ElementFactory> {
        self.definitions.get(&tag.to_ascii_lowercase()).copied()
    }

    pub fn is_defined(&self, tag: &str) -> bool {
        self.get(tag).is_some()
    }

    /// Defined tags, sorted.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::CustomElement;

    #[derive(Default)]
    struct Plain;

    impl CustomElement for Plain {}

    fn plain() -> Box<dyn CustomElement> {
        Box::new(Plain)
    }

    #[test]
    fn test_tag_validation() {
        assert!(is_valid_tag("site-navigation"));
        assert!(is_valid_tag("x-"));
        assert!(is_valid_tag("my-el.v2"));
        assert!(!is_valid_tag("navigation"));
        assert!(!is_valid_tag("Site-Navigation"));
        assert!(!is_valid_tag("-nav"));
        assert!(!is_valid_tag("1-nav"));
        assert!(!is_valid_tag("font-face"));
    }

    #[test]
    fn test_define_rejects_duplicates_and_bad_names() {
        let mut registry = CustomElementRegistry::new();
        assert!(registry.define("plain-element", plain).is_ok());
        assert_eq!(
            registry.define("plain-element", plain),
            Err(NavError::AlreadyDefined("plain-element".into()))
        );
        assert_eq!(
            registry.define("plain", plain),
            Err(NavError::InvalidTagName("plain".into()))
        );
        assert!(registry.is_defined("PLAIN-ELEMENT"));
        assert_eq!(registry.tags().collect::<Vec<_>>(), vec!["plain-element"]);
    }

    #[test]
    fn test_global_registry_contains_site_navigation() {
        assert!(CustomElementRegistry::global().is_defined("site-navigation"));
    }
}
