//! Custom element lifecycle hooks.
//!
//! A [`Page`](crate::Page) creates one instance per element whose tag is
//! registered, then calls the hooks below as the document reports
//! reactions. Hooks return errors instead of panicking; the page records
//! both as [`LifecycleError`](crate::LifecycleError)s.

use std::any::Any;
use std::fmt;

use hostdom::{Document, NodeId, Reaction};

use crate::error::NavError;

/// Which lifecycle hook is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    Created,
    Connected,
    Disconnected,
    AttributeChanged,
}

impl Hook {
    pub fn name(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
            Self::AttributeChanged => "attribute_changed",
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&Reaction> for Hook {
    fn from(reaction: &Reaction) -> Self {
        match reaction {
            Reaction::Created(_) => Self::Created,
            Reaction::Connected(_) => Self::Connected,
            Reaction::Disconnected(_) => Self::Disconnected,
            Reaction::AttributeChanged { .. } => Self::AttributeChanged,
        }
    }
}

/// What a hook gets to work with: the document and its own host node.
pub struct ElementContext<'a> {
    pub document: &'a mut Document,
    pub host: NodeId,
    pub tag: &'a str,
}

/// Downcasting support for type-erased elements.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Behavior attached to a custom element tag.
///
/// Register implementations with `#[custom_element(tag = "...")]`, which
/// requires `Default`.
pub trait CustomElement: AsAny {
    /// The element was created (or upgraded). Its subtree is complete.
    fn created(&mut self, _cx: &mut ElementContext<'_>) -> Result<(), NavError> {
        Ok(())
    }

    /// The element was inserted into the document.
    fn connected(&mut self, _cx: &mut ElementContext<'_>) -> Result<(), NavError> {
        Ok(())
    }

    /// The element was removed from the document.
    fn disconnected(&mut self, _cx: &mut ElementContext<'_>) -> Result<(), NavError> {
        Ok(())
    }

    /// An attribute of the host was added, changed or removed.
    fn attribute_changed(
        &mut self,
        _cx: &mut ElementContext<'_>,
        _name: &str,
        _old: Option<&str>,
        _new: Option<&str>,
    ) -> Result<(), NavError> {
        Ok(())
    }
}

/// Run the hook matching `reaction` on `element`.
pub(crate) fn run_hook(
    element: &mut dyn CustomElement,
    cx: &mut ElementContext<'_>,
    reaction: &Reaction,
) -> Result<(), NavError> {
    match reaction {
        Reaction::Created(_) => element.created(cx),
        Reaction::Connected(_) => element.connected(cx),
        Reaction::Disconnected(_) => element.disconnected(cx),
        Reaction::AttributeChanged { name, old, new, .. } => {
            element.attribute_changed(cx, name, old.as_deref(), new.as_deref())
        }
    }
}
