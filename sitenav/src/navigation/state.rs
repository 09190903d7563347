//! Attribute-backed states of toggles and drawers.

use std::fmt;
use std::str::FromStr;

use hostdom::{Document, DomError, NodeId};

/// Whether a toggle's drawer is open, mirrored in `aria-expanded`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Expanded {
    Expanded,
    #[default]
    Collapsed,
}

impl Expanded {
    pub const ATTRIBUTE: &'static str = "aria-expanded";

    pub fn is_expanded(self) -> bool {
        self == Self::Expanded
    }

    /// Attribute value, `"true"` or `"false"`.
    pub fn as_attr(self) -> &'static str {
        match self {
            Self::Expanded => "true",
            Self::Collapsed => "false",
        }
    }

    /// Anything but `"true"` reads as collapsed.
    pub fn from_attr(value: Option<&str>) -> Self {
        match value {
            Some("true") => Self::Expanded,
            _ => Self::Collapsed,
        }
    }

    pub fn read(doc: &Document, toggle: NodeId) -> Self {
        Self::from_attr(doc.get_attribute(toggle, Self::ATTRIBUTE))
    }

    pub fn write(self, doc: &mut Document, toggle: NodeId) -> Result<(), DomError> {
        doc.set_attribute(toggle, Self::ATTRIBUTE, self.as_attr())
    }
}

impl From<bool> for Expanded {
    fn from(expanded: bool) -> Self {
        if expanded {
            Self::Expanded
        } else {
            Self::Collapsed
        }
    }
}

impl From<Visibility> for Expanded {
    fn from(visibility: Visibility) -> Self {
        Self::from(visibility.is_visible())
    }
}

/// Whether a drawer is shown. Hidden drawers carry the boolean `hidden`
/// attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

impl Visibility {
    pub const ATTRIBUTE: &'static str = "hidden";

    pub fn is_visible(self) -> bool {
        self == Self::Visible
    }

    pub fn from_open(open: bool) -> Self {
        if open { Self::Visible } else { Self::Hidden }
    }

    pub fn read(doc: &Document, drawer: NodeId) -> Self {
        if doc.has_attribute(drawer, Self::ATTRIBUTE) {
            Self::Hidden
        } else {
            Self::Visible
        }
    }

    pub fn write(self, doc: &mut Document, drawer: NodeId) -> Result<(), DomError> {
        doc.toggle_attribute(drawer, Self::ATTRIBUTE, Some(!self.is_visible()))?;
        Ok(())
    }
}

/// The action carried by a drawer notification.
///
/// Publishers send [`Open`](Self::Open) or [`Close`](Self::Close); the past
/// tense forms are accepted from older publishers and mean the same thing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawerAction {
    Open,
    Close,
    Opened,
    Closed,
}

impl DrawerAction {
    pub fn from_open(open: bool) -> Self {
        if open { Self::Open } else { Self::Close }
    }

    pub fn is_open(self) -> bool {
        matches!(self, Self::Open | Self::Opened)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Close => "close",
            Self::Opened => "opened",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for DrawerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DrawerAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "close" => Ok(Self::Close),
            "opened" => Ok(Self::Opened),
            "closed" => Ok(Self::Closed),
            other => Err(format!("unknown drawer action '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use hostdom::Element;

    use super::*;

    #[test]
    fn test_expanded_attribute_values() {
        assert_eq!(Expanded::from_attr(Some("true")), Expanded::Expanded);
        assert_eq!(Expanded::from_attr(Some("false")), Expanded::Collapsed);
        assert_eq!(Expanded::from_attr(Some("yes")), Expanded::Collapsed);
        assert_eq!(Expanded::from_attr(None), Expanded::Collapsed);
        assert_eq!(Expanded::from(Visibility::Hidden), Expanded::Collapsed);
        assert_eq!(Expanded::from(Visibility::Visible).as_attr(), "true");
    }

    #[test]
    fn test_visibility_round_trips_through_hidden() {
        let mut doc = Document::new();
        let drawer = doc.create(Element::ul());
        assert_eq!(Visibility::read(&doc, drawer), Visibility::Visible);

        Visibility::Hidden.write(&mut doc, drawer).unwrap();
        assert_eq!(doc.get_attribute(drawer, "hidden"), Some(""));
        Visibility::Hidden.write(&mut doc, drawer).unwrap();
        assert_eq!(Visibility::read(&doc, drawer), Visibility::Hidden);

        Visibility::Visible.write(&mut doc, drawer).unwrap();
        assert!(!doc.has_attribute(drawer, "hidden"));
    }

    #[test]
    fn test_drawer_action_tenses() {
        assert!(DrawerAction::Open.is_open());
        assert!(DrawerAction::Opened.is_open());
        assert!(!DrawerAction::Closed.is_open());
        assert_eq!("closed".parse::<DrawerAction>(), Ok(DrawerAction::Closed));
        assert!("shut".parse::<DrawerAction>().is_err());
        assert_eq!(DrawerAction::from_open(false).to_string(), "close");
    }
}
