//! Toggle buttons: expanded state and optional swapped labels.

use hostdom::{Document, DomError, NodeId};

use crate::error::NavError;
use crate::navigation::state::{Expanded, Visibility};

/// Attributes naming the label shown while the drawer is open.
pub const OPENED_ATTRIBUTES: [&str; 2] = ["opened", "data-opened"];
/// Attributes naming the label shown while the drawer is closed.
pub const CLOSED_ATTRIBUTES: [&str; 2] = ["closed", "data-closed"];

/// Labels a toggle swaps between as its drawer opens and closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleLabels {
    pub opened: String,
    pub closed: String,
}

impl ToggleLabels {
    pub fn new(opened: impl Into<String>, closed: impl Into<String>) -> Self {
        Self {
            opened: opened.into(),
            closed: closed.into(),
        }
    }

    /// Read the label attributes off `toggle` and remove them.
    ///
    /// Both attributes are always stripped. Labels are only returned when
    /// both an opened and a closed label were present; the plain attribute
    /// wins over its `data-` form.
    pub fn take(doc: &mut Document, toggle: NodeId) -> Result<Option<Self>, DomError> {
        let opened = take_first(doc, toggle, &OPENED_ATTRIBUTES)?;
        let closed = take_first(doc, toggle, &CLOSED_ATTRIBUTES)?;
        match (opened, closed) {
            (Some(opened), Some(closed)) => Ok(Some(Self { opened, closed })),
            (None, None) => Ok(None),
            _ => {
                log::debug!("{toggle} has only one of its opened/closed labels, ignoring it");
                Ok(None)
            }
        }
    }

    pub fn for_state(&self, expanded: Expanded) -> &str {
        match expanded {
            Expanded::Expanded => &self.opened,
            Expanded::Collapsed => &self.closed,
        }
    }
}

fn take_first(
    doc: &mut Document,
    node: NodeId,
    names: &[&str],
) -> Result<Option<String>, DomError> {
    let mut found = None;
    for name in names {
        let value = doc.remove_attribute(node, name)?;
        if found.is_none() {
            found = value;
        }
    }
    Ok(found)
}

/// A toggle button wired to the drawer it controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggle {
    node: NodeId,
    controls: NodeId,
    labels: Option<ToggleLabels>,
}

impl Toggle {
    pub fn new(node: NodeId, controls: NodeId, labels: Option<ToggleLabels>) -> Self {
        Self {
            node,
            controls,
            labels,
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The drawer this toggle controls.
    pub fn controls(&self) -> NodeId {
        self.controls
    }

    pub fn labels(&self) -> Option<&ToggleLabels> {
        self.labels.as_ref()
    }

    pub fn state(&self, doc: &Document) -> Expanded {
        Expanded::read(doc, self.node)
    }
}

/// Write `aria-expanded` and, when labels are configured, the matching label.
pub fn set_toggle_state(
    doc: &mut Document,
    toggle: &Toggle,
    expanded: Expanded,
) -> Result<(), NavError> {
    expanded.write(doc, toggle.node)?;
    if let Some(labels) = &toggle.labels {
        doc.set_text_content(toggle.node, labels.for_state(expanded))?;
    }
    Ok(())
}

/// Bring a toggle back in line with its drawer's current visibility.
pub fn reset_toggle_state(doc: &mut Document, toggle: &Toggle) -> Result<(), NavError> {
    let visibility = Visibility::read(doc, toggle.controls);
    set_toggle_state(doc, toggle, visibility.into())
}

/// Current toggle state, derived from `aria-expanded`.
pub fn toggle_state(doc: &Document, toggle: &Toggle) -> Expanded {
    toggle.state(doc)
}

#[cfg(test)]
mod tests {
    use hostdom::Element;

    use super::*;

    fn create_pair(doc: &mut Document, toggle: Element) -> (NodeId, NodeId) {
        let item = doc.create(Element::li().children(vec![toggle, Element::ul().flag("hidden")]));
        let children = doc.element_children(item);
        (children[0], children[1])
    }

    #[test]
    fn test_take_strips_both_forms() {
        let mut doc = Document::new();
        let (button, _) = create_pair(
            &mut doc,
            Element::button("Menu")
                .attr("opened", "Hide")
                .attr("data-opened", "Hide me")
                .attr("data-closed", "Show"),
        );

        let labels = ToggleLabels::take(&mut doc, button).unwrap();
        assert_eq!(labels, Some(ToggleLabels::new("Hide", "Show")));
        for name in OPENED_ATTRIBUTES.iter().chain(&CLOSED_ATTRIBUTES) {
            assert!(!doc.has_attribute(button, name));
        }
    }

    #[test]
    fn test_single_label_is_stripped_and_ignored() {
        let mut doc = Document::new();
        let (button, _) = create_pair(&mut doc, Element::button("Menu").attr("opened", "Hide"));

        assert_eq!(ToggleLabels::take(&mut doc, button).unwrap(), None);
        assert!(!doc.has_attribute(button, "opened"));
    }

    #[test]
    fn test_set_and_reset_toggle_state() {
        let mut doc = Document::new();
        let (button, drawer) = create_pair(&mut doc, Element::button("Menu"));
        let toggle = Toggle::new(button, drawer, Some(ToggleLabels::new("Hide", "Show")));

        reset_toggle_state(&mut doc, &toggle).unwrap();
        assert_eq!(doc.get_attribute(button, "aria-expanded"), Some("false"));
        assert_eq!(doc.text_content(button), "Show");

        set_toggle_state(&mut doc, &toggle, Expanded::Expanded).unwrap();
        assert_eq!(toggle_state(&doc, &toggle), Expanded::Expanded);
        assert_eq!(doc.text_content(button), "Hide");
    }

    #[test]
    fn test_unlabelled_toggle_keeps_text() {
        let mut doc = Document::new();
        let (button, drawer) = create_pair(&mut doc, Element::button("Menu"));
        let toggle = Toggle::new(button, drawer, None);

        set_toggle_state(&mut doc, &toggle, Expanded::Expanded).unwrap();
        assert_eq!(doc.text_content(button), "Menu");
    }
}
