//! Locating toggles and the drawers they control.

use std::fmt;

use hostdom::{Document, NodeId, Selector};

use crate::error::NavError;

/// Direction of a sibling walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiblingDirection {
    Next,
    Previous,
}

impl fmt::Display for SiblingDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Next => f.write_str("next"),
            Self::Previous => f.write_str("previous"),
        }
    }
}

/// All toggles owned by `root`, in document order.
///
/// Toggles inside a nested element with the same tag as `root` belong to
/// that element and are left out.
pub fn find_toggles(doc: &Document, root: NodeId, toggles: &Selector) -> Vec<NodeId> {
    doc.query_selector_all(root, toggles)
        .into_iter()
        .filter(|toggle| belongs_to(doc, *toggle, root))
        .collect()
}

/// True if the nearest ancestor of `node` with `host`'s tag is `host`.
pub fn belongs_to(doc: &Document, node: NodeId, host: NodeId) -> bool {
    let Some(tag) = doc.tag_name(host) else {
        return false;
    };
    doc.ancestors(node)
        .into_iter()
        .find(|ancestor| doc.tag_name(*ancestor) == Some(tag))
        == Some(host)
}

/// Walk element siblings of `from` until one matches `selector`.
///
/// With no selector the adjacent element sibling is returned. Text nodes are
/// skipped. Running out of siblings is an error, never a panic.
pub fn sibling(
    doc: &Document,
    from: NodeId,
    direction: SiblingDirection,
    selector: Option<&Selector>,
) -> Result<NodeId, NavError> {
    let candidate = match direction {
        SiblingDirection::Next => doc.next_element_sibling(from),
        SiblingDirection::Previous => doc.previous_element_sibling(from),
    };
    let Some(candidate) = candidate else {
        return Err(NavError::SiblingSearchExhausted { from, direction });
    };

    match selector {
        Some(selector) if !selector.matches(doc, candidate) => {
            sibling(doc, candidate, direction, Some(selector))
        }
        _ => Ok(candidate),
    }
}

/// The drawer a toggle controls: its first following sibling matching
/// `drawers`.
pub fn find_drawer_for(doc: &Document, toggle: NodeId, drawers: &Selector) -> Option<NodeId> {
    sibling(doc, toggle, SiblingDirection::Next, Some(drawers)).ok()
}

/// The toggle controlling a drawer: its nearest preceding sibling matching
/// `toggles`.
pub fn find_toggle_for(doc: &Document, drawer: NodeId, toggles: &Selector) -> Option<NodeId> {
    sibling(doc, drawer, SiblingDirection::Previous, Some(toggles)).ok()
}
