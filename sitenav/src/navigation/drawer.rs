//! Drawer visibility and the side effects of changing it.

use hostdom::{DispatchOutcome, Document, NodeId};

use crate::config::CancelPolicy;
use crate::error::NavError;
use crate::navigation::notify::NotificationBus;
use crate::navigation::state::{DrawerAction, Visibility};
use crate::navigation::toggle::{Toggle, set_toggle_state};

/// What a state change did beyond writing the new state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChange {
    /// Applied without a notification.
    Silent,
    /// Applied and announced.
    Notified(DispatchOutcome),
    /// Announced, cancelled by a listener and rolled back.
    Reverted(DispatchOutcome),
}

impl StateChange {
    /// The dispatch outcome, if a notification was sent.
    pub fn outcome(&self) -> Option<DispatchOutcome> {
        match self {
            Self::Silent => None,
            Self::Notified(outcome) | Self::Reverted(outcome) => Some(*outcome),
        }
    }
}

/// A drawer and the toggle that controls it.
#[derive(Debug, Clone)]
pub struct Drawer {
    node: NodeId,
    id: String,
    toggle: Toggle,
    bus: NotificationBus,
    cancel_policy: CancelPolicy,
}

impl Drawer {
    pub fn new(
        node: NodeId,
        id: impl Into<String>,
        toggle: Toggle,
        bus: NotificationBus,
        cancel_policy: CancelPolicy,
    ) -> Self {
        Self {
            node,
            id: id.into(),
            toggle,
            bus,
            cancel_policy,
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The drawer's `id` attribute, referenced by the toggle's
    /// `aria-controls`.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn toggle(&self) -> &Toggle {
        &self.toggle
    }

    pub fn bus(&self) -> &NotificationBus {
        &self.bus
    }

    pub fn cancel_policy(&self) -> CancelPolicy {
        self.cancel_policy
    }

    pub fn state(&self, doc: &Document) -> Visibility {
        Visibility::read(doc, self.node)
    }

    pub fn is_open(&self, doc: &Document) -> bool {
        self.state(doc).is_visible()
    }

    fn apply(&self, doc: &mut Document, visibility: Visibility) -> Result<(), NavError> {
        visibility.write(doc, self.node)?;
        set_toggle_state(doc, &self.toggle, visibility.into())
    }
}

/// Open or close a drawer.
///
/// The `hidden` attribute is written first, then the toggle is synchronized,
/// then (if `notify`) the notification is published. Setting the current
/// state again rewrites the same values and is otherwise a no-op.
pub fn set_drawer_state(
    doc: &mut Document,
    drawer: &Drawer,
    open: bool,
    notify: bool,
) -> Result<StateChange, NavError> {
    let previous = drawer.state(doc);
    drawer.apply(doc, Visibility::from_open(open))?;
    if !notify {
        return Ok(StateChange::Silent);
    }

    let outcome = drawer
        .bus
        .publish(doc, drawer.node, DrawerAction::from_open(open))?;
    if outcome.default_prevented && drawer.cancel_policy == CancelPolicy::Revert {
        log::debug!(
            "{} notification cancelled, reverting drawer {} to {:?}",
            drawer.bus.event_type(),
            drawer.id,
            previous
        );
        drawer.apply(doc, previous)?;
        return Ok(StateChange::Reverted(outcome));
    }
    Ok(StateChange::Notified(outcome))
}

/// Flip a drawer and notify.
pub fn toggle_drawer_state(doc: &mut Document, drawer: &Drawer) -> Result<StateChange, NavError> {
    let open = !drawer.is_open(doc);
    set_drawer_state(doc, drawer, open, true)
}

/// Whether the drawer is currently shown.
pub fn drawer_state(doc: &Document, drawer: &Drawer) -> Visibility {
    drawer.state(doc)
}
