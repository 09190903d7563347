//! Drawer state notifications.
//!
//! A drawer announces every notified state change with a bubbling,
//! cancelable custom event whose detail is a [`Notification`]. Each drawer
//! listens for the same event type on itself and only reacts to
//! notifications it published, so nested drawers never react to each other.
//! A boundary on the widget root keeps the whole exchange inside the widget.

use hostdom::{
    DispatchOutcome, Document, Event, EventInit, ListenerId, ListenerOptions, NodeId,
};

use crate::error::NavError;
use crate::navigation::state::DrawerAction;

/// Default notification event type.
pub const DRAWER_STATE_CHANGE: &str = "drawer-state-change";
/// Alternate event type accepted from host configuration.
pub const MENU_TOGGLED: &str = "menu-toggled";
/// Alternate event type accepted from host configuration.
pub const TOGGLE_STATE: &str = "toggle-state";

/// Event detail of a drawer state notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification {
    /// The drawer that published it.
    pub source: NodeId,
    pub action: DrawerAction,
}

impl Notification {
    pub fn is_from(&self, node: NodeId) -> bool {
        self.source == node
    }
}

/// Publishes and subscribes to notifications of one event type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationBus {
    event_type: String,
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new(DRAWER_STATE_CHANGE)
    }
}

impl NotificationBus {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
        }
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Dispatch a notification targeted at `source`.
    pub fn publish(
        &self,
        doc: &mut Document,
        source: NodeId,
        action: DrawerAction,
    ) -> Result<DispatchOutcome, NavError> {
        let event = Event::custom(
            self.event_type.as_str(),
            EventInit::bubbling(),
            Notification { source, action },
        );
        let outcome = doc.dispatch_event(source, event)?;
        log::trace!(
            "published {} '{}' from {source}: {outcome:?}",
            self.event_type,
            action
        );
        Ok(outcome)
    }

    /// Listen on `node` for notifications that `node` itself published.
    ///
    /// Notifications bubbling up from nested drawers are ignored.
    pub fn subscribe<F>(
        &self,
        doc: &mut Document,
        node: NodeId,
        handler: F,
    ) -> Result<ListenerId, NavError>
    where
        F: Fn(&mut Document, &Notification) + 'static,
    {
        let id = doc.add_event_listener(
            node,
            &self.event_type,
            ListenerOptions::default(),
            move |doc, event| {
                let Some(notification) = event.detail::<Notification>().copied() else {
                    return;
                };
                if !notification.is_from(node) {
                    log::trace!(
                        "{node} ignoring notification from {}",
                        notification.source
                    );
                    return;
                }
                handler(doc, &notification);
            },
        )?;
        Ok(id)
    }

    /// Listen on `node` for every notification reaching it, whatever its
    /// source. The handler may cancel the event.
    pub fn observe<F>(
        &self,
        doc: &mut Document,
        node: NodeId,
        handler: F,
    ) -> Result<ListenerId, NavError>
    where
        F: Fn(&mut Document, &mut Event, &Notification) + 'static,
    {
        let id = doc.add_event_listener(
            node,
            &self.event_type,
            ListenerOptions::default(),
            move |doc, event| {
                if let Some(notification) = event.detail::<Notification>().copied() {
                    handler(doc, event, &notification);
                }
            },
        )?;
        Ok(id)
    }

    /// Keep notifications inside `root`.
    ///
    /// Listeners on `root` and below still see them. Ancestors of `root` see
    /// nothing, in either phase. Returns false if `root` was already a
    /// boundary.
    pub fn install_boundary(&self, doc: &mut Document, root: NodeId) -> Result<bool, NavError> {
        Ok(doc.add_event_boundary(root, &self.event_type)?)
    }
}
