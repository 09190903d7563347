//! Navigation widget configuration.

use hostdom::{Document, NodeId, Selector};

use crate::error::NavError;
use crate::navigation::notify::{DRAWER_STATE_CHANGE, MENU_TOGGLED, TOGGLE_STATE};

/// Default selector for toggle buttons.
pub const DEFAULT_TOGGLE_SELECTOR: &str = "button[data-toggle], button[toggle]";
/// Default selector for drawers.
pub const DEFAULT_DRAWER_SELECTOR: &str = "ul, [data-drawer]";
/// Default prefix for cosmetic class names.
pub const DEFAULT_CLASS_PREFIX: &str = "site-navigation";

/// Host attribute overriding [`NavigationConfig::class_prefix`].
pub const CLASS_PREFIX_ATTRIBUTE: &str = "data-class";
/// Host attribute overriding [`NavigationConfig::event_type`].
pub const EVENT_TYPE_ATTRIBUTE: &str = "data-event";
/// Boolean host attribute that starts every drawer hidden.
pub const COLLAPSED_ATTRIBUTE: &str = "collapsed";

/// What a drawer does when a listener cancels its state notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CancelPolicy {
    /// Keep the new state; cancellation is only reported.
    #[default]
    Ignore,
    /// Roll the drawer and its toggle back to the previous state.
    Revert,
}

/// Per-widget configuration.
///
/// Built from defaults, then adjusted by attributes on the host element when
/// the widget is created. See [`NavigationConfig::from_host`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationConfig {
    /// Prefix for the cosmetic classes applied on connect.
    pub class_prefix: String,

    /// Event type used for drawer state notifications.
    pub event_type: String,

    /// Selector for toggle buttons, searched under the host.
    pub toggle_selector: String,

    /// Selector a toggle's following sibling must match to be its drawer.
    pub drawer_selector: String,

    /// Behavior when a notification is cancelled.
    pub cancel_policy: CancelPolicy,

    /// Hide every drawer while wiring, without notifying.
    pub start_collapsed: bool,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            class_prefix: DEFAULT_CLASS_PREFIX.to_string(),
            event_type: DRAWER_STATE_CHANGE.to_string(),
            toggle_selector: DEFAULT_TOGGLE_SELECTOR.to_string(),
            drawer_selector: DEFAULT_DRAWER_SELECTOR.to_string(),
            cancel_policy: CancelPolicy::default(),
            start_collapsed: false,
        }
    }
}

impl NavigationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults with host attribute overrides applied.
    pub fn from_host(doc: &Document, host: NodeId) -> Self {
        Self::default().with_host_overrides(doc, host)
    }

    /// Apply host attribute overrides.
    ///
    /// `data-class` replaces the class prefix, `data-event` picks one of the
    /// known notification event types and `collapsed` starts drawers hidden.
    /// Unknown event types are logged and ignored.
    pub fn with_host_overrides(self, doc: &Document, host: NodeId) -> Self {
        let mut config = self;

        if let Some(prefix) = doc.get_attribute(host, CLASS_PREFIX_ATTRIBUTE) {
            let prefix = prefix.trim();
            if !prefix.is_empty() {
                config.class_prefix = prefix.to_string();
            }
        }

        if let Some(event_type) = doc.get_attribute(host, EVENT_TYPE_ATTRIBUTE) {
            match event_type {
                DRAWER_STATE_CHANGE | MENU_TOGGLED | TOGGLE_STATE => {
                    config.event_type = event_type.to_string();
                }
                other => log::warn!(
                    "ignoring unknown {EVENT_TYPE_ATTRIBUTE} '{other}' on {host}, using '{}'",
                    config.event_type
                ),
            }
        }

        config.start_collapsed |= doc.has_attribute(host, COLLAPSED_ATTRIBUTE);
        config
    }

    /// Set the class prefix.
    pub fn class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = prefix.into();
        self
    }

    /// Set the notification event type.
    pub fn event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = event_type.into();
        self
    }

    /// Set the toggle selector.
    pub fn toggle_selector(mut self, selector: impl Into<String>) -> Self {
        self.toggle_selector = selector.into();
        self
    }

    /// Set the drawer selector.
    pub fn drawer_selector(mut self, selector: impl Into<String>) -> Self {
        self.drawer_selector = selector.into();
        self
    }

    /// Set the cancel policy.
    pub fn cancel_policy(mut self, policy: CancelPolicy) -> Self {
        self.cancel_policy = policy;
        self
    }

    /// Start with every drawer hidden.
    pub fn start_collapsed(mut self) -> Self {
        self.start_collapsed = true;
        self
    }

    /// Parse the toggle and drawer selectors.
    pub fn selectors(&self) -> Result<(Selector, Selector), NavError> {
        Ok((
            Selector::parse(&self.toggle_selector)?,
            Selector::parse(&self.drawer_selector)?,
        ))
    }
}
