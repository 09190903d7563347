//! The `<site-navigation>` custom element.

use std::rc::Rc;

use hostdom::{CLICK, Document, ListenerOptions, NodeId, Selector};

use crate::config::NavigationConfig;
use crate::custom_element;
use crate::error::NavError;
use crate::instance::WidgetId;
use crate::lifecycle::{CustomElement, ElementContext};
use crate::navigation::classes::apply_classes;
use crate::navigation::drawer::{Drawer, StateChange, set_drawer_state, toggle_drawer_state};
use crate::navigation::notify::NotificationBus;
use crate::navigation::query;
use crate::navigation::state::Visibility;
use crate::navigation::toggle::{Toggle, ToggleLabels, reset_toggle_state};

pub const TAG: &str = "site-navigation";

/// Where a widget is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WidgetState {
    /// Constructed, not yet wired.
    #[default]
    Uninitialized,
    /// Toggles and drawers paired, listeners installed.
    Wired,
    /// In the document with classes applied.
    Attached,
    /// Removed from the document. Listeners stay, so re-inserting works.
    Detached,
}

/// Pairs every toggle under the host with the drawer following it and keeps
/// both in sync.
///
/// Wiring happens once, when the element is created. Connecting applies
/// cosmetic classes and stops drawer notifications from leaving the widget.
#[custom_element(tag = "site-navigation")]
#[derive(Debug, Default)]
pub struct SiteNavigation {
    id: WidgetId,
    state: WidgetState,
    config: NavigationConfig,
    drawers: Vec<Rc<Drawer>>,
}

impl SiteNavigation {
    /// A widget starting from `config` instead of the defaults. Host
    /// attributes still override it when the element is created.
    pub fn with_config(config: NavigationConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn state(&self) -> WidgetState {
        self.state
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    /// Wired pairs, in document order of their toggles.
    pub fn drawers(&self) -> &[Rc<Drawer>] {
        &self.drawers
    }

    pub fn drawer(&self, drawer: NodeId) -> Option<&Rc<Drawer>> {
        self.drawers.iter().find(|d| d.node() == drawer)
    }

    pub fn drawer_for_toggle(&self, toggle: NodeId) -> Option<&Rc<Drawer>> {
        self.drawers.iter().find(|d| d.toggle().node() == toggle)
    }

    /// Open or close one of this widget's drawers.
    pub fn set_open(
        &self,
        doc: &mut Document,
        drawer: NodeId,
        open: bool,
        notify: bool,
    ) -> Result<StateChange, NavError> {
        let Some(drawer) = self.drawer(drawer) else {
            return Err(NavError::MalformedStructure {
                node: drawer,
                reason: "not a drawer of this widget".to_string(),
            });
        };
        set_drawer_state(doc, drawer, open, notify)
    }

    /// Close every drawer without notifying.
    pub fn collapse_all(&self, doc: &mut Document) -> Result<(), NavError> {
        for drawer in &self.drawers {
            set_drawer_state(doc, drawer, false, false)?;
        }
        Ok(())
    }

    fn wire(&mut self, doc: &mut Document, host: NodeId) -> Result<(), NavError> {
        let (toggles, drawers) = self.config.selectors()?;
        let bus = NotificationBus::new(self.config.event_type.as_str());

        for toggle in query::find_toggles(doc, host, &toggles) {
            match self.wire_pair(doc, toggle, &drawers, &bus) {
                Ok(drawer) => self.drawers.push(drawer),
                Err(err) => {
                    log::warn!("[{TAG} {}] skipping toggle {toggle}: {err}", self.id.short())
                }
            }
        }

        log::debug!(
            "[{TAG} {}] wired {} drawer(s) under {host}",
            self.id.short(),
            self.drawers.len()
        );
        Ok(())
    }

    fn wire_pair(
        &self,
        doc: &mut Document,
        toggle: NodeId,
        drawers: &Selector,
        bus: &NotificationBus,
    ) -> Result<Rc<Drawer>, NavError> {
        let Some(node) = query::find_drawer_for(doc, toggle, drawers) else {
            return Err(NavError::MalformedStructure {
                node: toggle,
                reason: format!("no following sibling matches '{drawers}'"),
            });
        };
        if self.drawer(node).is_some() {
            return Err(NavError::MalformedStructure {
                node: toggle,
                reason: format!("drawer {node} already has a toggle"),
            });
        }

        let id = self.ensure_drawer_id(doc, node)?;
        doc.set_attribute(toggle, "aria-controls", &id)?;
        let labels = ToggleLabels::take(doc, toggle)?;
        let drawer = Rc::new(Drawer::new(
            node,
            id,
            Toggle::new(toggle, node, labels),
            bus.clone(),
            self.config.cancel_policy,
        ));

        if self.config.start_collapsed {
            Visibility::Hidden.write(doc, node)?;
        }

        let target = Rc::clone(&drawer);
        bus.subscribe(doc, node, move |doc, notification| {
            if let Err(err) = set_drawer_state(doc, &target, notification.action.is_open(), false) {
                log::error!(
                    "drawer {} failed to apply '{}': {err}",
                    target.id(),
                    notification.action
                );
            }
        })?;

        let target = Rc::clone(&drawer);
        doc.add_event_listener(toggle, CLICK, ListenerOptions::default(), move |doc, _| {
            match toggle_drawer_state(doc, &target) {
                Ok(change) => log::debug!("drawer {} toggled: {change:?}", target.id()),
                Err(err) => log::error!("drawer {} failed to toggle: {err}", target.id()),
            }
        })?;

        reset_toggle_state(doc, drawer.toggle())?;
        Ok(drawer)
    }

    /// The drawer's id, generating a unique one if it has none.
    fn ensure_drawer_id(&self, doc: &mut Document, drawer: NodeId) -> Result<String, NavError> {
        if let Some(id) = doc.get_attribute(drawer, "id").filter(|id| !id.is_empty()) {
            return Ok(id.to_string());
        }
        let id = loop {
            let candidate = format!(
                "{}-drawer-{}",
                self.config.class_prefix,
                WidgetId::new().short()
            );
            if !doc.id_in_use(&candidate) {
                break candidate;
            }
        };
        doc.set_attribute(drawer, "id", &id)?;
        Ok(id)
    }
}

impl CustomElement for SiteNavigation {
    fn created(&mut self, cx: &mut ElementContext<'_>) -> Result<(), NavError> {
        if self.state != WidgetState::Uninitialized {
            return Ok(());
        }
        self.config = self.config.clone().with_host_overrides(cx.document, cx.host);
        self.wire(cx.document, cx.host)?;
        self.state = WidgetState::Wired;
        Ok(())
    }

    fn connected(&mut self, cx: &mut ElementContext<'_>) -> Result<(), NavError> {
        apply_classes(cx.document, cx.host, &self.config.class_prefix, &self.drawers)?;
        NotificationBus::new(self.config.event_type.as_str())
            .install_boundary(cx.document, cx.host)?;
        log::debug!("[{TAG} {}] attached at {}", self.id.short(), cx.host);
        self.state = WidgetState::Attached;
        Ok(())
    }

    fn disconnected(&mut self, cx: &mut ElementContext<'_>) -> Result<(), NavError> {
        log::debug!("[{TAG} {}] detached from {}", self.id.short(), cx.host);
        self.state = WidgetState::Detached;
        Ok(())
    }

    fn attribute_changed(
        &mut self,
        cx: &mut ElementContext<'_>,
        name: &str,
        old: Option<&str>,
        new: Option<&str>,
    ) -> Result<(), NavError> {
        match (old, new) {
            (None, Some(value)) => {
                log::info!("<{}> got a new attribute {name}={value:?}", cx.tag)
            }
            (Some(old), None) => {
                log::info!("<{}> attribute {name} removed, was {old:?}", cx.tag)
            }
            (Some(old), Some(value)) => {
                log::info!("<{}> attribute {name} changed from {old:?} to {value:?}", cx.tag)
            }
            (None, None) => {}
        }
        Ok(())
    }
}
