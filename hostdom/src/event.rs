use std::any::Any;
use std::fmt;
use std::rc::Rc;

use crate::document::{Document, NodeId};

/// Event type fired by [`Document::click`](crate::Document::click).
pub const CLICK: &str = "click";

/// Construction flags for an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventInit {
    pub bubbles: bool,
    pub cancelable: bool,
}

impl EventInit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bubbling and cancelable, the flags used for UI and custom events.
    pub fn bubbling() -> Self {
        Self {
            bubbles: true,
            cancelable: true,
        }
    }
}

/// Dispatch phase an event is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    None,
    Capturing,
    AtTarget,
    Bubbling,
}

/// An event travelling through the document.
///
/// Custom payloads ride in `detail` and are recovered by type with
/// [`Event::detail`].
#[derive(Clone)]
pub struct Event {
    event_type: String,
    init: EventInit,
    detail: Option<Rc<dyn Any>>,
    pub(crate) target: Option<NodeId>,
    pub(crate) current_target: Option<NodeId>,
    pub(crate) phase: Phase,
    default_prevented: bool,
    pub(crate) propagation_stopped: bool,
    pub(crate) immediate_propagation_stopped: bool,
}

impl Event {
    pub fn new(event_type: impl Into<String>, init: EventInit) -> Self {
        Self {
            event_type: event_type.into(),
            init,
            detail: None,
            target: None,
            current_target: None,
            phase: Phase::None,
            default_prevented: false,
            propagation_stopped: false,
            immediate_propagation_stopped: false,
        }
    }

    /// Create an event carrying a typed payload.
    pub fn custom<D: Any>(event_type: impl Into<String>, init: EventInit, detail: D) -> Self {
        let mut event = Self::new(event_type, init);
        event.detail = Some(Rc::new(detail));
        event
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn bubbles(&self) -> bool {
        self.init.bubbles
    }

    pub fn cancelable(&self) -> bool {
        self.init.cancelable
    }

    /// The payload, if present and of type `D`.
    pub fn detail<D: Any>(&self) -> Option<&D> {
        self.detail.as_deref().and_then(|d| d.downcast_ref::<D>())
    }

    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    pub fn current_target(&self) -> Option<NodeId> {
        self.current_target
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Mark the event as cancelled. Ignored for non-cancelable events.
    pub fn prevent_default(&mut self) {
        if self.init.cancelable {
            self.default_prevented = true;
        }
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Stop the event after the listeners of the current node have run.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Stop the event before the next listener runs, even on the current node.
    pub fn stop_immediate_propagation(&mut self) {
        self.propagation_stopped = true;
        self.immediate_propagation_stopped = true;
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("event_type", &self.event_type)
            .field("init", &self.init)
            .field("has_detail", &self.detail.is_some())
            .field("target", &self.target)
            .field("current_target", &self.current_target)
            .field("phase", &self.phase)
            .field("default_prevented", &self.default_prevented)
            .field("propagation_stopped", &self.propagation_stopped)
            .finish()
    }
}

/// What happened during a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchOutcome {
    /// A listener called `prevent_default` on a cancelable event.
    pub default_prevented: bool,
    /// Number of listener invocations.
    pub invoked: usize,
    /// Propagation was stopped before the path was exhausted.
    pub stopped: bool,
}

impl DispatchOutcome {
    /// Returns false if a listener cancelled the event.
    pub fn proceed(&self) -> bool {
        !self.default_prevented
    }
}

/// Handle returned by `add_event_listener`, used for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

/// Options for `add_event_listener`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListenerOptions {
    pub capture: bool,
}

impl ListenerOptions {
    pub fn capture() -> Self {
        Self { capture: true }
    }
}

/// Listener callback. Listeners get the document mutably so they can react
/// by changing the tree.
pub type Callback = Rc<dyn Fn(&mut Document, &mut Event)>;
