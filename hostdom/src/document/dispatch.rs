use std::rc::Rc;

use super::{Document, NodeId};
use crate::error::{DomError, Result};
use crate::event::{
    Callback, DispatchOutcome, Event, EventInit, ListenerId, ListenerOptions, Phase, CLICK,
};

pub(crate) struct ListenerEntry {
    id: ListenerId,
    event_type: String,
    capture: bool,
    callback: Callback,
}

impl Document {
    pub fn add_event_listener<F>(
        &mut self,
        node: NodeId,
        event_type: &str,
        options: ListenerOptions,
        callback: F,
    ) -> Result<ListenerId>
    where
        F: Fn(&mut Document, &mut Event) + 'static,
    {
        self.node(node)?;
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.entry(node).or_default().push(ListenerEntry {
            id,
            event_type: event_type.to_string(),
            capture: options.capture,
            callback: Rc::new(callback),
        });
        Ok(id)
    }

    /// Returns false if no such listener was registered on `node`.
    pub fn remove_event_listener(&mut self, node: NodeId, id: ListenerId) -> bool {
        let Some(entries) = self.listeners.get_mut(&node) else {
            return false;
        };
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        before != entries.len()
    }

    pub fn listener_count(&self, node: NodeId, event_type: &str) -> usize {
        self.listeners
            .get(&node)
            .map(|entries| entries.iter().filter(|e| e.event_type == event_type).count())
            .unwrap_or(0)
    }

    /// Make `node` the outermost point `event_type` can reach.
    ///
    /// Events of that type dispatched inside `node` skip every ancestor of
    /// `node` in both the capture and bubble phases. Returns false if the
    /// boundary was already in place.
    pub fn add_event_boundary(&mut self, node: NodeId, event_type: &str) -> Result<bool> {
        self.node(node)?;
        Ok(self
            .boundaries
            .entry(node)
            .or_default()
            .insert(event_type.to_string()))
    }

    pub fn remove_event_boundary(&mut self, node: NodeId, event_type: &str) -> bool {
        self.boundaries
            .get_mut(&node)
            .is_some_and(|types| types.remove(event_type))
    }

    pub fn is_event_boundary(&self, node: NodeId, event_type: &str) -> bool {
        self.boundaries
            .get(&node)
            .is_some_and(|types| types.contains(event_type))
    }

    /// Ancestors of `target` an event of `event_type` travels through,
    /// outermost first. Stops at the nearest boundary, which is included.
    fn propagation_path(&self, target: NodeId, event_type: &str) -> Vec<NodeId> {
        let mut path = Vec::new();
        if self.is_event_boundary(target, event_type) {
            return path;
        }
        for node in self.ancestors(target) {
            path.push(node);
            if self.is_event_boundary(node, event_type) {
                break;
            }
        }
        path.reverse();
        path
    }

    fn has_listener(&self, node: NodeId, id: ListenerId) -> bool {
        self.listeners
            .get(&node)
            .is_some_and(|entries| entries.iter().any(|e| e.id == id))
    }

    /// Dispatch `event` at `target`.
    ///
    /// Capture listeners run from the top of the tree down to the target's
    /// parent, then the target's own listeners, then (for bubbling events)
    /// non-capture listeners back up. The path is fixed when dispatch starts,
    /// so listeners may restructure the tree freely. An event boundary on the
    /// path (see [`Document::add_event_boundary`]) is the top of the tree
    /// for that dispatch.
    pub fn dispatch_event(&mut self, target: NodeId, mut event: Event) -> Result<DispatchOutcome> {
        if !self.contains_node(target) {
            return Err(DomError::UnknownNode(target));
        }

        let path = self.propagation_path(target, event.event_type());

        event.target = Some(target);
        event.propagation_stopped = false;
        event.immediate_propagation_stopped = false;
        let mut outcome = DispatchOutcome::default();

        'dispatch: {
            for node in &path {
                event.phase = Phase::Capturing;
                event.current_target = Some(*node);
                self.invoke_listeners(*node, &mut event, true, &mut outcome);
                if event.propagation_stopped {
                    break 'dispatch;
                }
            }

            event.phase = Phase::AtTarget;
            event.current_target = Some(target);
            self.invoke_listeners(target, &mut event, true, &mut outcome);
            if event.propagation_stopped {
                break 'dispatch;
            }
            self.invoke_listeners(target, &mut event, false, &mut outcome);
            if event.propagation_stopped || !event.bubbles() {
                break 'dispatch;
            }

            for node in path.iter().rev() {
                event.phase = Phase::Bubbling;
                event.current_target = Some(*node);
                self.invoke_listeners(*node, &mut event, false, &mut outcome);
                if event.propagation_stopped {
                    break 'dispatch;
                }
            }
        }

        event.phase = Phase::None;
        event.current_target = None;
        outcome.default_prevented = event.default_prevented();
        outcome.stopped = event.propagation_stopped;
        log::trace!(
            "[dispatch] type={} target={} invoked={} prevented={} stopped={}",
            event.event_type(),
            target,
            outcome.invoked,
            outcome.default_prevented,
            outcome.stopped
        );
        Ok(outcome)
    }

    fn invoke_listeners(
        &mut self,
        node: NodeId,
        event: &mut Event,
        capture: bool,
        outcome: &mut DispatchOutcome,
    ) {
        // Snapshot so listeners can add/remove listeners while running.
        let snapshot: Vec<(ListenerId, Callback)> = self
            .listeners
            .get(&node)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|e| e.capture == capture && e.event_type == event.event_type())
                    .map(|e| (e.id, Rc::clone(&e.callback)))
                    .collect()
            })
            .unwrap_or_default();

        for (id, callback) in snapshot {
            if event.immediate_propagation_stopped {
                break;
            }
            if !self.has_listener(node, id) {
                continue;
            }
            outcome.invoked += 1;
            callback(self, event);
        }
    }

    /// Fire a bubbling, cancelable `click` at `node`.
    pub fn click(&mut self, node: NodeId) -> Result<DispatchOutcome> {
        self.dispatch_event(node, Event::new(CLICK, EventInit::bubbling()))
    }
}
