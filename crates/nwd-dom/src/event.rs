//! DOM Events
//!
//! Event objects, listener callbacks and listener options.

use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::NodeId;

/// Propagation phase of an event being dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventPhase {
    /// Not being dispatched
    #[default]
    None,
    /// Travelling from the document down to the target's parent
    Capturing,
    /// At the target itself
    AtTarget,
    /// Travelling from the target's parent back up to the document
    Bubbling,
}

/// DOM event
#[derive(Debug, Clone)]
pub struct Event {
    /// Event type name, e.g. `click`
    pub event_type: String,
    pub bubbles: bool,
    pub cancelable: bool,
    target: Option<NodeId>,
    current_target: Option<NodeId>,
    phase: EventPhase,
    default_prevented: bool,
    propagation_stopped: bool,
    immediate_stopped: bool,
    in_passive_listener: bool,
}

impl Event {
    /// Create a non-bubbling, non-cancelable event
    pub fn new(event_type: &str) -> Self {
        Self {
            event_type: event_type.to_string(),
            bubbles: false,
            cancelable: false,
            target: None,
            current_target: None,
            phase: EventPhase::None,
            default_prevented: false,
            propagation_stopped: false,
            immediate_stopped: false,
            in_passive_listener: false,
        }
    }

    /// Create a bubbling, cancelable event (what user input produces)
    pub fn bubbling(event_type: &str) -> Self {
        Self::new(event_type).with_bubbles(true).with_cancelable(true)
    }

    pub fn with_bubbles(mut self, bubbles: bool) -> Self {
        self.bubbles = bubbles;
        self
    }

    pub fn with_cancelable(mut self, cancelable: bool) -> Self {
        self.cancelable = cancelable;
        self
    }

    /// Node the event was dispatched to (the origin)
    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    /// Node whose listener is currently running
    pub fn current_target(&self) -> Option<NodeId> {
        self.current_target
    }

    /// Current propagation phase
    pub fn phase(&self) -> EventPhase {
        self.phase
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        if self.cancelable && !self.in_passive_listener {
            self.default_prevented = true;
        }
    }

    /// Stop propagation after the current node
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Stop propagation and skip remaining listeners on the current node
    pub fn stop_immediate_propagation(&mut self) {
        self.propagation_stopped = true;
        self.immediate_stopped = true;
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    pub(crate) fn is_immediate_stopped(&self) -> bool {
        self.immediate_stopped
    }

    pub(crate) fn begin(&mut self, target: NodeId) {
        self.target = Some(target);
        self.default_prevented = false;
        self.propagation_stopped = false;
        self.immediate_stopped = false;
    }

    pub(crate) fn enter(&mut self, node: NodeId, phase: EventPhase) {
        self.current_target = Some(node);
        self.phase = phase;
    }

    pub(crate) fn set_passive(&mut self, passive: bool) {
        self.in_passive_listener = passive;
    }

    pub(crate) fn finish(&mut self) {
        self.current_target = None;
        self.phase = EventPhase::None;
        self.in_passive_listener = false;
    }
}

static NEXT_CALLBACK_ID: AtomicU64 = AtomicU64::new(1);

/// Listener callback with identity.
///
/// Clones share the identity, so a clone can be used to remove the
/// listener that was registered with the original.
#[derive(Clone)]
pub struct EventCallback {
    id: u64,
    f: Rc<dyn Fn(&mut Event)>,
}

impl EventCallback {
    pub fn new(f: impl Fn(&mut Event) + 'static) -> Self {
        Self {
            id: NEXT_CALLBACK_ID.fetch_add(1, Ordering::Relaxed),
            f: Rc::new(f),
        }
    }

    /// Identity shared by all clones
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn call(&self, event: &mut Event) {
        (self.f)(event)
    }
}

impl PartialEq for EventCallback {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for EventCallback {}

impl fmt::Debug for EventCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventCallback").field("id", &self.id).finish()
    }
}

/// Registered listener handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

/// Listener options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    /// Fire during the capture phase instead of bubbling
    pub capture: bool,
    /// Remove after the first invocation
    pub once: bool,
    /// `prevent_default` is ignored inside the listener
    pub passive: bool,
}

impl ListenerOptions {
    pub fn capture() -> Self {
        Self { capture: true, ..Self::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prevent_default_requires_cancelable() {
        let mut event = Event::new("custom");
        event.prevent_default();
        assert!(!event.is_default_prevented());

        let mut event = Event::bubbling("click");
        event.prevent_default();
        assert!(event.is_default_prevented());
    }

    #[test]
    fn test_passive_ignores_prevent_default() {
        let mut event = Event::bubbling("wheel");
        event.set_passive(true);
        event.prevent_default();
        assert!(!event.is_default_prevented());
    }

    #[test]
    fn test_callback_identity_survives_clone() {
        let a = EventCallback::new(|_| {});
        let b = EventCallback::new(|_| {});
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_stop_immediate_implies_stop() {
        let mut event = Event::bubbling("click");
        event.stop_immediate_propagation();
        assert!(event.is_propagation_stopped());
        assert!(event.is_immediate_stopped());
    }
}
