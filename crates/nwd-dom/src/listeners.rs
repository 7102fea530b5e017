//! Native listener table
//!
//! Listeners per node in registration order, deduplicated on
//! (type, callback identity, capture) like `addEventListener`.

use std::collections::HashMap;

use crate::{EventCallback, ListenerId, ListenerOptions, NodeId};

/// A listener attached to a node
#[derive(Debug, Clone)]
pub struct RegisteredListener {
    pub id: ListenerId,
    pub event_type: String,
    pub callback: EventCallback,
    pub options: ListenerOptions,
}

/// Listener table for one document
#[derive(Debug, Default)]
pub struct EventListeners {
    by_node: HashMap<NodeId, Vec<RegisteredListener>>,
    next_id: u64,
}

impl EventListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listener. An identical registration returns the existing id.
    pub fn add(
        &mut self,
        node: NodeId,
        event_type: &str,
        callback: EventCallback,
        options: ListenerOptions,
    ) -> ListenerId {
        let listeners = self.by_node.entry(node).or_default();
        if let Some(existing) = listeners.iter().find(|l| {
            l.event_type == event_type
                && l.callback == callback
                && l.options.capture == options.capture
        }) {
            return existing.id;
        }

        self.next_id += 1;
        let id = ListenerId(self.next_id);
        listeners.push(RegisteredListener {
            id,
            event_type: event_type.to_string(),
            callback,
            options,
        });
        id
    }

    /// Remove by (type, callback identity, capture)
    pub fn remove(
        &mut self,
        node: NodeId,
        event_type: &str,
        callback: &EventCallback,
        capture: bool,
    ) -> bool {
        self.remove_where(node, |l| {
            l.event_type == event_type && l.callback == *callback && l.options.capture == capture
        })
    }

    /// Remove by listener id
    pub fn remove_by_id(&mut self, node: NodeId, id: ListenerId) -> bool {
        self.remove_where(node, |l| l.id == id)
    }

    fn remove_where(&mut self, node: NodeId, pred: impl Fn(&RegisteredListener) -> bool) -> bool {
        let Some(listeners) = self.by_node.get_mut(&node) else {
            return false;
        };
        let initial_len = listeners.len();
        listeners.retain(|l| !pred(l));
        let removed = listeners.len() < initial_len;
        if listeners.is_empty() {
            self.by_node.remove(&node);
        }
        removed
    }

    /// Check that a listener is still registered
    pub fn contains(&self, node: NodeId, id: ListenerId) -> bool {
        self.by_node
            .get(&node)
            .is_some_and(|ls| ls.iter().any(|l| l.id == id))
    }

    /// Listeners on `node` for `event_type`, in registration order
    pub fn matching(&self, node: NodeId, event_type: &str) -> Vec<RegisteredListener> {
        self.by_node
            .get(&node)
            .map(|ls| ls.iter().filter(|l| l.event_type == event_type).cloned().collect())
            .unwrap_or_default()
    }

    /// Number of listeners on a node
    pub fn count(&self, node: NodeId) -> usize {
        self.by_node.get(&node).map_or(0, Vec::len)
    }

    /// Total listeners across all nodes
    pub fn total(&self) -> usize {
        self.by_node.values().map(Vec::len).sum()
    }
}
