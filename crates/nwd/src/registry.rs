//! Registration registry
//!
//! Maps what the caller registered to the native listeners `on` attached,
//! so `off` can remove wrapper listeners it never saw directly.

use std::collections::HashMap;

use nwd_dom::{Document, ListenerId, NodeId};

use crate::HandlerId;

/// Everything `off` must match exactly
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct RegistrationKey {
    pub node: NodeId,
    pub event: String,
    pub handler: HandlerId,
    pub capture: bool,
    pub delegate: Option<String>,
}

#[derive(Debug, Default)]
pub(crate) struct Registry {
    entries: HashMap<RegistrationKey, Vec<ListenerId>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, key: RegistrationKey, id: ListenerId) {
        self.entries.entry(key).or_default().push(id);
    }

    /// Drop one spent listener; the key goes once it has none left
    pub fn forget(&mut self, key: &RegistrationKey, id: ListenerId) {
        if let Some(ids) = self.entries.get_mut(key) {
            ids.retain(|&recorded| recorded != id);
            if ids.is_empty() {
                self.entries.remove(key);
            }
        }
    }

    /// Number of keys with recorded listeners
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Remove and return every listener recorded under `key`
    pub fn take(&mut self, key: &RegistrationKey) -> Vec<ListenerId> {
        self.entries.remove(key).unwrap_or_default()
    }

    /// Recorded listeners still attached in `document`; listeners detached
    /// directly through the document are not counted
    pub fn live_count(&self, document: &Document) -> usize {
        self.entries
            .iter()
            .map(|(key, ids)| {
                ids.iter()
                    .filter(|&&id| document.listeners().contains(key.node, id))
                    .count()
            })
            .sum()
    }
}
