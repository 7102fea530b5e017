//! Delegated dispatch
//!
//! A delegated listener sits on an ancestor and fires its handler only when
//! the event's origin matches a selector. The selector is matched afresh on
//! every event: it is queried under the origin's parent, so elements added
//! after registration are picked up and removed ones are not.

use std::cell::Cell;
use std::rc::Rc;

use nwd_dom::{ElementQuery, Event, EventCallback, ListenerId, NodeId, SelectorList};

use crate::dom::WeakDom;
use crate::registry::RegistrationKey;
use crate::{Dom, Handler};

/// The origin, if it matches `selector` under its parent
pub(crate) fn delegated_receiver(
    dom: &Dom,
    selector: &SelectorList,
    event: &Event,
) -> Option<NodeId> {
    let origin = event.target()?;
    let doc = dom.document();
    let Some(parent) = doc.tree.parent(origin) else {
        tracing::trace!("delegation miss: origin {} is detached", origin);
        return None;
    };

    let hit = doc.select_all(parent, selector).into_iter().find(|&node| node == origin);
    if hit.is_none() {
        tracing::trace!("delegation miss: {} does not match {:?}", origin, selector.as_str());
    }
    hit
}

/// One-shot state of a `once` registration.
///
/// The registration is spent when its handler runs, not when the event
/// reaches the node, so a delegation miss leaves it in place.
#[derive(Debug)]
pub(crate) struct OnceGuard {
    key: RegistrationKey,
    id: Cell<Option<ListenerId>>,
}

impl OnceGuard {
    pub(crate) fn new(key: RegistrationKey) -> Self {
        Self { key, id: Cell::new(None) }
    }

    /// Bind to the native listener once it is attached
    pub(crate) fn arm(&self, id: ListenerId) {
        self.id.set(Some(id));
    }

    /// Detach the listener and drop its registry entry. False if already spent.
    fn consume(&self, dom: &Dom) -> bool {
        let Some(id) = self.id.take() else {
            return false;
        };
        dom.document_mut().remove_listener_by_id(self.key.node, id);
        dom.registry_mut().forget(&self.key, id);
        true
    }
}

/// Build the native listener `on` attaches for one (node, event name) pair
pub(crate) fn listener(
    dom: &Dom,
    handler: Handler,
    selector: Option<Rc<SelectorList>>,
    once: Option<Rc<OnceGuard>>,
) -> EventCallback {
    let weak = dom.downgrade();
    EventCallback::new(move |event| {
        wrapper(&weak, &handler, selector.as_deref(), once.as_deref(), event)
    })
}

fn wrapper(
    weak: &WeakDom,
    handler: &Handler,
    selector: Option<&SelectorList>,
    once: Option<&OnceGuard>,
    event: &mut Event,
) {
    let Some(dom) = weak.upgrade() else {
        return;
    };
    let receiver = match selector {
        Some(selector) => delegated_receiver(&dom, selector, event),
        None => event.target(),
    };
    let Some(receiver) = receiver else {
        return;
    };
    if once.is_some_and(|guard| !guard.consume(&dom)) {
        return;
    }
    handler.call(&dom, receiver, event);
}
