//! Handlers and listen options
//!
//! A [`Handler`] is the user callback given to `on`/`off`. It carries an
//! identity so `off` can find the registrations made with it.

use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use nwd_dom::{Event, NodeId};

use crate::Dom;

static NEXT_HANDLER_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique handler identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

/// Event handler.
///
/// Called with the owning [`Dom`], the receiver node (the event's origin)
/// and the event. Clones share one [`HandlerId`].
#[derive(Clone)]
pub struct Handler {
    id: HandlerId,
    f: Rc<dyn Fn(&Dom, NodeId, &mut Event)>,
}

impl Handler {
    pub fn new(f: impl Fn(&Dom, NodeId, &mut Event) + 'static) -> Self {
        Self {
            id: HandlerId(NEXT_HANDLER_ID.fetch_add(1, Ordering::Relaxed)),
            f: Rc::new(f),
        }
    }

    pub fn id(&self) -> HandlerId {
        self.id
    }

    pub fn call(&self, dom: &Dom, receiver: NodeId, event: &mut Event) {
        (self.f)(dom, receiver, event)
    }
}

impl PartialEq for Handler {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Handler {}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler").field("id", &self.id.0).finish()
    }
}

/// How `on_with`/`off_with` register a handler
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListenOptions {
    /// Only fire when the event's origin matches this selector
    pub delegate: Option<String>,
    /// Listen during the capture phase
    pub capture: bool,
    /// Unregister after the first invocation
    pub once: bool,
}

impl ListenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delegate(mut self, selector: impl Into<String>) -> Self {
        self.delegate = Some(selector.into());
        self
    }

    pub fn with_capture(mut self, capture: bool) -> Self {
        self.capture = capture;
        self
    }

    pub fn with_once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }
}

/// Split a space-delimited list of event names.
///
/// Empty tokens from repeated spaces are skipped; duplicates are kept.
pub fn split_event_names(names: &str) -> impl Iterator<Item = &str> {
    names.split(' ').filter(|name| !name.is_empty())
}
