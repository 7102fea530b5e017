//! nwd DOM - Document Object Model
//!
//! Arena-based DOM tree with a CSS selector engine and
//! capture/target/bubble event dispatch.

mod classlist;
mod dispatch;
mod document;
pub mod event;
mod listeners;
mod node;
mod operations;
mod query;
pub mod selectors;
mod tree;

pub use node::{Node, NodeData, ElementData, Attribute};
pub use tree::{DomTree, Children, Descendants, Ancestors};
pub use document::Document;
pub use classlist::DOMTokenList;
pub use operations::{DomError, DomResult};
pub use query::ElementQuery;
pub use listeners::{EventListeners, RegisteredListener};
pub use dispatch::dispatch_event;
pub use selectors::{SelectorList, SelectorError};
pub use event::{Event, EventPhase, EventCallback, ListenerId, ListenerOptions};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID (the document node)
    pub const ROOT: NodeId = NodeId(0);

    /// Link sentinel: no node
    pub(crate) const NONE: NodeId = NodeId(u32::MAX);

    /// Check that this id is not the sentinel
    #[inline]
    pub(crate) fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Convert a link to an option
    #[inline]
    pub(crate) fn to_option(self) -> Option<NodeId> {
        if self.is_valid() { Some(self) } else { None }
    }

    /// Arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
