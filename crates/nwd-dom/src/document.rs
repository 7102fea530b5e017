//! Document - High-level document API

use crate::{
    DomTree, EventCallback, EventListeners, ListenerId, ListenerOptions, NodeData, NodeId,
};

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Native event listeners
    listeners: EventListeners,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: Option<NodeId>,
    /// Cached reference to <head> element
    head_element: Option<NodeId>,
    /// Cached reference to <body> element
    body_element: Option<NodeId>,
}

impl Document {
    /// Create a new document with an empty html/head/body skeleton
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // Fresh elements under a document node cannot violate the hierarchy
        let _ = tree.append_child(tree.root(), html);
        let _ = tree.append_child(html, head);
        let _ = tree.append_child(html, body);

        Self {
            tree,
            listeners: EventListeners::new(),
            url: url.to_string(),
            html_element: Some(html),
            head_element: Some(head),
            body_element: Some(body),
        }
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            listeners: EventListeners::new(),
            url: url.to_string(),
            html_element: None,
            head_element: None,
            body_element: None,
        }
    }

    /// Locate html/head/body after the tree was built externally
    pub fn finalize(&mut self) {
        let tree = &self.tree;
        let find_child = |parent: NodeId, tag: &str| {
            tree.element_children(parent)
                .find(|&c| tree.element(c).is_some_and(|e| e.tag_name() == tag))
        };

        self.html_element = find_child(tree.root(), "html");
        self.head_element = self.html_element.and_then(|h| find_child(h, "head"));
        self.body_element = self.html_element.and_then(|h| find_child(h, "body"));
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get document title
    pub fn title(&self) -> String {
        let Some(head) = self.head_element else {
            return String::new();
        };

        self.tree
            .element_children(head)
            .find(|&c| self.tree.element(c).is_some_and(|e| e.tag_name() == "title"))
            .map(|title| self.tree.text_content(title).trim().to_string())
            .unwrap_or_default()
    }

    /// The document node
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// Get <html> element
    pub fn document_element(&self) -> Option<NodeId> {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> Option<NodeId> {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> Option<NodeId> {
        self.body_element
    }

    /// Get element by ID (first in document order)
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .find(|&n| self.tree.element(n).is_some_and(|e| e.id() == Some(id)))
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Native listener table
    pub fn listeners(&self) -> &EventListeners {
        &self.listeners
    }

    /// Attach a listener (`addEventListener`)
    pub fn add_event_listener(
        &mut self,
        node: NodeId,
        event_type: &str,
        callback: EventCallback,
        options: ListenerOptions,
    ) -> ListenerId {
        self.listeners.add(node, event_type, callback, options)
    }

    /// Detach a listener (`removeEventListener`)
    pub fn remove_event_listener(
        &mut self,
        node: NodeId,
        event_type: &str,
        callback: &EventCallback,
        capture: bool,
    ) -> bool {
        self.listeners.remove(node, event_type, callback, capture)
    }

    /// Detach a listener by the id `add_event_listener` returned
    pub fn remove_listener_by_id(&mut self, node: NodeId, id: ListenerId) -> bool {
        self.listeners.remove_by_id(node, id)
    }

    /// Number of listeners attached to a node
    pub fn listener_count(&self, node: NodeId) -> usize {
        self.listeners.count(node)
    }

    pub(crate) fn listeners_mut(&mut self) -> &mut EventListeners {
        &mut self.listeners
    }

    /// Whether `node` is the document node of this tree
    pub fn is_document_node(&self, node: NodeId) -> bool {
        self.tree
            .get(node)
            .is_some_and(|n| matches!(n.data, NodeData::Document))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
