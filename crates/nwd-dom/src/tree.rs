//! DOM Tree (arena-based allocation)
//!
//! Nodes are never freed: `remove` unlinks a node from its parent and the
//! node stays addressable so handles held elsewhere remain valid.

use crate::{DomError, DomResult, ElementData, Node, NodeData, NodeId};

/// Arena-based DOM tree for memory efficiency
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self { nodes: vec![Node::document()] }
    }

    /// The document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Check that an id belongs to this tree
    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    /// Number of nodes in the tree (attached or not)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    fn node(&self, id: NodeId) -> DomResult<&Node> {
        self.get(id).ok_or(DomError::NotFound)
    }

    fn node_mut(&mut self, id: NodeId) -> DomResult<&mut Node> {
        self.get_mut(id).ok_or(DomError::NotFound)
    }

    // ------------------------------------------------------------------
    // Creation
    // ------------------------------------------------------------------

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(Node::text(text))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.push(Node::comment(text))
    }

    /// Create a detached doctype node
    pub fn create_doctype(&mut self, name: &str, public_id: &str, system_id: &str) -> NodeId {
        self.push(Node::doctype(name, public_id, system_id))
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Parent of a node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(Node::parent)
    }

    /// Element data of a node, if it is an element
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(Node::as_element)
    }

    /// Mutable element data of a node, if it is an element
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(Node::as_element_mut)
    }

    /// Check if a node is an element
    pub fn is_element(&self, id: NodeId) -> bool {
        self.element(id).is_some()
    }

    /// Iterate over direct children
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let next = self.get(id).map_or(NodeId::NONE, |n| n.first_child);
        Children { tree: self, next }
    }

    /// Iterate over direct children that are elements
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .filter(|(_, node)| node.is_element())
            .map(|(child, _)| child)
    }

    /// Pre-order (document order) walk over descendants, excluding `id`
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let next = self.get(id).map_or(NodeId::NONE, |n| n.first_child);
        Descendants { tree: self, root: id, next }
    }

    /// Walk from the parent of `id` up to the topmost ancestor
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors { tree: self, next: self.parent(id) }
    }

    /// True when `ancestor` is `node` or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        ancestor == node || self.ancestors(node).any(|a| a == ancestor)
    }

    /// Whether the node is reachable from the document node
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.is_inclusive_ancestor(NodeId::ROOT, id)
    }

    /// Closest preceding sibling that is an element
    pub fn previous_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut cur = self.get(id)?.prev_sibling();
        while let Some(sib) = cur {
            if self.is_element(sib) {
                return Some(sib);
            }
            cur = self.get(sib)?.prev_sibling();
        }
        None
    }

    /// Closest following sibling that is an element
    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut cur = self.get(id)?.next_sibling();
        while let Some(sib) = cur {
            if self.is_element(sib) {
                return Some(sib);
            }
            cur = self.get(sib)?.next_sibling();
        }
        None
    }

    /// Concatenated text of the node and its descendants
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.get(id).and_then(Node::as_text) {
            return text.to_string();
        }
        self.descendants(id)
            .filter_map(|d| self.get(d).and_then(Node::as_text))
            .collect()
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    /// Read an attribute of an element
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.get_attr(name)
    }

    /// Set an attribute on an element
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        let elem = self.node_mut(id)?.as_element_mut().ok_or(DomError::InvalidNodeType)?;
        elem.set_attr(name, value);
        Ok(())
    }

    /// Remove an attribute from an element
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> DomResult<Option<String>> {
        let elem = self.node_mut(id)?.as_element_mut().ok_or(DomError::InvalidNodeType)?;
        Ok(elem.remove_attr(name))
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    fn check_insert(&self, parent: NodeId, child: NodeId) -> DomResult<()> {
        let parent_node = self.node(parent)?;
        let child_node = self.node(child)?;
        if !parent_node.can_have_children() || matches!(child_node.data, NodeData::Document) {
            return Err(DomError::HierarchyRequest);
        }
        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest);
        }
        Ok(())
    }

    /// Append `child` as the last child of `parent`, moving it if attached elsewhere
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` before `reference` (or last when `None`)
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> DomResult<NodeId> {
        self.check_insert(parent, child)?;

        let mut reference = reference;
        if let Some(r) = reference {
            if self.parent(r) != Some(parent) {
                return Err(DomError::NotAChild);
            }
            if r == child {
                reference = self.node(child)?.next_sibling();
            }
        }

        self.detach(child);

        let (prev, next) = match reference {
            Some(r) => (self.node(r)?.prev_sibling, r),
            None => (self.node(parent)?.last_child, NodeId::NONE),
        };

        {
            let node = self.node_mut(child)?;
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = next;
        }
        if prev.is_valid() {
            self.node_mut(prev)?.next_sibling = child;
        } else {
            self.node_mut(parent)?.first_child = child;
        }
        if next.is_valid() {
            self.node_mut(next)?.prev_sibling = child;
        } else {
            self.node_mut(parent)?.last_child = child;
        }
        Ok(child)
    }

    /// Remove `child` from `parent`, failing when it is not a child
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        if self.parent(child) != Some(parent) {
            return Err(DomError::NotAChild);
        }
        self.detach(child);
        Ok(child)
    }

    /// Unlink a node from its parent. Returns false if it was already detached.
    pub fn remove(&mut self, id: NodeId) -> bool {
        self.detach(id)
    }

    fn detach(&mut self, id: NodeId) -> bool {
        let Some(node) = self.get(id) else {
            return false;
        };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);
        if !parent.is_valid() {
            return false;
        }

        if let Some(p) = self.get_mut(prev) {
            p.next_sibling = next;
        } else if let Some(par) = self.get_mut(parent) {
            par.first_child = next;
        }
        if let Some(n) = self.get_mut(next) {
            n.prev_sibling = prev;
        } else if let Some(par) = self.get_mut(parent) {
            par.last_child = prev;
        }

        if let Some(node) = self.get_mut(id) {
            node.parent = NodeId::NONE;
            node.prev_sibling = NodeId::NONE;
            node.next_sibling = NodeId::NONE;
        }
        true
    }

    /// Clone a node (and its subtree when `deep`). The copy is detached.
    pub fn clone_node(&mut self, id: NodeId, deep: bool) -> DomResult<NodeId> {
        let copy = self.node(id)?.detached_copy();
        if matches!(copy.data, NodeData::Document) {
            return Err(DomError::InvalidNodeType);
        }
        let new_id = self.push(copy);
        if deep {
            let children: Vec<NodeId> = self.children(id).map(|(c, _)| c).collect();
            for child in children {
                let cloned = self.clone_node(child, true)?;
                self.append_child(new_id, cloned)?;
            }
        }
        Ok(new_id)
    }

    /// Deep-copy a node from another tree into this one. The copy is detached.
    pub fn import_node(&mut self, source: &DomTree, id: NodeId) -> DomResult<NodeId> {
        let copy = source.node(id)?.detached_copy();
        if matches!(copy.data, NodeData::Document) {
            return Err(DomError::InvalidNodeType);
        }
        let new_id = self.push(copy);
        for (child, _) in source.children(id) {
            let imported = self.import_node(source, child)?;
            self.append_child(new_id, imported)?;
        }
        Ok(new_id)
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over direct children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

/// Pre-order iterator over descendants
pub struct Descendants<'a> {
    tree: &'a DomTree,
    root: NodeId,
    next: NodeId,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next;
        let node = self.tree.get(current)?;

        self.next = if node.first_child.is_valid() {
            node.first_child
        } else {
            let mut cursor = current;
            loop {
                if cursor == self.root {
                    break NodeId::NONE;
                }
                let Some(n) = self.tree.get(cursor) else {
                    break NodeId::NONE;
                };
                if n.next_sibling.is_valid() {
                    break n.next_sibling;
                }
                cursor = n.parent;
            }
        };
        Some(current)
    }
}

/// Iterator walking up the parent chain
pub struct Ancestors<'a> {
    tree: &'a DomTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}
