//! DOM Node - Compact representation
//!
//! Nodes link to each other through `NodeId` indices instead of pointers,
//! so the whole tree lives in one `Vec` owned by [`DomTree`](crate::DomTree).

use crate::{DOMTokenList, NodeId};

/// DOM Node - Core structure
#[derive(Debug, Clone)]
pub struct Node {
    /// Parent node (NONE if root or detached)
    pub(crate) parent: NodeId,
    /// First child
    pub(crate) first_child: NodeId,
    /// Last child (for O(1) append)
    pub(crate) last_child: NodeId,
    /// Previous sibling
    pub(crate) prev_sibling: NodeId,
    /// Next sibling
    pub(crate) next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(name: &str) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(name)))
    }

    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Self::with_data(NodeData::Text(content.to_string()))
    }

    /// Create a new comment node
    pub fn comment(content: &str) -> Self {
        Self::with_data(NodeData::Comment(content.to_string()))
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    /// Create a doctype node
    pub fn doctype(name: &str, public_id: &str, system_id: &str) -> Self {
        Self::with_data(NodeData::Doctype {
            name: name.to_string(),
            public_id: public_id.to_string(),
            system_id: system_id.to_string(),
        })
    }

    /// Copy of this node's data with all links cleared
    pub(crate) fn detached_copy(&self) -> Self {
        Self::with_data(self.data.clone())
    }

    /// Parent node, if attached
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent.to_option()
    }

    /// First child, if any
    #[inline]
    pub fn first_child(&self) -> Option<NodeId> {
        self.first_child.to_option()
    }

    /// Last child, if any
    #[inline]
    pub fn last_child(&self) -> Option<NodeId> {
        self.last_child.to_option()
    }

    /// Previous sibling, if any
    #[inline]
    pub fn prev_sibling(&self) -> Option<NodeId> {
        self.prev_sibling.to_option()
    }

    /// Next sibling, if any
    #[inline]
    pub fn next_sibling(&self) -> Option<NodeId> {
        self.next_sibling.to_option()
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Check if this is text
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    /// Whether children may be appended to this node
    #[inline]
    pub fn can_have_children(&self) -> bool {
        matches!(self.data, NodeData::Element(_) | NodeData::Document)
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document root
    Document,
    /// DOCTYPE
    Doctype {
        name: String,
        public_id: String,
        system_id: String,
    },
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
    /// Comment
    Comment(String),
}

/// Element-specific data
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Tag name, ASCII-lowercased
    name: String,
    /// Attributes in source order
    attrs: Vec<Attribute>,
    /// Cached id attribute (very common lookup)
    id: Option<String>,
    /// Cached class list, mirrors the `class` attribute
    classes: DOMTokenList,
}

impl ElementData {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            attrs: Vec::new(),
            id: None,
            classes: DOMTokenList::new(),
        }
    }

    /// Tag name (lowercase)
    pub fn tag_name(&self) -> &str {
        &self.name
    }

    /// Value of the `id` attribute
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Class tokens
    pub fn class_list(&self) -> &DOMTokenList {
        &self.classes
    }

    /// All attributes in source order
    pub fn attributes(&self) -> &[Attribute] {
        &self.attrs
    }

    /// Get an attribute value (name compared ASCII case-insensitively)
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_str())
    }

    /// Check attribute presence
    pub fn has_attr(&self, name: &str) -> bool {
        self.get_attr(name).is_some()
    }

    /// Set an attribute
    pub fn set_attr(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        self.sync_cache(&name, Some(value));

        // Check if attribute already exists
        for attr in self.attrs.iter_mut() {
            if attr.name == name {
                attr.value = value.to_string();
                return;
            }
        }
        self.attrs.push(Attribute { name, value: value.to_string() });
    }

    /// Remove an attribute, returning its old value
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let pos = self.attrs.iter().position(|a| a.name.eq_ignore_ascii_case(name))?;
        let removed = self.attrs.remove(pos);
        self.sync_cache(&removed.name, None);
        Some(removed.value)
    }

    /// Mutate the class list and write the result back to the `class` attribute
    pub fn update_classes<R>(&mut self, f: impl FnOnce(&mut DOMTokenList) -> R) -> R {
        let mut classes = std::mem::take(&mut self.classes);
        let result = f(&mut classes);
        let value = classes.value();
        self.set_attr("class", &value);
        result
    }

    fn sync_cache(&mut self, name: &str, value: Option<&str>) {
        match name {
            "id" => self.id = value.map(str::to_string),
            "class" => self.classes = value.map(DOMTokenList::parse).unwrap_or_default(),
            _ => {}
        }
    }
}

/// Attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}
