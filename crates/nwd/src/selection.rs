//! Selection - the fluent result set
//!
//! A [`Selection`] is an ordered, immutable list of nodes taken from a
//! [`Dom`]. Operations either read the list or build a new selection;
//! none of them change the list in place.

use std::rc::Rc;

use nwd_dom::{DOMTokenList, Document, ListenerOptions, NodeId, SelectorList};

use crate::delegate::OnceGuard;
use crate::registry::RegistrationKey;
use crate::{delegate, split_event_names, Dom, Error, Handler, ListenOptions, Result};

/// What to select: selector text, or an already resolved node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    Selector(&'a str),
    Node(NodeId),
}

impl<'a> From<&'a str> for Target<'a> {
    fn from(selector: &'a str) -> Self {
        Target::Selector(selector)
    }
}

impl<'a> From<&'a String> for Target<'a> {
    fn from(selector: &'a String) -> Self {
        Target::Selector(selector)
    }
}

impl From<NodeId> for Target<'_> {
    fn from(node: NodeId) -> Self {
        Target::Node(node)
    }
}

/// Nodes to append
#[derive(Debug, Clone, Copy)]
pub enum AppendSource<'a> {
    Node(NodeId),
    Selection(&'a Selection),
}

impl From<NodeId> for AppendSource<'_> {
    fn from(node: NodeId) -> Self {
        AppendSource::Node(node)
    }
}

impl<'a> From<&'a Selection> for AppendSource<'a> {
    fn from(selection: &'a Selection) -> Self {
        AppendSource::Selection(selection)
    }
}

/// Ordered result set over a [`Dom`]
#[derive(Debug, Clone)]
pub struct Selection {
    dom: Dom,
    items: Vec<NodeId>,
    scope: NodeId,
}

impl Selection {
    pub(crate) fn new(dom: Dom, items: Vec<NodeId>, scope: NodeId) -> Self {
        Self { dom, items, scope }
    }

    /// Number of nodes (`length`)
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[NodeId] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.items.iter().copied()
    }

    /// Root the selection was queried under
    pub fn scope(&self) -> NodeId {
        self.scope
    }

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    /// Node at `index`, if any
    pub fn get(&self, index: usize) -> Option<NodeId> {
        self.items.get(index).copied()
    }

    pub fn first(&self) -> Option<NodeId> {
        self.get(0)
    }

    /// Call `f(node, index)` for each node in order
    pub fn each(&self, mut f: impl FnMut(NodeId, usize)) -> &Self {
        for (index, &node) in self.items.iter().enumerate() {
            f(node, index);
        }
        self
    }

    /// Parent of the first node only.
    ///
    /// `None` when the selection is empty or its first node is detached.
    pub fn parent(&self) -> Option<Selection> {
        let first = self.first()?;
        let parent = self.dom.document().tree.parent(first)?;
        Some(Selection::new(self.dom.clone(), vec![parent], NodeId::ROOT))
    }

    /// Nodes for which `predicate` holds, in order
    pub fn filter(&self, mut predicate: impl FnMut(&Document, NodeId) -> bool) -> Selection {
        let items = {
            let doc = self.dom.document();
            let doc: &Document = &doc;
            self.items.iter().copied().filter(|&node| predicate(doc, node)).collect()
        };
        Selection::new(self.dom.clone(), items, self.scope)
    }

    /// Nodes matching `selector`
    pub fn filter_selector(&self, selector: &str) -> Result<Selection> {
        let list = SelectorList::parse(selector)?;
        let scope = Some(self.scope);
        Ok(self.filter(|doc, node| list.matches(&doc.tree, node, scope)))
    }

    // =========================================================================
    // Tree mutation
    // =========================================================================

    /// Same as [`append_move`](Self::append_move)
    pub fn append<'a>(&self, source: impl Into<AppendSource<'a>>) -> Result<&Self> {
        self.append_move(source)
    }

    /// Append every source node to every node of this selection.
    ///
    /// A node has one parent, so with several targets each source node ends
    /// up under the last target.
    pub fn append_move<'a>(&self, source: impl Into<AppendSource<'a>>) -> Result<&Self> {
        let sources = self.sources(source.into())?;
        let mut doc = self.dom.document_mut();
        for &target in &self.items {
            for &node in &sources {
                doc.tree.append_child(target, node)?;
            }
        }
        Ok(self)
    }

    /// Append a deep clone of every source node to every node of this
    /// selection. The source nodes stay where they are.
    pub fn append_clone<'a>(&self, source: impl Into<AppendSource<'a>>) -> Result<&Self> {
        let sources = self.sources(source.into())?;
        let mut doc = self.dom.document_mut();
        for &target in &self.items {
            for &node in &sources {
                let copy = doc.tree.clone_node(node, true)?;
                doc.tree.append_child(target, copy)?;
            }
        }
        Ok(self)
    }

    fn sources(&self, source: AppendSource<'_>) -> Result<Vec<NodeId>> {
        match source {
            AppendSource::Node(node) => Ok(vec![node]),
            AppendSource::Selection(other) if other.dom.ptr_eq(&self.dom) => {
                Ok(other.items.clone())
            }
            AppendSource::Selection(_) => Err(Error::ForeignSelection),
        }
    }

    /// Detach every node from its parent. Detached nodes are left alone.
    pub fn remove(&self) {
        let mut doc = self.dom.document_mut();
        for &node in &self.items {
            doc.tree.remove(node);
        }
    }

    // =========================================================================
    // Classes
    // =========================================================================

    /// Class list snapshot per node; always as long as the selection.
    /// Non-element nodes give an empty list.
    pub fn classes(&self) -> Vec<DOMTokenList> {
        let doc = self.dom.document();
        self.items
            .iter()
            .map(|&node| {
                doc.tree
                    .element(node)
                    .map(|el| el.class_list().clone())
                    .unwrap_or_default()
            })
            .collect()
    }

    pub fn add_class(&self, tokens: &[&str]) -> &Self {
        self.update_classes(|list| list.add(tokens))
    }

    pub fn remove_class(&self, tokens: &[&str]) -> &Self {
        self.update_classes(|list| list.remove(tokens))
    }

    pub fn toggle_class(&self, token: &str) -> &Self {
        self.update_classes(|list| {
            list.toggle(token, None);
        })
    }

    /// Whether any node has `token` in its class list
    pub fn has_class(&self, token: &str) -> bool {
        let doc = self.dom.document();
        self.items.iter().any(|&node| {
            doc.tree
                .element(node)
                .is_some_and(|el| el.class_list().contains(token))
        })
    }

    fn update_classes(&self, f: impl Fn(&mut DOMTokenList)) -> &Self {
        let mut doc = self.dom.document_mut();
        for &node in &self.items {
            if let Some(el) = doc.tree.element_mut(node) {
                el.update_classes(&f);
            }
        }
        self
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Listen for space-delimited `names` on every node (bubble phase).
    /// The handler receives the event's origin.
    pub fn on(&self, names: &str, handler: &Handler) -> &Self {
        self.register(names, handler, None, false, false);
        self
    }

    /// Listen on every node, firing only for origins matching `selector`
    pub fn on_delegated(&self, names: &str, selector: &str, handler: &Handler) -> Result<&Self> {
        self.on_with(names, handler, &ListenOptions::new().with_delegate(selector))
    }

    pub fn on_with(
        &self,
        names: &str,
        handler: &Handler,
        options: &ListenOptions,
    ) -> Result<&Self> {
        let delegate = match &options.delegate {
            Some(text) => Some((text.trim(), Rc::new(SelectorList::parse(text)?))),
            None => None,
        };
        self.register(names, handler, delegate, options.capture, options.once);
        Ok(self)
    }

    /// Remove what `on(names, handler)` registered
    pub fn off(&self, names: &str, handler: &Handler) -> &Self {
        self.unregister(names, handler, None, false)
    }

    /// Remove what `on_delegated(names, selector, handler)` registered
    pub fn off_delegated(&self, names: &str, selector: &str, handler: &Handler) -> &Self {
        self.unregister(names, handler, Some(selector.trim()), false)
    }

    /// Remove what `on_with` registered with the same handler and options
    pub fn off_with(&self, names: &str, handler: &Handler, options: &ListenOptions) -> &Self {
        let delegate = options.delegate.as_deref().map(str::trim);
        self.unregister(names, handler, delegate, options.capture)
    }

    fn register(
        &self,
        names: &str,
        handler: &Handler,
        delegate: Option<(&str, Rc<SelectorList>)>,
        capture: bool,
        once: bool,
    ) {
        // `once` is tracked by the wrapper: a delegation miss must not spend it
        let native = ListenerOptions { capture, once: false, passive: false };
        let mut created = 0;

        for name in split_event_names(names) {
            for &node in &self.items {
                let key = RegistrationKey {
                    node,
                    event: name.to_string(),
                    handler: handler.id(),
                    capture,
                    delegate: delegate.as_ref().map(|(text, _)| text.to_string()),
                };
                let selector = delegate.as_ref().map(|(_, list)| Rc::clone(list));
                let guard = once.then(|| Rc::new(OnceGuard::new(key.clone())));
                let callback =
                    delegate::listener(&self.dom, handler.clone(), selector, guard.clone());

                let id = self.dom.document_mut().add_event_listener(node, name, callback, native);
                if let Some(guard) = guard {
                    guard.arm(id);
                }
                self.dom.registry_mut().record(key, id);
                created += 1;
            }
        }
        tracing::debug!(
            "on {:?}: {} native listener(s), {} key(s) registered",
            names,
            created,
            self.dom.registry_mut().len()
        );
    }

    fn unregister(
        &self,
        names: &str,
        handler: &Handler,
        delegate: Option<&str>,
        capture: bool,
    ) -> &Self {
        let mut removed = 0;
        for name in split_event_names(names) {
            for &node in &self.items {
                let key = RegistrationKey {
                    node,
                    event: name.to_string(),
                    handler: handler.id(),
                    capture,
                    delegate: delegate.map(str::to_string),
                };
                let ids = self.dom.registry_mut().take(&key);
                let mut doc = self.dom.document_mut();
                for id in ids {
                    if doc.remove_listener_by_id(node, id) {
                        removed += 1;
                    }
                }
            }
        }
        tracing::debug!("off {:?}: {} native listener(s)", names, removed);
        self
    }
}

impl<'s> IntoIterator for &'s Selection {
    type Item = NodeId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'s, NodeId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter().copied()
    }
}
