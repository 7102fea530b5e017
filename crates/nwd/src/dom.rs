//! Dom - shared document handle

use std::cell::{Cell, Ref, RefCell, RefMut};
use std::fmt;
use std::rc::{Rc, Weak};

use nwd_dom::{dispatch_event, Document, Event, ListenerOptions, NodeId};
use nwd_html::HtmlParser;

use crate::registry::Registry;
use crate::{delegate, Config, Handler, Result, Selection, Target};

/// Event fired on the document node by [`Dom::mark_loaded`]
pub const READY_EVENT: &str = "DOMContentLoaded";

struct DomInner {
    document: RefCell<Document>,
    registry: RefCell<Registry>,
    config: Config,
    loaded: Cell<bool>,
}

/// Shared handle to a document.
///
/// Cloning is cheap and yields a handle to the same document. Every
/// [`Selection`] keeps one. Listeners attached by `on` hold only a weak
/// handle, so a document does not keep itself alive.
#[derive(Clone)]
pub struct Dom {
    inner: Rc<DomInner>,
}

/// Non-owning [`Dom`] handle
#[derive(Clone)]
pub(crate) struct WeakDom(Weak<DomInner>);

impl WeakDom {
    pub(crate) fn upgrade(&self) -> Option<Dom> {
        self.0.upgrade().map(|inner| Dom { inner })
    }
}

impl Dom {
    /// Create a handle around an empty html/head/body document
    pub fn new(config: Config) -> Self {
        let document = Document::new(&config.document_url);
        Self::with_document(document, config)
    }

    /// Wrap an existing document. It starts out loading; see [`Dom::mark_loaded`].
    pub fn with_document(document: Document, config: Config) -> Self {
        Self {
            inner: Rc::new(DomInner {
                document: RefCell::new(document),
                registry: RefCell::new(Registry::new()),
                config,
                loaded: Cell::new(false),
            }),
        }
    }

    /// Parse an HTML document
    pub fn from_html(html: &str) -> Result<Self> {
        Self::from_html_with_config(html, Config::default())
    }

    /// Parse an HTML document, using `config.document_url` as its URL
    pub fn from_html_with_config(html: &str, config: Config) -> Result<Self> {
        let document = HtmlParser::new().parse_with_url(html, &config.document_url)?;
        tracing::debug!("Loaded {} ({} nodes)", document.url(), document.tree.len());
        Ok(Self::with_document(document, config))
    }

    /// Configuration this handle was created with
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Borrow the document.
    ///
    /// Panics if the document is mutably borrowed, like any `RefCell`.
    /// Handlers never run under a borrow.
    pub fn document(&self) -> Ref<'_, Document> {
        self.inner.document.borrow()
    }

    /// Mutably borrow the document
    pub fn document_mut(&self) -> RefMut<'_, Document> {
        self.inner.document.borrow_mut()
    }

    /// The document node
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// The `<body>` element, if the document has one
    pub fn body(&self) -> Option<NodeId> {
        self.document().body()
    }

    /// Whether two handles share a document
    pub fn ptr_eq(&self, other: &Dom) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Select by selector text or wrap a node, under `scope` (default: the document)
    pub fn query<'a>(
        &self,
        target: impl Into<Target<'a>>,
        scope: Option<NodeId>,
    ) -> Result<Selection> {
        crate::query(self, target.into(), scope)
    }

    /// Select by selector text under the document
    pub fn select(&self, selector: &str) -> Result<Selection> {
        self.query(selector, None)
    }

    /// Wrap a single node without querying
    pub fn wrap(&self, node: NodeId) -> Selection {
        Selection::new(self.clone(), vec![node], NodeId::ROOT)
    }

    /// Create a detached element
    pub fn create_element(&self, tag: &str) -> NodeId {
        self.document_mut().tree.create_element(tag)
    }

    /// Create a detached text node
    pub fn create_text(&self, text: &str) -> NodeId {
        self.document_mut().tree.create_text(text)
    }

    /// Parse body markup into detached nodes of this document
    pub fn fragment(&self, html: &str) -> Result<Selection> {
        let fragment = HtmlParser::new().parse_fragment(html)?;
        let items = {
            let mut doc = self.document_mut();
            fragment
                .nodes
                .iter()
                .map(|&node| doc.tree.import_node(&fragment.document.tree, node))
                .collect::<std::result::Result<Vec<_>, _>>()?
        };
        Ok(Selection::new(self.clone(), items, NodeId::ROOT))
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Dispatch `event` at `target`. Returns false if a listener prevented default.
    pub fn dispatch(&self, target: NodeId, event: &mut Event) -> bool {
        dispatch_event(&self.inner.document, target, event)
    }

    /// Dispatch a bubbling, cancelable event of the given type
    pub fn trigger(&self, target: NodeId, event_type: &str) -> bool {
        self.dispatch(target, &mut Event::bubbling(event_type))
    }

    /// Simulate a click on `target`
    pub fn click(&self, target: NodeId) -> bool {
        self.trigger(target, "click")
    }

    /// Run `handler` once the document has loaded.
    ///
    /// If loading already finished the handler runs now with a synthetic
    /// event (no target), unless `Config::ready_fires_immediately` is off.
    pub fn ready(&self, handler: &Handler) -> &Self {
        if self.is_loaded() {
            if self.inner.config.ready_fires_immediately {
                let mut event = Event::new(READY_EVENT);
                handler.call(self, NodeId::ROOT, &mut event);
            } else {
                tracing::debug!("ready handler ignored: document already loaded");
            }
            return self;
        }

        let callback = delegate::listener(self, handler.clone(), None, None);
        let once = ListenerOptions { once: true, ..Default::default() };
        self.document_mut().add_event_listener(NodeId::ROOT, READY_EVENT, callback, once);
        self
    }

    /// Finish loading and fire `DOMContentLoaded`. Only the first call has an effect.
    pub fn mark_loaded(&self) -> bool {
        if self.inner.loaded.replace(true) {
            return false;
        }
        tracing::debug!("Document ready: {}", self.document().url());
        self.dispatch(NodeId::ROOT, &mut Event::new(READY_EVENT).with_bubbles(true));
        true
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.loaded.get()
    }

    /// Native listeners created by `on` that are still attached
    pub fn registration_count(&self) -> usize {
        self.inner.registry.borrow().live_count(&self.document())
    }

    pub(crate) fn registry_mut(&self) -> RefMut<'_, Registry> {
        self.inner.registry.borrow_mut()
    }

    pub(crate) fn downgrade(&self) -> WeakDom {
        WeakDom(Rc::downgrade(&self.inner))
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl fmt::Debug for Dom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.document.try_borrow() {
            Ok(doc) => f
                .debug_struct("Dom")
                .field("url", &doc.url())
                .field("nodes", &doc.tree.len())
                .field("loaded", &self.is_loaded())
                .finish(),
            Err(_) => f.debug_struct("Dom").finish_non_exhaustive(),
        }
    }
}
