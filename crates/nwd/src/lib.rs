//! nwd
//!
//! Fluent element selection and delegated events over an in-memory DOM.
//!
//! # Example
//! ```rust,ignore
//! use nwd::{Dom, Handler};
//!
//! let dom = Dom::from_html("<ul id=todos><li class=item>milk</li></ul>")?;
//! let clicked = Handler::new(|dom, item, _event| {
//!     dom.wrap(item).toggle_class("done");
//! });
//! dom.select("#todos")?.on_delegated("click", ".item", &clicked)?;
//! ```

mod config;
mod delegate;
mod dom;
mod error;
mod events;
pub mod export;
mod registry;
mod selection;

pub use config::Config;
pub use dom::{Dom, READY_EVENT};
pub use error::{Error, Result};
pub use events::{split_event_names, Handler, HandlerId, ListenOptions};
pub use export::{Exposure, Namespace};
pub use selection::{AppendSource, Selection, Target};

pub use nwd_dom::{DOMTokenList, Document, Event, EventPhase, NodeId};

// Re-export sub-crates for direct tree access
pub use nwd_dom as host;
pub use nwd_html as html;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Select nodes matching `target` under `scope` (default: the document).
///
/// Selector text is matched against descendants of the scope in document
/// order. A node target is wrapped as is, without checking the document.
pub fn query(dom: &Dom, target: Target<'_>, scope: Option<NodeId>) -> Result<Selection> {
    let scope = scope.unwrap_or(NodeId::ROOT);
    let items = match target {
        Target::Selector(text) => {
            let list = nwd_dom::SelectorList::parse(text)?;
            nwd_dom::ElementQuery::select_all(&*dom.document(), scope, &list)
        }
        Target::Node(node) => vec![node],
    };
    Ok(Selection::new(dom.clone(), items, scope))
}
