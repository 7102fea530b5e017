//! Element Query and Methods
//!
//! querySelector, querySelectorAll, closest, matches.

use crate::{Document, NodeId, SelectorError, SelectorList};

/// Element query trait
pub trait ElementQuery {
    /// Query single element by CSS selector
    fn query_selector(&self, root: NodeId, selector: &str)
        -> Result<Option<NodeId>, SelectorError>;

    /// Query all elements by CSS selector, in document order
    fn query_selector_all(&self, root: NodeId, selector: &str)
        -> Result<Vec<NodeId>, SelectorError>;

    /// Query all elements with a pre-parsed selector
    fn select_all(&self, root: NodeId, selector: &SelectorList) -> Vec<NodeId>;

    /// Find closest inclusive ancestor matching selector
    fn closest(&self, element: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError>;

    /// Check if element matches selector
    fn matches(&self, element: NodeId, selector: &str) -> Result<bool, SelectorError>;
}

impl ElementQuery for Document {
    fn query_selector(
        &self,
        root: NodeId,
        selector: &str,
    ) -> Result<Option<NodeId>, SelectorError> {
        let list = SelectorList::parse(selector)?;
        let scope = Some(root);
        Ok(self.tree.descendants(root).find(|&n| list.matches(&self.tree, n, scope)))
    }

    fn query_selector_all(
        &self,
        root: NodeId,
        selector: &str,
    ) -> Result<Vec<NodeId>, SelectorError> {
        let list = SelectorList::parse(selector)?;
        Ok(self.select_all(root, &list))
    }

    fn select_all(&self, root: NodeId, selector: &SelectorList) -> Vec<NodeId> {
        let scope = Some(root);
        let found: Vec<NodeId> = self.tree
            .descendants(root)
            .filter(|&n| selector.matches(&self.tree, n, scope))
            .collect();
        tracing::trace!(
            "select_all {:?} under {} -> {} match(es)",
            selector.as_str(),
            root,
            found.len()
        );
        found
    }

    fn closest(&self, element: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        let list = SelectorList::parse(selector)?;
        Ok(std::iter::once(element)
            .chain(self.tree.ancestors(element))
            .find(|&n| list.matches(&self.tree, n, Some(element))))
    }

    fn matches(&self, element: NodeId, selector: &str) -> Result<bool, SelectorError> {
        let list = SelectorList::parse(selector)?;
        Ok(list.matches(&self.tree, element, Some(element)))
    }
}
