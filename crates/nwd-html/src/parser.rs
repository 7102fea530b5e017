//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts it to our arena DOM.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use nwd_dom::{Document, DomTree, NodeId};

use crate::ParseError;

/// Nodes parsed from a markup fragment
#[derive(Debug)]
pub struct Fragment {
    /// Scratch document holding the parsed nodes
    pub document: Document,
    /// Top-level fragment nodes, in source order
    pub nodes: Vec<NodeId>,
}

/// HTML5 parser
#[derive(Debug, Default)]
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse HTML string into a Document
    pub fn parse(&self, html: &str) -> Result<Document, ParseError> {
        self.parse_with_url(html, "about:blank")
    }

    /// Parse HTML with a document URL
    pub fn parse_with_url(&self, html: &str, url: &str) -> Result<Document, ParseError> {
        tracing::debug!("Parsing HTML document: {}", url);

        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())?;

        let mut document = Document::empty(url);
        self.convert_node(&dom.document, document.tree_mut(), NodeId::ROOT)?;
        document.finalize();

        tracing::debug!("Parsed {} nodes", document.tree().len());
        Ok(document)
    }

    /// Parse body content; the fragment nodes are the body's children
    pub fn parse_fragment(&self, html: &str) -> Result<Fragment, ParseError> {
        let wrapped = format!("<!DOCTYPE html><html><head></head><body>{html}</body></html>");
        let mut document = self.parse(&wrapped)?;

        let nodes: Vec<NodeId> = match document.body() {
            Some(body) => document.tree().children(body).map(|(id, _)| id).collect(),
            None => Vec::new(),
        };
        for &node in &nodes {
            document.tree_mut().remove(node);
        }
        Ok(Fragment { document, nodes })
    }

    /// Convert an RcDom node to our DOM format
    fn convert_node(
        &self,
        handle: &Handle,
        tree: &mut DomTree,
        parent: NodeId,
    ) -> Result<(), ParseError> {
        match &handle.data {
            RcNodeData::Document => {
                // Document node - just process children
                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, parent)?;
                }
            }
            RcNodeData::Doctype { name, public_id, system_id } => {
                let id = tree.create_doctype(name, public_id, system_id);
                tree.append_child(parent, id)?;
            }
            RcNodeData::Text { contents } => {
                let text = contents.borrow();
                if !text.trim().is_empty() {
                    let id = tree.create_text(&text);
                    tree.append_child(parent, id)?;
                }
            }
            RcNodeData::Comment { contents } => {
                let id = tree.create_comment(contents);
                tree.append_child(parent, id)?;
            }
            RcNodeData::Element { name, attrs, template_contents, .. } => {
                let id = tree.create_element(&name.local);
                for attr in attrs.borrow().iter() {
                    tree.set_attribute(id, &attr.name.local, &attr.value)?;
                }
                tree.append_child(parent, id)?;

                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, id)?;
                }
                // <template> keeps its content in a separate fragment
                if let Some(contents) = template_contents.borrow().as_ref() {
                    for child in contents.children.borrow().iter() {
                        self.convert_node(child, tree, id)?;
                    }
                }
            }
            RcNodeData::ProcessingInstruction { .. } => {
                // Not produced by the HTML tokenizer
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
        let doc = HtmlParser::new().parse(html).unwrap();

        assert!(doc.tree().len() > 1, "Expected more than 1 node, got {}", doc.tree().len());
        assert_eq!(doc.title(), "Test");
        assert!(doc.body().is_some());
    }

    #[test]
    fn test_parse_fragment_wraps_document() {
        let doc = HtmlParser::new().parse("<div><span>Text</span></div>").unwrap();

        // Even fragments get wrapped in html/head/body by html5ever
        assert!(doc.document_element().is_some());
        assert!(doc.head().is_some());
    }

    #[test]
    fn test_parse_fragment_nodes_detached() {
        let fragment = HtmlParser::new().parse_fragment("<li>a</li><li>b</li>").unwrap();
        assert_eq!(fragment.nodes.len(), 2);
        for &node in &fragment.nodes {
            assert_eq!(fragment.document.tree().parent(node), None);
            assert_eq!(fragment.document.tree().element(node).unwrap().tag_name(), "li");
        }
    }
}
