//! nwd HTML loader
//!
//! Parses HTML5 markup with html5ever and builds an nwd-dom [`Document`](nwd_dom::Document).

mod parser;

pub use parser::{Fragment, HtmlParser};

/// Parse an HTML string into a document
pub fn parse(html: &str) -> Result<nwd_dom::Document, ParseError> {
    HtmlParser::new().parse(html)
}

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Failed to read markup: {0}")]
    Io(#[from] std::io::Error),

    #[error("Tree construction failed: {0}")]
    Tree(#[from] nwd_dom::DomError),
}
