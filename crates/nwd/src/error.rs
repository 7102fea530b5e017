//! Error types

use nwd_dom::{DomError, SelectorError};
use nwd_html::ParseError;

/// nwd error
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid selector: {0}")]
    InvalidSelector(#[from] SelectorError),

    #[error("DOM error: {0}")]
    Dom(#[from] DomError),

    #[error("HTML error: {0}")]
    Html(#[from] ParseError),

    /// Nodes of one `Dom` were handed to another
    #[error("Selection belongs to a different document")]
    ForeignSelection,
}

pub type Result<T> = std::result::Result<T, Error>;
