//! Library Configuration

use crate::export::Exposure;

/// nwd configuration options
#[derive(Debug, Clone)]
pub struct Config {
    /// How the entry function is published by [`export::install`](crate::export::install)
    pub exposure: Exposure,

    /// Run `ready` handlers straight away when the document already finished loading
    pub ready_fires_immediately: bool,

    /// URL given to documents created by [`Dom`](crate::Dom)
    pub document_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exposure: Exposure::default(),
            ready_fires_immediately: true,
            document_url: "about:blank".to_string(),
        }
    }
}
