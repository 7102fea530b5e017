//! Export surface
//!
//! The entry function can be published three ways: as a named global, as
//! the module export, or as a named AMD-style definition. All three go
//! through [`install`]; [`Exposure`] picks the slot.

use std::collections::HashMap;
use std::fmt;

use nwd_dom::NodeId;

use crate::{Dom, Result, Selection, Target};

/// Signature of the published entry function
pub type Entry = for<'a> fn(&Dom, Target<'a>, Option<NodeId>) -> Result<Selection>;

/// Where the entry function is published
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exposure {
    /// Global binding under this name
    Global(String),
    /// The module's export
    Module,
    /// Named definition, resolvable with [`Namespace::require`]
    Amd(String),
}

impl Default for Exposure {
    fn default() -> Self {
        Exposure::Global("$".to_string())
    }
}

/// Slot in a [`Namespace`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Binding {
    Global(String),
    ModuleExports,
    Define(String),
}

impl From<&Exposure> for Binding {
    fn from(exposure: &Exposure) -> Self {
        match exposure {
            Exposure::Global(name) => Binding::Global(name.clone()),
            Exposure::Module => Binding::ModuleExports,
            Exposure::Amd(name) => Binding::Define(name.clone()),
        }
    }
}

/// Host namespace receiving the entry function
#[derive(Default)]
pub struct Namespace {
    bindings: HashMap<Binding, Entry>,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, binding: &Binding) -> Option<Entry> {
        self.bindings.get(binding).copied()
    }

    /// Global binding, e.g. `$`
    pub fn global(&self, name: &str) -> Option<Entry> {
        self.get(&Binding::Global(name.to_string()))
    }

    pub fn module_exports(&self) -> Option<Entry> {
        self.get(&Binding::ModuleExports)
    }

    /// Resolve a named definition
    pub fn require(&self, name: &str) -> Option<Entry> {
        self.get(&Binding::Define(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.bindings.keys()).finish()
    }
}

/// Publish [`query`](crate::query) into `namespace` as `exposure` says
pub fn install(namespace: &mut Namespace, exposure: &Exposure) -> Entry {
    let entry: Entry = crate::query;
    let binding = Binding::from(exposure);
    tracing::debug!("Installing nwd as {:?}", binding);
    namespace.bindings.insert(binding, entry);
    entry
}

impl Dom {
    /// Publish the entry function using this handle's configured exposure
    pub fn install(&self, namespace: &mut Namespace) -> Entry {
        install(namespace, &self.config().exposure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;

    #[test]
    fn test_default_is_dollar_global() {
        let mut ns = Namespace::new();
        Dom::default().install(&mut ns);
        assert!(ns.global("$").is_some());
        assert!(ns.module_exports().is_none());
        assert_eq!(ns.len(), 1);
    }

    #[test]
    fn test_every_exposure_reaches_same_entry() {
        let dom = Dom::from_html("<ul><li>a</li><li>b</li></ul>").unwrap();
        let mut ns = Namespace::new();
        install(&mut ns, &Exposure::Global("nwd".to_string()));
        install(&mut ns, &Exposure::Module);
        install(&mut ns, &Exposure::Amd("nwd".to_string()));

        let entries = [ns.global("nwd"), ns.module_exports(), ns.require("nwd")];
        for entry in entries {
            let entry = entry.unwrap();
            assert_eq!(entry(&dom, Target::Selector("li"), None).unwrap().len(), 2);
        }
    }

    #[test]
    fn test_configured_exposure() {
        let config = Config { exposure: Exposure::Module, ..Config::default() };
        let mut ns = Namespace::new();
        Dom::new(config).install(&mut ns);
        assert!(ns.module_exports().is_some());
        assert!(ns.global("$").is_none());
    }
}
