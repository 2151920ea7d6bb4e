//! Ordered set of registered template harvesters.

use std::sync::Arc;

use super::{BasicHarvester, FileNameHarvester, TemplateHarvester};

/// Harvesters in registration order.
///
/// Order matters: it decides the order of shape hits for a file, and
/// therefore the order in which bindings are registered.
#[derive(Clone, Default)]
pub struct HarvesterSet {
    harvesters: Vec<Arc<dyn TemplateHarvester>>,
}

impl HarvesterSet {
    /// Create a new empty set.
    pub fn new() -> Self {
        Self {
            harvesters: Vec::new(),
        }
    }

    /// Create a set with the default harvester.
    pub fn with_builtins() -> Self {
        let mut set = Self::new();
        set.register(Arc::new(BasicHarvester));
        set
    }

    /// Look up a built-in harvester by its configuration name.
    pub fn builtin(name: &str) -> Option<Arc<dyn TemplateHarvester>> {
        match name {
            BasicHarvester::NAME => Some(Arc::new(BasicHarvester)),
            FileNameHarvester::NAME => Some(Arc::new(FileNameHarvester)),
            _ => None,
        }
    }

    /// Names of all built-in harvesters.
    pub fn builtin_names() -> &'static [&'static str] {
        &[BasicHarvester::NAME, FileNameHarvester::NAME]
    }

    /// Register a harvester at the end of the set.
    pub fn register(&mut self, harvester: Arc<dyn TemplateHarvester>) {
        self.harvesters.push(harvester);
    }

    /// Iterate over harvesters in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn TemplateHarvester>> {
        self.harvesters.iter()
    }

    /// Get the number of registered harvesters.
    pub fn len(&self) -> usize {
        self.harvesters.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.harvesters.is_empty()
    }
}

impl std::fmt::Debug for HarvesterSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.harvesters.iter().map(|h| h.name()))
            .finish()
    }
}
