//! Curie handles
//!
//! A handle borrows the resource that registered the curie and writes
//! links under `"<name>:<relation>"`. It never owns the resource.

use crate::link::Link;
use crate::resource::Resource;
use crate::vocab::curie_relation;

/// Adds links to a resource in a curie's namespace
#[derive(Debug)]
pub struct CurieHandle<'r> {
    name: String,
    resource: &'r mut Resource,
}

impl<'r> CurieHandle<'r> {
    pub(crate) fn new(name: String, resource: &'r mut Resource) -> Self {
        Self { name, resource }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a link under the namespaced relation
    pub fn add_link(&mut self, relation: &str, link: Link) -> &mut Self {
        self.resource
            .add_link(curie_relation(&self.name, relation), link);
        self
    }

    /// Add an href-only link under the namespaced relation
    pub fn add_new_link(&mut self, relation: &str, href: impl Into<String>) -> &mut Self {
        self.add_link(relation, Link::new(href))
    }
}
