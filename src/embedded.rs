//! Embedded resources grouped by relation
//!
//! Embedded resources are held by reference: the same [`SharedResource`]
//! can sit in several parents, and changes made through any clone of the
//! handle show up the next time a parent is encoded.

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::HalError;
use crate::extract::Entry;
use crate::resource::Resource;
use crate::slot::{add_all_to, add_to, Slot};

/// Reference-counted handle to a resource that can be embedded
///
/// Cloning the handle shares the resource. Readers (encoding) and writers
/// (mutators) are serialized by a read-write lock, so a tree can be built on
/// one thread and encoded from many.
#[derive(Debug, Clone)]
pub struct SharedResource(Arc<RwLock<Resource>>);

impl SharedResource {
    pub fn new(resource: Resource) -> Self {
        Self(Arc::new(RwLock::new(resource)))
    }

    /// Lock for reading
    pub fn read(&self) -> RwLockReadGuard<'_, Resource> {
        self.0.read()
    }

    /// Lock for mutation
    ///
    /// Encoding a tree that contains this resource blocks until the guard
    /// is dropped.
    pub fn write(&self) -> RwLockWriteGuard<'_, Resource> {
        self.0.write()
    }

    /// Whether two handles point at the same resource
    pub fn ptr_eq(&self, other: &SharedResource) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Encode the shared resource into a HAL document
    pub fn encode(&self) -> Result<Entry, HalError> {
        let mut stack = Vec::new();
        self.encode_within(&mut stack)
    }

    /// Encode while tracking the chain of shared resources being encoded
    pub(crate) fn encode_within(&self, stack: &mut Vec<SharedResource>) -> Result<Entry, HalError> {
        if stack.iter().any(|visiting| visiting.ptr_eq(self)) {
            // Already read-locked further up the stack
            let href = self.0.read_recursive().self_href().to_string();
            tracing::debug!(href = %href, "embedded resource cycle");
            return Err(HalError::CycleDetected(href));
        }

        stack.push(self.clone());
        let result = self.read().encode_within(stack);
        stack.pop();
        result
    }
}

impl From<Resource> for SharedResource {
    fn from(resource: Resource) -> Self {
        Self::new(resource)
    }
}

impl Serialize for SharedResource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entry = self.encode().map_err(serde::ser::Error::custom)?;
        entry.serialize(serializer)
    }
}

/// Resources embedded in a parent, keyed by relation
#[derive(Debug, Clone, Default)]
pub struct Embedded {
    slots: BTreeMap<String, Slot<SharedResource>>,
}

impl Embedded {
    pub fn new() -> Self {
        Self::default()
    }

    /// Embed a resource, promoting the relation to a collection on the second add
    pub fn add(&mut self, relation: impl Into<String>, resource: impl Into<SharedResource>) {
        add_to(&mut self.slots, relation.into(), resource.into());
    }

    /// Embed several resources at once
    pub fn add_collection(&mut self, relation: impl Into<String>, resources: Vec<SharedResource>) {
        add_all_to(&mut self.slots, relation.into(), resources);
    }

    /// Overwrite the relation with a single resource
    pub fn set(&mut self, relation: impl Into<String>, resource: impl Into<SharedResource>) {
        self.slots
            .insert(relation.into(), Slot::One(resource.into()));
    }

    /// Overwrite the relation with a collection
    pub fn set_collection(&mut self, relation: impl Into<String>, resources: Vec<SharedResource>) {
        self.slots.insert(relation.into(), Slot::Many(resources));
    }

    /// Remove the relation and everything embedded under it
    pub fn delete(&mut self, relation: &str) {
        self.slots.remove(relation);
    }

    pub fn get(&self, relation: &str) -> Option<&Slot<SharedResource>> {
        self.slots.get(relation)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Slot<SharedResource>)> {
        self.slots.iter().map(|(rel, slot)| (rel.as_str(), slot))
    }

    /// Number of relations
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Encode every relation, keeping each slot's shape
    pub(crate) fn encode_within(&self, stack: &mut Vec<SharedResource>) -> Result<Value, HalError> {
        let mut out = Map::new();

        for (relation, slot) in &self.slots {
            let encoded = match slot {
                Slot::One(resource) => Value::Object(resource.encode_within(stack)?),
                Slot::Many(resources) => {
                    let mut docs = Vec::with_capacity(resources.len());
                    for resource in resources {
                        docs.push(Value::Object(resource.encode_within(stack)?));
                    }
                    Value::Array(docs)
                }
            };
            out.insert(relation.clone(), encoded);
        }

        Ok(Value::Object(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(href: &str) -> SharedResource {
        Resource::new((), href).into()
    }

    #[test]
    fn test_promotion_keeps_insertion_order() {
        let mut embedded = Embedded::new();
        let mut stack = Vec::new();

        embedded.add("foo", doc("/b"));
        assert_eq!(
            embedded.encode_within(&mut stack).unwrap(),
            json!({"foo": {"_links": {"self": {"href": "/b"}}}})
        );

        embedded.add("foo", doc("/c"));
        embedded.add("foo", doc("/d"));
        assert_eq!(
            embedded.encode_within(&mut stack).unwrap(),
            json!({"foo": [
                {"_links": {"self": {"href": "/b"}}},
                {"_links": {"self": {"href": "/c"}}},
                {"_links": {"self": {"href": "/d"}}}
            ]})
        );
    }

    #[test]
    fn test_add_collection_after_single() {
        let mut embedded = Embedded::new();
        embedded.add("items", doc("/1"));
        embedded.add_collection("items", vec![doc("/2"), doc("/3")]);

        let slot = embedded.get("items").unwrap();
        assert!(slot.is_collection());
        let hrefs: Vec<String> = slot
            .iter()
            .map(|r| r.read().self_href().to_string())
            .collect();
        assert_eq!(hrefs, vec!["/1", "/2", "/3"]);
    }

    #[test]
    fn test_set_delete_and_set_collection() {
        let mut embedded = Embedded::new();
        embedded.add("categories", doc("/categories/1"));
        embedded.delete("categories");
        assert!(embedded.is_empty());

        embedded.set("categories", doc("/categories/2"));
        embedded.add("categories", doc("/categories/3"));
        assert_eq!(embedded.get("categories").map(Slot::len), Some(2));

        embedded.set("categories", doc("/categories/4"));
        assert!(!embedded.get("categories").unwrap().is_collection());

        embedded.set_collection("categories", vec![doc("/categories/5")]);
        assert!(embedded.get("categories").unwrap().is_collection());
        assert_eq!(embedded.len(), 1);
    }

    #[test]
    fn test_shared_handle_identity() {
        let a = doc("/a");
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&doc("/a")));
    }
}
