//! Single-or-collection storage for relations
//!
//! HAL lets a relation carry either one value or an array of values, and
//! both shapes show up in real documents. A `Slot` remembers which shape a
//! relation currently has and only escalates it on demand:
//!
//! - absent + one item: single
//! - single + one item: two-element collection `[existing, new]`
//! - collection + items: appended, existing order untouched
//!
//! A slot never goes back from collection to single.

use serde::Serialize;
use std::collections::BTreeMap;

/// Values stored under one relation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Slot<T> {
    /// Exactly one value, serialized bare
    One(T),
    /// Ordered values, serialized as an array
    Many(Vec<T>),
}

impl<T> Slot<T> {
    /// Add one item, promoting a single value to a collection
    pub fn push(self, item: T) -> Slot<T> {
        match self {
            Slot::One(existing) => Slot::Many(vec![existing, item]),
            Slot::Many(mut items) => {
                items.push(item);
                Slot::Many(items)
            }
        }
    }

    /// Add a batch of items; the result is always a collection
    pub fn extend(self, items: Vec<T>) -> Slot<T> {
        match self {
            Slot::One(existing) => {
                let mut result = Vec::with_capacity(items.len() + 1);
                result.push(existing);
                result.extend(items);
                Slot::Many(result)
            }
            Slot::Many(mut existing) => {
                existing.extend(items);
                Slot::Many(existing)
            }
        }
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, Slot::Many(_))
    }

    /// Number of stored items
    pub fn len(&self) -> usize {
        match self {
            Slot::One(_) => 1,
            Slot::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate the stored items in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            Slot::One(item) => std::slice::from_ref(item).iter(),
            Slot::Many(items) => items.iter(),
        }
    }

    /// The single value, if the slot has not been promoted
    pub fn as_single(&self) -> Option<&T> {
        match self {
            Slot::One(item) => Some(item),
            Slot::Many(_) => None,
        }
    }
}

/// Insert one item under a relation, applying the promotion rule
pub(crate) fn add_to<T>(slots: &mut BTreeMap<String, Slot<T>>, relation: String, item: T) {
    let next = match slots.remove(&relation) {
        None => Slot::One(item),
        Some(existing) => {
            if !existing.is_collection() {
                tracing::trace!(relation = %relation, "promoting relation to collection");
            }
            existing.push(item)
        }
    };
    slots.insert(relation, next);
}

/// Insert a batch under a relation; an absent relation keeps the batch as-is
pub(crate) fn add_all_to<T>(slots: &mut BTreeMap<String, Slot<T>>, relation: String, items: Vec<T>) {
    let next = match slots.remove(&relation) {
        None => Slot::Many(items),
        Some(existing) => existing.extend(items),
    };
    slots.insert(relation, next);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_push_promotes_single() {
        let slot = Slot::One("a").push("b");
        assert_eq!(slot, Slot::Many(vec!["a", "b"]));

        let slot = slot.push("c");
        assert_eq!(slot, Slot::Many(vec!["a", "b", "c"]));
    }

    #[test]
    fn test_extend_prepends_existing_single() {
        let slot = Slot::One(1).extend(vec![2, 3]);
        assert_eq!(slot, Slot::Many(vec![1, 2, 3]));

        let slot = Slot::Many(vec![1]).extend(vec![]);
        assert_eq!(slot, Slot::Many(vec![1]));
    }

    #[test]
    fn test_add_to_map() {
        let mut slots: BTreeMap<String, Slot<&str>> = BTreeMap::new();

        add_to(&mut slots, "next".to_string(), "/a");
        assert_eq!(slots["next"], Slot::One("/a"));

        add_to(&mut slots, "next".to_string(), "/b");
        assert_eq!(slots["next"], Slot::Many(vec!["/a", "/b"]));
    }

    #[test]
    fn test_add_all_to_absent_keeps_collection() {
        let mut slots: BTreeMap<String, Slot<&str>> = BTreeMap::new();

        add_all_to(&mut slots, "items".to_string(), vec!["/a"]);
        // A one-element batch is still a collection
        assert!(slots["items"].is_collection());

        add_all_to(&mut slots, "empty".to_string(), vec![]);
        assert_eq!(slots["empty"], Slot::Many(vec![]));
        assert!(slots["empty"].is_empty());
    }

    #[test]
    fn test_iter_and_len() {
        let single = Slot::One(7);
        assert_eq!(single.len(), 1);
        assert_eq!(single.iter().copied().collect::<Vec<_>>(), vec![7]);
        assert_eq!(single.as_single(), Some(&7));

        let many = Slot::Many(vec![1, 2]);
        assert_eq!(many.len(), 2);
        assert_eq!(many.as_single(), None);
    }

    #[test]
    fn test_serialize_shapes() {
        assert_eq!(serde_json::to_value(Slot::One("x")).unwrap(), json!("x"));
        assert_eq!(
            serde_json::to_value(Slot::Many(vec!["x", "y"])).unwrap(),
            json!(["x", "y"])
        );
    }
}
