//! Hyperlinks and the per-resource link relation store

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::slot::{add_all_to, add_to, Slot};
use crate::vocab::HREF_ATTR;

/// Attribute map merged into a link at construction
pub type LinkAttrs = Map<String, Value>;

/// A hyperlink: an attribute map that always carries `href`
///
/// Attribute values are arbitrary JSON, so `"templated": true` stays a
/// boolean on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Link {
    attrs: LinkAttrs,
}

impl Link {
    /// Create a link with only an `href`
    pub fn new(href: impl Into<String>) -> Self {
        let mut attrs = Map::new();
        attrs.insert(HREF_ATTR.to_string(), Value::String(href.into()));
        Self { attrs }
    }

    /// Create a link from an `href` plus attribute maps
    ///
    /// Maps are applied in order, so a later map wins on key collision.
    /// An `href` key inside a map replaces the one given as argument.
    pub fn with_attrs(href: impl Into<String>, attrs: impl IntoIterator<Item = LinkAttrs>) -> Self {
        let mut link = Self::new(href);
        for attr in attrs {
            link.attrs.extend(attr);
        }
        link
    }

    /// Builder form of [`Link::with_attrs`] for a single attribute
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// The target URI, passed through verbatim
    pub fn href(&self) -> &str {
        self.attrs
            .get(HREF_ATTR)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }

    pub fn attrs(&self) -> &LinkAttrs {
        &self.attrs
    }
}

/// Links of a resource grouped by relation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LinkRelations {
    slots: BTreeMap<String, Slot<Link>>,
}

impl LinkRelations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a link, promoting the relation to a collection on the second add
    pub fn add(&mut self, relation: impl Into<String>, link: Link) {
        add_to(&mut self.slots, relation.into(), link);
    }

    /// Add several links at once
    ///
    /// An absent relation stores `links` as a collection even when it holds
    /// a single link.
    pub fn add_collection(&mut self, relation: impl Into<String>, links: Vec<Link>) {
        add_all_to(&mut self.slots, relation.into(), links);
    }

    /// Overwrite the relation with a single link
    pub fn replace(&mut self, relation: impl Into<String>, link: Link) {
        self.slots.insert(relation.into(), Slot::One(link));
    }

    pub fn get(&self, relation: &str) -> Option<&Slot<Link>> {
        self.slots.get(relation)
    }

    pub fn contains(&self, relation: &str) -> bool {
        self.slots.contains_key(relation)
    }

    /// Iterate relations in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Slot<Link>)> {
        self.slots.iter().map(|(rel, slot)| (rel.as_str(), slot))
    }

    /// Number of relations (not links)
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(value: Value) -> LinkAttrs {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_link_with_templated_attr() {
        let link = Link::with_attrs("bar", [attrs(json!({"templated": true}))]);
        assert_eq!(
            serde_json::to_string(&link).unwrap(),
            r#"{"href":"bar","templated":true}"#
        );
        assert_eq!(link.href(), "bar");
    }

    #[test]
    fn test_later_attrs_override_earlier() {
        let link = Link::with_attrs(
            "/orders",
            [
                attrs(json!({"name": "first", "title": "Orders"})),
                attrs(json!({"name": "second"})),
            ],
        );
        assert_eq!(
            serde_json::to_value(&link).unwrap(),
            json!({"href": "/orders", "name": "second", "title": "Orders"})
        );
    }

    #[test]
    fn test_href_is_not_validated() {
        let link = Link::new("not a uri {at} all");
        assert_eq!(link.href(), "not a uri {at} all");
        assert_eq!(Link::new("").href(), "");
    }

    #[test]
    fn test_builder_attr() {
        let link = Link::new("/docs/{rel}").with_attr("templated", true);
        assert_eq!(link.get("templated"), Some(&json!(true)));
    }

    #[test]
    fn test_relation_promotion() {
        let mut links = LinkRelations::new();

        links.add("next", Link::new("/a"));
        assert_eq!(serde_json::to_value(&links).unwrap(), json!({"next": {"href": "/a"}}));

        links.add("next", Link::new("/b"));
        links.add("next", Link::new("/c"));
        assert_eq!(
            serde_json::to_value(&links).unwrap(),
            json!({"next": [{"href": "/a"}, {"href": "/b"}, {"href": "/c"}]})
        );
    }

    #[test]
    fn test_add_collection() {
        let mut links = LinkRelations::new();
        links.add("item", Link::new("/1"));
        links.add_collection("item", vec![Link::new("/2"), Link::new("/3")]);
        assert_eq!(
            serde_json::to_value(&links).unwrap(),
            json!({"item": [{"href": "/1"}, {"href": "/2"}, {"href": "/3"}]})
        );

        links.add_collection("other", vec![Link::new("/x")]);
        assert_eq!(
            serde_json::to_value(&links).unwrap()["other"],
            json!([{"href": "/x"}])
        );
    }

    #[test]
    fn test_replace_discards_collection() {
        let mut links = LinkRelations::new();
        links.add("next", Link::new("/a"));
        links.add("next", Link::new("/b"));

        links.replace("next", Link::new("/c"));
        assert_eq!(links.get("next"), Some(&Slot::One(Link::new("/c"))));
        assert_eq!(links.len(), 1);
        assert!(links.contains("next"));
    }
}
