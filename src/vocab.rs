//! Reserved names of the HAL media type
//!
//! Keys the encoder adds to every document and the link relations
//! the library itself writes.

/// Reserved document key holding the link relations
pub const LINKS_KEY: &str = "_links";

/// Reserved document key holding embedded resources
/// Only present when at least one resource is embedded
pub const EMBEDDED_KEY: &str = "_embedded";

/// Link attribute holding the target URI
pub const HREF_ATTR: &str = "href";

/// Link attribute naming a curie (or any named link)
pub const NAME_ATTR: &str = "name";

/// Link attribute flagging an href as a URI template
pub const TEMPLATED_ATTR: &str = "templated";

/// Relation of the canonical link every resource is created with
pub const SELF_REL: &str = "self";

/// Relation under which curie declarations are collected
pub const CURIES_REL: &str = "curies";

/// Separator between a curie name and the relation it namespaces
pub const CURIE_SEPARATOR: char = ':';

/// Build a namespaced relation, e.g. `curie_relation("doc", "orders")` -> `"doc:orders"`
pub fn curie_relation(name: &str, relation: &str) -> String {
    format!("{}{}{}", name, CURIE_SEPARATOR, relation)
}

/// Whether a document key is reserved by the encoder
pub fn is_reserved_key(key: &str) -> bool {
    key == LINKS_KEY || key == EMBEDDED_KEY
}
