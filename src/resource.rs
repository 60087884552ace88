//! The HAL resource and its encoding
//!
//! A [`Resource`] owns a payload, its links (always including `self`) and
//! the resources embedded in it. [`Resource::encode`] flattens all three
//! into a single document map:
//!
//! 1. payload fields, from [`FieldMapper`] or the serde fallback
//! 2. `_links`, each relation as one link object or an array of them
//! 3. `_embedded`, only when something is embedded, each resource encoded
//!    recursively
//!
//! The reserved keys are written last and overwrite payload fields with
//! the same name.

use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;

use crate::curie::CurieHandle;
use crate::embedded::{Embedded, SharedResource};
use crate::error::HalError;
use crate::extract::{Entry, Extracted, FieldMapper, Mapped, PayloadFields};
use crate::link::{Link, LinkAttrs, LinkRelations};
use crate::vocab::{
    is_reserved_key, CURIES_REL, EMBEDDED_KEY, LINKS_KEY, NAME_ATTR, SELF_REL, TEMPLATED_ATTR,
};

/// A payload together with its hypermedia controls
pub struct Resource {
    payload: Box<dyn PayloadFields>,
    self_href: String,
    links: LinkRelations,
    embedded: Embedded,
    curies: BTreeSet<String>,
}

impl Resource {
    /// Create a resource whose fields are read from the payload's `Serialize` impl
    ///
    /// The href is stored verbatim as the `self` link.
    pub fn new<P>(payload: P, self_href: impl Into<String>) -> Self
    where
        P: Serialize + Send + Sync + 'static,
    {
        Self::from_fields(Box::new(Extracted(payload)), self_href.into())
    }

    /// Create a resource whose fields come from [`FieldMapper::field_map`]
    pub fn with_mapper<P>(payload: P, self_href: impl Into<String>) -> Self
    where
        P: FieldMapper + Send + Sync + 'static,
    {
        Self::from_fields(Box::new(Mapped(payload)), self_href.into())
    }

    fn from_fields(payload: Box<dyn PayloadFields>, self_href: String) -> Self {
        let mut links = LinkRelations::new();
        links.add(SELF_REL, Link::new(self_href.clone()));

        Self {
            payload,
            self_href,
            links,
            embedded: Embedded::new(),
            curies: BTreeSet::new(),
        }
    }

    /// The href the resource was created with
    pub fn self_href(&self) -> &str {
        &self.self_href
    }

    pub fn links(&self) -> &LinkRelations {
        &self.links
    }

    /// Direct access to the link store, e.g. to `replace` a relation
    pub fn links_mut(&mut self) -> &mut LinkRelations {
        &mut self.links
    }

    pub fn embedded(&self) -> &Embedded {
        &self.embedded
    }

    /// Direct access to the embedded store, e.g. to `set` or `delete` a relation
    pub fn embedded_mut(&mut self) -> &mut Embedded {
        &mut self.embedded
    }

    pub fn add_link(&mut self, relation: impl Into<String>, link: Link) {
        self.links.add(relation, link);
    }

    /// Add a link built from an href alone
    pub fn add_new_link(&mut self, relation: impl Into<String>, href: impl Into<String>) {
        self.add_link(relation, Link::new(href));
    }

    /// Add a link built from an href and attribute maps (later maps win)
    pub fn add_new_link_with_attrs(
        &mut self,
        relation: impl Into<String>,
        href: impl Into<String>,
        attrs: impl IntoIterator<Item = LinkAttrs>,
    ) {
        self.add_link(relation, Link::with_attrs(href, attrs));
    }

    pub fn add_link_collection(&mut self, relation: impl Into<String>, links: Vec<Link>) {
        self.links.add_collection(relation, links);
    }

    /// Embed a resource under a relation
    ///
    /// Passing a [`SharedResource`] keeps the caller's handle live: later
    /// changes through it are visible when this resource is encoded.
    pub fn embed(&mut self, relation: impl Into<String>, resource: impl Into<SharedResource>) {
        self.embedded.add(relation, resource);
    }

    pub fn embed_collection(&mut self, relation: impl Into<String>, resources: Vec<SharedResource>) {
        self.embedded.add_collection(relation, resources);
    }

    /// Declare a curie and get a handle for adding links in its namespace
    ///
    /// The declaration goes into the `curies` relation, which is always an
    /// array.
    pub fn register_curie(
        &mut self,
        name: impl Into<String>,
        href: impl Into<String>,
        templated: bool,
    ) -> CurieHandle<'_> {
        let name = name.into();
        let declaration = Link::new(href)
            .with_attr(NAME_ATTR, name.clone())
            .with_attr(TEMPLATED_ATTR, templated);
        self.links.add_collection(CURIES_REL, vec![declaration]);

        tracing::debug!(curie = %name, resource = %self.self_href, "registered curie");
        self.curies.insert(name.clone());
        CurieHandle::new(name, self)
    }

    /// Handle for a curie registered earlier
    pub fn curie(&mut self, name: &str) -> Option<CurieHandle<'_>> {
        if self.curies.contains(name) {
            Some(CurieHandle::new(name.to_string(), self))
        } else {
            None
        }
    }

    /// Names of registered curies
    pub fn curies(&self) -> impl Iterator<Item = &str> {
        self.curies.iter().map(String::as_str)
    }

    /// The payload's own fields, without `_links` or `_embedded`
    pub fn fields(&self) -> Result<Entry, HalError> {
        self.payload.fields()
    }

    /// Encode into a HAL document map
    ///
    /// Read-only: repeated calls on an unchanged tree give equal maps.
    pub fn encode(&self) -> Result<Entry, HalError> {
        let mut stack = Vec::new();
        self.encode_within(&mut stack)
    }

    pub(crate) fn encode_within(&self, stack: &mut Vec<SharedResource>) -> Result<Entry, HalError> {
        tracing::trace!(href = %self.self_href, depth = stack.len(), "encoding resource");

        let mut document = self.payload.fields()?;

        if let Some(key) = document.keys().find(|k| is_reserved_key(k)) {
            tracing::debug!(key = %key, href = %self.self_href, "payload field overwritten by reserved key");
        }

        document.insert(LINKS_KEY.to_string(), serde_json::to_value(&self.links)?);

        if !self.embedded.is_empty() {
            let embedded = self.embedded.encode_within(stack)?;
            document.insert(EMBEDDED_KEY.to_string(), embedded);
        }

        Ok(document)
    }

    /// Wrap into a handle that can be embedded in several parents
    pub fn into_shared(self) -> SharedResource {
        SharedResource::new(self)
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Embedded resources are listed by relation only; shared trees may be cyclic
        let embedded: Vec<&str> = self.embedded.iter().map(|(rel, _)| rel).collect();
        f.debug_struct("Resource")
            .field("self_href", &self.self_href)
            .field("links", &self.links)
            .field("embedded", &embedded)
            .field("curies", &self.curies)
            .finish_non_exhaustive()
    }
}

impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let document = self.encode().map_err(serde::ser::Error::custom)?;
        document.serialize(serializer)
    }
}

/// Encode a resource into a JSON value
pub fn to_value(resource: &Resource) -> Result<Value, HalError> {
    Ok(Value::Object(resource.encode()?))
}

/// Serialize a resource to a HAL JSON string
pub fn to_json_string(resource: &Resource, pretty: bool) -> Result<String, HalError> {
    let document = resource.encode()?;
    if pretty {
        Ok(serde_json::to_string_pretty(&document)?)
    } else {
        Ok(serde_json::to_string(&document)?)
    }
}
