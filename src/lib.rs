//! HAL Document Encoding Library
//!
//! Encodes application data into the HAL (Hypertext Application Language)
//! JSON media type described at <http://stateless.co/hal_specification.html>.
//!
//! # Overview
//!
//! A HAL document is a resource's own fields plus two reserved keys:
//!
//! - `_links`: hyperlinks grouped by relation, always containing `self`
//! - `_embedded`: nested resources grouped by relation, each a full HAL
//!   document, present only when something is embedded
//!
//! A relation holds a single value until a second value is added to it;
//! from then on it is an array. A single link is never wrapped in a
//! one-element array behind the caller's back.
//!
//! # Payload fields
//!
//! Payloads that implement [`FieldMapper`] decide their own HAL fields.
//! Any other `Serialize` payload is projected through its serde metadata
//! (`rename`, `skip`, `skip_serializing_if`).
//!
//! # Usage
//!
//! ```
//! use hal_document::{to_json_string, FieldMapper, Entry, Resource};
//! use serde_json::json;
//!
//! struct Task {
//!     id: u32,
//!     name: String,
//! }
//!
//! impl FieldMapper for Task {
//!     fn field_map(&self) -> Entry {
//!         let mut entry = Entry::new();
//!         entry.insert("id".to_string(), json!(self.id));
//!         entry.insert("name".to_string(), json!(self.name));
//!         entry
//!     }
//! }
//!
//! let mut list = Resource::new(json!({"count": 2}), "/tasks");
//! list.add_new_link("next", "/tasks?page=2");
//! list.embed("tasks", Resource::with_mapper(Task { id: 1, name: "Write".into() }, "/tasks/1"));
//! list.embed("tasks", Resource::with_mapper(Task { id: 2, name: "Ship".into() }, "/tasks/2"));
//!
//! let doc = to_json_string(&list, false)?;
//! assert!(doc.contains(r#""tasks":[{"#));
//! # Ok::<(), hal_document::HalError>(())
//! ```
//!
//! # Sharing
//!
//! Embedded resources are held as [`SharedResource`] handles. Embedding a
//! clone of a handle keeps it live: changes made through the handle show up
//! in the parent's next encoding.

pub mod curie;
pub mod embedded;
pub mod error;
pub mod extract;
pub mod link;
pub mod resource;
pub mod slot;
pub mod vocab;

// Re-export main types for convenience
pub use crate::curie::CurieHandle;
pub use crate::embedded::{Embedded, SharedResource};
pub use crate::error::HalError;
pub use crate::extract::{extract_fields, Entry, FieldMapper};
pub use crate::link::{Link, LinkAttrs, LinkRelations};
pub use crate::resource::{to_json_string, to_value, Resource};
pub use crate::slot::Slot;
pub use crate::vocab::{CURIES_REL, EMBEDDED_KEY, LINKS_KEY, SELF_REL};
