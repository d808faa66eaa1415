#![cfg_attr(doc_cfg, feature(doc_cfg))]
#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/xml-changelog/0.1.0")]
//! This library serializes change-log objects into XML documents.
//!
//! Objects describe themselves through `SerializableObject` (which can be derived): their element
//! name and namespace, their fields in order, and for each field the value and whether it becomes
//! an attribute (`NamedField`), a child element (`NestedObject`) or the text of the element
//! (`DirectValue`).
//!
//! `XmlChangeLogSerializer` turns those objects into an element tree, prefixing names from
//! foreign namespaces with the short names of a `NamespaceRegistry`. It can
//! - render a single object as canonical text (`serialize`),
//! - write a full `databaseChangeLog` document (`write`),
//! - insert a single object into an existing document file (`append`).
//!
//! All text placed into the tree is checked for characters XML parsers reject; such data fails
//! serialization with an error naming the element and attribute (and, for objects providing an
//! identity like change sets, the object).
//!
//! Full documents are written with [`quick-xml`](https://crates.io/crates/quick-xml).
//!
//! If the `derive` feature is enabled `SerializableObject` can be derived with
//! `#[derive(Serializable)]`.

pub mod builder;
pub mod check;
pub mod column;
pub mod config;
pub mod errors;
pub mod namespace;
pub mod quick_xml;
pub mod render;
pub mod serializable;
pub mod serializer;
pub mod tree;

#[cfg(test)]
mod test_struct;

/// Result alias with our error type included
pub type Result<T> = std::result::Result<T, Error>;

/// Namespace of change-log documents
pub const STANDARD_CHANGELOG_NAMESPACE: &str = "http://www.liquibase.org/xml/ns/dbchangelog";

/// Namespace of change-log extensions
pub const EXT_CHANGELOG_NAMESPACE: &str = "http://www.liquibase.org/xml/ns/dbchangelog-ext";

/// Namespace of XML schema instance attributes
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// XML version declared by written documents
pub const XML_VERSION: &str = "1.1";

/// Name of the root element of change-log documents
pub const ROOT_ELEMENT: &str = "databaseChangeLog";

pub use self::{
	builder::NodeBuilder,
	config::SerializerConfig,
	errors::{
		Error,
		InvalidCharacter,
	},
	namespace::{
		NamespaceDetails,
		NamespaceEntry,
		NamespaceRegistry,
	},
	render::{
		EntityEscape,
		Indent,
		Verbatim,
		XmlEscape,
	},
	serializable::{
		SerializableObject,
		SerializationKind,
		ToValue,
		Value,
	},
	serializer::{
		ChangeLogSerializer,
		XmlChangeLogSerializer,
	},
	tree::{
		Document,
		Element,
	},
};

#[cfg_attr(doc_cfg, doc(cfg(feature = "derive")))]
#[cfg(feature = "derive")]
pub use xml_changelog_derive::Serializable;
