//! Traits and helper types describing objects that can be serialized
//!
//! A domain object implements `SerializableObject` (usually derived): it names itself, lists its
//! fields in order and hands out a `Value` plus a `SerializationKind` per field. The builder
//! decides from those how each field ends up in the XML tree.
//!
//! Rust values are turned into `Value`s through `ToValue`.

mod value;

pub use self::value::{
	ToValue,
	Value,
};

pub(crate) use self::value::iso_date_time;

use crate::STANDARD_CHANGELOG_NAMESPACE;
use std::borrow::Cow;

/// How a field is represented in XML
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum SerializationKind {
	/// Attribute on the element of the owning object
	NamedField,
	/// Child element wrapping the value
	NestedObject,
	/// Text content of the element of the owning object
	DirectValue,
}

impl Default for SerializationKind {
	fn default() -> Self {
		Self::NamedField
	}
}

/// Object that describes its own fields for serialization.
///
/// Namespaces are URIs; an empty namespace means "no namespace".
pub trait SerializableObject {
	/// Element name of the object
	fn serialized_object_name(&self) -> Cow<'_, str>;

	/// Namespace URI of the object element
	fn serialized_object_namespace(&self) -> Cow<'_, str> {
		Cow::Borrowed(STANDARD_CHANGELOG_NAMESPACE)
	}

	/// Names of all fields to serialize, in order
	fn serializable_fields(&self) -> Vec<Cow<'_, str>>;

	/// Current value of a field; unknown fields are `Value::Null`
	fn serializable_field_value(&self, field: &str) -> Value<'_>;

	/// How the field is represented
	fn serializable_field_kind(&self, field: &str) -> SerializationKind {
		let _ = field;
		SerializationKind::NamedField
	}

	/// Namespace URI of a field; defaults to the namespace of the object
	fn serializable_field_namespace(&self, field: &str) -> Cow<'_, str> {
		let _ = field;
		self.serialized_object_namespace()
	}

	/// Human readable identity, used to point at the offending object in error messages.
	///
	/// Top level objects like change sets should provide one.
	fn describe(&self) -> Option<String> {
		None
	}
}
