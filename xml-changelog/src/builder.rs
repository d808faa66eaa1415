//! Turns serializable objects into element trees
//!
//! A `NodeBuilder` is the context of one serialization pass: it borrows the namespace registry
//! and the serializer the pass runs for, and hands out freshly owned elements.

use crate::{
	errors::{
		self,
		Error,
	},
	namespace::{
		NamespaceRegistry,
		Qualifier,
	},
	serializable::{
		SerializableObject,
		SerializationKind,
		Value,
	},
	serializer::ChangeLogSerializer,
	tree::Element,
	Result,
	STANDARD_CHANGELOG_NAMESPACE,
};

/// Builds elements for serializable objects
pub struct NodeBuilder<'a> {
	qualifier: Qualifier<'a>,
}

impl<'a> NodeBuilder<'a> {
	/// Builder resolving namespaces through `registry` on behalf of `serializer`
	pub fn new(registry: &'a NamespaceRegistry, serializer: &'a dyn ChangeLogSerializer) -> Self {
		Self {
			qualifier: Qualifier::new(registry, serializer),
		}
	}

	/// Build the element for `object`, including all nested objects.
	///
	/// Invalid characters in the object's data are reported with the identity of the object if
	/// it has one (see `SerializableObject::describe`).
	pub fn build(&self, object: &dyn SerializableObject) -> Result<Element> {
		let namespace = object.serialized_object_namespace();
		let name = self
			.qualifier
			.element_name(&object.serialized_object_name(), &namespace);
		tracing::trace!(element = %name, "building element");

		let mut node = Element::new(&*namespace, name);
		let placed = object.serializable_fields().iter().try_for_each(|field| {
			self.place(
				&mut node,
				&object.serializable_field_namespace(field),
				field,
				object.serializable_field_value(field),
				object.serializable_field_kind(field),
				&namespace,
			)
		});

		match placed {
			Ok(()) => Ok(node),
			Err(e @ Error::InvalidObject { .. }) => Err(e),
			Err(e) if e.invalid_character().is_some() => match object.describe() {
				Some(identity) => Err(errors::invalid_object(identity, e)),
				None => Err(e),
			},
			Err(e) => Err(e),
		}
	}

	/// Element with the given name and (validated) text content
	pub fn text_node(&self, namespace: &str, name: &str, content: &str) -> Result<Element> {
		let mut node = Element::new(namespace, name);
		node.set_text(content)
			.map_err(|e| errors::invalid_text(name, e))?;
		Ok(node)
	}

	fn place(
		&self,
		node: &mut Element,
		field_namespace: &str,
		field: &str,
		value: Value<'_>,
		kind: SerializationKind,
		parent_namespace: &str,
	) -> Result<()> {
		match value {
			Value::Null => (),
			Value::Sequence(items) => {
				for item in items {
					self.place(node, field_namespace, field, item, kind, parent_namespace)?;
				}
			},
			Value::Map(entries) => {
				for (key, value) in entries {
					let entry_name = self.qualifier.qualify(field, field_namespace, parent_namespace)?;
					let mut entry = Element::new(STANDARD_CHANGELOG_NAMESPACE, entry_name);
					if kind == SerializationKind::NestedObject {
						self.place(&mut entry, field_namespace, &key, value, kind, field_namespace)?;
					} else {
						self.place(
							&mut entry,
							field_namespace,
							"name",
							Value::Scalar(key),
							SerializationKind::NamedField,
							field_namespace,
						)?;
						self.place(&mut entry, field_namespace, "value", value, kind, field_namespace)?;
					}
					node.push_child(entry);
				}
			},
			Value::Object(object) => {
				node.push_child(self.build(object)?);
			},
			Value::Array(items) => {
				if kind == SerializationKind::NestedObject {
					let mut wrapper = Element::new(STANDARD_CHANGELOG_NAMESPACE, field);
					for item in items {
						self.place(
							&mut wrapper,
							STANDARD_CHANGELOG_NAMESPACE,
							field,
							item,
							kind,
							parent_namespace,
						)?;
					}
					node.push_child(wrapper);
				} else {
					for item in items {
						self.place(node, field_namespace, field, item, kind, parent_namespace)?;
					}
				}
			},
			Value::Scalar(text) => match kind {
				SerializationKind::NestedObject => {
					node.push_child(self.text_node(STANDARD_CHANGELOG_NAMESPACE, field, &text)?);
				},
				SerializationKind::DirectValue => {
					node.set_text(&text)
						.map_err(|e| errors::invalid_text(node.name(), e))?;
				},
				SerializationKind::NamedField => {
					let attribute = self.qualifier.qualify(field, field_namespace, parent_namespace)?;
					node.set_attribute(&attribute, &text)
						.map_err(|e| errors::invalid_attribute(node.name(), &attribute, e))?;
				},
			},
		}
		Ok(())
	}
}
