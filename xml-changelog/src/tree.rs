//! Owned XML tree built by the node builder
//!
//! Every element exclusively owns its attributes and children. Attribute values and text content
//! are validated with `check_string` when they are set.

use crate::{
	check::check_string,
	errors::InvalidCharacter,
	XML_VERSION,
};

/// An XML element
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Element {
	name: String,
	namespace: String,
	attributes: Vec<(String, String)>,
	children: Vec<Element>,
	text: Option<String>,
}

impl Element {
	/// Empty element with (possibly prefixed) name in namespace
	pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			namespace: namespace.into(),
			..Self::default()
		}
	}

	/// Qualified name of the element
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Namespace URI of the element
	pub fn namespace(&self) -> &str {
		&self.namespace
	}

	/// Set attribute; replaces the value if the attribute already exists (keeping its position).
	pub fn set_attribute(&mut self, name: &str, value: &str) -> Result<(), InvalidCharacter> {
		let value = check_string(value)?;
		match self.attributes.iter_mut().find(|(n, _)| n == name) {
			Some((_, v)) => {
				v.clear();
				v.push_str(value);
			},
			None => self.attributes.push((name.to_string(), value.to_string())),
		}
		Ok(())
	}

	/// Value of an attribute
	pub fn attribute(&self, name: &str) -> Option<&str> {
		self.attributes
			.iter()
			.find(|(n, _)| n == name)
			.map(|(_, v)| v.as_str())
	}

	/// Attributes in insertion order
	pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
		self.attributes.iter().map(|(n, v)| (n.as_str(), v.as_str()))
	}

	/// Replace text content.
	pub fn set_text(&mut self, text: &str) -> Result<(), InvalidCharacter> {
		self.text = Some(check_string(text)?.to_string());
		Ok(())
	}

	/// Text content (not including text of children)
	pub fn text(&self) -> Option<&str> {
		self.text.as_deref()
	}

	/// Append child element
	pub fn push_child(&mut self, child: Element) {
		self.children.push(child);
	}

	/// Child elements
	pub fn children(&self) -> &[Element] {
		&self.children
	}
}

/// A complete document
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Document {
	root: Element,
}

impl Document {
	/// Document with root element
	pub fn new(root: Element) -> Self {
		Self { root }
	}

	/// XML version of the document; always "1.1"
	pub fn version(&self) -> &'static str {
		XML_VERSION
	}

	/// Root element
	pub fn root(&self) -> &Element {
		&self.root
	}

	/// Root element for modification
	pub fn root_mut(&mut self) -> &mut Element {
		&mut self.root
	}
}
