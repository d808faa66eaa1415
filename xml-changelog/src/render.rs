//! Canonical text rendering of single elements
//!
//! The output is deterministic: attributes are always sorted by name, no matter in which order
//! they were set. In pretty mode elements with more than two attributes put every attribute
//! after the first on its own line.

use crate::tree::Element;
use std::borrow::Cow;

/// Indentation of rendered output
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Indent {
	/// No whitespace is inserted
	Compact,
	/// Nested elements on new lines, starting at the given indentation
	Pretty(usize),
}

impl Indent {
	fn nested(self) -> Self {
		match self {
			Self::Compact => Self::Compact,
			Self::Pretty(n) => Self::Pretty(n + 4),
		}
	}
}

/// Hook to escape text and attribute values before they are rendered.
///
/// Both methods leave the input untouched by default.
pub trait XmlEscape {
	/// Escape (trimmed) text content
	fn escape_text<'a>(&self, text: &'a str) -> Cow<'a, str> {
		Cow::Borrowed(text)
	}

	/// Escape attribute value
	fn escape_attribute<'a>(&self, value: &'a str) -> Cow<'a, str> {
		Cow::Borrowed(value)
	}
}

/// Renders text and attribute values as they are
#[derive(Clone, Copy, Default, Debug)]
pub struct Verbatim;

impl XmlEscape for Verbatim {}

/// Replaces XML special characters with entities
#[derive(Clone, Copy, Default, Debug)]
pub struct EntityEscape;

fn escape(raw: &str) -> Cow<'_, str> {
	match quick_xml::escape::escape(raw.as_bytes()) {
		Cow::Borrowed(_) => Cow::Borrowed(raw),
		// escaping only replaces ASCII characters with ASCII entities
		Cow::Owned(escaped) => Cow::Owned(String::from_utf8_lossy(&escaped).into_owned()),
	}
}

impl XmlEscape for EntityEscape {
	fn escape_text<'a>(&self, text: &'a str) -> Cow<'a, str> {
		escape(text)
	}

	fn escape_attribute<'a>(&self, value: &'a str) -> Cow<'a, str> {
		escape(value)
	}
}

/// Render `node` (and its children) as text.
pub fn render(node: &Element, indent: Indent, escape: &dyn XmlEscape) -> String {
	let mut buffer = String::new();
	render_into(node, &mut buffer, indent, escape);
	buffer
}

fn push_indent(buffer: &mut String, width: usize) {
	buffer.extend(std::iter::repeat(' ').take(width));
}

fn render_into(node: &Element, buffer: &mut String, indent: Indent, escape: &dyn XmlEscape) {
	if let Indent::Pretty(n) = indent {
		if n > 0 {
			buffer.push('\n');
		}
		push_indent(buffer, n);
	}
	buffer.push('<');
	buffer.push_str(node.name());

	let mut attributes: Vec<(&str, &str)> = node.attributes().collect();
	attributes.sort_by(|a, b| a.0.cmp(b.0));
	let wrap = attributes.len() > 2;
	for (i, (name, value)) in attributes.into_iter().enumerate() {
		match indent {
			Indent::Pretty(n) if wrap && i > 0 => {
				buffer.push('\n');
				push_indent(buffer, n + 8);
			},
			_ => buffer.push(' '),
		}
		buffer.push_str(name);
		buffer.push_str("=\"");
		buffer.push_str(&escape.escape_attribute(value));
		buffer.push('"');
	}

	let text = node.text().map(str::trim).unwrap_or("");
	let text = escape.escape_text(text);
	let children = node.children();

	if children.is_empty() && text.is_empty() {
		buffer.push_str("/>");
		return;
	}

	buffer.push('>');
	buffer.push_str(&text);
	for child in children {
		render_into(child, buffer, indent.nested(), escape);
	}
	if let Indent::Pretty(n) = indent {
		if !children.is_empty() {
			buffer.push('\n');
			push_indent(buffer, n);
		}
	}
	buffer.push_str("</");
	buffer.push_str(node.name());
	buffer.push('>');
}
