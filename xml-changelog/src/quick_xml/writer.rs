use crate::{
	tree::{
		Document,
		Element,
	},
	Result,
};
use quick_xml::events::{
	BytesDecl,
	BytesEnd,
	BytesStart,
	BytesText,
	Event,
};
use std::io;

/// Serialize document into memory, declaring `encoding` in the XML declaration.
///
/// An `indent` of zero writes everything on a single line.
pub fn serialize_document(document: &Document, encoding: &str, indent: usize) -> Result<String> {
	let mut buf = Vec::new();
	{
		let mut writer = if indent > 0 {
			quick_xml::Writer::new_with_indent(&mut buf, b' ', indent)
		} else {
			quick_xml::Writer::new(&mut buf)
		};
		Writer::new(&mut writer).write_document(document, encoding)?;
	}
	// element names, attributes and text are all valid utf-8
	String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}

/// Tree writer adaptor for `quick_xml::Writer`
pub struct Writer<'w, W: io::Write> {
	writer: &'w mut quick_xml::Writer<W>,
}

impl<'w, W: io::Write> Writer<'w, W> {
	/// New adaptor using the writer
	pub fn new(writer: &'w mut quick_xml::Writer<W>) -> Self {
		Self { writer }
	}

	/// Write XML declaration and root element
	pub fn write_document(&mut self, document: &Document, encoding: &str) -> Result<()> {
		self.writer.write_event(Event::Decl(BytesDecl::new(
			document.version().as_bytes(),
			Some(encoding.as_bytes()),
			None,
		)))?;
		self.write_element(document.root())
	}

	/// Write single element including its children
	pub fn write_element(&mut self, element: &Element) -> Result<()> {
		let name = element.name().as_bytes();
		let mut start = BytesStart::borrowed_name(name);
		for attribute in element.attributes() {
			start.push_attribute(attribute);
		}

		let text = element.text().filter(|t| !t.is_empty());
		if element.children().is_empty() && text.is_none() {
			self.writer.write_event(Event::Empty(start))?;
			return Ok(());
		}

		self.writer.write_event(Event::Start(start))?;
		if let Some(text) = text {
			self.writer
				.write_event(Event::Text(BytesText::from_plain_str(text)))?;
		}
		for child in element.children() {
			self.write_element(child)?;
		}
		self.writer.write_event(Event::End(BytesEnd::borrowed(name)))?;
		Ok(())
	}
}
