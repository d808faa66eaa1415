//! Serializer configuration

use crate::{
	errors,
	Result,
};
use encoding_rs::Encoding;

/// Environment variable naming the output file encoding
pub const OUTPUT_FILE_ENCODING_ENV: &str = "CHANGELOG_OUTPUT_FILE_ENCODING";

/// Configuration of an `XmlChangeLogSerializer`
#[derive(Clone, Copy, Debug)]
pub struct SerializerConfig {
	output_encoding: &'static Encoding,
	indent: usize,
}

impl Default for SerializerConfig {
	fn default() -> Self {
		Self {
			output_encoding: encoding_rs::UTF_8,
			indent: 4,
		}
	}
}

impl SerializerConfig {
	/// Default configuration: UTF-8 output, indentation of 4
	pub fn new() -> Self {
		Self::default()
	}

	/// Default configuration with the output encoding taken from
	/// `CHANGELOG_OUTPUT_FILE_ENCODING` (if set).
	pub fn from_env() -> Result<Self> {
		match std::env::var(OUTPUT_FILE_ENCODING_ENV) {
			Ok(label) if !label.trim().is_empty() => Self::new().output_encoding_label(&label),
			_ => Ok(Self::new()),
		}
	}

	/// Set output encoding.
	///
	/// Fails for encodings `encoding_rs` can only decode (UTF-16 and replacement); their
	/// output would silently become UTF-8.
	pub fn output_encoding(mut self, encoding: &'static Encoding) -> Result<Self> {
		if encoding.output_encoding() != encoding {
			return Err(errors::configuration(format!(
				"cannot write files in {} encoding",
				encoding.name()
			)));
		}
		self.output_encoding = encoding;
		Ok(self)
	}

	/// Set output encoding by label (e.g. "UTF-8", "latin1").
	pub fn output_encoding_label(self, label: &str) -> Result<Self> {
		let encoding = Encoding::for_label(label.trim().as_bytes())
			.ok_or_else(|| errors::configuration(format!("unknown output encoding {:?}", label)))?;
		self.output_encoding(encoding)
	}

	/// Set indentation width for full documents.
	pub fn indent(mut self, indent: usize) -> Self {
		self.indent = indent;
		self
	}

	/// Encoding of written and appended files
	pub fn encoding(&self) -> &'static Encoding {
		self.output_encoding
	}

	/// Indentation width used when writing full documents
	pub fn indent_width(&self) -> usize {
		self.indent
	}

	/// Encode text for writing; characters the encoding can't represent are replaced.
	pub(crate) fn encode<'a>(&self, text: &'a str) -> std::borrow::Cow<'a, [u8]> {
		let (bytes, used, replaced) = self.output_encoding.encode(text);
		if replaced {
			tracing::warn!(
				encoding = used.name(),
				"output contains characters not representable in the output encoding"
			);
		}
		bytes
	}

	/// Decode file content; a byte order mark is kept as part of the text.
	///
	/// Fails on malformed input, as writing the decoded text back would not reproduce the
	/// original bytes.
	pub(crate) fn decode<'a>(&self, bytes: &'a [u8]) -> Result<std::borrow::Cow<'a, str>> {
		let (text, malformed) = self.output_encoding.decode_without_bom_handling(bytes);
		if malformed {
			return Err(errors::malformed_input(self.output_encoding.name()));
		}
		Ok(text)
	}
}
