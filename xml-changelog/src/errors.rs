#![allow(missing_docs)] // names should be good enough
//! Error types and helper functions to generate common errors

use std::io;
use thiserror::Error;

/// A character that must not be embedded in XML text or attribute values.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
#[error("Invalid string encoding with code point {code_point:#06X}")]
pub struct InvalidCharacter {
	/// The rejected unicode code point
	pub code_point: u32,
}

#[derive(Debug, Error)]
pub enum Error {
	#[error("cannot initialize XML serializer: {0}")]
	Configuration(String),

	#[error(transparent)]
	InvalidCharacter(#[from] InvalidCharacter),

	#[error("{source} in text of {node}")]
	InvalidText {
		node: String,
		#[source]
		source: InvalidCharacter,
	},

	#[error("{source} on {node}.{attribute}")]
	InvalidAttribute {
		node: String,
		attribute: String,
		#[source]
		source: InvalidCharacter,
	},

	#[error("{source} in {identity}. To resolve, remove the invalid character on the database and try again")]
	InvalidObject {
		identity: String,
		#[source]
		source: Box<Error>,
	},

	#[error("no namespace details registered for {namespace:?}")]
	UnregisteredNamespace { namespace: String },

	#[error("file content is not valid {encoding}")]
	MalformedInput { encoding: String },

	#[error(transparent)]
	Io(#[from] io::Error),

	#[error("XML writer failed: {0}")]
	Xml(#[from] quick_xml::Error),
}

impl Error {
	/// The rejected character, if this error (or the one it wraps) came from the character
	/// validator.
	pub fn invalid_character(&self) -> Option<InvalidCharacter> {
		match self {
			Self::InvalidCharacter(c) => Some(*c),
			Self::InvalidText { source, .. } => Some(*source),
			Self::InvalidAttribute { source, .. } => Some(*source),
			Self::InvalidObject { source, .. } => source.invalid_character(),
			_ => None,
		}
	}
}

pub fn configuration(msg: impl Into<String>) -> Error {
	Error::Configuration(msg.into())
}

pub fn invalid_text(node: &str, source: InvalidCharacter) -> Error {
	Error::InvalidText { node: node.into(), source }
}

pub fn invalid_attribute(node: &str, attribute: &str, source: InvalidCharacter) -> Error {
	Error::InvalidAttribute {
		node: node.into(),
		attribute: attribute.into(),
		source,
	}
}

pub fn invalid_object(identity: String, source: Error) -> Error {
	Error::InvalidObject {
		identity,
		source: Box::new(source),
	}
}

pub fn malformed_input(encoding: &str) -> Error {
	Error::MalformedInput { encoding: encoding.into() }
}

pub fn unregistered_namespace(namespace: &str) -> Error {
	Error::UnregisteredNamespace { namespace: namespace.into() }
}
