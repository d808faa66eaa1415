//! Derive `xml-changelog` trait implementations
//!
//! Deriving `Serializable` implements `SerializableObject` and `ToValue` for a struct with named
//! fields. It supports the following attributes on the struct:
//! - `#[serializable(name = "...")]`: XML element name; defaults to the struct name in
//!   `lowerCamelCase`
//! - `#[serializable(namespace = "...")]`: namespace URI of the element; defaults to the standard
//!   change-log namespace
//! - `#[serializable(describe = "...")]`: path to a `fn(&Self) -> String` providing the identity
//!   shown in error messages
//! - `#[serializable(crate = "...")]`: Name of `xml-changelog` crate in local scope; defaults to
//!   `xml_changelog`
//!
//! And the following attributes on struct fields:
//! - `#[serializable(attr)]`: Serialize as attribute (the default)
//! - `#[serializable(nested)]`: Serialize as child element
//! - `#[serializable(text)]`: Serialize as text content of the element
//! - `#[serializable(rename = "...")]`: Field name; defaults to the field name in `lowerCamelCase`
//! - `#[serializable(namespace = "...")]`: namespace URI of the field
//! - `#[serializable(skip)]`: Don't serialize the field
//!
//! Multiple attributes can be combined like `#[serializable(nested, rename = "...")]`.
//!
#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/xml-changelog-derive/0.1.0")]

extern crate proc_macro;

mod element;
mod serialize;

use darling::FromDeriveInput;
use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

use crate::element::ObjectInput;

/// Derive `xml-changelog::{SerializableObject,ToValue}`
#[proc_macro_derive(Serializable, attributes(serializable))]
pub fn derive_serializable(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as DeriveInput);

	TokenStream::from(match ObjectInput::from_derive_input(&input) {
		Ok(input) => serialize::derive_serializable(&input),
		Err(e) => e.write_errors(),
	})
}
