use std::borrow::Cow;

use darling::{
	ast,
	util::Flag,
	FromDeriveInput, FromField,
};
use proc_macro2::Span;
use syn::{parse_quote, spanned::Spanned, Generics, Ident, Path};

/// Convert a Rust identifier (`snake_case` or `CamelCase`) to `lowerCamelCase`.
pub fn lower_camel_case(ident: &str) -> String {
	let ident = ident.strip_prefix("r#").unwrap_or(ident);
	let mut result = String::with_capacity(ident.len());
	let mut upper_next = false;
	for c in ident.chars() {
		if c == '_' {
			upper_next = !result.is_empty();
		} else if result.is_empty() {
			result.extend(c.to_lowercase());
		} else if upper_next {
			result.extend(c.to_uppercase());
			upper_next = false;
		} else {
			result.push(c);
		}
	}
	result
}

/// How a field ends up in XML; mirrors `SerializationKind`
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Kind {
	NamedField,
	NestedObject,
	DirectValue,
}

/// Parsed representation of a serialized struct field.
pub struct Field {
	pub ident: Ident,
	/// Field name in XML
	pub name: String,
	pub kind: Kind,
	/// Namespace URI if different from the object namespace
	pub namespace: Option<String>,
	pub skip: bool,
	span: Span,
}

impl Field {
	pub fn span(&self) -> Span {
		self.span
	}
}

impl FromField for Field {
	fn from_field(field: &syn::Field) -> darling::Result<Self> {
		#[derive(FromField)]
		#[darling(attributes(serializable))]
		struct RawField {
			ident: Option<Ident>,
			#[darling(default)]
			attr: Flag,
			#[darling(default)]
			nested: Flag,
			#[darling(default)]
			text: Flag,
			#[darling(default)]
			rename: Option<String>,
			#[darling(default)]
			namespace: Option<String>,
			#[darling(default)]
			skip: Flag,
		}

		let RawField {
			ident,
			attr,
			nested,
			text,
			rename,
			namespace,
			skip,
		} = RawField::from_field(field)?;

		let ident = ident
			.ok_or_else(|| darling::Error::custom("Only named fields supported").with_span(field))?;

		let kind = match (attr.is_present(), nested.is_present(), text.is_present()) {
			(_, false, false) => Kind::NamedField,
			(false, true, false) => Kind::NestedObject,
			(false, false, true) => Kind::DirectValue,
			_ => {
				return Err(darling::Error::custom(
					"Only one of `attr`, `nested` and `text` allowed",
				)
				.with_span(field))
			},
		};

		Ok(Self {
			name: rename.unwrap_or_else(|| lower_camel_case(&ident.to_string())),
			ident,
			kind,
			namespace,
			skip: skip.is_present(),
			span: field.span(),
		})
	}
}

fn default_crate_path() -> Path {
	parse_quote!(xml_changelog)
}

#[derive(FromDeriveInput)]
#[darling(attributes(serializable), supports(struct_named, struct_unit))]
pub struct ObjectInput {
	pub ident: Ident,
	pub generics: Generics,
	pub data: ast::Data<(), Field>,
	/// If set, the XML element name to use instead of the struct ident.
	#[darling(default)]
	name: Option<String>,
	/// Namespace URI of the element; default is the standard change-log namespace.
	#[darling(default)]
	pub namespace: Option<String>,
	/// Function or method `fn(&Self) -> String` providing the object identity.
	#[darling(default)]
	pub describe: Option<Path>,
	#[darling(rename = "crate", default = "default_crate_path")]
	pub changelog_crate: Path,
}

impl ObjectInput {
	/// The XML element name of the object.
	pub fn name(&self) -> Cow<'_, str> {
		if let Some(explicit_name) = &self.name {
			Cow::Borrowed(explicit_name)
		} else {
			Cow::Owned(lower_camel_case(&self.ident.to_string()))
		}
	}

	/// The serialized fields of the input struct, in declaration order.
	pub fn fields(&self) -> Vec<&Field> {
		self.data
			.as_ref()
			.take_struct()
			.map(|fields| fields.into_iter().filter(|f| !f.skip).collect())
			.unwrap_or_default()
	}
}
