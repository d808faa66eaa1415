use proc_macro2::TokenStream;
use quote::{quote, quote_spanned, ToTokens, TokenStreamExt};
use syn::Path;

use crate::element::{Field, Kind, ObjectInput};

struct FieldValue<'a> {
	data: &'a Field,
	changelog_crate: &'a Path,
}

impl ToTokens for FieldValue<'_> {
	fn to_tokens(&self, tokens: &mut TokenStream) {
		let Self {
			data,
			changelog_crate,
		} = self;
		let ident = &data.ident;
		let name = &data.name;

		tokens.append_all(quote_spanned! {data.span()=>
			#name => #changelog_crate::ToValue::to_value(&self.#ident),
		});
	}
}

struct FieldKind<'a> {
	data: &'a Field,
	changelog_crate: &'a Path,
}

impl ToTokens for FieldKind<'_> {
	fn to_tokens(&self, tokens: &mut TokenStream) {
		let Self {
			data,
			changelog_crate,
		} = self;
		let name = &data.name;
		let kind = match data.kind {
			// the default arm covers attributes
			Kind::NamedField => return,
			Kind::NestedObject => quote!(NestedObject),
			Kind::DirectValue => quote!(DirectValue),
		};

		tokens.append_all(quote! {
			#name => #changelog_crate::SerializationKind::#kind,
		});
	}
}

struct FieldNamespace<'a> {
	data: &'a Field,
}

impl ToTokens for FieldNamespace<'_> {
	fn to_tokens(&self, tokens: &mut TokenStream) {
		if let Some(namespace) = &self.data.namespace {
			let name = &self.data.name;
			tokens.append_all(quote! {
				#name => ::std::borrow::Cow::Borrowed(#namespace),
			});
		}
	}
}

pub fn derive_serializable(input: &ObjectInput) -> TokenStream {
	let changelog_crate = &input.changelog_crate;
	let fields = input.fields();

	let names = fields.iter().map(|field| &field.name).collect::<Vec<_>>();
	let values = fields
		.iter()
		.map(|data| FieldValue {
			data,
			changelog_crate,
		})
		.collect::<Vec<_>>();
	let kinds = fields
		.iter()
		.map(|data| FieldKind {
			data,
			changelog_crate,
		})
		.collect::<Vec<_>>();
	let namespaces = fields
		.iter()
		.map(|data| FieldNamespace { data })
		.collect::<Vec<_>>();

	let ident = &input.ident;
	let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
	let name = input.name();

	let object_namespace = input.namespace.as_ref().map(|namespace| {
		quote! {
			fn serialized_object_namespace(&self) -> ::std::borrow::Cow<'_, str> {
				::std::borrow::Cow::Borrowed(#namespace)
			}
		}
	});
	let describe = input.describe.as_ref().map(|describe| {
		quote! {
			fn describe(&self) -> ::std::option::Option<::std::string::String> {
				::std::option::Option::Some(#describe(self))
			}
		}
	});

	quote! {
		impl #impl_generics #changelog_crate::SerializableObject for #ident #ty_generics #where_clause {
			fn serialized_object_name(&self) -> ::std::borrow::Cow<'_, str> {
				::std::borrow::Cow::Borrowed(#name)
			}

			#object_namespace

			fn serializable_fields(&self) -> ::std::vec::Vec<::std::borrow::Cow<'_, str>> {
				::std::vec![#(::std::borrow::Cow::Borrowed(#names)),*]
			}

			fn serializable_field_value(&self, field: &str) -> #changelog_crate::Value<'_> {
				match field {
					#(#values)*
					_ => #changelog_crate::Value::Null,
				}
			}

			fn serializable_field_kind(&self, field: &str) -> #changelog_crate::SerializationKind {
				match field {
					#(#kinds)*
					_ => #changelog_crate::SerializationKind::NamedField,
				}
			}

			fn serializable_field_namespace(&self, field: &str) -> ::std::borrow::Cow<'_, str> {
				match field {
					#(#namespaces)*
					_ => #changelog_crate::SerializableObject::serialized_object_namespace(self),
				}
			}

			#describe
		}

		impl #impl_generics #changelog_crate::ToValue for #ident #ty_generics #where_clause {
			fn to_value(&self) -> #changelog_crate::Value<'_> {
				#changelog_crate::Value::Object(self)
			}
		}
	}
}
