//! Namespace details: which prefix and schema belong to a namespace URI
//!
//! Details are provided through `NamespaceDetails` implementations collected in a
//! `NamespaceRegistry`. The registry is a read-only snapshot for the lifetime of a serializer.

use crate::{
	errors,
	serializer::ChangeLogSerializer,
	Result,
	EXT_CHANGELOG_NAMESPACE,
	STANDARD_CHANGELOG_NAMESPACE,
};
use std::{
	fmt,
	sync::Arc,
};

/// Default priority of built-in implementations
pub const PRIORITY_DEFAULT: i32 = 1;

/// Prefix and schema information for one or more namespaces.
pub trait NamespaceDetails: Send + Sync {
	/// Higher priority wins when several details support the same namespace; details with a
	/// priority of zero or less are never declared on a document root.
	fn priority(&self) -> i32;

	/// All namespace URIs handled by these details
	fn namespaces(&self) -> Vec<&str>;

	/// Prefix for the namespace; empty means the namespace is used unprefixed
	fn short_name(&self, namespace: &str) -> Option<&str>;

	/// URL of the XSD for the namespace
	fn schema_url(&self, namespace: &str) -> Option<&str>;

	/// Whether these details apply to the namespace when written by `serializer`
	fn supports(&self, serializer: &dyn ChangeLogSerializer, namespace: &str) -> bool;
}

type AppliesTo = dyn Fn(&dyn ChangeLogSerializer, &str) -> bool + Send + Sync;

/// Plain details for a single namespace
#[derive(Clone)]
pub struct NamespaceEntry {
	uri: String,
	short_name: Option<String>,
	schema_url: Option<String>,
	priority: i32,
	applies_to: Arc<AppliesTo>,
}

impl NamespaceEntry {
	/// Entry with default priority, applying to XML serializers
	pub fn new(uri: impl Into<String>) -> Self {
		Self {
			uri: uri.into(),
			short_name: None,
			schema_url: None,
			priority: PRIORITY_DEFAULT,
			applies_to: Arc::new(handles_xml),
		}
	}

	/// Set prefix.
	pub fn short_name(mut self, short_name: impl Into<String>) -> Self {
		self.short_name = Some(short_name.into());
		self
	}

	/// Set schema URL.
	pub fn schema_url(mut self, url: impl Into<String>) -> Self {
		self.schema_url = Some(url.into());
		self
	}

	/// Set priority.
	pub fn priority(mut self, priority: i32) -> Self {
		self.priority = priority;
		self
	}

	/// Replace the predicate deciding whether the entry applies to a serializer.
	pub fn applies_to<F>(mut self, predicate: F) -> Self
	where
		F: Fn(&dyn ChangeLogSerializer, &str) -> bool + Send + Sync + 'static,
	{
		self.applies_to = Arc::new(predicate);
		self
	}

	/// Namespace URI
	pub fn uri(&self) -> &str {
		&self.uri
	}
}

fn handles_xml(serializer: &dyn ChangeLogSerializer, _namespace: &str) -> bool {
	serializer.valid_file_extensions().contains(&"xml")
}

impl fmt::Debug for NamespaceEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("NamespaceEntry")
			.field("uri", &self.uri)
			.field("short_name", &self.short_name)
			.field("schema_url", &self.schema_url)
			.field("priority", &self.priority)
			.finish()
	}
}

impl NamespaceDetails for NamespaceEntry {
	fn priority(&self) -> i32 {
		self.priority
	}

	fn namespaces(&self) -> Vec<&str> {
		vec![&self.uri]
	}

	fn short_name(&self, namespace: &str) -> Option<&str> {
		if namespace == self.uri {
			self.short_name.as_deref()
		} else {
			None
		}
	}

	fn schema_url(&self, namespace: &str) -> Option<&str> {
		if namespace == self.uri {
			self.schema_url.as_deref()
		} else {
			None
		}
	}

	fn supports(&self, serializer: &dyn ChangeLogSerializer, namespace: &str) -> bool {
		namespace == self.uri && (self.applies_to)(serializer, namespace)
	}
}

/// Collection of namespace details
#[derive(Default)]
pub struct NamespaceRegistry {
	details: Vec<Box<dyn NamespaceDetails>>,
}

impl NamespaceRegistry {
	/// Registry without any details
	pub fn new() -> Self {
		Self::default()
	}

	/// Registry knowing the standard change-log namespace and its extension namespace
	pub fn standard() -> Self {
		Self::new()
			.with(
				NamespaceEntry::new(STANDARD_CHANGELOG_NAMESPACE)
					.short_name("")
					.schema_url("http://www.liquibase.org/xml/ns/dbchangelog/dbchangelog-latest.xsd"),
			)
			.with(
				NamespaceEntry::new(EXT_CHANGELOG_NAMESPACE)
					.short_name("ext")
					.schema_url("http://www.liquibase.org/xml/ns/dbchangelog/dbchangelog-ext.xsd"),
			)
	}

	/// Add details.
	pub fn with<D: NamespaceDetails + 'static>(mut self, details: D) -> Self {
		self.register(details);
		self
	}

	/// Add details.
	pub fn register<D: NamespaceDetails + 'static>(&mut self, details: D) {
		self.details.push(Box::new(details));
	}

	/// All registered details, in registration order
	pub fn iter(&self) -> impl Iterator<Item = &dyn NamespaceDetails> {
		self.details.iter().map(|d| d.as_ref() as &dyn NamespaceDetails)
	}

	/// Highest priority details supporting `namespace` for `serializer`.
	///
	/// On equal priority the first registered details win.
	pub fn details_for(
		&self,
		serializer: &dyn ChangeLogSerializer,
		namespace: &str,
	) -> Option<&dyn NamespaceDetails> {
		let mut best: Option<&dyn NamespaceDetails> = None;
		for details in self.iter() {
			if !details.supports(serializer, namespace) {
				continue;
			}
			match best {
				Some(b) if b.priority() >= details.priority() => (),
				_ => best = Some(details),
			}
		}
		best
	}
}

impl fmt::Debug for NamespaceRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list()
			.entries(self.iter().flat_map(|d| d.namespaces()))
			.finish()
	}
}

/// Computes (possibly prefixed) names of fields
pub struct Qualifier<'a> {
	registry: &'a NamespaceRegistry,
	serializer: &'a dyn ChangeLogSerializer,
}

impl<'a> Qualifier<'a> {
	/// Qualifier resolving prefixes through `registry` on behalf of `serializer`
	pub fn new(registry: &'a NamespaceRegistry, serializer: &'a dyn ChangeLogSerializer) -> Self {
		Self { registry, serializer }
	}

	/// Prefix `name` with the short name of `namespace`, unless the namespace is empty, the
	/// standard namespace or the namespace of the parent.
	///
	/// Fails if the namespace needs a prefix but has no registered details.
	pub fn qualify(&self, name: &str, namespace: &str, parent_namespace: &str) -> Result<String> {
		if namespace.is_empty()
			|| namespace == STANDARD_CHANGELOG_NAMESPACE
			|| namespace == parent_namespace
		{
			return Ok(name.to_string());
		}
		let details = self
			.registry
			.details_for(self.serializer, namespace)
			.ok_or_else(|| errors::unregistered_namespace(namespace))?;
		match details.short_name(namespace) {
			Some(short) if !short.is_empty() => Ok(format!("{}:{}", short, name)),
			_ => Ok(name.to_string()),
		}
	}

	/// Element name for an object in `namespace`: prefixed if the namespace has a non-empty
	/// short name, bare otherwise.
	pub fn element_name(&self, name: &str, namespace: &str) -> String {
		let details = match self.registry.details_for(self.serializer, namespace) {
			Some(details) => details,
			None => {
				tracing::debug!(namespace, name, "no namespace details for object namespace");
				return name.to_string();
			},
		};
		match details.short_name(namespace) {
			Some(short) if !short.is_empty() => format!("{}:{}", short, name),
			_ => name.to_string(),
		}
	}
}
