//! The XML change-log serializer
//!
//! `XmlChangeLogSerializer` writes whole documents (`write`), renders single objects as canonical
//! text (`serialize`) and splices single objects into existing documents (`append`).
//!
//! Every call builds its own tree through a `NodeBuilder`; nothing is shared between calls but the
//! read-only configuration and namespace registry.

use crate::{
	builder::NodeBuilder,
	config::SerializerConfig,
	namespace::{
		NamespaceRegistry,
		PRIORITY_DEFAULT,
	},
	quick_xml::serialize_document,
	render::{
		render,
		Indent,
		Verbatim,
		XmlEscape,
	},
	serializable::SerializableObject,
	tree::{
		Document,
		Element,
	},
	Result,
	ROOT_ELEMENT,
	STANDARD_CHANGELOG_NAMESPACE,
	XSI_NAMESPACE,
};
use std::{
	collections::BTreeMap,
	fs,
	io,
	path::Path,
	sync::Arc,
};

/// Interface of change-log serializers
pub trait ChangeLogSerializer {
	/// File extensions handled by the serializer
	fn valid_file_extensions(&self) -> &'static [&'static str];

	/// Priority among serializers handling the same extension
	fn priority(&self) -> i32;

	/// Serialize a single object (without document wrapper)
	fn serialize(&self, object: &dyn SerializableObject, pretty: bool) -> Result<String>;

	/// Write a full document containing `objects`
	fn write(&self, objects: &[&dyn SerializableObject], out: &mut dyn io::Write) -> Result<()>;

	/// Add `object` to the end of the document in `path`
	fn append(&self, object: &dyn SerializableObject, path: &Path) -> Result<()>;
}

/// Serializer for XML change logs
///
/// The escape hook `E` is applied by `serialize` (and therefore `append`) to text and attribute
/// values; the default leaves them untouched.
pub struct XmlChangeLogSerializer<E = Verbatim> {
	config: SerializerConfig,
	registry: Arc<NamespaceRegistry>,
	escape: E,
}

impl XmlChangeLogSerializer {
	/// Serializer with default configuration and the standard namespace registry
	pub fn new() -> Self {
		Self {
			config: SerializerConfig::default(),
			registry: Arc::new(NamespaceRegistry::standard()),
			escape: Verbatim,
		}
	}

	/// Serializer configured from the environment (see `SerializerConfig::from_env`)
	pub fn from_env() -> Result<Self> {
		Ok(Self::new().with_config(SerializerConfig::from_env()?))
	}
}

impl Default for XmlChangeLogSerializer {
	fn default() -> Self {
		Self::new()
	}
}

impl<E: XmlEscape> XmlChangeLogSerializer<E> {
	/// Replace configuration.
	pub fn with_config(mut self, config: SerializerConfig) -> Self {
		self.config = config;
		self
	}

	/// Replace namespace registry.
	pub fn with_registry(mut self, registry: impl Into<Arc<NamespaceRegistry>>) -> Self {
		self.registry = registry.into();
		self
	}

	/// Replace escape hook.
	pub fn with_escape<E2: XmlEscape>(self, escape: E2) -> XmlChangeLogSerializer<E2> {
		XmlChangeLogSerializer {
			config: self.config,
			registry: self.registry,
			escape,
		}
	}

	/// Configuration
	pub fn config(&self) -> &SerializerConfig {
		&self.config
	}

	/// Namespace registry
	pub fn registry(&self) -> &NamespaceRegistry {
		&self.registry
	}

	/// Builder for elements of a new pass
	pub fn node_builder(&self) -> NodeBuilder<'_> {
		NodeBuilder::new(&self.registry, self)
	}

	/// Build the document tree for `objects`.
	///
	/// The root declares the standard and `xsi` namespaces, a prefix for every applicable
	/// registered namespace and the schema locations, all ordered by namespace URI.
	pub fn create_document(&self, objects: &[&dyn SerializableObject]) -> Result<Document> {
		let mut root = Element::new(STANDARD_CHANGELOG_NAMESPACE, ROOT_ELEMENT);
		root.set_attribute("xmlns", STANDARD_CHANGELOG_NAMESPACE)?;
		root.set_attribute("xmlns:xsi", XSI_NAMESPACE)?;

		// namespace -> (priority, value); higher priority wins, first registered on ties
		let mut short_names: BTreeMap<&str, (i32, &str)> = BTreeMap::new();
		let mut schema_urls: BTreeMap<&str, (i32, &str)> = BTreeMap::new();
		for details in self.registry.iter() {
			let priority = details.priority();
			if priority <= 0 {
				continue;
			}
			for namespace in details.namespaces() {
				if !details.supports(self, namespace) {
					continue;
				}
				if let Some(short_name) = details.short_name(namespace) {
					insert_by_priority(&mut short_names, namespace, priority, short_name);
				}
				if let Some(url) = details.schema_url(namespace) {
					insert_by_priority(&mut schema_urls, namespace, priority, url);
				}
			}
		}

		for (namespace, (_, short_name)) in &short_names {
			if !short_name.is_empty() {
				root.set_attribute(&format!("xmlns:{}", short_name), namespace)?;
			}
		}
		let schema_location = schema_urls
			.iter()
			.filter(|(_, (_, url))| !url.is_empty())
			.map(|(namespace, (_, url))| format!("{} {}", namespace, url))
			.collect::<Vec<_>>()
			.join(" ");
		root.set_attribute("xsi:schemaLocation", schema_location.trim())?;

		tracing::debug!(
			objects = objects.len(),
			namespaces = ?short_names.keys().collect::<Vec<_>>(),
			"assembling change log document"
		);

		let builder = self.node_builder();
		for object in objects {
			root.push_child(builder.build(*object)?);
		}
		Ok(Document::new(root))
	}

	fn closing_root_tag() -> String {
		format!("</{}>", ROOT_ELEMENT)
	}
}

fn insert_by_priority<'a>(
	map: &mut BTreeMap<&'a str, (i32, &'a str)>,
	namespace: &'a str,
	priority: i32,
	value: &'a str,
) {
	match map.get(namespace) {
		Some((existing, _)) if *existing >= priority => (),
		_ => {
			map.insert(namespace, (priority, value));
		},
	}
}

impl<E: XmlEscape> ChangeLogSerializer for XmlChangeLogSerializer<E> {
	fn valid_file_extensions(&self) -> &'static [&'static str] {
		&["xml"]
	}

	fn priority(&self) -> i32 {
		PRIORITY_DEFAULT
	}

	fn serialize(&self, object: &dyn SerializableObject, pretty: bool) -> Result<String> {
		let indent = if pretty { Indent::Pretty(0) } else { Indent::Compact };
		let node = self.node_builder().build(object)?;
		Ok(render(&node, indent, &self.escape))
	}

	fn write(&self, objects: &[&dyn SerializableObject], out: &mut dyn io::Write) -> Result<()> {
		let document = self.create_document(objects)?;
		let encoding = self.config.encoding().name();
		let text = serialize_document(&document, encoding, self.config.indent_width())?;
		out.write_all(&self.config.encode(&text))?;
		out.flush()?;
		Ok(())
	}

	fn append(&self, object: &dyn SerializableObject, path: &Path) -> Result<()> {
		let existing = fs::read(path)?;
		let existing = self.config.decode(&existing)?;
		let closing = Self::closing_root_tag();

		let output = if existing.contains(&closing) {
			tracing::debug!(path = %path.display(), "inserting object before closing root tag");
			let fragment = self.serialize(object, true)?;
			let updated = existing.replacen(&closing, &format!("{}\n{}", fragment, closing), 1);
			self.config.encode(&updated).into_owned()
		} else {
			tracing::debug!(path = %path.display(), "no change log root found, writing new document");
			let mut buf = Vec::new();
			self.write(&[object], &mut buf)?;
			buf
		};

		fs::write(path, output)?;
		Ok(())
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::{
		namespace::NamespaceEntry,
		render::EntityEscape,
		test_struct::*,
		EXT_CHANGELOG_NAMESPACE,
	};

	fn write_to_string<E: XmlEscape>(
		serializer: &XmlChangeLogSerializer<E>,
		objects: &[&dyn SerializableObject],
	) -> String {
		let mut out = Vec::new();
		serializer.write(objects, &mut out).unwrap();
		String::from_utf8(out).unwrap()
	}

	#[test]
	fn extensions_and_priority() {
		let serializer = XmlChangeLogSerializer::new();
		assert_eq!(serializer.valid_file_extensions(), ["xml"]);
		assert_eq!(serializer.priority(), PRIORITY_DEFAULT);
	}

	#[test]
	fn engine_is_shareable() {
		fn assert_send_sync<T: Send + Sync>() {}
		assert_send_sync::<XmlChangeLogSerializer>();
		assert_send_sync::<XmlChangeLogSerializer<EntityEscape>>();
	}

	#[test]
	fn serialize_pretty_and_compact() {
		let serializer = XmlChangeLogSerializer::new();
		let table = CreateTable::sample();
		assert_eq!(
			serializer.serialize(&table, true).unwrap(),
			concat!(
				"<createTable tableName=\"person\">\n",
				"    <column name=\"id\"\n",
				"            remarks=\"primary key\"\n",
				"            type=\"INT\"/>\n",
				"    <column name=\"name\" type=\"VARCHAR(255)\"/>\n",
				"</createTable>",
			),
		);
		assert_eq!(
			serializer.serialize(&table, false).unwrap(),
			concat!(
				"<createTable tableName=\"person\">",
				"<column name=\"id\" remarks=\"primary key\" type=\"INT\"/>",
				"<column name=\"name\" type=\"VARCHAR(255)\"/>",
				"</createTable>",
			),
		);
	}

	#[test]
	fn serialize_uses_escape_hook() {
		let sql = Sql::new("select * from t where a < 1");
		let plain = XmlChangeLogSerializer::new();
		assert_eq!(
			plain.serialize(&sql, false).unwrap(),
			r#"<sql splitStatements="false">select * from t where a < 1</sql>"#,
		);
		let escaping = XmlChangeLogSerializer::new().with_escape(EntityEscape);
		assert_eq!(
			escaping.serialize(&sql, false).unwrap(),
			r#"<sql splitStatements="false">select * from t where a &lt; 1</sql>"#,
		);
	}

	#[test]
	fn document_root_declarations() {
		let serializer = XmlChangeLogSerializer::new();
		let document = serializer.create_document(&[&ChangeSet::sample()]).unwrap();
		let root = document.root();
		assert_eq!(document.version(), "1.1");
		assert_eq!(root.name(), ROOT_ELEMENT);
		assert_eq!(root.attribute("xmlns"), Some(STANDARD_CHANGELOG_NAMESPACE));
		assert_eq!(root.attribute("xmlns:xsi"), Some(XSI_NAMESPACE));
		assert_eq!(root.attribute("xmlns:ext"), Some(EXT_CHANGELOG_NAMESPACE));
		assert_eq!(
			root.attribute("xsi:schemaLocation"),
			Some(concat!(
				"http://www.liquibase.org/xml/ns/dbchangelog ",
				"http://www.liquibase.org/xml/ns/dbchangelog/dbchangelog-latest.xsd ",
				"http://www.liquibase.org/xml/ns/dbchangelog-ext ",
				"http://www.liquibase.org/xml/ns/dbchangelog/dbchangelog-ext.xsd",
			)),
		);
		assert_eq!(root.children().len(), 1);
		assert_eq!(root.children()[0].name(), "changeSet");
	}

	#[test]
	fn namespace_declared_once() {
		let registry = NamespaceRegistry::standard()
			.with(NamespaceEntry::new(EXT_CHANGELOG_NAMESPACE).short_name("x").priority(3))
			.with(NamespaceEntry::new("urn:hidden").short_name("h").priority(0))
			.with(NamespaceEntry::new("urn:other").short_name("o").applies_to(|_, _| false));
		let serializer = XmlChangeLogSerializer::new().with_registry(registry);
		let document = serializer.create_document(&[]).unwrap();
		let xmlns: Vec<_> = document
			.root()
			.attributes()
			.filter(|(name, _)| name.starts_with("xmlns:"))
			.collect();
		assert_eq!(
			xmlns,
			[("xmlns:xsi", XSI_NAMESPACE), ("xmlns:x", EXT_CHANGELOG_NAMESPACE)],
		);
	}

	#[test]
	fn declarations_independent_of_registry_order() {
		let a = NamespaceRegistry::new()
			.with(NamespaceEntry::new("urn:b").short_name("b").schema_url("b.xsd"))
			.with(NamespaceEntry::new("urn:a").short_name("a").schema_url("a.xsd"));
		let b = NamespaceRegistry::new()
			.with(NamespaceEntry::new("urn:a").short_name("a").schema_url("a.xsd"))
			.with(NamespaceEntry::new("urn:b").short_name("b").schema_url("b.xsd"));
		let first = write_to_string(&XmlChangeLogSerializer::new().with_registry(a), &[]);
		let second = write_to_string(&XmlChangeLogSerializer::new().with_registry(b), &[]);
		assert_eq!(first, second);
		assert!(first.contains(r#"xsi:schemaLocation="urn:a a.xsd urn:b b.xsd""#));
	}

	#[test]
	fn write_full_document() {
		let serializer = XmlChangeLogSerializer::new();
		let text = write_to_string(&serializer, &[&ChangeSet::sample()]);
		assert!(text.starts_with(r#"<?xml version="1.1" encoding="UTF-8"?>"#));
		// quick-xml keeps attributes in field order
		assert!(text.contains(r#"<changeSet id="1" author="alice""#));
		assert!(text.contains(r#"tableName="person""#));
		assert!(text.trim_end().ends_with("</databaseChangeLog>"));
	}

	#[test]
	fn write_rejects_invalid_data() {
		let serializer = XmlChangeLogSerializer::new();
		let mut change_set = ChangeSet::sample();
		change_set.comment = Some("\u{1}".into());
		let mut out = Vec::new();
		let err = serializer.write(&[&change_set], &mut out).unwrap_err();
		assert!(err.invalid_character().is_some());
		assert!(out.is_empty());
	}
}
