use crate::{
	Serializable,
	EXT_CHANGELOG_NAMESPACE,
};
use std::collections::BTreeMap;

#[derive(Serializable)]
#[derive(Clone, PartialEq, Eq, Debug)]
#[serializable(crate = "crate")]
pub struct Column {
	pub name: String,
	#[serializable(rename = "type")]
	pub column_type: String,
	pub remarks: Option<String>,
	#[serializable(namespace = "http://www.liquibase.org/xml/ns/dbchangelog-ext")]
	pub hint: Option<String>,
	#[serializable(namespace = "urn:unregistered")]
	pub note: Option<String>,
}

impl Column {
	pub fn new(name: &str, column_type: &str) -> Self {
		Self {
			name: name.into(),
			column_type: column_type.into(),
			remarks: None,
			hint: None,
			note: None,
		}
	}

	pub fn with_ext_hint(mut self, hint: &str) -> Self {
		self.hint = Some(hint.into());
		self
	}

	pub fn with_unregistered_note(mut self, note: &str) -> Self {
		self.note = Some(note.into());
		self
	}
}

#[derive(Serializable)]
#[derive(Clone, PartialEq, Eq, Debug)]
#[serializable(crate = "crate")]
pub struct CreateTable {
	pub table_name: String,
	pub columns: Vec<Column>,
}

impl CreateTable {
	pub fn sample() -> Self {
		let mut id = Column::new("id", "INT");
		id.remarks = Some("primary key".into());
		Self {
			table_name: "person".into(),
			columns: vec![id, Column::new("name", "VARCHAR(255)")],
		}
	}
}

#[derive(Serializable)]
#[derive(Clone, PartialEq, Eq, Debug)]
#[serializable(crate = "crate")]
pub struct Sql {
	pub split_statements: bool,
	#[serializable(text)]
	pub sql: String,
}

impl Sql {
	pub fn new(sql: &str) -> Self {
		Self {
			split_statements: false,
			sql: sql.into(),
		}
	}
}

#[derive(Serializable)]
#[derive(Clone, PartialEq, Eq, Debug)]
#[serializable(crate = "crate", describe = "ChangeSet::identity")]
pub struct ChangeSet {
	pub id: String,
	pub author: String,
	#[serializable(skip)]
	pub file_path: String,
	#[serializable(nested)]
	pub comment: Option<String>,
	pub changes: Vec<CreateTable>,
}

impl ChangeSet {
	pub fn sample() -> Self {
		Self {
			id: "1".into(),
			author: "alice".into(),
			file_path: "changelog.xml".into(),
			comment: Some("create the person table".into()),
			changes: vec![CreateTable::sample()],
		}
	}

	fn identity(&self) -> String {
		format!("{}::{}::{}", self.file_path, self.id, self.author)
	}
}

#[derive(Serializable)]
#[derive(Clone, PartialEq, Eq, Debug)]
#[serializable(crate = "crate", describe = "ChangeSetGroup::identity")]
pub struct ChangeSetGroup {
	pub change_sets: Vec<ChangeSet>,
}

impl ChangeSetGroup {
	fn identity(&self) -> String {
		format!("group of {}", self.change_sets.len())
	}
}

#[derive(Serializable)]
#[derive(Clone, PartialEq, Eq, Debug)]
#[serializable(crate = "crate")]
pub struct Properties {
	pub property: BTreeMap<String, u32>,
	#[serializable(nested)]
	pub parameter: BTreeMap<String, String>,
}

impl Properties {
	pub fn sample() -> Self {
		Self {
			property: [("b".to_string(), 2), ("a".to_string(), 1)].into_iter().collect(),
			parameter: [("schema".to_string(), "public".to_string())].into_iter().collect(),
		}
	}
}

#[derive(Serializable)]
#[derive(Clone, PartialEq, Eq, Debug)]
#[serializable(crate = "crate")]
pub struct Parameters {
	#[serializable(text)]
	pub param: BTreeMap<String, String>,
}

impl Parameters {
	pub fn sample() -> Self {
		Self {
			param: [("user", "bob"), ("env", "prod")]
				.into_iter()
				.map(|(k, v)| (k.to_string(), v.to_string()))
				.collect(),
		}
	}
}

#[derive(Serializable)]
#[derive(Clone, PartialEq, Eq, Debug)]
#[serializable(crate = "crate")]
pub struct Tags {
	#[serializable(nested)]
	pub labels: [&'static str; 2],
	pub context: [&'static str; 2],
}

impl Tags {
	pub fn sample() -> Self {
		Self {
			labels: ["a", "b"],
			context: ["dev", "prod"],
		}
	}
}

#[derive(Serializable)]
#[derive(Clone, PartialEq, Eq, Debug)]
#[serializable(crate = "crate", name = "marker", namespace = "http://www.liquibase.org/xml/ns/dbchangelog-ext")]
pub struct ExtMarker {
	pub level: u32,
}

#[test]
fn derived_fixture_shape() {
	use crate::{
		SerializableObject,
		SerializationKind,
	};

	let change_set = ChangeSet::sample();
	assert_eq!(change_set.serialized_object_name(), "changeSet");
	assert_eq!(change_set.serializable_fields(), ["id", "author", "comment", "changes"]);
	assert_eq!(change_set.serializable_field_kind("comment"), SerializationKind::NestedObject);
	assert_eq!(change_set.describe().as_deref(), Some("changelog.xml::1::alice"));
	assert!(change_set.serializable_field_value("filePath").is_null());

	let column = Column::new("id", "INT");
	assert_eq!(column.serializable_fields(), ["name", "type", "remarks", "hint", "note"]);
	assert_eq!(column.serializable_field_namespace("hint"), EXT_CHANGELOG_NAMESPACE);
	assert_eq!(column.describe(), None);

	let marker = ExtMarker { level: 1 };
	assert_eq!(marker.serialized_object_namespace(), EXT_CHANGELOG_NAMESPACE);
	assert_eq!(marker.serializable_field_namespace("level"), EXT_CHANGELOG_NAMESPACE);
	assert_eq!(Sql::new("x").serializable_field_kind("sql"), SerializationKind::DirectValue);
}
