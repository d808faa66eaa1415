use std::fs;
use tempfile::tempdir;
use xml_changelog::{
	ChangeLogSerializer,
	Error,
	Serializable,
	SerializerConfig,
	XmlChangeLogSerializer,
};

#[derive(Serializable)]
struct Column {
	name: String,
	#[serializable(rename = "type")]
	column_type: String,
	remarks: Option<String>,
}

impl Column {
	fn new(name: &str, column_type: &str) -> Self {
		Self {
			name: name.into(),
			column_type: column_type.into(),
			remarks: None,
		}
	}
}

#[derive(Serializable)]
#[serializable(describe = "ChangeSet::identity")]
struct ChangeSet {
	id: String,
	author: String,
	columns: Vec<Column>,
}

impl ChangeSet {
	fn new(id: &str) -> Self {
		Self {
			id: id.into(),
			author: "bob".into(),
			columns: vec![Column::new("id", "INT")],
		}
	}

	fn identity(&self) -> String {
		format!("changelog.xml::{}::{}", self.id, self.author)
	}
}

#[test]
fn splices_before_closing_tag() {
	let dir = tempdir().expect("tempdir");
	let path = dir.path().join("changelog.xml");
	fs::write(&path, "<databaseChangeLog>\n</databaseChangeLog>").unwrap();

	XmlChangeLogSerializer::new()
		.append(&Column::new("id", "INT"), &path)
		.unwrap();

	assert_eq!(
		fs::read_to_string(&path).unwrap(),
		"<databaseChangeLog>\n<column name=\"id\" type=\"INT\"/>\n</databaseChangeLog>",
	);
}

#[test]
fn keeps_surrounding_bytes() {
	let dir = tempdir().expect("tempdir");
	let path = dir.path().join("changelog.xml");
	let before = "<?xml version=\"1.0\"?>\n<!-- keep   me -->\n<databaseChangeLog xmlns=\"urn:x\">\n  <changeSet id=\"0\" author=\"a\"/>\n";
	let after = "</databaseChangeLog>\n<!-- trailer --></databaseChangeLog>\n";
	fs::write(&path, format!("{}{}", before, after)).unwrap();

	XmlChangeLogSerializer::new()
		.append(&ChangeSet::new("1"), &path)
		.unwrap();

	let text = fs::read_to_string(&path).unwrap();
	let fragment = "<changeSet author=\"bob\" id=\"1\">\n    <column name=\"id\" type=\"INT\"/>\n</changeSet>\n";
	// only the first closing tag is used
	assert_eq!(text, format!("{}{}{}", before, fragment, after));
}

#[test]
fn rewrites_file_without_root() {
	let dir = tempdir().expect("tempdir");
	let path = dir.path().join("changelog.xml");
	fs::write(&path, "not a change log").unwrap();

	XmlChangeLogSerializer::new()
		.append(&ChangeSet::new("1"), &path)
		.unwrap();

	let text = fs::read_to_string(&path).unwrap();
	assert!(text.starts_with("<?xml version=\"1.1\" encoding=\"UTF-8\"?>"));
	assert!(!text.contains("not a change log"));
	assert_eq!(text.matches("<changeSet ").count(), 1);
	assert_eq!(text.matches("</databaseChangeLog>").count(), 1);
}

#[test]
fn missing_file_is_io_error() {
	let dir = tempdir().expect("tempdir");
	let path = dir.path().join("missing.xml");

	let err = XmlChangeLogSerializer::new()
		.append(&ChangeSet::new("1"), &path)
		.unwrap_err();
	match err {
		Error::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
		other => panic!("unexpected error: {:?}", other),
	}
	assert!(!path.exists());
}

#[test]
fn invalid_object_leaves_file_untouched() {
	let dir = tempdir().expect("tempdir");
	let path = dir.path().join("changelog.xml");
	let content = "<databaseChangeLog>\n</databaseChangeLog>";
	fs::write(&path, content).unwrap();

	let mut change_set = ChangeSet::new("7");
	change_set.columns[0].remarks = Some("bad \u{1F}".into());
	let err = XmlChangeLogSerializer::new()
		.append(&change_set, &path)
		.unwrap_err();

	assert_eq!(
		err.to_string(),
		"Invalid string encoding with code point 0x001F on column.remarks in changelog.xml::7::bob. \
		 To resolve, remove the invalid character on the database and try again",
	);
	assert_eq!(fs::read_to_string(&path).unwrap(), content);
}

#[test]
fn latin1_round_trip() {
	let dir = tempdir().expect("tempdir");
	let path = dir.path().join("changelog.xml");
	fs::write(&path, b"<databaseChangeLog>\n<!-- \xE9t\xE9 -->\n</databaseChangeLog>").unwrap();

	let config = SerializerConfig::new().output_encoding_label("latin1").unwrap();
	let mut column = Column::new("id", "INT");
	column.remarks = Some("caf\u{E9}".into());
	XmlChangeLogSerializer::new()
		.with_config(config)
		.append(&column, &path)
		.unwrap();

	let bytes = fs::read(&path).unwrap();
	assert_eq!(
		bytes,
		&b"<databaseChangeLog>\n<!-- \xE9t\xE9 -->\n<column name=\"id\"\n        remarks=\"caf\xE9\"\n        type=\"INT\"/>\n</databaseChangeLog>"[..],
	);
}

#[test]
fn malformed_content_is_rejected_untouched() {
	let dir = tempdir().expect("tempdir");
	let path = dir.path().join("changelog.xml");
	let content = b"<databaseChangeLog>\n<!-- caf\xE9 -->\n</databaseChangeLog>";
	fs::write(&path, content).unwrap();

	let err = XmlChangeLogSerializer::new()
		.append(&Column::new("id", "INT"), &path)
		.unwrap_err();

	assert!(matches!(err, Error::MalformedInput { ref encoding } if encoding == "UTF-8"));
	assert_eq!(fs::read(&path).unwrap(), &content[..]);
}

#[test]
fn utf16_output_not_configurable() {
	let err = SerializerConfig::new().output_encoding_label("utf-16le").unwrap_err();
	assert!(matches!(err, Error::Configuration(_)));
}
