// use `cargo run -p xml-changelog --example append_changeset [path]` to run from git repository base directory
// set `RUST_LOG=xml_changelog=debug` to see what the serializer does

use std::{
	fs,
	path::PathBuf,
};
use xml_changelog::{
	ChangeLogSerializer,
	Serializable,
	XmlChangeLogSerializer,
};

#[derive(Serializable)]
pub struct Column {
	pub name: String,
	#[serializable(rename = "type")]
	pub column_type: String,
}

#[derive(Serializable)]
pub struct CreateTable {
	pub table_name: String,
	pub columns: Vec<Column>,
}

/// a change set identified by file, id and author in error messages
#[derive(Serializable)]
#[serializable(describe = "ChangeSet::identity")]
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
	fn identity(&self) -> String {
		format!("{}::{}::{}", self.file_path, self.id, self.author)
	}
}

fn create_table(id: &str, table: &str) -> ChangeSet {
	ChangeSet {
		id: id.into(),
		author: "demo".into(),
		file_path: "changelog.xml".into(),
		comment: Some(format!("create {}", table)),
		changes: vec![CreateTable {
			table_name: table.into(),
			columns: vec![
				Column {
					name: "id".into(),
					column_type: "INT".into(),
				},
				Column {
					name: "name".into(),
					column_type: "VARCHAR(255)".into(),
				},
			],
		}],
	}
}

fn main() -> xml_changelog::Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::from_default_env()
				.add_directive(tracing::Level::INFO.into()),
		)
		.init();

	let path = std::env::args_os()
		.nth(1)
		.map(PathBuf::from)
		.unwrap_or_else(|| std::env::temp_dir().join("changelog.xml"));

	let serializer = XmlChangeLogSerializer::from_env()?;

	eprintln!("Writing {}...", path.display());
	let mut file = fs::File::create(&path)?;
	serializer.write(&[&create_table("1", "person")], &mut file)?;
	drop(file);

	eprintln!("Appending second change set...");
	serializer.append(&create_table("2", "address"), &path)?;

	// print resulting document
	println!("{}", String::from_utf8_lossy(&fs::read(&path)?));
	Ok(())
}
