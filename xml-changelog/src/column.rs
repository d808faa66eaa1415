//! Column definitions and their `<column>` elements

use crate::{
	builder::NodeBuilder,
	errors,
	serializable::{
		iso_date_time,
		SerializableObject,
		ToValue,
		Value,
	},
	tree::Element,
	Result,
	STANDARD_CHANGELOG_NAMESPACE,
};
use chrono::NaiveDateTime;
use std::borrow::Cow;

/// Constraints of a column
#[allow(missing_docs)] // fields match the XML attribute names
#[derive(Clone, PartialEq, Debug, Default)]
pub struct ConstraintsConfig {
	pub check_constraint: Option<String>,
	pub foreign_key_name: Option<String>,
	pub references: Option<String>,
	pub referenced_table_name: Option<String>,
	pub referenced_column_names: Option<String>,
	pub deferrable: Option<bool>,
	pub validate_nullable: Option<bool>,
	pub validate_unique: Option<bool>,
	pub validate_primary_key: Option<bool>,
	pub validate_foreign_key: Option<bool>,
	pub delete_cascade: Option<bool>,
	pub initially_deferred: Option<bool>,
	pub nullable: Option<bool>,
	pub primary_key: Option<bool>,
	pub unique: Option<bool>,
	pub unique_constraint_name: Option<String>,
	pub primary_key_name: Option<String>,
	pub primary_key_tablespace: Option<String>,
	pub not_null_constraint_name: Option<String>,
	pub referenced_table_catalog_name: Option<String>,
	pub referenced_table_schema_name: Option<String>,
}

/// Definition of a table column
#[allow(missing_docs)] // fields match the XML attribute names
#[derive(Clone, PartialEq, Debug, Default)]
pub struct ColumnConfig {
	pub name: Option<String>,
	pub column_type: Option<String>,
	pub default_value: Option<String>,
	pub default_value_numeric: Option<String>,
	pub default_value_date: Option<NaiveDateTime>,
	pub default_value_boolean: Option<bool>,
	pub default_value_computed: Option<String>,
	pub default_value_sequence_next: Option<String>,
	pub value: Option<String>,
	pub value_numeric: Option<String>,
	pub value_boolean: Option<bool>,
	pub value_date: Option<NaiveDateTime>,
	pub value_computed: Option<String>,
	pub value_sequence_next: Option<String>,
	pub value_sequence_current: Option<String>,
	/// Only serialized if not blank
	pub remarks: Option<String>,
	/// Only serialized if set to `true`
	pub auto_increment: Option<bool>,
	pub constraints: Option<ConstraintsConfig>,
}

type Attributes<'a> = Vec<(&'static str, Option<Cow<'a, str>>)>;

fn text(value: &Option<String>) -> Option<Cow<'_, str>> {
	value.as_deref().map(Cow::Borrowed)
}

fn flag(value: Option<bool>) -> Option<Cow<'static, str>> {
	value.map(|v| Cow::Owned(v.to_string()))
}

fn date(value: &Option<NaiveDateTime>) -> Option<Cow<'static, str>> {
	value.as_ref().map(|v| Cow::Owned(iso_date_time(v)))
}

impl ConstraintsConfig {
	fn attributes(&self) -> Attributes<'_> {
		vec![
			("checkConstraint", text(&self.check_constraint)),
			("foreignKeyName", text(&self.foreign_key_name)),
			("references", text(&self.references)),
			("referencedTableName", text(&self.referenced_table_name)),
			("referencedColumnNames", text(&self.referenced_column_names)),
			("deferrable", flag(self.deferrable)),
			("validateNullable", flag(self.validate_nullable)),
			("validateUnique", flag(self.validate_unique)),
			("validatePrimaryKey", flag(self.validate_primary_key)),
			("validateForeignKey", flag(self.validate_foreign_key)),
			("deleteCascade", flag(self.delete_cascade)),
			("initiallyDeferred", flag(self.initially_deferred)),
			("nullable", flag(self.nullable)),
			("primaryKey", flag(self.primary_key)),
			("unique", flag(self.unique)),
			("uniqueConstraintName", text(&self.unique_constraint_name)),
			("primaryKeyName", text(&self.primary_key_name)),
			("primaryKeyTablespace", text(&self.primary_key_tablespace)),
			("notNullConstraintName", text(&self.not_null_constraint_name)),
			("referencedTableCatalogName", text(&self.referenced_table_catalog_name)),
			("referencedTableSchemaName", text(&self.referenced_table_schema_name)),
		]
	}
}

impl ColumnConfig {
	/// Column with name and type
	pub fn new(name: impl Into<String>, column_type: impl Into<String>) -> Self {
		Self {
			name: Some(name.into()),
			column_type: Some(column_type.into()),
			..Self::default()
		}
	}

	fn attributes(&self) -> Attributes<'_> {
		let remarks = self
			.remarks
			.as_deref()
			.filter(|r| !r.trim().is_empty())
			.map(Cow::Borrowed);
		let auto_increment = match self.auto_increment {
			Some(true) => Some(Cow::Borrowed("true")),
			_ => None,
		};
		vec![
			("name", text(&self.name)),
			("type", text(&self.column_type)),
			("defaultValue", text(&self.default_value)),
			("defaultValueNumeric", text(&self.default_value_numeric)),
			("defaultValueDate", date(&self.default_value_date)),
			("defaultValueBoolean", flag(self.default_value_boolean)),
			("defaultValueComputed", text(&self.default_value_computed)),
			("defaultValueSequenceNext", text(&self.default_value_sequence_next)),
			("value", text(&self.value)),
			("valueNumeric", text(&self.value_numeric)),
			("valueBoolean", flag(self.value_boolean)),
			("valueDate", date(&self.value_date)),
			("valueComputed", text(&self.value_computed)),
			("valueSequenceNext", text(&self.value_sequence_next)),
			("valueSequenceCurrent", text(&self.value_sequence_current)),
			("remarks", remarks),
			("autoIncrement", auto_increment),
		]
	}
}

fn set_attributes(element: &mut Element, attributes: Attributes<'_>) -> Result<()> {
	for (name, value) in attributes {
		if let Some(value) = value {
			element
				.set_attribute(name, &value)
				.map_err(|e| errors::invalid_attribute(element.name(), name, e))?;
		}
	}
	Ok(())
}

impl NodeBuilder<'_> {
	/// Build the `<column>` element (with nested `<constraints>`) for a column definition.
	pub fn column_node(&self, column: &ColumnConfig) -> Result<Element> {
		let mut element = Element::new(STANDARD_CHANGELOG_NAMESPACE, "column");
		set_attributes(&mut element, column.attributes())?;
		if let Some(constraints) = &column.constraints {
			let mut nested = Element::new(STANDARD_CHANGELOG_NAMESPACE, "constraints");
			set_attributes(&mut nested, constraints.attributes())?;
			element.push_child(nested);
		}
		Ok(element)
	}
}

fn lookup<'a>(attributes: Attributes<'a>, field: &str) -> Value<'a> {
	attributes
		.into_iter()
		.find(|(name, _)| *name == field)
		.and_then(|(_, value)| value)
		.map_or(Value::Null, Value::Scalar)
}

impl SerializableObject for ConstraintsConfig {
	fn serialized_object_name(&self) -> Cow<'_, str> {
		Cow::Borrowed("constraints")
	}

	fn serializable_fields(&self) -> Vec<Cow<'_, str>> {
		self.attributes()
			.into_iter()
			.map(|(name, _)| Cow::Borrowed(name))
			.collect()
	}

	fn serializable_field_value(&self, field: &str) -> Value<'_> {
		lookup(self.attributes(), field)
	}
}

impl ToValue for ConstraintsConfig {
	fn to_value(&self) -> Value<'_> {
		Value::Object(self)
	}
}

impl SerializableObject for ColumnConfig {
	fn serialized_object_name(&self) -> Cow<'_, str> {
		Cow::Borrowed("column")
	}

	fn serializable_fields(&self) -> Vec<Cow<'_, str>> {
		let mut fields: Vec<_> = self
			.attributes()
			.into_iter()
			.map(|(name, _)| Cow::Borrowed(name))
			.collect();
		fields.push(Cow::Borrowed("constraints"));
		fields
	}

	fn serializable_field_value(&self, field: &str) -> Value<'_> {
		if field == "constraints" {
			self.constraints.to_value()
		} else {
			lookup(self.attributes(), field)
		}
	}
}

impl ToValue for ColumnConfig {
	fn to_value(&self) -> Value<'_> {
		Value::Object(self)
	}
}
