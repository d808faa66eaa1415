use crate::serializable::SerializableObject;
use chrono::{
	NaiveDate,
	NaiveDateTime,
	NaiveTime,
};
use std::{
	borrow::Cow,
	collections::{
		BTreeMap,
		HashMap,
	},
	fmt,
};

/// Shape of a field value, as seen by the node builder
pub enum Value<'a> {
	/// Absent value; not serialized at all
	Null,
	/// Anything that has a text representation
	Scalar(Cow<'a, str>),
	/// Collection; each item is serialized as if it was the field value
	Sequence(Vec<Value<'a>>),
	/// Associative map with text keys
	Map(Vec<(Cow<'a, str>, Value<'a>)>),
	/// Nested object, serialized as child element
	Object(&'a (dyn SerializableObject + 'a)),
	/// Fixed array; nested arrays get a wrapper element
	Array(Vec<Value<'a>>),
}

impl Value<'_> {
	/// Whether this is `Value::Null`
	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}
}

impl fmt::Debug for Value<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Null => f.write_str("Null"),
			Self::Scalar(s) => f.debug_tuple("Scalar").field(s).finish(),
			Self::Sequence(items) => f.debug_tuple("Sequence").field(items).finish(),
			Self::Map(entries) => f.debug_tuple("Map").field(entries).finish(),
			Self::Object(o) => f.debug_tuple("Object").field(&o.serialized_object_name()).finish(),
			Self::Array(items) => f.debug_tuple("Array").field(items).finish(),
		}
	}
}

/// Conversion of field data into a `Value`
pub trait ToValue {
	/// Borrow `self` as value
	fn to_value(&self) -> Value<'_>;
}

impl ToValue for str {
	fn to_value(&self) -> Value<'_> {
		Value::Scalar(Cow::Borrowed(self))
	}
}

impl ToValue for String {
	fn to_value(&self) -> Value<'_> {
		Value::Scalar(Cow::Borrowed(self.as_str()))
	}
}

impl ToValue for Cow<'_, str> {
	fn to_value(&self) -> Value<'_> {
		Value::Scalar(Cow::Borrowed(self.as_ref()))
	}
}

macro_rules! display_to_value {
	($($t:ty),*) => {$(
		impl ToValue for $t {
			fn to_value(&self) -> Value<'_> {
				Value::Scalar(Cow::Owned(self.to_string()))
			}
		}
	)*};
}

display_to_value!(bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

pub(crate) fn iso_date(date: &NaiveDate) -> String {
	date.format("%Y-%m-%d").to_string()
}

pub(crate) fn iso_time(time: &NaiveTime) -> String {
	time.format("%H:%M:%S%.f").to_string()
}

pub(crate) fn iso_date_time(date_time: &NaiveDateTime) -> String {
	date_time.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

impl ToValue for NaiveDate {
	fn to_value(&self) -> Value<'_> {
		Value::Scalar(Cow::Owned(iso_date(self)))
	}
}

impl ToValue for NaiveTime {
	fn to_value(&self) -> Value<'_> {
		Value::Scalar(Cow::Owned(iso_time(self)))
	}
}

impl ToValue for NaiveDateTime {
	fn to_value(&self) -> Value<'_> {
		Value::Scalar(Cow::Owned(iso_date_time(self)))
	}
}

impl<T: ToValue + ?Sized> ToValue for &T {
	fn to_value(&self) -> Value<'_> {
		(**self).to_value()
	}
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
	fn to_value(&self) -> Value<'_> {
		(**self).to_value()
	}
}

impl<'o> ToValue for dyn SerializableObject + 'o {
	fn to_value(&self) -> Value<'_> {
		Value::Object(self)
	}
}

impl<T: ToValue> ToValue for Option<T> {
	fn to_value(&self) -> Value<'_> {
		match self {
			Some(v) => v.to_value(),
			None => Value::Null,
		}
	}
}

impl<T: ToValue> ToValue for Vec<T> {
	fn to_value(&self) -> Value<'_> {
		Value::Sequence(self.iter().map(ToValue::to_value).collect())
	}
}

impl<T: ToValue> ToValue for [T] {
	fn to_value(&self) -> Value<'_> {
		Value::Array(self.iter().map(ToValue::to_value).collect())
	}
}

impl<T: ToValue, const N: usize> ToValue for [T; N] {
	fn to_value(&self) -> Value<'_> {
		self[..].to_value()
	}
}

impl<K: AsRef<str>, V: ToValue> ToValue for BTreeMap<K, V> {
	fn to_value(&self) -> Value<'_> {
		Value::Map(
			self.iter()
				.map(|(k, v)| (Cow::Borrowed(k.as_ref()), v.to_value()))
				.collect(),
		)
	}
}

/// Entries are sorted by key so output doesn't depend on hashing
impl<K: AsRef<str>, V: ToValue, S> ToValue for HashMap<K, V, S> {
	fn to_value(&self) -> Value<'_> {
		let mut entries: Vec<_> = self
			.iter()
			.map(|(k, v)| (Cow::Borrowed(k.as_ref()), v.to_value()))
			.collect();
		entries.sort_by(|a, b| a.0.cmp(&b.0));
		Value::Map(entries)
	}
}
