// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	cmp::Ordering,
	fmt::{Display, Formatter},
};

use serde::{Deserialize, Serialize};

mod arith;
mod dictionary;
mod ordered_f64;

pub use dictionary::Dictionary;
pub use ordered_f64::OrderedF64;

/// A value carried by a traverser, represented as a native Rust type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
	/// Value is not defined (think null in common programming languages)
	Undefined,
	/// A boolean: true or false.
	Boolean(bool),
	/// An 8-byte signed integer
	Int8(i64),
	/// An 8-byte floating point
	Float8(OrderedF64),
	/// A UTF-8 encoded text
	Utf8(String),
	/// An ordered sequence of values
	List(Vec<Value>),
	/// Insertion-ordered key/value entries
	Dictionary(Dictionary),
}

impl Value {
	pub fn undefined() -> Self {
		Value::Undefined
	}

	pub fn bool(v: impl Into<bool>) -> Self {
		Value::Boolean(v.into())
	}

	pub fn int8(v: impl Into<i64>) -> Self {
		Value::Int8(v.into())
	}

	pub fn float8(v: impl Into<f64>) -> Self {
		OrderedF64::try_from(v.into()).map(Value::Float8).unwrap_or(Value::Undefined)
	}

	pub fn utf8(v: impl Into<String>) -> Self {
		Value::Utf8(v.into())
	}

	pub fn list(values: impl IntoIterator<Item = impl Into<Value>>) -> Self {
		Value::List(values.into_iter().map(Into::into).collect())
	}

	pub fn dictionary(entries: impl IntoIterator<Item = (impl Into<Value>, impl Into<Value>)>) -> Self {
		Value::Dictionary(entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
	}

	pub fn kind(&self) -> &'static str {
		match self {
			Value::Undefined => "undefined",
			Value::Boolean(_) => "boolean",
			Value::Int8(_) => "int8",
			Value::Float8(_) => "float8",
			Value::Utf8(_) => "utf8",
			Value::List(_) => "list",
			Value::Dictionary(_) => "dictionary",
		}
	}

	pub fn is_undefined(&self) -> bool {
		matches!(self, Value::Undefined)
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Value::Boolean(v) => Some(*v),
			_ => None,
		}
	}

	pub fn as_int8(&self) -> Option<i64> {
		match self {
			Value::Int8(v) => Some(*v),
			_ => None,
		}
	}

	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Value::Int8(v) => Some(*v as f64),
			Value::Float8(v) => Some(v.value()),
			_ => None,
		}
	}

	pub fn as_utf8(&self) -> Option<&str> {
		match self {
			Value::Utf8(v) => Some(v.as_str()),
			_ => None,
		}
	}

	pub fn as_list(&self) -> Option<&[Value]> {
		match self {
			Value::List(v) => Some(v.as_slice()),
			_ => None,
		}
	}

	pub fn as_dictionary(&self) -> Option<&Dictionary> {
		match self {
			Value::Dictionary(v) => Some(v),
			_ => None,
		}
	}

	/// Equality as seen by predicates: numbers compare across int and float.
	pub fn loosely_equals(&self, other: &Value) -> bool {
		match (self, other) {
			(Value::Int8(_), Value::Float8(_)) | (Value::Float8(_), Value::Int8(_)) => {
				self.compare(other) == Some(Ordering::Equal)
			}
			_ => self == other,
		}
	}

	/// Ordering as seen by predicates. `None` when the kinds are not comparable.
	pub fn compare(&self, other: &Value) -> Option<Ordering> {
		match (self, other) {
			(Value::Int8(l), Value::Int8(r)) => Some(l.cmp(r)),
			(Value::Int8(_), Value::Float8(_))
			| (Value::Float8(_), Value::Int8(_))
			| (Value::Float8(_), Value::Float8(_)) => {
				let l = self.as_f64()?;
				let r = other.as_f64()?;
				Some(l.total_cmp(&r))
			}
			(Value::Boolean(l), Value::Boolean(r)) => Some(l.cmp(r)),
			(Value::Utf8(l), Value::Utf8(r)) => Some(l.cmp(r)),
			(Value::Undefined, Value::Undefined) => Some(Ordering::Equal),
			(Value::List(l), Value::List(r)) => Some(l.cmp(r)),
			_ => None,
		}
	}

	fn rank(&self) -> u8 {
		match self {
			Value::Undefined => 0,
			Value::Boolean(_) => 1,
			Value::Int8(_) => 2,
			Value::Float8(_) => 3,
			Value::Utf8(_) => 4,
			Value::List(_) => 5,
			Value::Dictionary(_) => 6,
		}
	}
}

impl PartialOrd for Value {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Value {
	fn cmp(&self, other: &Self) -> Ordering {
		match (self, other) {
			(Value::Undefined, Value::Undefined) => Ordering::Equal,
			(Value::Boolean(l), Value::Boolean(r)) => l.cmp(r),
			(Value::Int8(l), Value::Int8(r)) => l.cmp(r),
			(Value::Float8(l), Value::Float8(r)) => l.cmp(r),
			(Value::Utf8(l), Value::Utf8(r)) => l.cmp(r),
			(Value::List(l), Value::List(r)) => l.cmp(r),
			(Value::Dictionary(l), Value::Dictionary(r)) => l.cmp(r),
			_ => self.rank().cmp(&other.rank()),
		}
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Undefined => f.write_str("undefined"),
			Value::Boolean(v) => write!(f, "{}", v),
			Value::Int8(v) => write!(f, "{}", v),
			Value::Float8(v) => write!(f, "{}", v),
			Value::Utf8(v) => f.write_str(v),
			Value::List(values) => {
				f.write_str("[")?;
				for (i, value) in values.iter().enumerate() {
					if i > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{}", value)?;
				}
				f.write_str("]")
			}
			Value::Dictionary(entries) => {
				f.write_str("{")?;
				for (i, (key, value)) in entries.iter().enumerate() {
					if i > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{}: {}", key, value)?;
				}
				f.write_str("}")
			}
		}
	}
}

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Value::Boolean(v)
	}
}

impl From<i32> for Value {
	fn from(v: i32) -> Self {
		Value::Int8(v as i64)
	}
}

impl From<i64> for Value {
	fn from(v: i64) -> Self {
		Value::Int8(v)
	}
}

impl From<u32> for Value {
	fn from(v: u32) -> Self {
		Value::Int8(v as i64)
	}
}

impl From<f64> for Value {
	fn from(v: f64) -> Self {
		Value::float8(v)
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::Utf8(v.to_string())
	}
}

impl From<String> for Value {
	fn from(v: String) -> Self {
		Value::Utf8(v)
	}
}

impl From<Vec<Value>> for Value {
	fn from(v: Vec<Value>) -> Self {
		Value::List(v)
	}
}

impl From<Dictionary> for Value {
	fn from(v: Dictionary) -> Self {
		Value::Dictionary(v)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_float_nan_is_undefined() {
		assert_eq!(Value::float8(f64::NAN), Value::Undefined);
	}

	#[test]
	fn test_loosely_equals_across_numbers() {
		assert!(Value::int8(2).loosely_equals(&Value::float8(2.0)));
		assert!(!Value::int8(2).loosely_equals(&Value::float8(2.5)));
		assert_ne!(Value::int8(2), Value::float8(2.0));
	}

	#[test]
	fn test_compare_incomparable() {
		assert_eq!(Value::int8(1).compare(&Value::utf8("1")), None);
		assert_eq!(Value::int8(1).compare(&Value::float8(1.5)), Some(Ordering::Less));
	}

	#[test]
	fn test_dictionary_equality_ignores_order() {
		let a = Value::dictionary([("name", Value::utf8("marko")), ("age", Value::int8(29))]);
		let b = Value::dictionary([("age", Value::int8(29)), ("name", Value::utf8("marko"))]);
		assert_eq!(a, b);

		let mut set = std::collections::HashSet::new();
		set.insert(a);
		assert!(set.contains(&b));
	}

	#[test]
	fn test_display() {
		let value = Value::list([Value::int8(1), Value::utf8("a"), Value::dictionary([("k", 2)])]);
		assert_eq!(value.to_string(), "[1, a, {k: 2}]");
	}

	#[test]
	fn test_serde_dictionary_with_non_string_keys() {
		let value = Value::dictionary([(Value::int8(1), Value::utf8("one"))]);
		let json = serde_json::to_string(&value).unwrap();
		let back: Value = serde_json::from_str(&json).unwrap();
		assert_eq!(value, back);
	}
}
