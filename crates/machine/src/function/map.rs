// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use strand_type::{Result, Value, error::diagnostic::evaluate::operator_not_applicable, return_error};

use super::Operand;
use crate::{Compilation, expression::Lambda, traverser::Traverser};

/// One object in, one object out.
#[derive(Clone, Debug)]
pub enum MapFunction {
	Constant(Value),
	/// `traverser::object`
	Object,
	/// `traverser::count`, the coefficient becomes the object.
	Count,
	/// `traverser::loops`
	Loops,
	/// `dictionary::get`
	Get(Operand),
	Lambda(Lambda),
	Traversal(Box<Compilation>),
	Path(Vec<String>),
	Incr,
}

impl MapFunction {
	pub fn apply(&mut self, traverser: &Traverser, label: Option<&str>) -> Result<Traverser> {
		let object = self.object(traverser)?;
		let mut result = traverser.split(object, label);
		if let MapFunction::Count = self {
			result.coefficient_mut().set(1);
		}
		Ok(result)
	}

	fn object(&mut self, traverser: &Traverser) -> Result<Value> {
		match self {
			MapFunction::Constant(value) => Ok(value.clone()),
			MapFunction::Object => Ok(traverser.object().clone()),
			MapFunction::Count => Ok(Value::Int8(i64::try_from(traverser.coefficient().count()).unwrap_or(i64::MAX))),
			MapFunction::Loops => Ok(Value::Int8(traverser.innermost_loops() as i64)),
			MapFunction::Get(key) => {
				let Value::Dictionary(entries) = traverser.object() else {
					return_error!(operator_not_applicable("dictionary::get", traverser.object().kind(), "key"));
				};
				let Some(key) = key.resolve(traverser)? else {
					return Ok(Value::Undefined);
				};
				Ok(entries.get(&key).cloned().unwrap_or(Value::Undefined))
			}
			MapFunction::Lambda(lambda) => lambda.apply(traverser.object()),
			MapFunction::Traversal(compilation) => Ok(compilation
				.map_traverser(traverser.clone())?
				.map(Traverser::into_object)
				.unwrap_or(Value::Undefined)),
			MapFunction::Path(labels) => {
				let Some(path) = traverser.path() else {
					return Ok(Value::Undefined);
				};
				if labels.is_empty() {
					return Ok(path.to_value());
				}
				Ok(Value::List(
					labels.iter().map(|label| path.get(label).cloned().unwrap_or(Value::Undefined)).collect(),
				))
			}
			MapFunction::Incr => traverser.object().add(&Value::Int8(1)),
		}
	}
}

impl Display for MapFunction {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			MapFunction::Constant(Value::Utf8(text)) => write!(f, "constant {:?}", text),
			MapFunction::Constant(value) => write!(f, "constant {}", value),
			MapFunction::Object => f.write_str("traverser::object"),
			MapFunction::Count => f.write_str("traverser::count"),
			MapFunction::Loops => f.write_str("traverser::loops"),
			MapFunction::Get(key) => write!(f, "dictionary::get {}", key),
			MapFunction::Lambda(lambda) => write!(f, "{}", lambda),
			MapFunction::Traversal(compilation) => write!(f, "{}", compilation),
			MapFunction::Path(labels) if labels.is_empty() => f.write_str("path"),
			MapFunction::Path(labels) => write!(f, "path {}", labels.join(", ")),
			MapFunction::Incr => f.write_str("incr"),
		}
	}
}
