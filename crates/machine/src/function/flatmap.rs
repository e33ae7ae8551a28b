// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use strand_bytecode::Token;
use strand_type::{
	Dictionary, Result, Value, error::diagnostic::evaluate::operator_not_applicable, return_error,
};

use crate::{Compilation, expression::Lambda, traverser::Traverser};

/// One object in, any number of objects out.
#[derive(Clone, Debug)]
pub enum FlatMapFunction {
	/// `traverser::object`: lists yield their items, dictionaries their entries.
	Unfold,
	/// `dictionary::keys`
	Keys,
	/// `dictionary::values`
	Values,
	Lambda(Lambda),
	Traversal(Box<Compilation>),
	Join(JoinFunction),
}

impl FlatMapFunction {
	pub fn apply(&mut self, traverser: &Traverser, label: Option<&str>) -> Result<Vec<Traverser>> {
		let objects = match self {
			FlatMapFunction::Unfold => unfold(traverser.object().clone()),
			FlatMapFunction::Keys => match traverser.object() {
				Value::Dictionary(entries) => entries.keys().cloned().collect(),
				other => return_error!(operator_not_applicable("dictionary::keys", other.kind(), "dictionary")),
			},
			FlatMapFunction::Values => match traverser.object() {
				Value::Dictionary(entries) => entries.values().cloned().collect(),
				other => return_error!(operator_not_applicable("dictionary::values", other.kind(), "dictionary")),
			},
			FlatMapFunction::Lambda(lambda) => match lambda.apply(traverser.object())? {
				Value::List(items) => items,
				value => vec![value],
			},
			FlatMapFunction::Traversal(compilation) => {
				let mut results = compilation.flat_map_traverser(traverser.clone())?;
				if let Some(label) = label {
					results.iter_mut().for_each(|result| result.add_label(label));
				}
				return Ok(results);
			}
			FlatMapFunction::Join(join) => join.apply(traverser)?,
		};
		Ok(objects.into_iter().map(|object| traverser.split(object, label)).collect())
	}
}

fn unfold(object: Value) -> Vec<Value> {
	match object {
		Value::List(items) => items,
		Value::Dictionary(entries) => {
			entries.into_inner().into_iter().map(|(k, v)| Value::Dictionary(Dictionary::from(vec![(k, v)]))).collect()
		}
		other => vec![other],
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinKind {
	Inner,
	Left,
}

impl JoinKind {
	pub fn from_token(token: Token) -> Option<Self> {
		match token {
			Token::Inner => Some(JoinKind::Inner),
			Token::Left => Some(JoinKind::Left),
			_ => None,
		}
	}
}

/// Joins a dictionary with the dictionaries produced by a traversal on their shared keys.
#[derive(Clone, Debug)]
pub struct JoinFunction {
	pub kind: JoinKind,
	pub right: Box<Compilation>,
}

impl JoinFunction {
	fn apply(&mut self, traverser: &Traverser) -> Result<Vec<Value>> {
		let Value::Dictionary(left) = traverser.object() else {
			return_error!(operator_not_applicable("join", traverser.object().kind(), "dictionary"));
		};

		let mut result = Vec::new();
		for right in self.right.flat_map_traverser(traverser.clone())? {
			let Value::Dictionary(right) = right.object() else {
				return_error!(operator_not_applicable("join", "dictionary", right.object().kind()));
			};
			let matches = left.iter().all(|(key, value)| right.get(key).is_none_or(|other| other == value));
			if matches {
				let mut merged = left.clone();
				for (key, value) in right.iter() {
					merged.entry(key.clone()).or_insert_with(|| value.clone());
				}
				result.push(Value::Dictionary(merged));
			}
		}

		if result.is_empty() && self.kind == JoinKind::Left {
			result.push(Value::Dictionary(left.clone()));
		}
		Ok(result)
	}
}

impl Display for FlatMapFunction {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			FlatMapFunction::Unfold => f.write_str("traverser::object"),
			FlatMapFunction::Keys => f.write_str("dictionary::keys"),
			FlatMapFunction::Values => f.write_str("dictionary::values"),
			FlatMapFunction::Lambda(lambda) => write!(f, "{}", lambda),
			FlatMapFunction::Traversal(compilation) => write!(f, "{}", compilation),
			FlatMapFunction::Join(join) => {
				let kind = match join.kind {
					JoinKind::Inner => "inner",
					JoinKind::Left => "left",
				};
				write!(f, "join {} {}", kind, join.right)
			}
		}
	}
}
