// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	cmp::Ordering,
	fmt::{Display, Formatter},
	str::FromStr,
};

use serde::{Deserialize, Serialize};
use strand_type::{
	Error, Result, Value,
	error::diagnostic::bytecode::{invalid_argument, unknown_operator, unknown_strategy},
	error,
};

/// Operators of step instructions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
	Inject,
	Map,
	Filter,
	FlatMap,
	Reduce,
	Branch,
	Repeat,
	Barrier,
	Path,
	GroupCount,
	Join,
	Incr,
	Explain,
}

impl Operator {
	pub fn as_str(&self) -> &'static str {
		match self {
			Operator::Inject => "inject",
			Operator::Map => "map",
			Operator::Filter => "filter",
			Operator::FlatMap => "flatmap",
			Operator::Reduce => "reduce",
			Operator::Branch => "branch",
			Operator::Repeat => "repeat",
			Operator::Barrier => "barrier",
			Operator::Path => "path",
			Operator::GroupCount => "groupcount",
			Operator::Join => "join",
			Operator::Incr => "incr",
			Operator::Explain => "explain",
		}
	}
}

impl Display for Operator {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Operator {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		match s.to_lowercase().as_str() {
			"inject" => Ok(Operator::Inject),
			"map" => Ok(Operator::Map),
			"filter" => Ok(Operator::Filter),
			"flatmap" => Ok(Operator::FlatMap),
			"reduce" => Ok(Operator::Reduce),
			"branch" => Ok(Operator::Branch),
			"repeat" => Ok(Operator::Repeat),
			"barrier" => Ok(Operator::Barrier),
			"path" => Ok(Operator::Path),
			"groupcount" => Ok(Operator::GroupCount),
			"join" => Ok(Operator::Join),
			"incr" => Ok(Operator::Incr),
			"explain" => Ok(Operator::Explain),
			_ => Err(error!(unknown_operator(s))),
		}
	}
}

/// Operators of source instructions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceOperator {
	WithStrategy,
	WithProcessor,
}

impl SourceOperator {
	pub fn as_str(&self) -> &'static str {
		match self {
			SourceOperator::WithStrategy => "with_strategy",
			SourceOperator::WithProcessor => "with_processor",
		}
	}
}

impl Display for SourceOperator {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for SourceOperator {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		match s.to_lowercase().as_str() {
			"with_strategy" | "withstrategy" => Ok(SourceOperator::WithStrategy),
			"with_processor" | "withprocessor" => Ok(SourceOperator::WithProcessor),
			_ => Err(error!(unknown_strategy(s))),
		}
	}
}

/// Markers used inside the argument lists of `branch`, `repeat` and `join`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Token {
	Default,
	Repeat,
	Until,
	Emit,
	Inner,
	Left,
}

impl Token {
	pub fn as_str(&self) -> &'static str {
		match self {
			Token::Default => "default",
			Token::Repeat => "repeat",
			Token::Until => "until",
			Token::Emit => "emit",
			Token::Inner => "inner",
			Token::Left => "left",
		}
	}
}

impl Display for Token {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Comparison predicates of `filter`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pred {
	Eq,
	Neq,
	Lt,
	Lte,
	Gt,
	Gte,
}

impl Pred {
	pub fn as_str(&self) -> &'static str {
		match self {
			Pred::Eq => "eq",
			Pred::Neq => "neq",
			Pred::Lt => "lt",
			Pred::Lte => "lte",
			Pred::Gt => "gt",
			Pred::Gte => "gte",
		}
	}

	/// Whether `left <pred> right` holds. Values of incomparable kinds only satisfy `neq`.
	pub fn test(&self, left: &Value, right: &Value) -> bool {
		match self {
			Pred::Eq => left.loosely_equals(right),
			Pred::Neq => !left.loosely_equals(right),
			Pred::Lt => left.compare(right) == Some(Ordering::Less),
			Pred::Lte => matches!(left.compare(right), Some(Ordering::Less | Ordering::Equal)),
			Pred::Gt => left.compare(right) == Some(Ordering::Greater),
			Pred::Gte => matches!(left.compare(right), Some(Ordering::Greater | Ordering::Equal)),
		}
	}

	pub fn parse(s: &str) -> Option<Self> {
		match s {
			"eq" => Some(Pred::Eq),
			"neq" => Some(Pred::Neq),
			"lt" => Some(Pred::Lt),
			"lte" => Some(Pred::Lte),
			"gt" => Some(Pred::Gt),
			"gte" => Some(Pred::Gte),
			_ => None,
		}
	}
}

impl Display for Pred {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Folding operators of `reduce`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Oper {
	Sum,
	Min,
	Max,
	Mult,
}

impl Oper {
	pub fn as_str(&self) -> &'static str {
		match self {
			Oper::Sum => "sum",
			Oper::Min => "min",
			Oper::Max => "max",
			Oper::Mult => "mult",
		}
	}

	pub fn apply(&self, accumulator: &Value, value: &Value) -> Result<Value> {
		match self {
			Oper::Sum => accumulator.add(value),
			Oper::Mult => accumulator.mul(value),
			Oper::Min => accumulator.min_of(value),
			Oper::Max => accumulator.max_of(value),
		}
	}
}

impl Display for Oper {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Oper {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		match s {
			"sum" => Ok(Oper::Sum),
			"min" => Ok(Oper::Min),
			"max" => Ok(Oper::Max),
			"mult" => Ok(Oper::Mult),
			_ => Err(error!(invalid_argument("reduce", format!("'{}' is not a reduce operator", s)))),
		}
	}
}
