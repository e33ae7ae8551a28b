// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use strand_type::Value;

use crate::{Bytecode, Token};

/// An instruction argument: a nested traversal, a literal or a marker token.
///
/// Predicate names, reduce operators and built-in function names are carried as text literals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Argument {
	Bytecode(Bytecode),
	Value(Value),
	Token(Token),
}

impl Argument {
	pub fn as_bytecode(&self) -> Option<&Bytecode> {
		match self {
			Argument::Bytecode(bytecode) => Some(bytecode),
			_ => None,
		}
	}

	pub fn as_value(&self) -> Option<&Value> {
		match self {
			Argument::Value(value) => Some(value),
			_ => None,
		}
	}

	pub fn as_text(&self) -> Option<&str> {
		self.as_value().and_then(Value::as_utf8)
	}

	pub fn as_token(&self) -> Option<Token> {
		match self {
			Argument::Token(token) => Some(*token),
			_ => None,
		}
	}

	pub fn kind(&self) -> &'static str {
		match self {
			Argument::Bytecode(_) => "bytecode",
			Argument::Value(value) => value.kind(),
			Argument::Token(_) => "token",
		}
	}
}

impl Display for Argument {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Argument::Bytecode(bytecode) => write!(f, "{}", bytecode),
			Argument::Value(Value::Utf8(text)) => write!(f, "{:?}", text),
			Argument::Value(value) => write!(f, "{}", value),
			Argument::Token(token) => write!(f, "{}", token),
		}
	}
}

impl From<Bytecode> for Argument {
	fn from(bytecode: Bytecode) -> Self {
		Argument::Bytecode(bytecode)
	}
}

impl From<Value> for Argument {
	fn from(value: Value) -> Self {
		Argument::Value(value)
	}
}

impl From<Token> for Argument {
	fn from(token: Token) -> Self {
		Argument::Token(token)
	}
}

impl From<&str> for Argument {
	fn from(text: &str) -> Self {
		Argument::Value(Value::utf8(text))
	}
}

impl From<String> for Argument {
	fn from(text: String) -> Self {
		Argument::Value(Value::Utf8(text))
	}
}

impl From<i64> for Argument {
	fn from(value: i64) -> Self {
		Argument::Value(Value::Int8(value))
	}
}
