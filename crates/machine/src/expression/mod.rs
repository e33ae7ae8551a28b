// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! The lambda language used by `map`, `filter` and `flatmap` instructions.
//!
//! ```text
//! x -> x + 1
//! x -> x.name
//! x >= 8
//! ```
//!
//! A lambda has exactly one parameter. Without an explicit `x ->` head, the first identifier of
//! the expression is the parameter.

mod expr;
mod lexer;
mod parser;
mod token;

use std::fmt::{Display, Formatter};

pub use expr::{BinaryOp, Expr, UnaryOp, truthy};
pub use lexer::{LexError, Lexer};
pub use parser::{ParseError, Parsed, Parser};
use strand_type::{Result, Value, error, error::diagnostic::evaluate::expression_syntax};
use thiserror::Error;
pub use token::{Span, Token, TokenKind};

#[derive(Debug, Error)]
pub enum ExpressionError {
	#[error("lexer error: {0}")]
	Lex(#[from] LexError),

	#[error("parse error: {0}")]
	Parse(#[from] ParseError),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Lambda {
	source: String,
	parameter: Option<String>,
	body: Expr,
}

impl Lambda {
	pub fn parse(source: &str) -> Result<Self> {
		Self::try_parse(source).map_err(|e| error!(expression_syntax(source, e.to_string())))
	}

	fn try_parse(source: &str) -> std::result::Result<Self, ExpressionError> {
		let tokens = Lexer::new(source).tokenize()?;
		let parsed = Parser::new(tokens).parse()?;
		Ok(Self {
			source: source.to_string(),
			parameter: parsed.parameter,
			body: parsed.body,
		})
	}

	pub fn source(&self) -> &str {
		&self.source
	}

	pub fn parameter(&self) -> Option<&str> {
		self.parameter.as_deref()
	}

	pub fn apply(&self, value: &Value) -> Result<Value> {
		self.body.evaluate(value)
	}

	pub fn test(&self, value: &Value) -> Result<bool> {
		Ok(truthy(&self.apply(value)?))
	}
}

impl Display for Lambda {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.source)
	}
}
