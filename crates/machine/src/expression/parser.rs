// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strand_type::Value;
use thiserror::Error;

use super::{
	Expr,
	expr::{BinaryOp, UnaryOp},
	token::{Token, TokenKind},
};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParseError {
	#[error("unexpected '{found}' at column {column}, expected {expected}")]
	UnexpectedToken {
		expected: &'static str,
		found: String,
		column: u32,
	},

	#[error("unexpected end of expression, expected {expected}")]
	UnexpectedEof {
		expected: &'static str,
	},

	#[error("identifier '{name}' at column {column} is not bound, the expression already uses '{parameter}'")]
	UnboundIdentifier {
		name: String,
		parameter: String,
		column: u32,
	},
}

#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
enum Precedence {
	None,
	LogicOr,
	LogicAnd,
	Comparison,
	Term,
	Factor,
	Prefix,
	Postfix,
}

fn infix_precedence(kind: &TokenKind) -> Precedence {
	match kind {
		TokenKind::Or => Precedence::LogicOr,
		TokenKind::And => Precedence::LogicAnd,
		TokenKind::Eq | TokenKind::Ne | TokenKind::Lt | TokenKind::Le | TokenKind::Gt | TokenKind::Ge => {
			Precedence::Comparison
		}
		TokenKind::Plus | TokenKind::Minus => Precedence::Term,
		TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Precedence::Factor,
		TokenKind::Dot | TokenKind::LBracket => Precedence::Postfix,
		_ => Precedence::None,
	}
}

/// A parsed lambda: `x -> body`, or a bare `body` whose only free identifier is the parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct Parsed {
	pub parameter: Option<String>,
	pub body: Expr,
}

pub struct Parser {
	tokens: Vec<Token>,
	position: usize,
	parameter: Option<String>,
}

impl Parser {
	pub fn new(tokens: Vec<Token>) -> Self {
		Self {
			tokens,
			position: 0,
			parameter: None,
		}
	}

	pub fn parse(mut self) -> Result<Parsed, ParseError> {
		if self.current().kind == TokenKind::Ident && self.peek_kind(1) == Some(&TokenKind::Arrow) {
			let name = self.advance().text;
			self.advance();
			self.parameter = Some(name);
		}

		let body = self.parse_expr(Precedence::None)?;
		if self.current().kind != TokenKind::Eof {
			return Err(self.unexpected("end of expression"));
		}

		Ok(Parsed {
			parameter: self.parameter,
			body,
		})
	}

	fn parse_expr(&mut self, precedence: Precedence) -> Result<Expr, ParseError> {
		let mut left = self.parse_prefix()?;

		loop {
			let next = infix_precedence(&self.current().kind);
			if next == Precedence::None || precedence >= next {
				break;
			}
			left = self.parse_infix(left, next)?;
		}

		Ok(left)
	}

	fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
		let token = self.advance();
		match token.kind {
			TokenKind::Int(v) => Ok(Expr::Literal(Value::Int8(v))),
			TokenKind::Float(v) => Ok(Expr::Literal(Value::float8(v))),
			TokenKind::String(v) => Ok(Expr::Literal(Value::Utf8(v))),
			TokenKind::Bool(v) => Ok(Expr::Literal(Value::Boolean(v))),
			TokenKind::Null => Ok(Expr::Literal(Value::Undefined)),
			TokenKind::Ident => self.bind(token),
			TokenKind::Minus => Ok(Expr::Unary {
				op: UnaryOp::Neg,
				operand: Box::new(self.parse_expr(Precedence::Prefix)?),
			}),
			TokenKind::Not => Ok(Expr::Unary {
				op: UnaryOp::Not,
				operand: Box::new(self.parse_expr(Precedence::Prefix)?),
			}),
			TokenKind::LParen => {
				let inner = self.parse_expr(Precedence::None)?;
				self.expect(TokenKind::RParen, "')'")?;
				Ok(inner)
			}
			TokenKind::LBracket => {
				let mut items = Vec::new();
				if self.current().kind != TokenKind::RBracket {
					loop {
						items.push(self.parse_expr(Precedence::None)?);
						if self.current().kind == TokenKind::Comma {
							self.advance();
						} else {
							break;
						}
					}
				}
				self.expect(TokenKind::RBracket, "']'")?;
				Ok(Expr::List(items))
			}
			TokenKind::Eof => Err(ParseError::UnexpectedEof {
				expected: "an operand",
			}),
			_ => Err(ParseError::UnexpectedToken {
				expected: "an operand",
				found: token.text,
				column: token.span.column,
			}),
		}
	}

	fn parse_infix(&mut self, left: Expr, precedence: Precedence) -> Result<Expr, ParseError> {
		let token = self.advance();
		let op = match token.kind {
			TokenKind::Dot => {
				let name = self.expect(TokenKind::Ident, "a field name")?;
				return Ok(Expr::Field {
					object: Box::new(left),
					name: name.text,
				});
			}
			TokenKind::LBracket => {
				let index = self.parse_expr(Precedence::None)?;
				self.expect(TokenKind::RBracket, "']'")?;
				return Ok(Expr::Index {
					object: Box::new(left),
					index: Box::new(index),
				});
			}
			TokenKind::Or => BinaryOp::Or,
			TokenKind::And => BinaryOp::And,
			TokenKind::Eq => BinaryOp::Eq,
			TokenKind::Ne => BinaryOp::Ne,
			TokenKind::Lt => BinaryOp::Lt,
			TokenKind::Le => BinaryOp::Le,
			TokenKind::Gt => BinaryOp::Gt,
			TokenKind::Ge => BinaryOp::Ge,
			TokenKind::Plus => BinaryOp::Add,
			TokenKind::Minus => BinaryOp::Sub,
			TokenKind::Star => BinaryOp::Mul,
			TokenKind::Slash => BinaryOp::Div,
			TokenKind::Percent => BinaryOp::Rem,
			_ => {
				return Err(ParseError::UnexpectedToken {
					expected: "an operator",
					found: token.text,
					column: token.span.column,
				});
			}
		};

		let right = self.parse_expr(precedence)?;
		Ok(Expr::Binary {
			op,
			left: Box::new(left),
			right: Box::new(right),
		})
	}

	fn bind(&mut self, token: Token) -> Result<Expr, ParseError> {
		match &self.parameter {
			Some(parameter) if *parameter == token.text => Ok(Expr::Parameter),
			Some(parameter) => Err(ParseError::UnboundIdentifier {
				name: token.text,
				parameter: parameter.clone(),
				column: token.span.column,
			}),
			None => {
				self.parameter = Some(token.text);
				Ok(Expr::Parameter)
			}
		}
	}

	fn current(&self) -> &Token {
		let last = self.tokens.len().saturating_sub(1);
		&self.tokens[self.position.min(last)]
	}

	fn peek_kind(&self, offset: usize) -> Option<&TokenKind> {
		self.tokens.get(self.position + offset).map(|t| &t.kind)
	}

	fn advance(&mut self) -> Token {
		let token = self.current().clone();
		if self.position < self.tokens.len() {
			self.position += 1;
		}
		token
	}

	fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<Token, ParseError> {
		if self.current().kind == kind {
			Ok(self.advance())
		} else {
			Err(self.unexpected(expected))
		}
	}

	fn unexpected(&self, expected: &'static str) -> ParseError {
		let token = self.current();
		if token.kind == TokenKind::Eof {
			ParseError::UnexpectedEof {
				expected,
			}
		} else {
			ParseError::UnexpectedToken {
				expected,
				found: token.text.clone(),
				column: token.span.column,
			}
		}
	}
}
