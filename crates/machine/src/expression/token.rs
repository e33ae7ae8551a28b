// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

/// Location of a token in the lambda source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
	pub start: usize,
	pub end: usize,
	pub column: u32,
}

impl Span {
	pub fn new(start: usize, end: usize, column: u32) -> Self {
		Self {
			start,
			end,
			column,
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
	Ident,
	Int(i64),
	Float(f64),
	String(String),
	Bool(bool),
	Null,

	And,
	Or,
	Not,

	Plus,
	Minus,
	Star,
	Slash,
	Percent,

	Eq,
	Ne,
	Lt,
	Le,
	Gt,
	Ge,

	Arrow,
	LParen,
	RParen,
	LBracket,
	RBracket,
	Comma,
	Dot,

	Eof,
}

impl TokenKind {
	pub fn from_keyword(text: &str) -> Option<Self> {
		match text {
			"true" => Some(TokenKind::Bool(true)),
			"false" => Some(TokenKind::Bool(false)),
			"null" | "undefined" => Some(TokenKind::Null),
			"and" => Some(TokenKind::And),
			"or" => Some(TokenKind::Or),
			"not" => Some(TokenKind::Not),
			_ => None,
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
	pub kind: TokenKind,
	pub span: Span,
	pub text: String,
}

impl Token {
	pub fn new(kind: TokenKind, span: Span, text: String) -> Self {
		Self {
			kind,
			span,
			text,
		}
	}
}
