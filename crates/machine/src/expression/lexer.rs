// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{iter::Peekable, str::CharIndices};

use thiserror::Error;

use super::token::{Span, Token, TokenKind};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum LexError {
	#[error("unexpected character '{ch}' at column {column}")]
	UnexpectedChar {
		ch: char,
		column: u32,
	},

	#[error("unterminated string at column {column}")]
	UnterminatedString {
		column: u32,
	},

	#[error("invalid number '{text}' at column {column}")]
	InvalidNumber {
		text: String,
		column: u32,
	},
}

/// Lexer for lambda expressions such as `x -> x + 1`.
pub struct Lexer<'a> {
	source: &'a str,
	chars: Peekable<CharIndices<'a>>,
	position: usize,
	column: u32,
}

impl<'a> Lexer<'a> {
	pub fn new(source: &'a str) -> Self {
		Self {
			source,
			chars: source.char_indices().peekable(),
			position: 0,
			column: 1,
		}
	}

	/// Tokenize the entire source. The last token is always [`TokenKind::Eof`].
	pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
		let mut tokens = Vec::new();
		loop {
			let token = self.next_token()?;
			let done = token.kind == TokenKind::Eof;
			tokens.push(token);
			if done {
				return Ok(tokens);
			}
		}
	}

	fn next_token(&mut self) -> Result<Token, LexError> {
		self.take_while(char::is_whitespace);

		let start = self.position;
		let column = self.column;
		let Some(&(_, ch)) = self.chars.peek() else {
			return Ok(self.token(TokenKind::Eof, start, column));
		};

		match ch {
			'a'..='z' | 'A'..='Z' | '_' => Ok(self.identifier()),
			'0'..='9' => self.number(),
			'"' | '\'' => self.string(ch),
			'-' => self.operator(ch, '>', TokenKind::Arrow, Some(TokenKind::Minus)),
			'=' => self.operator(ch, '=', TokenKind::Eq, None),
			'!' => self.operator(ch, '=', TokenKind::Ne, Some(TokenKind::Not)),
			'<' => self.operator(ch, '=', TokenKind::Le, Some(TokenKind::Lt)),
			'>' => self.operator(ch, '=', TokenKind::Ge, Some(TokenKind::Gt)),
			'&' => self.operator(ch, '&', TokenKind::And, None),
			'|' => self.operator(ch, '|', TokenKind::Or, None),
			_ => {
				let kind = match ch {
					'+' => TokenKind::Plus,
					'*' => TokenKind::Star,
					'/' => TokenKind::Slash,
					'%' => TokenKind::Percent,
					'(' => TokenKind::LParen,
					')' => TokenKind::RParen,
					'[' => TokenKind::LBracket,
					']' => TokenKind::RBracket,
					',' => TokenKind::Comma,
					'.' => TokenKind::Dot,
					_ => {
						return Err(LexError::UnexpectedChar {
							ch,
							column,
						});
					}
				};
				self.advance();
				Ok(self.token(kind, start, column))
			}
		}
	}

	/// `ch` directly followed by `second` lexes as `double`, `ch` alone as `single`.
	fn operator(
		&mut self,
		ch: char,
		second: char,
		double: TokenKind,
		single: Option<TokenKind>,
	) -> Result<Token, LexError> {
		let start = self.position;
		let column = self.column;
		self.advance();

		let kind = if self.chars.peek().is_some_and(|&(_, next)| next == second) {
			self.advance();
			double
		} else {
			single.ok_or(LexError::UnexpectedChar {
				ch,
				column,
			})?
		};
		Ok(self.token(kind, start, column))
	}

	fn identifier(&mut self) -> Token {
		let start = self.position;
		let column = self.column;
		self.take_while(|ch| ch.is_alphanumeric() || ch == '_');

		let kind = TokenKind::from_keyword(&self.source[start..self.position]).unwrap_or(TokenKind::Ident);
		self.token(kind, start, column)
	}

	fn number(&mut self) -> Result<Token, LexError> {
		let start = self.position;
		let column = self.column;
		self.take_while(|ch| ch.is_ascii_digit());

		// `2.x` is field access on an integer, `2.5` a float
		let rest = &self.source[self.position..];
		let fraction = rest.starts_with('.') && rest[1..].starts_with(|ch: char| ch.is_ascii_digit());
		if fraction {
			self.advance();
			self.take_while(|ch| ch.is_ascii_digit());
		}

		let text = &self.source[start..self.position];
		let invalid = || LexError::InvalidNumber {
			text: text.to_string(),
			column,
		};
		let kind = if fraction {
			TokenKind::Float(text.parse().map_err(|_| invalid())?)
		} else {
			TokenKind::Int(text.parse().map_err(|_| invalid())?)
		};
		Ok(self.token(kind, start, column))
	}

	/// A string delimited by `quote`. `\n`, `\t`, `\\` and an escaped quote are unescaped, any other
	/// backslash is kept as is.
	fn string(&mut self, quote: char) -> Result<Token, LexError> {
		let start = self.position;
		let column = self.column;
		self.advance();

		let mut value = String::new();
		loop {
			let ch = self.advance().ok_or(LexError::UnterminatedString {
				column,
			})?;
			if ch == quote {
				break;
			}
			if ch != '\\' {
				value.push(ch);
				continue;
			}

			let escaped = self.chars.peek().and_then(|&(_, next)| match next {
				'n' => Some('\n'),
				't' => Some('\t'),
				'\\' => Some('\\'),
				next if next == quote => Some(quote),
				_ => None,
			});
			match escaped {
				Some(escaped) => {
					self.advance();
					value.push(escaped);
				}
				None => value.push('\\'),
			}
		}

		Ok(self.token(TokenKind::String(value), start, column))
	}

	fn take_while(&mut self, accept: impl Fn(char) -> bool) {
		while self.chars.peek().is_some_and(|&(_, ch)| accept(ch)) {
			self.advance();
		}
	}

	fn advance(&mut self) -> Option<char> {
		let (index, ch) = self.chars.next()?;
		self.position = index + ch.len_utf8();
		self.column += 1;
		Some(ch)
	}

	fn token(&self, kind: TokenKind, start: usize, column: u32) -> Token {
		let text = self.source.get(start..self.position).unwrap_or_default();
		Token::new(kind, Span::new(start, self.position, column), text.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn kinds(source: &str) -> Vec<TokenKind> {
		Lexer::new(source).tokenize().unwrap().into_iter().map(|t| t.kind).collect()
	}

	#[test]
	fn test_lex_lambda() {
		let tokens = Lexer::new("x -> x + 1").tokenize().unwrap();
		assert_eq!(tokens[0].kind, TokenKind::Ident);
		assert_eq!(tokens[0].text, "x");
		assert_eq!(tokens[1].kind, TokenKind::Arrow);
		assert_eq!(tokens[2].kind, TokenKind::Ident);
		assert_eq!(tokens[3].kind, TokenKind::Plus);
		assert_eq!(tokens[4].kind, TokenKind::Int(1));
		assert_eq!(tokens[5].kind, TokenKind::Eof);
	}

	#[test]
	fn test_lex_minus_without_spaces() {
		assert_eq!(
			kinds("x-1"),
			vec![TokenKind::Ident, TokenKind::Minus, TokenKind::Int(1), TokenKind::Eof]
		);
	}

	#[test]
	fn test_lex_comparisons() {
		assert_eq!(
			kinds(">= <= == != < >"),
			vec![
				TokenKind::Ge,
				TokenKind::Le,
				TokenKind::Eq,
				TokenKind::Ne,
				TokenKind::Lt,
				TokenKind::Gt,
				TokenKind::Eof
			]
		);
	}

	#[test]
	fn test_lex_float_and_field() {
		let kinds = kinds("3.5 x.name 2.x");
		assert!(matches!(kinds[0], TokenKind::Float(f) if (f - 3.5).abs() < f64::EPSILON));
		assert_eq!(kinds[1], TokenKind::Ident);
		assert_eq!(kinds[2], TokenKind::Dot);
		assert_eq!(kinds[3], TokenKind::Ident);
		assert_eq!(kinds[4], TokenKind::Int(2));
		assert_eq!(kinds[5], TokenKind::Dot);
	}

	#[test]
	fn test_lex_keywords() {
		assert_eq!(
			kinds("true false null and or not"),
			vec![
				TokenKind::Bool(true),
				TokenKind::Bool(false),
				TokenKind::Null,
				TokenKind::And,
				TokenKind::Or,
				TokenKind::Not,
				TokenKind::Eof
			]
		);
	}

	#[test]
	fn test_lex_string() {
		assert_eq!(kinds(r#"'it\'s' "a""#)[0], TokenKind::String("it's".to_string()));
	}

	#[test]
	fn test_lex_error_unterminated_string() {
		let result = Lexer::new(r#"x == "unclosed"#).tokenize();
		assert!(matches!(result, Err(LexError::UnterminatedString { .. })));
	}

	#[test]
	fn test_lex_error_single_equals() {
		let result = Lexer::new("x = 1").tokenize();
		assert_eq!(
			result,
			Err(LexError::UnexpectedChar {
				ch: '=',
				column: 3
			})
		);
	}

	#[test]
	fn test_lex_symbolic_logic() {
		assert_eq!(kinds("a && b || !c"), vec![
			TokenKind::Ident,
			TokenKind::And,
			TokenKind::Ident,
			TokenKind::Or,
			TokenKind::Not,
			TokenKind::Ident,
			TokenKind::Eof
		]);
		assert!(matches!(Lexer::new("a | b").tokenize(), Err(LexError::UnexpectedChar { ch: '|', .. })));
	}
}
