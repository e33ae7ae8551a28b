// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::cmp::Ordering;

use strand_type::{
	Result, Value,
	error::diagnostic::evaluate::{key_not_found, operator_not_applicable},
	return_error,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
	Or,
	And,
	Eq,
	Ne,
	Lt,
	Le,
	Gt,
	Ge,
	Add,
	Sub,
	Mul,
	Div,
	Rem,
}

impl BinaryOp {
	pub fn as_str(&self) -> &'static str {
		match self {
			BinaryOp::Or => "||",
			BinaryOp::And => "&&",
			BinaryOp::Eq => "==",
			BinaryOp::Ne => "!=",
			BinaryOp::Lt => "<",
			BinaryOp::Le => "<=",
			BinaryOp::Gt => ">",
			BinaryOp::Ge => ">=",
			BinaryOp::Add => "+",
			BinaryOp::Sub => "-",
			BinaryOp::Mul => "*",
			BinaryOp::Div => "/",
			BinaryOp::Rem => "%",
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
	Neg,
	Not,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
	Literal(Value),
	Parameter,
	List(Vec<Expr>),
	Unary {
		op: UnaryOp,
		operand: Box<Expr>,
	},
	Binary {
		op: BinaryOp,
		left: Box<Expr>,
		right: Box<Expr>,
	},
	Field {
		object: Box<Expr>,
		name: String,
	},
	Index {
		object: Box<Expr>,
		index: Box<Expr>,
	},
}

/// `undefined` and `false` are falsy, everything else is truthy.
pub fn truthy(value: &Value) -> bool {
	!matches!(value, Value::Undefined | Value::Boolean(false))
}

impl Expr {
	pub fn evaluate(&self, parameter: &Value) -> Result<Value> {
		match self {
			Expr::Literal(value) => Ok(value.clone()),
			Expr::Parameter => Ok(parameter.clone()),
			Expr::List(items) => {
				let mut result = Vec::with_capacity(items.len());
				for item in items {
					result.push(item.evaluate(parameter)?);
				}
				Ok(Value::List(result))
			}
			Expr::Unary {
				op,
				operand,
			} => {
				let operand = operand.evaluate(parameter)?;
				match op {
					UnaryOp::Neg => operand.neg(),
					UnaryOp::Not => Ok(Value::Boolean(!truthy(&operand))),
				}
			}
			Expr::Binary {
				op: BinaryOp::And,
				left,
				right,
			} => {
				if !truthy(&left.evaluate(parameter)?) {
					return Ok(Value::Boolean(false));
				}
				Ok(Value::Boolean(truthy(&right.evaluate(parameter)?)))
			}
			Expr::Binary {
				op: BinaryOp::Or,
				left,
				right,
			} => {
				if truthy(&left.evaluate(parameter)?) {
					return Ok(Value::Boolean(true));
				}
				Ok(Value::Boolean(truthy(&right.evaluate(parameter)?)))
			}
			Expr::Binary {
				op,
				left,
				right,
			} => {
				let left = left.evaluate(parameter)?;
				let right = right.evaluate(parameter)?;
				binary(*op, &left, &right)
			}
			Expr::Field {
				object,
				name,
			} => {
				let object = object.evaluate(parameter)?;
				lookup(&object, &Value::utf8(name.as_str()))
			}
			Expr::Index {
				object,
				index,
			} => {
				let object = object.evaluate(parameter)?;
				let index = index.evaluate(parameter)?;
				lookup(&object, &index)
			}
		}
	}
}

fn binary(op: BinaryOp, left: &Value, right: &Value) -> Result<Value> {
	match op {
		BinaryOp::Add => left.add(right),
		BinaryOp::Sub => left.sub(right),
		BinaryOp::Mul => left.mul(right),
		BinaryOp::Div => left.div(right),
		BinaryOp::Rem => left.rem(right),
		BinaryOp::Eq => Ok(Value::Boolean(left.loosely_equals(right))),
		BinaryOp::Ne => Ok(Value::Boolean(!left.loosely_equals(right))),
		BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
			let Some(ordering) = left.compare(right) else {
				return_error!(operator_not_applicable(op.as_str(), left.kind(), right.kind()));
			};
			Ok(Value::Boolean(match op {
				BinaryOp::Lt => ordering == Ordering::Less,
				BinaryOp::Le => ordering != Ordering::Greater,
				BinaryOp::Gt => ordering == Ordering::Greater,
				_ => ordering != Ordering::Less,
			}))
		}
		BinaryOp::And => Ok(Value::Boolean(truthy(left) && truthy(right))),
		BinaryOp::Or => Ok(Value::Boolean(truthy(left) || truthy(right))),
	}
}

fn lookup(object: &Value, key: &Value) -> Result<Value> {
	match (object, key) {
		(Value::Dictionary(entries), _) => match entries.get(key) {
			Some(value) => Ok(value.clone()),
			None => return_error!(key_not_found(&key.to_string())),
		},
		(Value::List(items), Value::Int8(index)) => {
			let index = if *index < 0 {
				items.len() as i64 + index
			} else {
				*index
			};
			Ok(usize::try_from(index).ok().and_then(|i| items.get(i)).cloned().unwrap_or(Value::Undefined))
		}
		_ => return_error!(operator_not_applicable("[]", object.kind(), key.kind())),
	}
}
