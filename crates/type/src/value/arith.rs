// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::cmp::Ordering;

use crate::{
	Result,
	error::diagnostic::evaluate::{division_by_zero, integer_overflow, operator_not_applicable, unary_not_applicable},
	return_error,
	value::Value,
};

impl Value {
	pub fn add(&self, other: &Value) -> Result<Value> {
		match (self, other) {
			(Value::Int8(l), Value::Int8(r)) => match l.checked_add(*r) {
				Some(v) => Ok(Value::Int8(v)),
				None => return_error!(integer_overflow("+")),
			},
			(Value::Utf8(l), r) => Ok(Value::Utf8(format!("{}{}", l, r))),
			(l, Value::Utf8(r)) => Ok(Value::Utf8(format!("{}{}", l, r))),
			(Value::List(l), Value::List(r)) => Ok(Value::List(l.iter().chain(r.iter()).cloned().collect())),
			_ => self.float_op("+", other, |l, r| l + r),
		}
	}

	pub fn sub(&self, other: &Value) -> Result<Value> {
		match (self, other) {
			(Value::Int8(l), Value::Int8(r)) => match l.checked_sub(*r) {
				Some(v) => Ok(Value::Int8(v)),
				None => return_error!(integer_overflow("-")),
			},
			_ => self.float_op("-", other, |l, r| l - r),
		}
	}

	pub fn mul(&self, other: &Value) -> Result<Value> {
		match (self, other) {
			(Value::Int8(l), Value::Int8(r)) => match l.checked_mul(*r) {
				Some(v) => Ok(Value::Int8(v)),
				None => return_error!(integer_overflow("*")),
			},
			_ => self.float_op("*", other, |l, r| l * r),
		}
	}

	/// `self` multiplied `exponent` times, by repeated squaring.
	pub fn pow(&self, exponent: u64) -> Result<Value> {
		let mut result = Value::Int8(1);
		let mut base = self.clone();
		let mut exponent = exponent;
		while exponent > 0 {
			if exponent & 1 == 1 {
				result = result.mul(&base)?;
			}
			exponent >>= 1;
			if exponent > 0 {
				base = base.mul(&base)?;
			}
		}
		Ok(result)
	}

	pub fn div(&self, other: &Value) -> Result<Value> {
		match (self, other) {
			(Value::Int8(_), Value::Int8(0)) => return_error!(division_by_zero()),
			(Value::Int8(l), Value::Int8(r)) => match l.checked_div(*r) {
				Some(v) => Ok(Value::Int8(v)),
				None => return_error!(integer_overflow("/")),
			},
			_ => {
				if other.as_f64() == Some(0.0) {
					return_error!(division_by_zero());
				}
				self.float_op("/", other, |l, r| l / r)
			}
		}
	}

	pub fn rem(&self, other: &Value) -> Result<Value> {
		match (self, other) {
			(Value::Int8(_), Value::Int8(0)) => return_error!(division_by_zero()),
			(Value::Int8(l), Value::Int8(r)) => match l.checked_rem(*r) {
				Some(v) => Ok(Value::Int8(v)),
				None => return_error!(integer_overflow("%")),
			},
			_ => {
				if other.as_f64() == Some(0.0) {
					return_error!(division_by_zero());
				}
				self.float_op("%", other, |l, r| l % r)
			}
		}
	}

	pub fn neg(&self) -> Result<Value> {
		match self {
			Value::Int8(v) => match v.checked_neg() {
				Some(v) => Ok(Value::Int8(v)),
				None => return_error!(integer_overflow("-")),
			},
			Value::Float8(v) => Ok(Value::float8(-v.value())),
			_ => return_error!(unary_not_applicable("-", self.kind())),
		}
	}

	pub fn not(&self) -> Result<Value> {
		match self {
			Value::Boolean(v) => Ok(Value::Boolean(!v)),
			_ => return_error!(unary_not_applicable("!", self.kind())),
		}
	}

	pub fn min_of(&self, other: &Value) -> Result<Value> {
		match self.compare(other) {
			Some(Ordering::Greater) => Ok(other.clone()),
			Some(_) => Ok(self.clone()),
			None => return_error!(operator_not_applicable("min", self.kind(), other.kind())),
		}
	}

	pub fn max_of(&self, other: &Value) -> Result<Value> {
		match self.compare(other) {
			Some(Ordering::Less) => Ok(other.clone()),
			Some(_) => Ok(self.clone()),
			None => return_error!(operator_not_applicable("max", self.kind(), other.kind())),
		}
	}

	fn float_op(&self, operator: &str, other: &Value, op: impl Fn(f64, f64) -> f64) -> Result<Value> {
		match (self.as_f64(), other.as_f64()) {
			(Some(l), Some(r)) => Ok(Value::float8(op(l, r))),
			_ => return_error!(operator_not_applicable(operator, self.kind(), other.kind())),
		}
	}
}
