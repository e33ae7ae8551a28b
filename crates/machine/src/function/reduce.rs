// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use strand_bytecode::Oper;
use strand_type::{Result, Value};

use crate::traverser::Traverser;

/// Folds every traverser into a single value, starting from a seed.
#[derive(Clone, Debug)]
pub struct ReduceFunction {
	pub oper: Oper,
	pub seed: Value,
}

impl ReduceFunction {
	pub fn new(oper: Oper, seed: Value) -> Self {
		Self {
			oper,
			seed,
		}
	}

	pub fn seed(&self) -> Value {
		self.seed.clone()
	}

	/// Folds `traverser` into `accumulator`, once per copy the traverser stands for.
	pub fn fold(&self, accumulator: Value, traverser: &Traverser) -> Result<Value> {
		let object = traverser.object();
		let count = traverser.coefficient().count();
		match self.oper {
			Oper::Sum if count > 1 => {
				let count = i64::try_from(count).unwrap_or(i64::MAX);
				accumulator.add(&object.mul(&Value::Int8(count))?)
			}
			Oper::Mult if count > 1 => accumulator.mul(&object.pow(count)?),
			Oper::Min | Oper::Max if accumulator.is_undefined() => Ok(object.clone()),
			oper => oper.apply(&accumulator, object),
		}
	}
}

impl Display for ReduceFunction {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}, {}", self.oper, self.seed)
	}
}

#[cfg(test)]
mod tests {
	use strand_bytecode::Coefficient;

	use super::*;
	use crate::traverser::TraverserFactory;

	fn traverser(value: i64, count: u64) -> Traverser {
		TraverserFactory::Object.create(Value::int8(value), Coefficient::new(count), None)
	}

	#[test]
	fn test_sum_is_weighted() {
		let sum = ReduceFunction::new(Oper::Sum, Value::int8(0));
		let result = sum.fold(sum.seed(), &traverser(5, 3)).unwrap();
		let result = sum.fold(result, &traverser(1, 1)).unwrap();
		assert_eq!(result, Value::int8(16));
	}

	#[test]
	fn test_mult_is_weighted() {
		let mult = ReduceFunction::new(Oper::Mult, Value::int8(1));
		assert_eq!(mult.fold(mult.seed(), &traverser(2, 3)).unwrap(), Value::int8(8));
	}

	#[test]
	fn test_mult_with_large_coefficient() {
		let mult = ReduceFunction::new(Oper::Mult, Value::int8(1));
		let count = 1_000_000_000_000;
		assert_eq!(mult.fold(mult.seed(), &traverser(1, count)).unwrap(), Value::int8(1));
		assert_eq!(mult.fold(mult.seed(), &traverser(-1, count + 1)).unwrap(), Value::int8(-1));
		assert_eq!(mult.fold(mult.seed(), &traverser(0, u64::MAX)).unwrap(), Value::int8(0));
		assert_eq!(mult.fold(mult.seed(), &traverser(2, count)).unwrap_err().code, "EVALUATE_005");
	}

	#[test]
	fn test_min_from_undefined_seed() {
		let min = ReduceFunction::new(Oper::Min, Value::Undefined);
		let result = min.fold(min.seed(), &traverser(5, 1)).unwrap();
		let result = min.fold(result, &traverser(2, 1)).unwrap();
		assert_eq!(result, Value::int8(2));
	}
}
