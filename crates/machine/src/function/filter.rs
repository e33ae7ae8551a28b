// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use strand_bytecode::Pred;
use strand_type::Result;

use super::Operand;
use crate::{Compilation, expression::Lambda, traverser::Traverser};

/// Decides whether a traverser survives. Never changes the traverser.
#[derive(Clone, Debug)]
pub enum FilterFunction {
	Compare(Pred, Operand),
	Lambda(Lambda),
	/// Passes when the traversal produces at least one result.
	Traversal(Box<Compilation>),
}

impl FilterFunction {
	pub fn test(&mut self, traverser: &Traverser) -> Result<bool> {
		match self {
			FilterFunction::Compare(pred, operand) => match operand.resolve(traverser)? {
				Some(value) => Ok(pred.test(traverser.object(), &value)),
				None => Ok(false),
			},
			FilterFunction::Lambda(lambda) => lambda.test(traverser.object()),
			FilterFunction::Traversal(compilation) => compilation.filter_traverser(traverser.clone()),
		}
	}
}

impl Display for FilterFunction {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			FilterFunction::Compare(pred, operand) => write!(f, "{} {}", pred, operand),
			FilterFunction::Lambda(lambda) => write!(f, "{}", lambda),
			FilterFunction::Traversal(compilation) => write!(f, "{}", compilation),
		}
	}
}

#[cfg(test)]
mod tests {
	use strand_bytecode::Coefficient;
	use strand_type::Value;

	use super::*;
	use crate::traverser::TraverserFactory;

	#[test]
	fn test_compare() {
		let mut filter = FilterFunction::Compare(Pred::Gte, Operand::Constant(Value::int8(3)));
		let factory = TraverserFactory::Object;
		assert!(filter.test(&factory.create(Value::int8(3), Coefficient::unity(), None)).unwrap());
		assert!(!filter.test(&factory.create(Value::int8(2), Coefficient::unity(), None)).unwrap());
	}

	#[test]
	fn test_lambda_does_not_mutate() {
		let mut filter = FilterFunction::Lambda(Lambda::parse("x -> x + 1 > 2").unwrap());
		let traverser = TraverserFactory::Object.create(Value::int8(2), Coefficient::unity(), None);
		assert!(filter.test(&traverser).unwrap());
		assert_eq!(traverser.object(), &Value::int8(2));
	}
}
