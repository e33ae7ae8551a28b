// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use strand_bytecode::{Argument, Bytecode, Coefficient, Operator, Pred};
use strand_type::Result;

use crate::IntoArgument;

/// A comparison of the traverser object against an operand.
///
/// The operand is either a constant or a traversal evaluated per traverser, whose first result is
/// compared.
#[derive(Clone, Debug)]
pub struct P {
	pred: Pred,
	operand: Result<Argument>,
}

impl P {
	fn new(pred: Pred, operand: impl IntoArgument) -> Self {
		Self {
			pred,
			operand: operand.into_argument(),
		}
	}

	pub fn eq(operand: impl IntoArgument) -> Self {
		Self::new(Pred::Eq, operand)
	}

	pub fn neq(operand: impl IntoArgument) -> Self {
		Self::new(Pred::Neq, operand)
	}

	pub fn lt(operand: impl IntoArgument) -> Self {
		Self::new(Pred::Lt, operand)
	}

	pub fn lte(operand: impl IntoArgument) -> Self {
		Self::new(Pred::Lte, operand)
	}

	pub fn gt(operand: impl IntoArgument) -> Self {
		Self::new(Pred::Gt, operand)
	}

	pub fn gte(operand: impl IntoArgument) -> Self {
		Self::new(Pred::Gte, operand)
	}

	pub fn pred(&self) -> Pred {
		self.pred
	}

	/// The `[pred, operand]` argument pair of a filter instruction.
	pub(crate) fn into_arguments(self) -> Result<[Argument; 2]> {
		Ok([self.pred.as_str().into(), self.operand?])
	}

	pub(crate) fn into_filter(self) -> Result<Bytecode> {
		let mut bytecode = Bytecode::new();
		bytecode.add_instruction(Coefficient::unity(), Operator::Filter, self.into_arguments()?);
		Ok(bytecode)
	}
}

impl Display for P {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match &self.operand {
			Ok(operand) => write!(f, "{}({})", self.pred, operand),
			Err(_) => write!(f, "{}(?)", self.pred),
		}
	}
}

#[cfg(test)]
mod tests {
	use strand_type::Value;

	use super::*;

	#[test]
	fn test_filter_arguments() {
		let [pred, operand] = P::gte(3).into_arguments().unwrap();
		assert_eq!(pred, Argument::from("gte"));
		assert_eq!(operand, Argument::Value(Value::int8(3)));
	}

	#[test]
	fn test_display() {
		assert_eq!(P::neq("a").to_string(), "neq(\"a\")");
	}
}
