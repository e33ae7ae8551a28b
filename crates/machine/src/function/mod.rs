// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Compiled step functions. Both processor backends execute the same functions.

mod barrier;
mod branch;
mod filter;
mod flatmap;
mod map;
mod reduce;
mod repeat;

use std::fmt::{Display, Formatter};

pub use barrier::{BarrierFunction, BarrierValue};
pub use branch::BranchFunction;
pub use filter::FilterFunction;
pub use flatmap::{FlatMapFunction, JoinFunction, JoinKind};
pub use map::MapFunction;
pub use reduce::ReduceFunction;
pub use repeat::{CheckKind, LoopCheck, LoopCondition, LoopLocation, LoopOutputs, Output, OutputReceiver, RepeatBranch};
use strand_bytecode::Coefficient;
use strand_type::{Result, Value};

use crate::{Compilation, traverser::Traverser};

/// A compiled step instruction.
#[derive(Clone, Debug)]
pub struct Function {
	pub coefficient: Coefficient,
	pub label: Option<String>,
	pub kind: FunctionKind,
}

#[derive(Clone, Debug)]
pub enum FunctionKind {
	Map(MapFunction),
	Filter(FilterFunction),
	FlatMap(FlatMapFunction),
	Reduce(ReduceFunction),
	Barrier(BarrierFunction),
	Branch(BranchFunction),
	Repeat(RepeatBranch),
}

impl FunctionKind {
	pub fn name(&self) -> &'static str {
		match self {
			FunctionKind::Map(_) => "map",
			FunctionKind::Filter(_) => "filter",
			FunctionKind::FlatMap(_) => "flatmap",
			FunctionKind::Reduce(_) => "reduce",
			FunctionKind::Barrier(_) => "barrier",
			FunctionKind::Branch(_) => "branch",
			FunctionKind::Repeat(_) => "repeat",
		}
	}
}

/// Multiplies the instruction coefficient into a traverser entering its step.
pub(crate) fn weigh(coefficient: Coefficient, traverser: &mut Traverser) {
	if !coefficient.is_unity() {
		traverser.coefficient_mut().multiply(coefficient);
	}
}

/// The right-hand side of a comparison or a dictionary lookup.
#[derive(Clone, Debug)]
pub enum Operand {
	Constant(Value),
	Traversal(Box<Compilation>),
}

impl Operand {
	/// `None` when the operand traversal produces nothing for `traverser`.
	pub fn resolve(&mut self, traverser: &Traverser) -> Result<Option<Value>> {
		match self {
			Operand::Constant(value) => Ok(Some(value.clone())),
			Operand::Traversal(compilation) => {
				Ok(compilation.map_traverser(traverser.clone())?.map(Traverser::into_object))
			}
		}
	}
}

impl Display for Operand {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Operand::Constant(Value::Utf8(text)) => write!(f, "{:?}", text),
			Operand::Constant(value) => write!(f, "{}", value),
			Operand::Traversal(compilation) => write!(f, "{}", compilation),
		}
	}
}

impl Display for Function {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if !self.coefficient.is_unity() {
			write!(f, "{}*", self.coefficient)?;
		}
		match &self.kind {
			FunctionKind::Map(function) => write!(f, "map({})", function)?,
			FunctionKind::Filter(function) => write!(f, "filter({})", function)?,
			FunctionKind::FlatMap(function) => write!(f, "flatmap({})", function)?,
			FunctionKind::Reduce(function) => write!(f, "reduce({})", function)?,
			FunctionKind::Barrier(function) => write!(f, "barrier({})", function)?,
			FunctionKind::Branch(function) => write!(f, "branch({})", function)?,
			FunctionKind::Repeat(function) => write!(f, "repeat({})", function)?,
		}
		if let Some(label) = &self.label {
			write!(f, "@{}", label)?;
		}
		Ok(())
	}
}
