// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strand_bytecode::{Argument, Bytecode, Coefficient, Instruction, Operator, Token};
use strand_type::{Result, Value, error, error::diagnostic::traversal::locked};
use tracing::debug;

use super::Traversal;
use crate::{IntoArgument, P};

impl Traversal {
	/// Applies `build` to the bytecode unless the traversal is locked or already failed.
	fn append(mut self, operator: &str, build: impl FnOnce(&mut Bytecode) -> Result<()>) -> Self {
		if self.error.is_some() {
			return self;
		}
		if self.is_locked() {
			debug!(operator, "traversal modified after it was locked");
			self.error = Some(error!(locked(operator)));
			return self;
		}
		if let Err(err) = build(&mut self.bytecode) {
			self.error = Some(err);
		}
		self
	}

	fn push(self, operator: Operator, arguments: impl FnOnce() -> Result<Vec<Argument>>) -> Self {
		self.append(operator.as_str(), |bytecode| {
			bytecode.add_instruction(Coefficient::unity(), operator, arguments()?);
			Ok(())
		})
	}

	/// Adds a `(token, argument)` pair to the trailing repeat instruction, or starts a new one.
	///
	/// A `repeat` marker only joins a repeat instruction which has no body yet, so consecutive
	/// loops stay separate instructions.
	fn push_loop_marker(self, token: Token, argument: impl IntoArgument) -> Self {
		self.append(token.as_str(), |bytecode| {
			let argument = argument.into_argument()?;
			let joins = bytecode.last_instruction().is_some_and(|last| {
				last.operator == Operator::Repeat && (token != Token::Repeat || !has_body(last))
			});

			if joins {
				let last = bytecode.last_instruction_mut()?;
				last.add_arg(token);
				last.add_arg(argument);
			} else {
				bytecode.add_instruction(Coefficient::unity(), Operator::Repeat, [token.into(), argument]);
			}
			Ok(())
		})
	}

	/// Labels the last step, making its object addressable by `path_labels`.
	pub fn as_(self, label: &str) -> Self {
		self.append("as", |bytecode| bytecode.last_instruction_mut()?.add_label(label))
	}

	pub fn barrier(self) -> Self {
		self.push(Operator::Barrier, || Ok(vec![]))
	}

	/// Adds an argument to the last step, e.g. the key function of `group_count`.
	pub fn by(self, function: impl IntoArgument) -> Self {
		self.append("by", |bytecode| {
			let argument = function.into_argument()?;
			bytecode.last_instruction_mut()?.add_arg(argument);
			Ok(())
		})
	}

	/// Sets the coefficient of the last step. Every traverser passing it is weighted by `count`.
	pub fn c(self, count: u64) -> Self {
		self.append("c", |bytecode| {
			bytecode.last_instruction_mut()?.coefficient = Coefficient::new(count);
			Ok(())
		})
	}

	/// Sends each traverser into `then` if `guard` produces a result for it, drops it otherwise.
	pub fn choose(self, guard: impl IntoArgument, then: impl IntoArgument) -> Self {
		self.push(Operator::Branch, || Ok(vec![guard.into_argument()?, then.into_argument()?]))
	}

	pub fn choose_or(self, guard: impl IntoArgument, then: impl IntoArgument, otherwise: impl IntoArgument) -> Self {
		self.push(Operator::Branch, || {
			Ok(vec![guard.into_argument()?, then.into_argument()?, Token::Default.into(), otherwise.into_argument()?])
		})
	}

	pub fn constant(self, value: impl Into<Value>) -> Self {
		self.push(Operator::Map, || Ok(vec![Argument::Value(value.into())]))
	}

	pub fn count(self) -> Self {
		self.push(Operator::Map, || Ok(vec!["traverser::count".into()])).sum()
	}

	/// Emits every traverser leaving the loop body in addition to the loop result.
	pub fn emit(self) -> Self {
		self.push_loop_marker(Token::Emit, true)
	}

	pub fn emit_when(self, condition: impl IntoArgument) -> Self {
		self.push_loop_marker(Token::Emit, condition)
	}

	/// Replaces the result with a description of the compiled pipeline. Must be the last step.
	pub fn explain(self) -> Self {
		self.push(Operator::Explain, || Ok(vec![]))
	}

	pub fn filter(self, predicate: impl IntoArgument) -> Self {
		self.push(Operator::Filter, || Ok(vec![predicate.into_argument()?]))
	}

	pub fn flat_map(self, function: impl IntoArgument) -> Self {
		self.push(Operator::FlatMap, || Ok(vec![function.into_argument()?]))
	}

	/// Counts traversers per object, or per key when followed by `by`.
	pub fn group_count(self) -> Self {
		self.push(Operator::GroupCount, || Ok(vec![]))
	}

	/// Keeps dictionaries whose entry under `key` equals `value`.
	pub fn has(self, key: impl IntoArgument, value: impl IntoArgument) -> Self {
		self.push(Operator::Filter, || {
			let mut condition = Bytecode::new();
			condition.add_instruction(Coefficient::unity(), Operator::Map, ["dictionary::get".into(), key.into_argument()?]);
			condition.add_instruction(Coefficient::unity(), Operator::Filter, ["eq".into(), value.into_argument()?]);
			Ok(vec![Argument::Bytecode(condition)])
		})
	}

	/// Keeps dictionaries with an entry under `key`.
	pub fn has_key(self, key: impl IntoArgument) -> Self {
		self.push(Operator::Filter, || {
			let mut condition = Bytecode::new();
			condition.add_instruction(Coefficient::unity(), Operator::FlatMap, ["dictionary::keys".into()]);
			condition.add_instruction(Coefficient::unity(), Operator::Filter, ["eq".into(), key.into_argument()?]);
			Ok(vec![Argument::Bytecode(condition)])
		})
	}

	pub fn identity(self) -> Self {
		self.push(Operator::Map, || Ok(vec!["traverser::object".into()]))
	}

	pub fn incr(self) -> Self {
		self.push(Operator::Incr, || Ok(vec![]))
	}

	pub fn is(self, value: impl IntoArgument) -> Self {
		self.is_p(P::eq(value))
	}

	pub fn is_p(self, predicate: P) -> Self {
		self.push(Operator::Filter, || Ok(Vec::from(predicate.into_arguments()?)))
	}

	/// Merges each dictionary with the dictionaries of `other` sharing a key with it.
	pub fn join(self, kind: Token, other: impl IntoArgument) -> Self {
		self.push(Operator::Join, || Ok(vec![kind.into(), other.into_argument()?]))
	}

	/// The pass counter of the innermost loop.
	pub fn loops(self) -> Self {
		self.push(Operator::Map, || Ok(vec!["traverser::loops".into()]))
	}

	pub fn map(self, function: impl IntoArgument) -> Self {
		self.push(Operator::Map, || Ok(vec![function.into_argument()?]))
	}

	pub fn path(self) -> Self {
		self.push(Operator::Path, || Ok(vec![]))
	}

	/// The objects of the steps labelled with `labels`, in that order.
	pub fn path_labels<'a>(self, labels: impl IntoIterator<Item = &'a str>) -> Self {
		self.push(Operator::Path, || Ok(labels.into_iter().map(Argument::from).collect()))
	}

	pub fn repeat(self, body: impl IntoArgument) -> Self {
		self.push_loop_marker(Token::Repeat, body)
	}

	pub fn sum(self) -> Self {
		self.push(Operator::Reduce, || Ok(vec!["sum".into(), 0i64.into()]))
	}

	/// Leaves the loop after `times` body passes.
	pub fn times(self, times: u32) -> Self {
		self.push_loop_marker(Token::Until, Value::int8(times))
	}

	pub fn unfold(self) -> Self {
		self.push(Operator::FlatMap, || Ok(vec!["traverser::object".into()]))
	}

	/// Sends a clone of each traverser into every one of `traversals`.
	pub fn union(self, traversals: impl IntoIterator<Item = Traversal>) -> Self {
		self.push(Operator::Branch, || {
			let mut arguments = Vec::new();
			for traversal in traversals {
				arguments.push(Token::Default.into());
				arguments.push(traversal.into_argument()?);
			}
			Ok(arguments)
		})
	}

	pub fn until(self, condition: impl IntoArgument) -> Self {
		self.push_loop_marker(Token::Until, condition)
	}
}

fn has_body(instruction: &Instruction) -> bool {
	instruction.arguments.chunks(2).any(|pair| pair[0] == Argument::Token(Token::Repeat))
}

#[cfg(test)]
mod tests {
	use strand_machine::MachineConfig;

	use super::*;

	fn traversal() -> Traversal {
		Traversal::new(Bytecode::new(), MachineConfig::new())
	}

	#[test]
	fn test_loop_markers_join_trailing_repeat() {
		let traversal = traversal().repeat("x -> x + 1").times(3).emit();
		let bytecode = traversal.bytecode();
		assert_eq!(bytecode.len(), 1);
		assert_eq!(bytecode.to_string(), "[repeat(repeat, \"x -> x + 1\", until, 3, emit, true)]");
	}

	#[test]
	fn test_loop_markers_before_body() {
		let traversal = traversal().times(2).repeat("x -> x + 1");
		assert_eq!(traversal.bytecode().to_string(), "[repeat(until, 2, repeat, \"x -> x + 1\")]");
	}

	#[test]
	fn test_consecutive_loops_stay_separate() {
		let traversal = traversal().repeat("x -> x + 1").times(2).repeat("x -> x * 2").times(3);
		assert_eq!(traversal.bytecode().len(), 2);
	}

	#[test]
	fn test_count_is_map_and_reduce() {
		let traversal = traversal().count();
		assert_eq!(traversal.bytecode().to_string(), "[map(\"traverser::count\"), reduce(\"sum\", 0)]");
	}

	#[test]
	fn test_label_without_step_is_deferred() {
		let traversal = traversal().as_("a");
		assert_eq!(traversal.into_bytecode().unwrap_err().code, "BYTECODE_001");
	}

	#[test]
	fn test_coefficient_applies_to_last_step() {
		let traversal = traversal().identity().c(3);
		assert_eq!(traversal.bytecode().last_instruction().unwrap().coefficient, Coefficient::new(3));
	}
}
