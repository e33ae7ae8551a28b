// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	collections::VecDeque,
	fmt::{Display, Formatter},
};

use strand_type::{Result, error::diagnostic::repeat::loop_limit_exceeded, return_error};
use tracing::{instrument, trace};

use crate::{
	Compilation,
	expression::Lambda,
	traverser::{LoopId, Traverser},
};

/// Where a loop check sits relative to the loop body.
///
/// Checks written before the body run every time a traverser is about to enter the body,
/// including the first time. Checks written after the body only run on traversers coming back
/// out of it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LoopLocation {
	BeforeFirst = 1,
	BeforeSecond = 2,
	AfterFirst = 3,
	AfterSecond = 4,
}

impl LoopLocation {
	pub fn is_before(&self) -> bool {
		matches!(self, LoopLocation::BeforeFirst | LoopLocation::BeforeSecond)
	}

	pub fn before(index: usize) -> Option<Self> {
		match index {
			0 => Some(LoopLocation::BeforeFirst),
			1 => Some(LoopLocation::BeforeSecond),
			_ => None,
		}
	}

	pub fn after(index: usize) -> Option<Self> {
		match index {
			0 => Some(LoopLocation::AfterFirst),
			1 => Some(LoopLocation::AfterSecond),
			_ => None,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckKind {
	/// Satisfied: the traverser leaves the loop.
	Until,
	/// Satisfied: a copy of the traverser leaves the loop, the traverser keeps looping.
	Emit,
}

#[derive(Clone, Debug)]
pub enum LoopCondition {
	Always,
	/// Loop counter reached `n`.
	Times(u32),
	Lambda(Lambda),
	Traversal(Box<Compilation>),
}

impl LoopCondition {
	fn test(&mut self, id: LoopId, traverser: &Traverser) -> Result<bool> {
		match self {
			LoopCondition::Always => Ok(true),
			LoopCondition::Times(n) => Ok(traverser.loops(id) >= *n),
			LoopCondition::Lambda(lambda) => lambda.test(traverser.object()),
			LoopCondition::Traversal(compilation) => compilation.filter_traverser(traverser.clone()),
		}
	}
}

#[derive(Clone, Debug)]
pub struct LoopCheck {
	pub location: LoopLocation,
	pub kind: CheckKind,
	pub condition: LoopCondition,
}

/// The two named outputs of a repeat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Output {
	/// Feed back into the loop body.
	Loop,
	/// Leave the loop towards the rest of the pipeline.
	Done,
}

pub trait OutputReceiver {
	fn output(&mut self, output: Output, traverser: Traverser);
}

pub struct LoopOutputs<'a> {
	pub looped: &'a mut VecDeque<Traverser>,
	pub done: &'a mut VecDeque<Traverser>,
}

impl OutputReceiver for LoopOutputs<'_> {
	fn output(&mut self, output: Output, traverser: Traverser) {
		match output {
			Output::Loop => self.looped.push_back(traverser),
			Output::Done => self.done.push_back(traverser),
		}
	}
}

#[derive(Clone, Debug)]
pub struct RepeatBranch {
	id: LoopId,
	body: Box<Compilation>,
	checks: Vec<LoopCheck>,
	loop_limit: Option<u32>,
}

impl RepeatBranch {
	pub fn new(id: LoopId, body: Compilation, mut checks: Vec<LoopCheck>, loop_limit: Option<u32>) -> Self {
		checks.sort_by_key(|check| check.location);
		Self {
			id,
			body: Box::new(body),
			checks,
			loop_limit,
		}
	}

	pub fn id(&self) -> LoopId {
		self.id
	}

	pub fn body_mut(&mut self) -> &mut Compilation {
		&mut self.body
	}

	pub fn checks(&self) -> &[LoopCheck] {
		&self.checks
	}

	/// Routes a traverser to [`Output::Loop`] or [`Output::Done`]. `first` is set for traversers
	/// arriving from upstream, unset for traversers coming out of the body.
	#[instrument(name = "machine::repeat::process", level = "trace", skip_all, fields(loop_id = %self.id, first))]
	pub fn process(&mut self, traverser: Traverser, first: bool, out: &mut impl OutputReceiver) -> Result<()> {
		let id = self.id;
		let phases: &[bool] = if first {
			&[true]
		} else {
			&[false, true]
		};

		for before in phases {
			for check in self.checks.iter_mut().filter(|check| check.location.is_before() == *before) {
				if !check.condition.test(id, &traverser)? {
					continue;
				}
				match check.kind {
					CheckKind::Until => {
						trace!(location = ?check.location, "until satisfied");
						out.output(Output::Done, exit(id, traverser));
						return Ok(());
					}
					CheckKind::Emit => {
						trace!(location = ?check.location, "emit satisfied");
						out.output(Output::Done, exit(id, traverser.clone()));
					}
				}
			}
		}

		let mut traverser = traverser;
		traverser.incr_loops(id);
		if let Some(limit) = self.loop_limit {
			if traverser.loops(id) > limit {
				return_error!(loop_limit_exceeded(limit));
			}
		}
		out.output(Output::Loop, traverser);
		Ok(())
	}
}

fn exit(id: LoopId, mut traverser: Traverser) -> Traverser {
	traverser.reset_loops(id);
	traverser
}

impl Display for RepeatBranch {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let mut body_written = false;
		for check in &self.checks {
			if !check.location.is_before() && !body_written {
				write!(f, "{} ", self.body)?;
				body_written = true;
			}
			let kind = match check.kind {
				CheckKind::Until => "until",
				CheckKind::Emit => "emit",
			};
			match &check.condition {
				LoopCondition::Always => write!(f, "{} ", kind)?,
				LoopCondition::Times(n) => write!(f, "{} loops >= {} ", kind, n)?,
				LoopCondition::Lambda(lambda) => write!(f, "{} {} ", kind, lambda)?,
				LoopCondition::Traversal(compilation) => write!(f, "{} {} ", kind, compilation)?,
			}
		}
		if !body_written {
			write!(f, "{} ", self.body)?;
		}
		write!(f, "as {}", self.id)
	}
}

#[cfg(test)]
mod tests {
	use strand_bytecode::{Bytecode, Coefficient, Operator};
	use strand_type::Value;

	use super::*;
	use crate::traverser::TraverserFactory;

	fn body() -> Compilation {
		let mut bytecode = Bytecode::new();
		bytecode.add_instruction(Coefficient::unity(), Operator::Map, ["x -> x + 1".into()]);
		Compilation::compile(bytecode).unwrap()
	}

	fn check(location: LoopLocation, kind: CheckKind, condition: LoopCondition) -> LoopCheck {
		LoopCheck {
			location,
			kind,
			condition,
		}
	}

	fn route(repeat: &mut RepeatBranch, traverser: Traverser, first: bool) -> (Vec<Traverser>, Vec<Traverser>) {
		let mut looped = VecDeque::new();
		let mut done = VecDeque::new();
		repeat
			.process(
				traverser,
				first,
				&mut LoopOutputs {
					looped: &mut looped,
					done: &mut done,
				},
			)
			.unwrap();
		(looped.into(), done.into())
	}

	fn start(value: i64) -> Traverser {
		TraverserFactory::Object.create(Value::int8(value), Coefficient::unity(), None)
	}

	#[test]
	fn test_first_pass_without_before_check_loops() {
		let until = check(LoopLocation::AfterFirst, CheckKind::Until, LoopCondition::Always);
		let mut repeat = RepeatBranch::new(LoopId(0), body(), vec![until], None);

		let (looped, done) = route(&mut repeat, start(0), true);
		assert_eq!(looped.len(), 1);
		assert_eq!(looped[0].loops(LoopId(0)), 1);
		assert!(done.is_empty());
	}

	#[test]
	fn test_until_before_body_with_zero_times() {
		let until = check(LoopLocation::BeforeFirst, CheckKind::Until, LoopCondition::Times(0));
		let mut repeat = RepeatBranch::new(LoopId(0), body(), vec![until], None);

		let (looped, done) = route(&mut repeat, start(0), true);
		assert!(looped.is_empty());
		assert_eq!(done.len(), 1);
	}

	#[test]
	fn test_emit_copies_and_keeps_looping() {
		let emit = check(LoopLocation::AfterFirst, CheckKind::Emit, LoopCondition::Always);
		let until = check(LoopLocation::AfterSecond, CheckKind::Until, LoopCondition::Times(3));
		let mut repeat = RepeatBranch::new(LoopId(0), body(), vec![until, emit], None);

		let (looped, _) = route(&mut repeat, start(0), true);
		let (looped, done) = route(&mut repeat, looped.into_iter().next().unwrap(), false);
		assert_eq!(looped.len(), 1);
		assert_eq!(done.len(), 1);
		// copies leaving the loop drop its counter
		assert_eq!(done[0].loops(LoopId(0)), 0);
		assert_eq!(looped[0].loops(LoopId(0)), 2);
	}

	#[test]
	fn test_until_wins_over_later_emit() {
		let until = check(LoopLocation::AfterFirst, CheckKind::Until, LoopCondition::Always);
		let emit = check(LoopLocation::AfterSecond, CheckKind::Emit, LoopCondition::Always);
		let mut repeat = RepeatBranch::new(LoopId(0), body(), vec![until, emit], None);

		let (looped, done) = route(&mut repeat, start(1), false);
		assert!(looped.is_empty());
		assert_eq!(done.len(), 1);
	}

	#[test]
	fn test_loop_limit() {
		let emit = check(LoopLocation::AfterFirst, CheckKind::Emit, LoopCondition::Always);
		let mut repeat = RepeatBranch::new(LoopId(0), body(), vec![emit], Some(1));

		let (looped, _) = route(&mut repeat, start(0), true);
		let mut looped_out = VecDeque::new();
		let mut done = VecDeque::new();
		let err = repeat
			.process(
				looped.into_iter().next().unwrap(),
				false,
				&mut LoopOutputs {
					looped: &mut looped_out,
					done: &mut done,
				},
			)
			.unwrap_err();
		assert_eq!(err.code, "REPEAT_002");
	}
}
