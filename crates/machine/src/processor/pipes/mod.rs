// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Pull-based backend: one step per function, each pulling single traversers from the step
//! before it.

mod barrier;
mod branch;
mod filter;
mod flatmap;
mod map;
mod reduce;
mod repeat;
mod source;

use barrier::BarrierStep;
use branch::BranchStep;
use filter::FilterStep;
use flatmap::FlatMapStep;
use map::MapStep;
use reduce::ReduceStep;
use repeat::RepeatStep;
use source::SourceStep;
use strand_type::{Result, error::diagnostic::iterator::exhausted, return_error};

use crate::{
	function::{Function, FunctionKind},
	processor::Processor,
	traverser::{Traverser, TraverserFactory},
};

/// A step of the pipeline following the iterator pattern.
pub(crate) trait PipeStep {
	/// The next traverser, `None` once the step is exhausted.
	fn next(&mut self) -> Result<Option<Traverser>>;

	/// Forgets all iteration state of this step and the steps before it.
	fn reset(&mut self);
}

pub(crate) enum Step {
	Source(SourceStep),
	Map(MapStep),
	Filter(FilterStep),
	FlatMap(FlatMapStep),
	Reduce(ReduceStep),
	Barrier(BarrierStep),
	Branch(BranchStep),
	Repeat(RepeatStep),
}

impl Step {
	fn build(input: Box<Step>, function: Function, factory: TraverserFactory) -> Step {
		let Function {
			coefficient,
			label,
			kind,
		} = function;

		match kind {
			FunctionKind::Map(function) => Step::Map(MapStep::new(input, coefficient, label, function)),
			FunctionKind::Filter(function) => Step::Filter(FilterStep::new(input, coefficient, label, function)),
			FunctionKind::FlatMap(function) => Step::FlatMap(FlatMapStep::new(input, coefficient, label, function)),
			FunctionKind::Reduce(function) => {
				Step::Reduce(ReduceStep::new(input, coefficient, label, function, factory))
			}
			FunctionKind::Barrier(function) => {
				Step::Barrier(BarrierStep::new(input, coefficient, label, function, factory))
			}
			FunctionKind::Branch(function) => Step::Branch(BranchStep::new(input, coefficient, label, function)),
			FunctionKind::Repeat(function) => Step::Repeat(RepeatStep::new(input, coefficient, label, function)),
		}
	}

	fn source_mut(&mut self) -> &mut SourceStep {
		match self {
			Step::Source(step) => step,
			Step::Map(step) => step.input.source_mut(),
			Step::Filter(step) => step.input.source_mut(),
			Step::FlatMap(step) => step.input.source_mut(),
			Step::Reduce(step) => step.input.source_mut(),
			Step::Barrier(step) => step.input.source_mut(),
			Step::Branch(step) => step.input.source_mut(),
			Step::Repeat(step) => step.input.source_mut(),
		}
	}
}

impl PipeStep for Box<Step> {
	fn next(&mut self) -> Result<Option<Traverser>> {
		(**self).next()
	}

	fn reset(&mut self) {
		(**self).reset()
	}
}

impl PipeStep for Step {
	fn next(&mut self) -> Result<Option<Traverser>> {
		match self {
			Step::Source(step) => step.next(),
			Step::Map(step) => step.next(),
			Step::Filter(step) => step.next(),
			Step::FlatMap(step) => step.next(),
			Step::Reduce(step) => step.next(),
			Step::Barrier(step) => step.next(),
			Step::Branch(step) => step.next(),
			Step::Repeat(step) => step.next(),
		}
	}

	fn reset(&mut self) {
		match self {
			Step::Source(step) => step.reset(),
			Step::Map(step) => step.reset(),
			Step::Filter(step) => step.reset(),
			Step::FlatMap(step) => step.reset(),
			Step::Reduce(step) => step.reset(),
			Step::Barrier(step) => step.reset(),
			Step::Branch(step) => step.reset(),
			Step::Repeat(step) => step.reset(),
		}
	}
}

pub struct Pipes {
	last: Box<Step>,
	peeked: Option<Traverser>,
}

impl Pipes {
	pub fn new(functions: Vec<Function>, starts: Vec<Traverser>, factory: TraverserFactory) -> Self {
		let mut last = Box::new(Step::Source(SourceStep::new(starts)));
		for function in functions {
			last = Box::new(Step::build(last, function, factory));
		}
		Self {
			last,
			peeked: None,
		}
	}
}

impl Processor for Pipes {
	fn has_next(&mut self) -> Result<bool> {
		if self.peeked.is_none() {
			self.peeked = self.last.next()?;
		}
		Ok(self.peeked.is_some())
	}

	fn next(&mut self) -> Result<Traverser> {
		if let Some(traverser) = self.peeked.take() {
			return Ok(traverser);
		}
		match self.last.next()? {
			Some(traverser) => Ok(traverser),
			None => return_error!(exhausted()),
		}
	}

	fn add_start(&mut self, traverser: Traverser) {
		self.last.source_mut().add(traverser);
	}

	fn reset(&mut self) {
		self.peeked = None;
		self.last.reset();
	}
}
