// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::VecDeque;

use strand_bytecode::Coefficient;
use strand_type::Result;
use tracing::trace;

use crate::{
	barrier::{Barrier, InMemoryBarrier},
	function::{BarrierFunction, Function, FunctionKind, LoopOutputs, RepeatBranch, weigh},
	traverser::{Traverser, TraverserFactory},
};

/// One function applied to a whole batch of traversers.
pub(super) struct Operator {
	function: Function,
	factory: TraverserFactory,
}

impl Operator {
	pub(super) fn new(function: Function, factory: TraverserFactory) -> Self {
		Self {
			function,
			factory,
		}
	}

	pub(super) fn name(&self) -> &'static str {
		self.function.kind.name()
	}

	/// Whether the operator emits a traverser for an empty batch.
	pub(super) fn is_generator(&self) -> bool {
		matches!(self.function.kind, FunctionKind::Reduce(_))
	}

	pub(super) fn run(&mut self, mut batch: Vec<Traverser>) -> Result<Vec<Traverser>> {
		let Function {
			coefficient,
			label,
			kind,
		} = &mut self.function;
		let label = label.as_deref();

		for traverser in &mut batch {
			weigh(*coefficient, traverser);
		}

		match kind {
			FunctionKind::Map(function) => {
				batch.iter().map(|traverser| function.apply(traverser, label)).collect()
			}
			FunctionKind::Filter(function) => {
				let mut result = Vec::with_capacity(batch.len());
				for mut traverser in batch {
					if function.test(&traverser)? {
						if let Some(label) = label {
							traverser.add_label(label);
						}
						result.push(traverser);
					}
				}
				Ok(result)
			}
			FunctionKind::FlatMap(function) => {
				let mut result = Vec::new();
				for traverser in &batch {
					result.extend(function.apply(traverser, label)?);
				}
				Ok(result)
			}
			FunctionKind::Reduce(function) => {
				let mut accumulator = function.seed();
				for traverser in &batch {
					accumulator = function.fold(accumulator, traverser)?;
				}
				Ok(vec![self.factory.create(accumulator, Coefficient::unity(), label)])
			}
			FunctionKind::Barrier(function) => aggregate(function, batch, label, self.factory),
			FunctionKind::Branch(function) => {
				let mut result = Vec::new();
				for traverser in &batch {
					result.extend(function.apply(traverser)?);
				}
				if let Some(label) = label {
					result.iter_mut().for_each(|traverser| traverser.add_label(label));
				}
				Ok(result)
			}
			FunctionKind::Repeat(repeat) => {
				let mut result = iterate(repeat, batch)?;
				if let Some(label) = label {
					result.iter_mut().for_each(|traverser| traverser.add_label(label));
				}
				Ok(result)
			}
		}
	}
}

fn aggregate(
	function: &mut BarrierFunction,
	batch: Vec<Traverser>,
	label: Option<&str>,
	factory: TraverserFactory,
) -> Result<Vec<Traverser>> {
	let mut barrier = InMemoryBarrier::new(function.initial_value());
	for traverser in batch {
		let accumulator = barrier.take();
		barrier.update(function.apply(traverser, accumulator)?);
	}

	let value = barrier.take();
	if function.returns_traversers() {
		let mut result = function.traversers(value);
		if let Some(label) = label {
			result.iter_mut().for_each(|traverser| traverser.add_label(label));
		}
		return Ok(result);
	}
	Ok(function.values(value).into_iter().map(|object| factory.create(object, Coefficient::unity(), label)).collect())
}

/// Runs the loop body round by round until no traverser is routed back into it.
fn iterate(repeat: &mut RepeatBranch, batch: Vec<Traverser>) -> Result<Vec<Traverser>> {
	let mut looped = VecDeque::new();
	let mut done = VecDeque::new();

	for traverser in batch {
		repeat.process(
			traverser,
			true,
			&mut LoopOutputs {
				looped: &mut looped,
				done: &mut done,
			},
		)?;
	}

	let mut round = 0usize;
	while !looped.is_empty() {
		round += 1;
		trace!(round, traversers = looped.len(), "loop round");
		let current: Vec<Traverser> = looped.drain(..).collect();
		for traverser in current {
			for result in repeat.body_mut().flat_map_traverser(traverser)? {
				repeat.process(
					result,
					false,
					&mut LoopOutputs {
						looped: &mut looped,
						done: &mut done,
					},
				)?;
			}
		}
	}

	Ok(done.into())
}
