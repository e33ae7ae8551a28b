// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::VecDeque;

use strand_bytecode::Coefficient;
use strand_type::Result;
use tracing::{instrument, trace};

use crate::{
	barrier::{Barrier, InMemoryBarrier},
	function::{BarrierFunction, BarrierValue, weigh},
	processor::pipes::{PipeStep, Step},
	traverser::{Traverser, TraverserFactory},
};

/// Consumes the entire upstream before yielding anything.
pub(crate) struct BarrierStep {
	pub(super) input: Box<Step>,
	coefficient: Coefficient,
	label: Option<String>,
	function: BarrierFunction,
	factory: TraverserFactory,
	barrier: InMemoryBarrier<BarrierValue>,
	output: VecDeque<Traverser>,
	done: bool,
}

impl BarrierStep {
	pub(crate) fn new(
		input: Box<Step>,
		coefficient: Coefficient,
		label: Option<String>,
		function: BarrierFunction,
		factory: TraverserFactory,
	) -> Self {
		let barrier = InMemoryBarrier::new(function.initial_value());
		Self {
			input,
			coefficient,
			label,
			function,
			factory,
			barrier,
			output: VecDeque::new(),
			done: false,
		}
	}

	#[instrument(name = "machine::pipes::barrier::drain", level = "trace", skip_all)]
	fn drain(&mut self) -> Result<()> {
		let mut consumed = 0usize;
		while let Some(mut traverser) = self.input.next()? {
			weigh(self.coefficient, &mut traverser);
			let accumulator = self.barrier.take();
			self.barrier.update(self.function.apply(traverser, accumulator)?);
			consumed += 1;
		}

		let value = self.barrier.take();
		if self.function.returns_traversers() {
			for mut traverser in self.function.traversers(value) {
				if let Some(label) = &self.label {
					traverser.add_label(label);
				}
				self.output.push_back(traverser);
			}
		} else {
			for object in self.function.values(value) {
				self.output.push_back(self.factory.create(object, Coefficient::unity(), self.label.as_deref()));
			}
		}

		trace!(consumed, produced = self.output.len(), "barrier drained");
		self.done = true;
		Ok(())
	}
}

impl PipeStep for BarrierStep {
	fn next(&mut self) -> Result<Option<Traverser>> {
		if !self.done {
			self.drain()?;
		}
		Ok(self.output.pop_front())
	}

	fn reset(&mut self) {
		self.barrier.reset();
		self.output.clear();
		self.done = false;
		self.input.reset();
	}
}
