// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strand_bytecode::Coefficient;
use strand_type::Result;

use crate::{
	function::{ReduceFunction, weigh},
	processor::pipes::{PipeStep, Step},
	traverser::{Traverser, TraverserFactory},
};

/// Folds the whole upstream into a single traverser. Yields the seed when upstream is empty.
pub(crate) struct ReduceStep {
	pub(super) input: Box<Step>,
	coefficient: Coefficient,
	label: Option<String>,
	function: ReduceFunction,
	factory: TraverserFactory,
	done: bool,
}

impl ReduceStep {
	pub(crate) fn new(
		input: Box<Step>,
		coefficient: Coefficient,
		label: Option<String>,
		function: ReduceFunction,
		factory: TraverserFactory,
	) -> Self {
		Self {
			input,
			coefficient,
			label,
			function,
			factory,
			done: false,
		}
	}
}

impl PipeStep for ReduceStep {
	fn next(&mut self) -> Result<Option<Traverser>> {
		if self.done {
			return Ok(None);
		}

		let mut accumulator = self.function.seed();
		while let Some(mut traverser) = self.input.next()? {
			weigh(self.coefficient, &mut traverser);
			accumulator = self.function.fold(accumulator, &traverser)?;
		}
		self.done = true;

		Ok(Some(self.factory.create(accumulator, Coefficient::unity(), self.label.as_deref())))
	}

	fn reset(&mut self) {
		self.done = false;
		self.input.reset();
	}
}
