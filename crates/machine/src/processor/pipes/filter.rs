// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strand_bytecode::Coefficient;
use strand_type::Result;

use crate::{
	function::{FilterFunction, weigh},
	processor::pipes::{PipeStep, Step},
	traverser::Traverser,
};

pub(crate) struct FilterStep {
	pub(super) input: Box<Step>,
	coefficient: Coefficient,
	label: Option<String>,
	function: FilterFunction,
}

impl FilterStep {
	pub(crate) fn new(
		input: Box<Step>,
		coefficient: Coefficient,
		label: Option<String>,
		function: FilterFunction,
	) -> Self {
		Self {
			input,
			coefficient,
			label,
			function,
		}
	}
}

impl PipeStep for FilterStep {
	fn next(&mut self) -> Result<Option<Traverser>> {
		while let Some(mut traverser) = self.input.next()? {
			weigh(self.coefficient, &mut traverser);
			if self.function.test(&traverser)? {
				if let Some(label) = &self.label {
					traverser.add_label(label);
				}
				return Ok(Some(traverser));
			}
		}
		Ok(None)
	}

	fn reset(&mut self) {
		self.input.reset();
	}
}
