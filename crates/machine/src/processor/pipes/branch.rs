// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::VecDeque;

use strand_bytecode::Coefficient;
use strand_type::Result;

use crate::{
	function::{BranchFunction, weigh},
	processor::pipes::{PipeStep, Step},
	traverser::Traverser,
};

pub(crate) struct BranchStep {
	pub(super) input: Box<Step>,
	coefficient: Coefficient,
	label: Option<String>,
	function: BranchFunction,
	buffer: VecDeque<Traverser>,
}

impl BranchStep {
	pub(crate) fn new(
		input: Box<Step>,
		coefficient: Coefficient,
		label: Option<String>,
		function: BranchFunction,
	) -> Self {
		Self {
			input,
			coefficient,
			label,
			function,
			buffer: VecDeque::new(),
		}
	}
}

impl PipeStep for BranchStep {
	fn next(&mut self) -> Result<Option<Traverser>> {
		loop {
			if let Some(mut traverser) = self.buffer.pop_front() {
				if let Some(label) = &self.label {
					traverser.add_label(label);
				}
				return Ok(Some(traverser));
			}
			let Some(mut traverser) = self.input.next()? else {
				return Ok(None);
			};
			weigh(self.coefficient, &mut traverser);
			self.buffer.extend(self.function.apply(&traverser)?);
		}
	}

	fn reset(&mut self) {
		self.buffer.clear();
		self.input.reset();
	}
}
