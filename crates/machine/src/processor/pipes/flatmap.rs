// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::VecDeque;

use strand_bytecode::Coefficient;
use strand_type::Result;

use crate::{
	function::{FlatMapFunction, weigh},
	processor::pipes::{PipeStep, Step},
	traverser::Traverser,
};

pub(crate) struct FlatMapStep {
	pub(super) input: Box<Step>,
	coefficient: Coefficient,
	label: Option<String>,
	function: FlatMapFunction,
	buffer: VecDeque<Traverser>,
}

impl FlatMapStep {
	pub(crate) fn new(
		input: Box<Step>,
		coefficient: Coefficient,
		label: Option<String>,
		function: FlatMapFunction,
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

impl PipeStep for FlatMapStep {
	fn next(&mut self) -> Result<Option<Traverser>> {
		loop {
			if let Some(traverser) = self.buffer.pop_front() {
				return Ok(Some(traverser));
			}
			let Some(mut traverser) = self.input.next()? else {
				return Ok(None);
			};
			weigh(self.coefficient, &mut traverser);
			self.buffer.extend(self.function.apply(&traverser, self.label.as_deref())?);
		}
	}

	fn reset(&mut self) {
		self.buffer.clear();
		self.input.reset();
	}
}
