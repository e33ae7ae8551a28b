// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::VecDeque;

use strand_bytecode::Coefficient;
use strand_type::Result;

use crate::{
	function::{LoopOutputs, RepeatBranch, weigh},
	processor::pipes::{PipeStep, Step},
	traverser::Traverser,
};

/// Runs traversers through the loop body until the repeat routes them to its done output.
pub(crate) struct RepeatStep {
	pub(super) input: Box<Step>,
	coefficient: Coefficient,
	label: Option<String>,
	repeat: RepeatBranch,
	looped: VecDeque<Traverser>,
	done: VecDeque<Traverser>,
}

impl RepeatStep {
	pub(crate) fn new(input: Box<Step>, coefficient: Coefficient, label: Option<String>, repeat: RepeatBranch) -> Self {
		Self {
			input,
			coefficient,
			label,
			repeat,
			looped: VecDeque::new(),
			done: VecDeque::new(),
		}
	}
}

impl PipeStep for RepeatStep {
	fn next(&mut self) -> Result<Option<Traverser>> {
		loop {
			if let Some(mut traverser) = self.done.pop_front() {
				if let Some(label) = &self.label {
					traverser.add_label(label);
				}
				return Ok(Some(traverser));
			}

			if let Some(traverser) = self.looped.pop_front() {
				for result in self.repeat.body_mut().flat_map_traverser(traverser)? {
					let mut outputs = LoopOutputs {
						looped: &mut self.looped,
						done: &mut self.done,
					};
					self.repeat.process(result, false, &mut outputs)?;
				}
				continue;
			}

			let Some(mut traverser) = self.input.next()? else {
				return Ok(None);
			};
			weigh(self.coefficient, &mut traverser);
			let mut outputs = LoopOutputs {
				looped: &mut self.looped,
				done: &mut self.done,
			};
			self.repeat.process(traverser, true, &mut outputs)?;
		}
	}

	fn reset(&mut self) {
		self.looped.clear();
		self.done.clear();
		self.input.reset();
	}
}
