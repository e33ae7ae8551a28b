// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strand_bytecode::Coefficient;
use strand_type::Result;

use crate::{
	function::{MapFunction, weigh},
	processor::pipes::{PipeStep, Step},
	traverser::Traverser,
};

pub(crate) struct MapStep {
	pub(super) input: Box<Step>,
	coefficient: Coefficient,
	label: Option<String>,
	function: MapFunction,
}

impl MapStep {
	pub(crate) fn new(input: Box<Step>, coefficient: Coefficient, label: Option<String>, function: MapFunction) -> Self {
		Self {
			input,
			coefficient,
			label,
			function,
		}
	}
}

impl PipeStep for MapStep {
	fn next(&mut self) -> Result<Option<Traverser>> {
		let Some(mut traverser) = self.input.next()? else {
			return Ok(None);
		};
		weigh(self.coefficient, &mut traverser);
		Ok(Some(self.function.apply(&traverser, self.label.as_deref())?))
	}

	fn reset(&mut self) {
		self.input.reset();
	}
}
