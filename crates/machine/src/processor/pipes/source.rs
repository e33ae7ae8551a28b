// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::VecDeque;

use strand_type::Result;

use crate::{processor::pipes::PipeStep, traverser::Traverser};

/// Head of every pipeline: the injected traversers followed by those added with `add_start`.
pub(crate) struct SourceStep {
	injected: Vec<Traverser>,
	starts: VecDeque<Traverser>,
}

impl SourceStep {
	pub(crate) fn new(injected: Vec<Traverser>) -> Self {
		Self {
			starts: injected.iter().cloned().collect(),
			injected,
		}
	}

	pub(crate) fn add(&mut self, traverser: Traverser) {
		self.starts.push_back(traverser);
	}
}

impl PipeStep for SourceStep {
	fn next(&mut self) -> Result<Option<Traverser>> {
		Ok(self.starts.pop_front())
	}

	fn reset(&mut self) {
		self.starts = self.injected.iter().cloned().collect();
	}
}
